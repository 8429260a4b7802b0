//! Knowledge Adapters
//!
//! Reference implementations of the classifier-facing ports.
//!
//! - **KnowledgeBase** - YAML disease profiles implementing `DiagnosisOracle`
//! - **PatternSymptomMatcher** - case-insensitive pattern search implementing `SymptomMatcher`
//!
//! ## Usage
//!
//! ```ignore
//! let knowledge = Arc::new(KnowledgeBase::load("data/knowledge.yaml").await?);
//! let engine = DialogueEngine::new(knowledge, Arc::new(PatternSymptomMatcher::new()));
//! ```

mod knowledge_base;
mod pattern_matcher;

pub use knowledge_base::{KnowledgeBase, KnowledgeBaseError};
pub use pattern_matcher::PatternSymptomMatcher;
