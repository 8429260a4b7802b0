//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialogue domain and the outside world. Adapters implement these ports.
//!
//! - `DiagnosisOracle` - Symptom vocabulary, prediction, and disease metadata
//! - `SymptomMatcher` - Free-text to canonical symptom resolution
//! - `SessionStore` - Per-client session persistence

mod diagnosis_oracle;
mod session_store;
mod symptom_matcher;

pub use diagnosis_oracle::{DiagnosisOracle, OracleError};
pub use session_store::{SessionStore, SessionStoreError};
pub use symptom_matcher::SymptomMatcher;
