//! Pattern-based SymptomMatcher.
//!
//! Spaces in the user's text become underscores, then the text is searched
//! case-insensitively inside every vocabulary entry. "skin" therefore
//! matches both `skin_rash` and `skin_peeling`; "Skin Rash" matches only
//! `skin_rash`.

use regex::RegexBuilder;

use crate::domain::foundation::SymptomId;
use crate::ports::SymptomMatcher;

#[derive(Debug, Clone, Copy, Default)]
pub struct PatternSymptomMatcher;

impl PatternSymptomMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl SymptomMatcher for PatternSymptomMatcher {
    fn find_matches(&self, text: &str, vocabulary: &[SymptomId]) -> Vec<SymptomId> {
        let needle = text.split_whitespace().collect::<Vec<_>>().join("_");
        if needle.is_empty() {
            return Vec::new();
        }

        let pattern = match RegexBuilder::new(&regex::escape(&needle))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!("Could not build symptom pattern from '{}': {}", needle, e);
                return Vec::new();
            }
        };

        let mut matches: Vec<SymptomId> = Vec::new();
        for symptom in vocabulary {
            if pattern.is_match(symptom.as_str()) && !matches.contains(symptom) {
                matches.push(symptom.clone());
            }
        }
        matches
    }
}
