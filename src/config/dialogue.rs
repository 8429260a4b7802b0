//! Dialogue behaviour configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::dialogue::DialogueSettings;

/// Dialogue configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// How many vocabulary symptoms to ask about when the preliminary
    /// disease has no known related symptoms
    #[serde(default = "default_fallback_question_limit")]
    pub fallback_question_limit: usize,

    /// Shortest accepted name, in characters
    #[serde(default = "default_min_name_length")]
    pub min_name_length: usize,
}

impl DialogueConfig {
    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fallback_question_limit == 0 {
            return Err(ValidationError::InvalidFallbackLimit);
        }
        if self.min_name_length == 0 {
            return Err(ValidationError::InvalidMinNameLength);
        }
        Ok(())
    }

    pub fn settings(&self) -> DialogueSettings {
        DialogueSettings {
            fallback_question_limit: self.fallback_question_limit,
            min_name_length: self.min_name_length,
        }
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            fallback_question_limit: default_fallback_question_limit(),
            min_name_length: default_min_name_length(),
        }
    }
}

fn default_fallback_question_limit() -> usize {
    DialogueSettings::default().fallback_question_limit
}

fn default_min_name_length() -> usize {
    DialogueSettings::default().min_name_length
}
