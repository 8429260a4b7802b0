//! Dialogue-specific error types.
//!
//! Every variant is recovered inside the engine: the session snapshot is
//! left untouched and the user gets a re-prompt for the pending question.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// The piece of user input being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Name,
    Age,
    SymptomSelection,
    Days,
    YesNoAnswer,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputField::Name => "name",
            InputField::Age => "age",
            InputField::SymptomSelection => "symptom selection",
            InputField::Days => "days",
            InputField::YesNoAnswer => "yes/no answer",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised while applying a message to a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialogueError {
    /// Malformed input: too-short name, non-numeric value, or not yes/no.
    #[error("Invalid {field}: '{input}'")]
    Validation { field: InputField, input: String },

    /// Free-text symptom matched nothing in the vocabulary.
    #[error("No symptom matches '{input}'")]
    NoMatch { input: String },

    /// Menu index outside `[0, len)`.
    #[error("Selection {index} is outside 0..{len}")]
    SelectionOutOfRange { index: i64, len: usize },

    /// The engine attempted an edge the state machine does not allow.
    #[error("Invalid transition: {0}")]
    InvalidTransition(#[from] ValidationError),

    /// A field required by the current state was never recorded.
    #[error("Session is missing {missing}")]
    IncompleteSession { missing: &'static str },
}

impl DialogueError {
    pub fn validation(field: InputField, input: impl Into<String>) -> Self {
        DialogueError::Validation {
            field,
            input: input.into(),
        }
    }

    pub fn no_match(input: impl Into<String>) -> Self {
        DialogueError::NoMatch {
            input: input.into(),
        }
    }

    pub fn incomplete(missing: &'static str) -> Self {
        DialogueError::IncompleteSession { missing }
    }

    /// True for errors caused by user input rather than an engine defect.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DialogueError::Validation { .. }
                | DialogueError::NoMatch { .. }
                | DialogueError::SelectionOutOfRange { .. }
        )
    }
}
