//! Parsing of raw user messages into typed answers.
//!
//! Every parser is fallible and pure; a failure maps straight to a
//! re-prompt and never touches the session.

use super::errors::{DialogueError, InputField};

/// Command that restarts a closed session.
pub const START_COMMAND: &str = "start";

/// Accepts a name of at least `min_length` characters after trimming.
pub fn parse_name(message: &str, min_length: usize) -> Result<String, DialogueError> {
    let name = message.trim();
    if name.is_empty() || name.chars().count() < min_length {
        return Err(DialogueError::validation(InputField::Name, name));
    }
    Ok(name.to_string())
}

/// Accepts a signed whole number, surrounding whitespace allowed.
pub fn parse_integer(message: &str, field: InputField) -> Result<i64, DialogueError> {
    let trimmed = message.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| DialogueError::validation(field, trimmed))
}

/// Accepts "yes" or "no" in any letter case.
pub fn parse_yes_no(message: &str) -> Result<bool, DialogueError> {
    match message.trim().to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(DialogueError::validation(InputField::YesNoAnswer, other)),
    }
}

/// True if the message is the restart command, in any letter case.
pub fn is_start_command(message: &str) -> bool {
    message.trim().eq_ignore_ascii_case(START_COMMAND)
}
