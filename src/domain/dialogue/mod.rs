//! Dialogue module - the diagnostic conversation.
//!
//! A [`Session`] records everything collected so far; the [`DialogueEngine`]
//! applies one user message to it and returns the next snapshot together
//! with the reply rendered by [`ResponseFormatter`].

mod engine;
mod errors;
mod formatter;
mod input;
mod report;
mod session;
mod state;

pub use engine::{DialogueEngine, DialogueSettings, Turn};
pub use errors::{DialogueError, InputField};
pub use formatter::ResponseFormatter;
pub use input::START_COMMAND;
pub use report::{DiagnosisReport, DiseaseFinding, ReportBasis, MISSING_DESCRIPTION};
pub use session::Session;
pub use state::DialogueState;
