//! Application handlers.
//!
//! Command handlers that orchestrate the dialogue engine and session storage.

pub mod dialogue;

pub use dialogue::{
    HandleMessageCommand, HandleMessageHandler, HandleMessageResult, StartSessionCommand,
    StartSessionHandler, StartSessionResult,
};
