//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each incoming request maps to exactly one command handler.

pub mod handlers;

pub use handlers::{
    HandleMessageCommand, HandleMessageHandler, HandleMessageResult, StartSessionCommand,
    StartSessionHandler, StartSessionResult,
};
