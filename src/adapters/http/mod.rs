//! HTTP adapters - the chat API.

pub mod dialogue;

pub use dialogue::{dialogue_app, dialogue_router, DialogueAppState};
