//! HTTP adapter for the chat endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse};
pub use handlers::DialogueAppState;
pub use routes::{dialogue_app, dialogue_router};
