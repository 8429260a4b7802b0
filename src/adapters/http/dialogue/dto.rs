//! HTTP DTOs for the chat endpoints.

use serde::{Deserialize, Serialize};

/// Body of `POST /get_response`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    /// The user's message. Missing means empty, which the dialogue re-prompts.
    #[serde(default)]
    pub message: String,
}

/// Reply to every chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

impl ChatResponse {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
