//! Session Store Port - Interface for persisting dialogue sessions.
//!
//! The engine treats storage as opaque: a session is looked up by the
//! client's session id, replaced wholesale after each turn, and cleared on
//! restart. Backends decide where the snapshot lives.

use async_trait::async_trait;

use crate::domain::dialogue::Session;
use crate::domain::foundation::SessionId;

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Failed to serialize session: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize session: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for persisting and loading dialogue sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the session for a client.
    ///
    /// # Returns
    /// `None` if the client has no stored session yet
    async fn get(&self, session_id: SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Replace the stored session with a complete new snapshot.
    async fn set(&self, session_id: SessionId, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the stored session. Clearing an unknown id is not an error.
    async fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError>;
}
