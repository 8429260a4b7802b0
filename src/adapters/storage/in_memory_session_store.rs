//! In-Memory Session Store Adapter
//!
//! Keeps dialogue sessions in a process-local map. Sessions are lost on
//! restart; suited to development, tests, and single-instance deployments.
//!
//! With an idle timeout, every write drops sessions whose `updated_at` is
//! older than the timeout, so abandoned conversations do not accumulate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::dialogue::Session;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for dialogue sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    idle_timeout: Option<Duration>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store that never evicts
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that evicts sessions idle for longer than `idle_timeout`
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            idle_timeout: Some(idle_timeout),
            ..Self::default()
        }
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions idle at `now`; returns how many were removed.
    async fn prune_idle_at(&self, now: Timestamp) -> usize {
        let Some(idle_timeout) = self.idle_timeout else {
            return 0;
        };
        let max_idle_secs = i64::try_from(idle_timeout.as_secs()).unwrap_or(i64::MAX);

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now.seconds_since(session.updated_at()) <= max_idle_secs);
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = sessions.len(), "Pruned idle sessions");
        }
        pruned
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: SessionId) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn set(&self, session_id: SessionId, session: &Session) -> Result<(), SessionStoreError> {
        self.prune_idle_at(Timestamp::now()).await;
        self.sessions
            .write()
            .await
            .insert(session_id, session.clone());
        Ok(())
    }

    async fn clear(&self, session_id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(&session_id);
        Ok(())
    }
}
