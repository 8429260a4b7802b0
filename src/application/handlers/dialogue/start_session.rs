//! StartSessionHandler - Command handler for (re)starting a conversation.

use std::sync::Arc;

use crate::domain::dialogue::{ResponseFormatter, Session};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to start a conversation from scratch.
///
/// `previous` is the session the client was bound to, if any; it is cleared
/// before the fresh session is stored.
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand {
    pub previous: Option<SessionId>,
}

/// Result of starting a conversation.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    pub session: Session,
    pub greeting: String,
}

/// Handler for starting conversations.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: StartSessionCommand,
    ) -> Result<StartSessionResult, SessionStoreError> {
        if let Some(previous) = cmd.previous {
            self.store.clear(previous).await?;
            tracing::debug!(session_id = %previous, "Cleared previous session");
        }

        let session_id = SessionId::new();
        let session = Session::new();
        self.store.set(session_id, &session).await?;

        tracing::info!(session_id = %session_id, "Started new session");

        Ok(StartSessionResult {
            session_id,
            session,
            greeting: ResponseFormatter::greeting(),
        })
    }
}
