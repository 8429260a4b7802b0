//! HandleMessageHandler - Command handler for one user message.
//!
//! Loads the caller's session (or begins a fresh one), runs a single engine
//! turn, and persists the resulting snapshot before answering.

use std::sync::Arc;

use crate::domain::dialogue::{DialogueEngine, DialogueState, Session};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command carrying one message from the client.
#[derive(Debug, Clone)]
pub struct HandleMessageCommand {
    /// Session the client presented, if any.
    pub session_id: Option<SessionId>,
    pub message: String,
}

/// Result of handling a message.
#[derive(Debug, Clone)]
pub struct HandleMessageResult {
    /// Session the reply belongs to. Differs from the command's when a fresh
    /// session had to be started.
    pub session_id: SessionId,
    pub state: DialogueState,
    pub reply: String,
    pub started_new_session: bool,
}

/// Handler for incoming chat messages.
pub struct HandleMessageHandler {
    store: Arc<dyn SessionStore>,
    engine: Arc<DialogueEngine>,
}

impl HandleMessageHandler {
    pub fn new(store: Arc<dyn SessionStore>, engine: Arc<DialogueEngine>) -> Self {
        Self { store, engine }
    }

    pub async fn handle(
        &self,
        cmd: HandleMessageCommand,
    ) -> Result<HandleMessageResult, SessionStoreError> {
        // 1. Resolve the session; unknown or missing ids start over
        let existing = match cmd.session_id {
            Some(id) => self.store.get(id).await?.map(|session| (id, session)),
            None => None,
        };
        let started_new_session = existing.is_none();
        let (session_id, session) = existing.unwrap_or_else(|| {
            let id = SessionId::new();
            tracing::info!(session_id = %id, "No stored session, starting a new one");
            (id, Session::new())
        });

        // 2. Run one turn on a snapshot
        tracing::debug!(session_id = %session_id, message = %cmd.message, "Handling message");
        let turn = self.engine.handle(&session, &cmd.message);

        // 3. Persist the new snapshot
        self.store.set(session_id, &turn.session).await?;
        if turn.session.state().is_closed() && !session.state().is_closed() {
            tracing::info!(session_id = %session_id, "Conversation concluded");
        }

        Ok(HandleMessageResult {
            session_id,
            state: turn.session.state(),
            reply: turn.reply,
            started_new_session,
        })
    }
}
