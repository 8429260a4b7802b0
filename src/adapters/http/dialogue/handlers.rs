//! HTTP handlers for the chat endpoints.
//!
//! Both endpoints always answer 200; the conversation reports its own
//! failures in the reply text. The client is identified by a session cookie.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::dialogue::{
    HandleMessageCommand, HandleMessageHandler, StartSessionCommand, StartSessionHandler,
};
use crate::domain::dialogue::{DialogueEngine, ResponseFormatter};
use crate::domain::foundation::SessionId;
use crate::ports::SessionStore;

use super::dto::{ChatRequest, ChatResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the chat endpoints.
#[derive(Clone)]
pub struct DialogueAppState {
    pub session_store: Arc<dyn SessionStore>,
    pub engine: Arc<DialogueEngine>,
    pub cookie_name: Arc<str>,
}

impl DialogueAppState {
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        engine: Arc<DialogueEngine>,
        cookie_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            session_store,
            engine,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.session_store.clone())
    }

    pub fn handle_message_handler(&self) -> HandleMessageHandler {
        HandleMessageHandler::new(self.session_store.clone(), self.engine.clone())
    }

    fn session_from(&self, headers: &HeaderMap) -> Option<SessionId> {
        session_cookie(headers, &self.cookie_name)
    }

    fn set_cookie(&self, session_id: SessionId) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, session_id
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Start a fresh conversation and greet the user.
pub async fn start_conversation(
    State(state): State<DialogueAppState>,
    headers: HeaderMap,
) -> Response {
    let cmd = StartSessionCommand {
        previous: state.session_from(&headers),
    };

    let session_id = match state.start_session_handler().handle(cmd).await {
        Ok(result) => result.session_id,
        Err(e) => {
            // An unstored id makes the next message start over cleanly
            tracing::error!(error = %e, "Failed to store new session");
            SessionId::new()
        }
    };

    (
        StatusCode::OK,
        [(SET_COOKIE, state.set_cookie(session_id))],
        Json(ChatResponse::new(ResponseFormatter::greeting())),
    )
        .into_response()
}

/// POST /get_response - Apply one message to the caller's conversation.
pub async fn get_response(
    State(state): State<DialogueAppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable chat request, treating as empty message");
            ChatRequest::default()
        }
    };

    let cmd = HandleMessageCommand {
        session_id: state.session_from(&headers),
        message: request.message,
    };

    match state.handle_message_handler().handle(cmd).await {
        Ok(result) if result.started_new_session => (
            StatusCode::OK,
            [(SET_COOKIE, state.set_cookie(result.session_id))],
            Json(ChatResponse::new(result.reply)),
        )
            .into_response(),
        Ok(result) => (StatusCode::OK, Json(ChatResponse::new(result.reply))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Session storage failed while handling message");
            (
                StatusCode::OK,
                Json(ChatResponse::new(ResponseFormatter::internal_error())),
            )
                .into_response()
        }
    }
}

/// Finds the session id in the request's cookies.
///
/// Malformed ids are treated as absent.
fn session_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_named_cookie_among_others() {
        let id = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; session_id={}; lang=en", id)).unwrap(),
        );

        assert_eq!(session_cookie(&headers, "session_id"), Some(id));
    }

    #[test]
    fn reads_cookie_from_second_header() {
        let id = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            COOKIE,
            HeaderValue::from_str(&format!("session_id={}", id)).unwrap(),
        );

        assert_eq!(session_cookie(&headers, "session_id"), Some(id));
    }

    #[test]
    fn malformed_session_cookie_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session_id=not-a-uuid"));

        assert_eq!(session_cookie(&headers, "session_id"), None);
    }

    #[test]
    fn missing_cookie_is_absent() {
        assert_eq!(session_cookie(&HeaderMap::new(), "session_id"), None);
    }
}
