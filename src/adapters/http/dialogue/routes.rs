//! Axum router for the chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{get_response, start_conversation, DialogueAppState};

/// Create the chat router.
///
/// # Routes
/// - `GET /` - Start a fresh conversation, returns the greeting
/// - `POST /get_response` - Apply one message, returns the bot's reply
pub fn dialogue_router() -> Router<DialogueAppState> {
    Router::new()
        .route("/", get(start_conversation))
        .route("/get_response", post(get_response))
}

/// The served application: routes, state, and request tracing.
///
/// No layer here may answer on the handlers' behalf; every request runs to
/// completion and gets a 200 reply.
pub fn dialogue_app(state: DialogueAppState) -> Router {
    dialogue_router()
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
