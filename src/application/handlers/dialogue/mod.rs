//! Dialogue command handlers.

mod handle_message;
mod start_session;

pub use handle_message::{HandleMessageCommand, HandleMessageHandler, HandleMessageResult};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
