//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - One YAML file per session on disk
//! - **InMemorySessionStore** - Process-local map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSessionStore, InMemorySessionStore};
//!
//! // Persistent: file-based storage
//! let store = FileSessionStore::new("./data/sessions");
//!
//! // Ephemeral: in-memory storage, evicting sessions idle for an hour
//! let store = InMemorySessionStore::with_idle_timeout(Duration::from_secs(3600));
//! ```

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
