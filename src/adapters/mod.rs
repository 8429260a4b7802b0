//! Adapters - implementations of ports and the HTTP surface.
//!
//! - `http` - axum routes for the chat endpoints
//! - `knowledge` - reference classifier and symptom matcher
//! - `storage` - session store backends

pub mod http;
pub mod knowledge;
pub mod storage;
