//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, state machine trait, errors)
//! - `dialogue` - Session record, conversation state machine, report and reply rendering

pub mod dialogue;
pub mod foundation;
