//! Shared domain types for Chatstore.
//!
//! Sessions, messages, paging envelopes, configuration and the error types
//! shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod message;
pub mod page;
pub mod session;
