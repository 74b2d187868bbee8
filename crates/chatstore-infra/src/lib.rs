//! Infrastructure layer for Chatstore.
//!
//! Implements the repository traits defined in `chatstore-core` on SQLite,
//! verifies the shared API key and loads the layered server configuration.

pub mod auth;
pub mod config;
pub mod sqlite;
