//! HTTP/REST API layer for Chatstore.
//!
//! Axum-based REST API at `/api/v1/` with API key authentication, per-client
//! rate limiting and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod rate_limit;
pub mod router;
