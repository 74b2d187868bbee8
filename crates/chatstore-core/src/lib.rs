//! Business logic and repository trait definitions for Chatstore.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements, the session/message services built on them, pagination
//! arithmetic, credential grants and the request limiter. It depends only on
//! `chatstore-types` -- never on `chatstore-infra` or any database/IO crate.

pub mod access;
pub mod pagination;
pub mod repository;
pub mod service;
pub mod throttle;
