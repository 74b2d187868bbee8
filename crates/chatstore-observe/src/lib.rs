//! Logging and trace export setup for Chatstore.

pub mod tracing_setup;
