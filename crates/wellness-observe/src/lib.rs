//! Logging setup for the wellness service.

pub mod tracing_setup;
