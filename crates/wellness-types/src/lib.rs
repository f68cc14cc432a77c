//! Shared domain types for the wellness agent service.
//!
//! Agent definitions, chat request/response shapes, LLM request and stream
//! types, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
