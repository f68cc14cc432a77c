//! Infrastructure implementations for the wellness service.
//!
//! Implements the provider port from `wellness-core` against an
//! OpenAI-compatible HTTP API and loads service configuration from disk and
//! the environment.

pub mod config;
pub mod llm;
