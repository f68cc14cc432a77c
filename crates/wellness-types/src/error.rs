use thiserror::Error;

use crate::agent::AgentRole;
use crate::llm::LlmError;

/// A pipeline stage failed; later stages were not run.
///
/// Displays as the underlying provider error so callers can surface it
/// verbatim.
#[derive(Debug, Clone, Error)]
#[error("{source}")]
pub struct PipelineError {
    /// Stage that raised the error.
    pub stage: AgentRole,
    #[source]
    pub source: LlmError,
}

impl PipelineError {
    pub fn new(stage: AgentRole, source: LlmError) -> Self {
        Self { stage, source }
    }
}

/// Errors from loading service configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
