//! Agent definitions and pipeline roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named model configuration that provider calls are dispatched through.
///
/// Built once at start-up and shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Agent identity (e.g. "SentimentAgent").
    pub name: String,
    /// Model identifier sent to the provider (e.g. "gemini-2.0-flash").
    pub model: String,
    /// System instruction for every turn of this agent.
    pub instruction: String,
}

impl AgentDefinition {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            instruction: instruction.into(),
        }
    }
}

/// The three fixed stages of the wellness pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Sentiment,
    Safety,
    Responder,
}

impl AgentRole {
    /// Session line this role uses for a logical conversation.
    ///
    /// Sentiment and safety get their own suffixed lines; the responder
    /// shares the bare conversation id.
    pub fn session_line(&self, session_id: &str) -> String {
        match self {
            AgentRole::Sentiment => format!("{session_id}_sentiment"),
            AgentRole::Safety => format!("{session_id}_safety"),
            AgentRole::Responder => session_id.to_string(),
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentRole::Sentiment => write!(f, "sentiment"),
            AgentRole::Safety => write!(f, "safety"),
            AgentRole::Responder => write!(f, "responder"),
        }
    }
}
