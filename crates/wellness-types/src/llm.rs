//! Provider-facing types: turns, responses, stream events, and errors.

use serde::{Deserialize, Serialize};

/// Who said a message in a session's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry of a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// A single agent turn as sent to the provider.
///
/// `messages` is the session history followed by the new user message;
/// `system` carries the agent instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub system: Option<String>,
    pub max_tokens: u32,
    pub stream: bool,
}

/// A non-streaming provider reply.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    ContentFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Incremental events of a streamed reply.
///
/// A reply is any number of `TextDelta`s closed by a `MessageDelta`. A turn
/// that the provider splits into several response messages yields one
/// `MessageDelta` per message; the stream always ends with `Done`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    Connected,
    TextDelta { text: String },
    MessageDelta { stop_reason: StopReason },
    Usage(Usage),
    Done,
}

/// Errors from model provider calls.
///
/// Display strings are surfaced to HTTP clients verbatim, so `Provider`
/// shows the upstream message unadorned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("{message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("stream error: {0}")]
    Stream(String),

    #[error("rate limited")]
    RateLimited,

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// What a provider supports.
#[derive(Debug, Clone)]
pub struct ProviderCapabilities {
    /// `stream` is preferred over `complete` when set.
    pub streaming: bool,
    /// Upper bound on `CompletionRequest::max_tokens`.
    pub max_output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        assert_eq!(Message::user("hi").role, MessageRole::User);
        assert_eq!(Message::assistant("hello").role, MessageRole::Assistant);
    }

    #[test]
    fn test_stream_event_tagging() {
        let json = serde_json::to_value(StreamEvent::MessageDelta {
            stop_reason: StopReason::MaxTokens,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "message_delta", "stop_reason": "max_tokens"})
        );
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::RateLimited;
        assert_eq!(err.to_string(), "rate limited");

        let err = LlmError::Provider {
            message: "quota exhausted".to_string(),
        };
        assert_eq!(err.to_string(), "quota exhausted");

        assert_eq!(
            LlmError::AuthenticationFailed.to_string(),
            "authentication failed"
        );
    }
}
