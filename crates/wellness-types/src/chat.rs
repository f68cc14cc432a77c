//! Chat request/response shapes exchanged over HTTP.

use serde::{Deserialize, Serialize};

/// Session id used when a request does not name one.
pub const DEFAULT_SESSION_ID: &str = "default";

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

/// Combined output of the three pipeline stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Main responder reply.
    pub response: String,
    /// Sentiment agent output, verbatim.
    pub sentiment: String,
    /// Safety agent output, verbatim.
    pub safety: String,
}

/// Crisis-risk marker the safety agent is instructed to emit.
///
/// The marker is free text and never enforced; [`EscalationMarker::parse`]
/// is a best-effort reading used for diagnostics only.
pub struct EscalationMarker;

impl EscalationMarker {
    const PREFIX: &'static str = "ESCALATE:";

    /// Read `ESCALATE: TRUE` / `ESCALATE: FALSE` out of free text.
    ///
    /// Returns `None` when no recognizable marker is present.
    pub fn parse(text: &str) -> Option<bool> {
        let upper = text.to_uppercase();
        let start = upper.find(Self::PREFIX)? + Self::PREFIX.len();
        let value = upper[start..].trim_start();
        if value.starts_with("TRUE") {
            Some(true)
        } else if value.starts_with("FALSE") {
            Some(false)
        } else {
            None
        }
    }
}
