//! Classification of client errors into [`LlmError`].
//!
//! Gemini's compatibility endpoint reports failures either as a JSON error
//! body (surfaced as `ApiError`, with the Google status such as
//! `RESOURCE_EXHAUSTED` in `type` or `code`) or as a bare HTTP status.

use async_openai::error::{ApiError, OpenAIError};

use wellness_types::llm::LlmError;

const AUTH_MARKERS: &[&str] = &[
    "authentication_error",
    "invalid_api_key",
    "PERMISSION_DENIED",
    "UNAUTHENTICATED",
    "401",
    "403",
];
const RATE_LIMIT_MARKERS: &[&str] = &[
    "rate_limit_exceeded",
    "rate_limit_error",
    "RESOURCE_EXHAUSTED",
    "429",
];
const OVERLOAD_MARKERS: &[&str] = &["overloaded_error", "server_error", "UNAVAILABLE", "503"];

pub(crate) fn map_openai_error(err: OpenAIError) -> LlmError {
    match err {
        OpenAIError::ApiError(api) => classify_api_error(api),
        OpenAIError::Reqwest(ref http) => match http.status().map(|s| s.as_u16()) {
            Some(401 | 403) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited,
            Some(503 | 529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, body) => {
            LlmError::Deserialization(format!("unexpected response body: {body}"))
        }
        OpenAIError::StreamError(stream) => LlmError::Stream(stream.to_string()),
        OpenAIError::InvalidArgument(message) => LlmError::InvalidRequest(message),
        other => LlmError::Provider {
            message: other.to_string(),
        },
    }
}

fn classify_api_error(api: ApiError) -> LlmError {
    let tags = [api.code.as_deref(), api.r#type.as_deref()];
    let has = |markers: &[&str]| tags.iter().flatten().any(|tag| markers.contains(tag));

    if has(AUTH_MARKERS) || api.message.contains("API key not valid") {
        LlmError::AuthenticationFailed
    } else if has(RATE_LIMIT_MARKERS) {
        LlmError::RateLimited
    } else if has(OVERLOAD_MARKERS) {
        LlmError::Overloaded(api.message)
    } else {
        LlmError::Provider {
            message: api.message,
        }
    }
}
