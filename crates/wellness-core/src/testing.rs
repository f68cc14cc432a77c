//! Scripted in-memory provider for tests.
//!
//! Replies are keyed by the request's system prompt, so one provider can
//! stand in for every agent of the pipeline. Every request is recorded.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use wellness_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason,
    StreamEvent, Usage,
};

use crate::llm::provider::{EventStream, LlmProvider};

/// Shared log of requests seen by a [`ScriptedProvider`].
pub type CallLog = Arc<Mutex<Vec<CompletionRequest>>>;

pub struct ScriptedProvider {
    capabilities: ProviderCapabilities,
    replies: HashMap<String, Result<String, LlmError>>,
    calls: CallLog,
}

impl ScriptedProvider {
    /// A streaming provider with no scripted replies.
    pub fn new() -> Self {
        Self {
            capabilities: ProviderCapabilities {
                streaming: true,
                max_output_tokens: 4_096,
            },
            replies: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve replies through `complete` instead of `stream`.
    pub fn without_streaming(mut self) -> Self {
        self.capabilities.streaming = false;
        self
    }

    /// Reply with `text` whenever the system prompt equals `system`.
    pub fn reply(mut self, system: &str, text: &str) -> Self {
        self.replies.insert(system.to_string(), Ok(text.to_string()));
        self
    }

    /// Fail with `error` whenever the system prompt equals `system`.
    pub fn fail(mut self, system: &str, error: LlmError) -> Self {
        self.replies.insert(system.to_string(), Err(error));
        self
    }

    /// Handle to the request log; stays valid after the provider is boxed.
    pub fn calls(&self) -> CallLog {
        Arc::clone(&self.calls)
    }

    fn record(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(request.clone());

        let system = request.system.clone().unwrap_or_default();
        self.replies
            .get(&system)
            .cloned()
            .unwrap_or_else(|| {
                Err(LlmError::Provider {
                    message: format!("no scripted reply for system prompt '{system}'"),
                })
            })
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
        let result = self.record(request);
        let model = request.model.clone();
        async move {
            result.map(|content| CompletionResponse {
                id: "scripted".to_string(),
                content,
                model,
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        let result = self.record(&request);
        Box::pin(async_stream::stream! {
            yield Ok(StreamEvent::Connected);
            match result {
                Ok(text) => {
                    // Deliver word-sized fragments the way a real stream would.
                    for piece in text.split_inclusive(' ') {
                        yield Ok(StreamEvent::TextDelta { text: piece.to_string() });
                    }
                    yield Ok(StreamEvent::MessageDelta { stop_reason: StopReason::EndTurn });
                    yield Ok(StreamEvent::Done);
                }
                Err(err) => yield Err(err),
            }
        })
    }
}
