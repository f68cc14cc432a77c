//! The model provider port.

use std::future::Future;
use std::pin::Pin;

use futures_util::Stream;

use wellness_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StreamEvent,
};

/// Owned event stream returned by [`LlmProvider::stream`].
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// A remote model backend.
///
/// `complete` is RPITIT; `stream` returns a boxed stream so that the
/// provider can be type-erased behind
/// [`BoxLlmProvider`](super::box_provider::BoxLlmProvider).
pub trait LlmProvider: Send + Sync {
    /// Name used in logs and spans (e.g. "gemini").
    fn name(&self) -> &str;

    fn capabilities(&self) -> &ProviderCapabilities;

    /// One request, one full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// One request, a stream of incremental events ending in `Done`.
    fn stream(&self, request: CompletionRequest) -> EventStream;
}
