//! Type-erased [`LlmProvider`].
//!
//! `LlmProvider::complete` returns `impl Future`, which rules out
//! `dyn LlmProvider`. [`ErasedProvider`] boxes that future and is
//! blanket-implemented for every provider; [`BoxLlmProvider`] owns one.

use std::future::Future;
use std::pin::Pin;

use wellness_types::llm::{CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities};

use super::provider::{EventStream, LlmProvider};

type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

trait ErasedProvider: Send + Sync {
    fn name(&self) -> &str;
    fn capabilities(&self) -> &ProviderCapabilities;
    fn complete_boxed<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
    fn stream(&self, request: CompletionRequest) -> EventStream;
}

impl<P: LlmProvider> ErasedProvider for P {
    fn name(&self) -> &str {
        LlmProvider::name(self)
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        LlmProvider::capabilities(self)
    }

    fn complete_boxed<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(LlmProvider::complete(self, request))
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        LlmProvider::stream(self, request)
    }
}

/// The provider every agent of the pipeline shares (behind an `Arc`).
pub struct BoxLlmProvider {
    inner: Box<dyn ErasedProvider>,
}

impl BoxLlmProvider {
    pub fn new<P: LlmProvider + 'static>(provider: P) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn capabilities(&self) -> &ProviderCapabilities {
        self.inner.capabilities()
    }

    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.inner.complete_boxed(request).await
    }

    pub fn stream(&self, request: CompletionRequest) -> EventStream {
        self.inner.stream(request)
    }
}
