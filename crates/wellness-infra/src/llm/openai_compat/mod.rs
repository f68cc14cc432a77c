//! Chat-completions provider for OpenAI-compatible endpoints.
//!
//! The service talks to Google Gemini through its OpenAI-compatible
//! endpoint; any other endpoint speaking the same protocol works by
//! changing the base URL. Request and SSE handling come from
//! [`async_openai`].

pub mod config;
mod error;
mod request;
pub mod streaming;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::CreateChatCompletionResponse;
use futures_util::StreamExt;
use secrecy::ExposeSecret;

use wellness_core::llm::provider::{EventStream, LlmProvider};
use wellness_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, ProviderCapabilities, StopReason, Usage,
};

use self::config::OpenAiCompatConfig;
use self::error::map_openai_error;
use self::request::to_chat_request;
use self::streaming::{map_finish_reason, map_openai_stream};

/// [`LlmProvider`] backed by a chat-completions endpoint.
///
/// Not `Debug`: the client holds the API key.
pub struct ChatCompletionsProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    capabilities: ProviderCapabilities,
}

impl ChatCompletionsProvider {
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let client = Client::with_config(
            OpenAIConfig::new()
                .with_api_key(config.api_key.expose_secret())
                .with_api_base(&config.base_url),
        );

        Self {
            client,
            provider_name: config.provider_name,
            model: config.model,
            capabilities: config.capabilities,
        }
    }
}

/// Reduce a non-streaming response to its first choice.
fn into_completion(response: CreateChatCompletionResponse) -> CompletionResponse {
    let (content, stop_reason) = match response.choices.into_iter().next() {
        Some(choice) => (
            choice.message.content.unwrap_or_default(),
            choice
                .finish_reason
                .as_ref()
                .map_or(StopReason::EndTurn, map_finish_reason),
        ),
        None => (String::new(), StopReason::EndTurn),
    };

    CompletionResponse {
        id: response.id,
        content,
        model: response.model,
        stop_reason,
        usage: response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default(),
    }
}

impl LlmProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.capabilities
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let response = self
            .client
            .chat()
            .create(to_chat_request(request, &self.model, false))
            .await
            .map_err(map_openai_error)?;

        Ok(into_completion(response))
    }

    fn stream(&self, request: CompletionRequest) -> EventStream {
        let wire_request = to_chat_request(&request, &self.model, true);
        let client = self.client.clone();

        Box::pin(async_stream::try_stream! {
            let sse = client
                .chat()
                .create_stream(wire_request)
                .await
                .map_err(map_openai_error)?;

            let mut events = map_openai_stream(sse);
            while let Some(event) = events.next().await {
                yield event?;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_gemini_provider() {
        let provider = ChatCompletionsProvider::new(config::gemini_defaults(
            SecretString::from("gemini-key"),
            "gemini-2.0-flash",
        ));
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model, "gemini-2.0-flash");
        assert!(provider.capabilities().streaming);
        assert_eq!(provider.capabilities().max_output_tokens, 8_192);
    }

    #[test]
    fn test_into_completion_without_choices() {
        let response: CreateChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "resp-1",
            "object": "chat.completion",
            "created": 0,
            "model": "gemini-2.0-flash",
            "choices": [],
        }))
        .unwrap();

        let completion = into_completion(response);
        assert_eq!(completion.content, "");
        assert_eq!(completion.stop_reason, StopReason::EndTurn);
        assert_eq!(completion.usage, Usage::default());
    }

    #[test]
    fn test_into_completion_takes_first_choice() {
        let response: CreateChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "id": "resp-2",
            "object": "chat.completion",
            "created": 0,
            "model": "gemini-2.0-flash",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "Emotion: Calm" },
                "finish_reason": "length",
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 },
        }))
        .unwrap();

        let completion = into_completion(response);
        assert_eq!(completion.id, "resp-2");
        assert_eq!(completion.content, "Emotion: Calm");
        assert_eq!(completion.stop_reason, StopReason::MaxTokens);
        assert_eq!(completion.usage.output_tokens, 3);
    }
}
