//! Configuration types and per-provider defaults for OpenAI-compatible providers.

use secrecy::SecretString;

use wellness_types::config::ProviderSettings;
use wellness_types::llm::ProviderCapabilities;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::ChatCompletionsProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "gemini").
    pub provider_name: String,
    /// Base URL for the API.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gemini-2.0-flash").
    pub model: String,
    /// What this provider supports.
    pub capabilities: ProviderCapabilities,
}

/// Google Gemini default configuration (OpenAI-compatible beta endpoint).
///
/// Base URL: `https://generativelanguage.googleapis.com/v1beta/openai`
/// Capabilities: streaming; 8K output tokens per reply.
pub fn gemini_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "gemini".into(),
        base_url: "https://generativelanguage.googleapis.com/v1beta/openai".into(),
        api_key,
        model: model.into(),
        capabilities: ProviderCapabilities {
            streaming: true,
            max_output_tokens: 8_192,
        },
    }
}

/// Configuration from service settings: Gemini defaults with the configured
/// provider name and base URL applied on top.
pub fn from_settings(
    settings: &ProviderSettings,
    api_key: SecretString,
    model: &str,
) -> OpenAiCompatConfig {
    let mut config = gemini_defaults(api_key, model);
    config.provider_name = settings.name.clone();
    config.base_url = settings.base_url.trim_end_matches('/').to_string();
    config
}
