//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](wellness_core::llm::provider::LlmProvider)
//! used by the service and a factory ([`create_provider`]) that builds it
//! from the loaded configuration.

pub mod openai_compat;

use secrecy::SecretString;

use wellness_core::llm::box_provider::BoxLlmProvider;
use wellness_types::config::WellnessConfig;

use self::openai_compat::ChatCompletionsProvider;

/// Create the service's [`BoxLlmProvider`] from configuration.
///
/// A missing API key is not fatal: the provider is built with an empty key
/// and every model call fails upstream with an authentication error, while
/// the process itself (and `/health`) keeps running.
pub fn create_provider(config: &WellnessConfig, api_key: Option<SecretString>) -> BoxLlmProvider {
    let api_key = api_key.unwrap_or_else(|| {
        tracing::warn!(
            env = ?config.provider.api_key_env,
            "No API key found; model calls will fail until one is configured"
        );
        SecretString::from("")
    });

    let oai_config =
        openai_compat::config::from_settings(&config.provider, api_key, &config.agents.model);

    tracing::info!(
        provider = %oai_config.provider_name,
        base_url = %oai_config.base_url,
        model = %oai_config.model,
        "Model provider configured"
    );

    BoxLlmProvider::new(ChatCompletionsProvider::new(oai_config))
}
