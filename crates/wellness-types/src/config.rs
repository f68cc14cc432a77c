//! Service configuration types.
//!
//! `WellnessConfig` mirrors the optional `wellness.toml`. Every field has a
//! default so an empty or missing file yields a runnable configuration.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the wellness service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellnessConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub agents: AgentsConfig,

    #[serde(default)]
    pub provider: ProviderSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings shared by the three agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentsConfig {
    /// Application name that scopes every session key.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// User id that scopes every session key.
    #[serde(default = "default_user_id")]
    pub user_id: String,
    /// Model identifier used by all three agents.
    #[serde(default = "default_model")]
    pub model: String,
    /// Output token cap per agent turn.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_app_name() -> String {
    "MentalWellnessApp".to_string()
}

fn default_user_id() -> String {
    "user".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            user_id: default_user_id(),
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Remote model provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Human-readable provider name used in logs.
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variables checked, in order, for the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Vec<String>,
}

fn default_provider_name() -> String {
    "gemini".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_api_key_env() -> Vec<String> {
    vec!["GOOGLE_API_KEY".to_string(), "GEMINI_API_KEY".to_string()]
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = WellnessConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.agents.app_name, "MentalWellnessApp");
        assert_eq!(config.agents.user_id, "user");
        assert_eq!(config.agents.model, "gemini-2.0-flash");
        assert_eq!(config.provider.name, "gemini");
        assert_eq!(
            config.provider.api_key_env,
            vec!["GOOGLE_API_KEY", "GEMINI_API_KEY"]
        );
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: WellnessConfig = toml::from_str("").unwrap();
        assert_eq!(config, WellnessConfig::default());
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 9090

[agents]
model = "gemini-2.5-flash"

[provider]
base_url = "http://localhost:4000/v1"
"#;
        let config: WellnessConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.agents.model, "gemini-2.5-flash");
        assert_eq!(config.agents.app_name, "MentalWellnessApp");
        assert_eq!(config.provider.base_url, "http://localhost:4000/v1");
        assert_eq!(config.provider.name, "gemini");
    }
}
