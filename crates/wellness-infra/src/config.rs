//! Configuration loader for the wellness service.
//!
//! Layers, later overriding earlier:
//! 1. Built-in defaults ([`WellnessConfig::default()`])
//! 2. `wellness.toml` (or an explicit `--config` path)
//! 3. Environment, with a `.env` file as a fallback for unset variables
//!
//! Host and port flags are applied by the binary on top of all of this.

use std::collections::HashMap;
use std::path::Path;

use secrecy::SecretString;

use wellness_types::config::{ProviderSettings, WellnessConfig};
use wellness_types::error::ConfigError;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "wellness.toml";

/// Load configuration from an explicit path or from [`DEFAULT_CONFIG_FILE`].
///
/// - Explicit path: read and parse errors are returned.
/// - Default path: a missing file yields defaults; an unreadable or
///   malformed file logs a warning and yields defaults.
pub async fn load_config(explicit: Option<&Path>) -> Result<WellnessConfig, ConfigError> {
    match explicit {
        Some(path) => {
            let content = tokio::fs::read_to_string(path)
                .await
                .map_err(|err| ConfigError::Read {
                    path: path.display().to_string(),
                    message: err.to_string(),
                })?;
            toml::from_str(&content).map_err(|err| ConfigError::Parse {
                path: path.display().to_string(),
                message: err.to_string(),
            })
        }
        None => Ok(load_default_config(Path::new(DEFAULT_CONFIG_FILE)).await),
    }
}

async fn load_default_config(path: &Path) -> WellnessConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {} found, using defaults", path.display());
            return WellnessConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return WellnessConfig::default();
        }
    };

    match toml::from_str::<WellnessConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            WellnessConfig::default()
        }
    }
}

/// Environment lookup: process variables first, then values from `.env`.
///
/// `.env` entries never override a variable already set in the process.
#[derive(Debug, Default)]
pub struct EnvLayer {
    read_process: bool,
    dotenv: HashMap<String, String>,
}

impl EnvLayer {
    /// Process environment only.
    pub fn process() -> Self {
        Self {
            read_process: true,
            dotenv: HashMap::new(),
        }
    }

    /// Process environment with `.env` at `path` as fallback.
    ///
    /// A missing or unreadable file is not an error.
    pub async fn with_dotenv(path: &Path) -> Self {
        let dotenv = match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                let vars = parse_dotenv(&content);
                tracing::debug!(count = vars.len(), "Loaded {}", path.display());
                vars
            }
            Err(_) => HashMap::new(),
        };
        Self {
            read_process: true,
            dotenv,
        }
    }

    /// Fixed variables only; the process environment is ignored.
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self {
            read_process: false,
            dotenv: vars,
        }
    }

    /// Value of `key`, ignoring empty values.
    pub fn var(&self, key: &str) -> Option<String> {
        let from_process = if self.read_process {
            std::env::var(key).ok()
        } else {
            None
        };
        from_process
            .or_else(|| self.dotenv.get(key).cloned())
            .filter(|value| !value.is_empty())
    }
}

/// Parse `KEY=value` lines; blank lines and `#` comments are skipped and
/// surrounding quotes are stripped from values.
pub fn parse_dotenv(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Apply `WELLNESS_MODEL` and `WELLNESS_BASE_URL` overrides.
pub fn apply_env_overrides(config: &mut WellnessConfig, env: &EnvLayer) {
    if let Some(model) = env.var("WELLNESS_MODEL") {
        config.agents.model = model;
    }
    if let Some(base_url) = env.var("WELLNESS_BASE_URL") {
        config.provider.base_url = base_url;
    }
}

/// First API key found among `settings.api_key_env`, in order.
pub fn resolve_api_key(settings: &ProviderSettings, env: &EnvLayer) -> Option<SecretString> {
    settings
        .api_key_env
        .iter()
        .find_map(|name| env.var(name))
        .map(SecretString::from)
}
