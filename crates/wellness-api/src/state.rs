//! Application state shared by the HTTP handlers.

use std::sync::Arc;

use secrecy::SecretString;

use wellness_core::llm::box_provider::BoxLlmProvider;
use wellness_core::pipeline::WellnessPipeline;
use wellness_core::session::SessionStore;
use wellness_infra::llm::create_provider;
use wellness_types::config::WellnessConfig;

/// Cheap to clone; every handler gets its own copy.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<WellnessPipeline>,
}

impl AppState {
    pub fn new(pipeline: WellnessPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Wire the provider, the session store, and the pipeline from config.
    pub fn init(config: &WellnessConfig, api_key: Option<SecretString>) -> Self {
        let provider: Arc<BoxLlmProvider> = Arc::new(create_provider(config, api_key));
        let sessions = Arc::new(SessionStore::new());
        Self::new(WellnessPipeline::new(provider, sessions, &config.agents))
    }
}
