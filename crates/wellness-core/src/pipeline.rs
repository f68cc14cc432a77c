//! The three-stage wellness pipeline.
//!
//! sentiment -> safety -> responder, strictly in that order. The responder
//! sees the raw message together with both classifier outputs. Any stage
//! failure aborts the run; nothing is retried and no partial result escapes.

use std::sync::Arc;

use tracing::{Instrument, debug, info_span};

use wellness_types::agent::{AgentDefinition, AgentRole};
use wellness_types::chat::{ChatResponse, EscalationMarker};
use wellness_types::config::AgentsConfig;
use wellness_types::error::PipelineError;

use crate::agent::catalog::definition_for;
use crate::agent::client::{AgentClient, SessionScope};
use crate::llm::box_provider::BoxLlmProvider;
use crate::session::SessionStore;

pub struct WellnessPipeline {
    sentiment: AgentClient,
    safety: AgentClient,
    responder: AgentClient,
    sessions: Arc<SessionStore>,
}

impl WellnessPipeline {
    /// Build the pipeline with the built-in agent definitions.
    pub fn new(
        provider: Arc<BoxLlmProvider>,
        sessions: Arc<SessionStore>,
        config: &AgentsConfig,
    ) -> Self {
        Self::with_definitions(
            provider,
            sessions,
            config,
            [
                definition_for(AgentRole::Sentiment, &config.model),
                definition_for(AgentRole::Safety, &config.model),
                definition_for(AgentRole::Responder, &config.model),
            ],
        )
    }

    /// Build the pipeline with explicit definitions, in
    /// sentiment / safety / responder order.
    pub fn with_definitions(
        provider: Arc<BoxLlmProvider>,
        sessions: Arc<SessionStore>,
        config: &AgentsConfig,
        definitions: [AgentDefinition; 3],
    ) -> Self {
        let scope = SessionScope {
            app_name: config.app_name.clone(),
            user_id: config.user_id.clone(),
        };
        let [sentiment, safety, responder] = definitions.map(|definition| {
            AgentClient::new(
                Arc::new(definition),
                Arc::clone(&provider),
                Arc::clone(&sessions),
                scope.clone(),
                config.max_tokens,
            )
        });

        Self {
            sentiment,
            safety,
            responder,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Run all three stages for one user message.
    pub async fn run(&self, message: &str, session_id: &str) -> Result<ChatResponse, PipelineError> {
        let span = info_span!("wellness_pipeline", session_id = %session_id);

        async {
            let sentiment = self
                .stage(AgentRole::Sentiment, &self.sentiment, session_id, message)
                .await?;

            let safety = self
                .stage(AgentRole::Safety, &self.safety, session_id, message)
                .await?;
            debug!(escalate = ?EscalationMarker::parse(&safety), "Safety stage marker");

            let context = responder_context(message, &sentiment, &safety);
            let response = self
                .stage(AgentRole::Responder, &self.responder, session_id, &context)
                .await?;

            Ok(ChatResponse {
                response,
                sentiment,
                safety,
            })
        }
        .instrument(span)
        .await
    }

    async fn stage(
        &self,
        role: AgentRole,
        client: &AgentClient,
        session_id: &str,
        input: &str,
    ) -> Result<String, PipelineError> {
        let line = role.session_line(session_id);
        client
            .run(&line, input)
            .await
            .map_err(|source| PipelineError::new(role, source))
    }
}

/// Context string handed to the responder stage.
pub fn responder_context(message: &str, sentiment: &str, safety: &str) -> String {
    format!("User Message: {message}\nSentiment Analysis: {sentiment}\nSafety Status: {safety}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionKey;
    use crate::testing::{CallLog, ScriptedProvider};
    use wellness_types::llm::{LlmError, Message};

    fn definitions() -> [AgentDefinition; 3] {
        [
            AgentDefinition::new("SentimentAgent", "m", "sentiment"),
            AgentDefinition::new("SafetyAgent", "m", "safety"),
            AgentDefinition::new("MainWellnessAgent", "m", "responder"),
        ]
    }

    fn pipeline(provider: ScriptedProvider) -> (WellnessPipeline, CallLog) {
        let calls = provider.calls();
        let pipeline = WellnessPipeline::with_definitions(
            Arc::new(BoxLlmProvider::new(provider)),
            Arc::new(SessionStore::new()),
            &AgentsConfig::default(),
            definitions(),
        );
        (pipeline, calls)
    }

    fn happy_provider() -> ScriptedProvider {
        ScriptedProvider::new()
            .reply("sentiment", "Emotion: Sad")
            .reply("safety", "ESCALATE: FALSE")
            .reply("responder", "I'm here for you")
    }

    fn systems(calls: &CallLog) -> Vec<String> {
        calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.system.clone().unwrap_or_default())
            .collect()
    }

    #[tokio::test]
    async fn test_run_assembles_three_outputs() {
        let (pipeline, _) = pipeline(happy_provider());
        let result = pipeline.run("I feel down", "default").await.unwrap();
        assert_eq!(
            result,
            ChatResponse {
                response: "I'm here for you".to_string(),
                sentiment: "Emotion: Sad".to_string(),
                safety: "ESCALATE: FALSE".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_stages_run_in_order_with_context() {
        let (pipeline, calls) = pipeline(happy_provider());
        pipeline.run("I feel down", "default").await.unwrap();

        assert_eq!(systems(&calls), vec!["sentiment", "safety", "responder"]);

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].messages, vec![Message::user("I feel down")]);
        assert_eq!(calls[1].messages, vec![Message::user("I feel down")]);
        assert_eq!(
            calls[2].messages,
            vec![Message::user(
                "User Message: I feel down\nSentiment Analysis: Emotion: Sad\nSafety Status: ESCALATE: FALSE"
            )]
        );
    }

    #[tokio::test]
    async fn test_sentiment_failure_aborts_pipeline() {
        let provider = happy_provider().fail("sentiment", LlmError::RateLimited);
        let (pipeline, calls) = pipeline(provider);

        let err = pipeline.run("I feel down", "default").await.unwrap_err();
        assert_eq!(err.stage, AgentRole::Sentiment);
        assert_eq!(err.to_string(), "rate limited");
        assert_eq!(systems(&calls), vec!["sentiment"]);
    }

    #[tokio::test]
    async fn test_safety_failure_skips_responder() {
        let provider = happy_provider().fail(
            "safety",
            LlmError::Provider {
                message: "upstream 503".to_string(),
            },
        );
        let (pipeline, calls) = pipeline(provider);

        let err = pipeline.run("hello", "s").await.unwrap_err();
        assert_eq!(err.stage, AgentRole::Safety);
        assert_eq!(systems(&calls), vec!["sentiment", "safety"]);
    }

    #[tokio::test]
    async fn test_three_session_lines_per_conversation() {
        let (pipeline, _) = pipeline(happy_provider());
        pipeline.run("hi", "abc").await.unwrap();

        let config = AgentsConfig::default();
        let sessions = pipeline.sessions();
        assert_eq!(sessions.len(), 3);
        for line in ["abc_sentiment", "abc_safety", "abc"] {
            let key = SessionKey::new(&config.app_name, &config.user_id, line);
            assert!(sessions.get(&key).is_some(), "missing session line {line}");
        }
    }

    #[tokio::test]
    async fn test_same_session_id_reuses_sessions() {
        let (pipeline, calls) = pipeline(happy_provider());
        pipeline.run("first", "abc").await.unwrap();
        pipeline.run("second", "abc").await.unwrap();

        assert_eq!(pipeline.sessions().len(), 3);
        // Second sentiment call sees the first exchange on its own line.
        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[3].messages,
            vec![
                Message::user("first"),
                Message::assistant("Emotion: Sad"),
                Message::user("second"),
            ]
        );
    }

    #[test]
    fn test_responder_context_format() {
        assert_eq!(
            responder_context("m", "s", "x"),
            "User Message: m\nSentiment Analysis: s\nSafety Status: x"
        );
    }
}
