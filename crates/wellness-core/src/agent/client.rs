//! AgentClient -- runs one turn of one agent on one session line.

use std::sync::Arc;

use tracing::{Instrument, debug, info_span};

use wellness_types::agent::AgentDefinition;
use wellness_types::llm::{CompletionRequest, LlmError, Message};

use crate::llm::box_provider::BoxLlmProvider;
use crate::llm::reply::collect_final_text;
use crate::session::SessionStore;

/// Session scope shared by every agent of the service.
#[derive(Debug, Clone)]
pub struct SessionScope {
    pub app_name: String,
    pub user_id: String,
}

/// Binds an [`AgentDefinition`] to a provider and the session store.
///
/// Each call to [`AgentClient::run`] is one conversation turn: the message is
/// appended to the session line's history and the whole history is sent to
/// the model under the agent's instruction.
pub struct AgentClient {
    definition: Arc<AgentDefinition>,
    provider: Arc<BoxLlmProvider>,
    sessions: Arc<SessionStore>,
    scope: SessionScope,
    max_tokens: u32,
}

impl AgentClient {
    pub fn new(
        definition: Arc<AgentDefinition>,
        provider: Arc<BoxLlmProvider>,
        sessions: Arc<SessionStore>,
        scope: SessionScope,
        max_tokens: u32,
    ) -> Self {
        Self {
            definition,
            provider,
            sessions,
            scope,
            max_tokens,
        }
    }

    /// Submit `message` as a new turn on `session_id` and return the reply text.
    ///
    /// The reply is the text of the last response message that carried any
    /// text; an empty string is a valid result. Provider errors propagate
    /// and leave the session history untouched.
    pub async fn run(&self, session_id: &str, message: &str) -> Result<String, LlmError> {
        let session =
            self.sessions
                .get_or_create(&self.scope.app_name, &self.scope.user_id, session_id);

        // Held across the model call: turns on one line are strictly ordered.
        let mut history = session.history().lock().await;

        let streaming = self.provider.capabilities().streaming;
        let request = self.build_request(&history, message, streaming);

        let span = info_span!(
            "gen_ai.agent_turn",
            agent = %self.definition.name,
            session_id = %session_id,
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.stream = streaming,
        );

        let text = async {
            if streaming {
                collect_final_text(self.provider.stream(request)).await
            } else {
                self.provider
                    .complete(&request)
                    .await
                    .map(|response| response.content)
            }
        }
        .instrument(span)
        .await?;

        debug!(
            agent = %self.definition.name,
            session_id = %session_id,
            reply_len = text.len(),
            "Agent turn complete"
        );

        history.push(Message::user(message));
        if !text.is_empty() {
            history.push(Message::assistant(text.clone()));
        }

        Ok(text)
    }

    fn build_request(&self, history: &[Message], message: &str, stream: bool) -> CompletionRequest {
        let mut messages = history.to_vec();
        messages.push(Message::user(message));

        CompletionRequest {
            model: self.definition.model.clone(),
            messages,
            system: Some(self.definition.instruction.clone()),
            // Never ask for more than the provider can return.
            max_tokens: self
                .max_tokens
                .min(self.provider.capabilities().max_output_tokens),
            stream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;
    use wellness_types::llm::MessageRole;

    fn client_with(provider: ScriptedProvider, sessions: Arc<SessionStore>) -> AgentClient {
        client_with_budget(provider, sessions, 256)
    }

    fn client_with_budget(
        provider: ScriptedProvider,
        sessions: Arc<SessionStore>,
        max_tokens: u32,
    ) -> AgentClient {
        AgentClient::new(
            Arc::new(AgentDefinition::new("EchoAgent", "test-model", "echo")),
            Arc::new(BoxLlmProvider::new(provider)),
            sessions,
            SessionScope {
                app_name: "app".to_string(),
                user_id: "user".to_string(),
            },
            max_tokens,
        )
    }

    #[tokio::test]
    async fn test_run_returns_reply_and_records_request() {
        let provider = ScriptedProvider::new().reply("echo", "hello back");
        let calls = provider.calls();
        let sessions = Arc::new(SessionStore::new());
        let client = client_with(provider, Arc::clone(&sessions));

        let reply = client.run("s1", "hello").await.unwrap();
        assert_eq!(reply, "hello back");

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, "test-model");
        assert_eq!(calls[0].system.as_deref(), Some("echo"));
        assert_eq!(calls[0].messages, vec![Message::user("hello")]);
        assert_eq!(calls[0].max_tokens, 256);
        assert!(calls[0].stream);
    }

    #[tokio::test]
    async fn test_max_tokens_clamped_to_provider_output_limit() {
        let provider = ScriptedProvider::new().reply("echo", "ok");
        let calls = provider.calls();
        let client = client_with_budget(provider, Arc::new(SessionStore::new()), 100_000);

        client.run("s1", "hello").await.unwrap();
        assert_eq!(calls.lock().unwrap()[0].max_tokens, 4_096);
    }

    #[tokio::test]
    async fn test_history_carries_across_turns() {
        let provider = ScriptedProvider::new().reply("echo", "ack");
        let calls = provider.calls();
        let sessions = Arc::new(SessionStore::new());
        let client = client_with(provider, Arc::clone(&sessions));

        client.run("s1", "first").await.unwrap();
        client.run("s1", "second").await.unwrap();

        let calls = calls.lock().unwrap();
        let roles: Vec<MessageRole> = calls[1].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(calls[1].messages[2].content, "second");
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_session_lines_are_isolated() {
        let provider = ScriptedProvider::new().reply("echo", "ack");
        let calls = provider.calls();
        let client = client_with(provider, Arc::new(SessionStore::new()));

        client.run("a", "one").await.unwrap();
        client.run("b", "two").await.unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[1].messages, vec![Message::user("two")]);
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_an_error() {
        let provider = ScriptedProvider::new().reply("echo", "");
        let sessions = Arc::new(SessionStore::new());
        let client = client_with(provider, Arc::clone(&sessions));

        let reply = client.run("s1", "hello").await.unwrap();
        assert_eq!(reply, "");

        let session = sessions.get_or_create("app", "user", "s1");
        assert_eq!(*session.history().lock().await, vec![Message::user("hello")]);
    }

    #[tokio::test]
    async fn test_error_propagates_and_leaves_history_untouched() {
        let provider = ScriptedProvider::new().fail("echo", LlmError::AuthenticationFailed);
        let sessions = Arc::new(SessionStore::new());
        let client = client_with(provider, Arc::clone(&sessions));

        let err = client.run("s1", "hello").await.unwrap_err();
        assert_eq!(err, LlmError::AuthenticationFailed);

        let session = sessions.get_or_create("app", "user", "s1");
        assert!(session.history().lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_streaming_provider_uses_complete() {
        let provider = ScriptedProvider::new()
            .without_streaming()
            .reply("echo", "complete reply");
        let calls = provider.calls();
        let client = client_with(provider, Arc::new(SessionStore::new()));

        let reply = client.run("s1", "hello").await.unwrap();
        assert_eq!(reply, "complete reply");
        assert!(!calls.lock().unwrap()[0].stream);
    }
}
