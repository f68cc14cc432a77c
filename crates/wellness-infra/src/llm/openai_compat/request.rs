//! Translation of agent turns into chat-completions requests.

use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, ChatCompletionStreamOptions,
    CreateChatCompletionRequest,
};

use wellness_types::llm::{CompletionRequest, Message, MessageRole};

/// Build the wire request for one turn.
///
/// The agent instruction goes first as a system message, followed by the
/// session history and the new user message. An empty model falls back to
/// `default_model`. Streaming requests ask for a trailing usage chunk.
pub(crate) fn to_chat_request(
    turn: &CompletionRequest,
    default_model: &str,
    stream: bool,
) -> CreateChatCompletionRequest {
    let instruction = turn.system.as_deref().map(system_message);
    let messages = instruction
        .into_iter()
        .chain(turn.messages.iter().map(history_message))
        .collect();

    let model = if turn.model.is_empty() {
        default_model.to_string()
    } else {
        turn.model.clone()
    };

    CreateChatCompletionRequest {
        model,
        messages,
        max_completion_tokens: Some(turn.max_tokens),
        stream: stream.then_some(true),
        stream_options: stream.then_some(ChatCompletionStreamOptions {
            include_usage: Some(true),
            include_obfuscation: None,
        }),
        ..Default::default()
    }
}

fn system_message(text: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(text.to_string()),
        name: None,
    })
}

fn history_message(message: &Message) -> ChatCompletionRequestMessage {
    let text = message.content.clone();
    match message.role {
        MessageRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
            content: ChatCompletionRequestUserMessageContent::Text(text),
            name: None,
        }),
        #[allow(deprecated)]
        MessageRole::Assistant => {
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(text)),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}
