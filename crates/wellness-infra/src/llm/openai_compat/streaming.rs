//! SSE chunks to [`StreamEvent`]s.

use async_openai::types::chat::{
    ChatCompletionResponseStream, CreateChatCompletionStreamResponse, FinishReason,
};
use futures_util::StreamExt;

use wellness_core::llm::provider::EventStream;
use wellness_types::llm::{StopReason, StreamEvent, Usage};

use super::error::map_openai_error;

/// Adapt a chat-completions SSE stream.
///
/// Emits `Connected` first and `Done` last. In between, each chunk expands
/// into its usage (only present on the trailing chunk), its non-empty text
/// deltas and, per finished choice, a `MessageDelta`.
///
/// HTTP failures (bad key, quota, overload) surface as error items of the
/// SSE stream and are classified like non-streaming errors.
pub fn map_openai_stream(mut sse: ChatCompletionResponseStream) -> EventStream {
    Box::pin(async_stream::try_stream! {
        yield StreamEvent::Connected;

        while let Some(chunk) = sse.next().await {
            let chunk = chunk.map_err(map_openai_error)?;
            for event in chunk_events(chunk) {
                yield event;
            }
        }

        yield StreamEvent::Done;
    })
}

fn chunk_events(chunk: CreateChatCompletionStreamResponse) -> Vec<StreamEvent> {
    let mut events = Vec::new();

    if let Some(usage) = chunk.usage {
        events.push(StreamEvent::Usage(Usage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        }));
    }

    for choice in chunk.choices {
        if let Some(text) = choice.delta.content.filter(|t| !t.is_empty()) {
            events.push(StreamEvent::TextDelta { text });
        }
        if let Some(reason) = &choice.finish_reason {
            events.push(StreamEvent::MessageDelta {
                stop_reason: map_finish_reason(reason),
            });
        }
    }

    events
}

pub(crate) fn map_finish_reason(reason: &FinishReason) -> StopReason {
    match reason {
        FinishReason::Stop => StopReason::EndTurn,
        FinishReason::Length => StopReason::MaxTokens,
        FinishReason::ContentFilter => StopReason::ContentFilter,
        // No tools are registered with the agents.
        FinishReason::ToolCalls | FinishReason::FunctionCall => StopReason::EndTurn,
    }
}
