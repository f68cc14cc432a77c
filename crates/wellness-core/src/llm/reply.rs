//! Reduce a provider event stream to the text of its final reply.
//!
//! Text deltas are grouped into response messages, each closed by a
//! `MessageDelta` (or by the end of the stream). The reply is the text of the
//! last message that carried any non-empty text; earlier messages are
//! superseded.

use futures_util::{Stream, StreamExt};

use wellness_types::llm::{LlmError, StreamEvent};

/// Drain `stream` and return the final reply text.
///
/// Returns an empty string when no message carried text. The first stream
/// error aborts and is returned as-is.
pub async fn collect_final_text<S>(stream: S) -> Result<String, LlmError>
where
    S: Stream<Item = Result<StreamEvent, LlmError>>,
{
    let mut stream = std::pin::pin!(stream);

    let mut current = String::new();
    let mut last_text = String::new();

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::TextDelta { text } => current.push_str(&text),
            StreamEvent::MessageDelta { .. } => {
                if !current.is_empty() {
                    last_text = std::mem::take(&mut current);
                }
            }
            StreamEvent::Done => break,
            StreamEvent::Connected | StreamEvent::Usage(_) => {}
        }
    }

    if !current.is_empty() {
        last_text = current;
    }

    Ok(last_text)
}
