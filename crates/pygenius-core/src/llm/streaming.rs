//! Turning an SSE byte stream into a stream of text deltas

use crate::error::{PyGeniusError, PyGeniusResult};
use crate::llm::sse_decoder::{SseDecoder, SseEvent};
use futures::{Stream, StreamExt};
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt::Display;
use std::pin::Pin;

/// Stream of incremental reply text
pub type TextStream = Pin<Box<dyn Stream<Item = PyGeniusResult<String>> + Send>>;

/// Decode an OpenAI-compatible SSE byte stream into text deltas
///
/// - each `data:` payload is JSON with `choices[0].delta.content`
/// - consecutive `data:` lines without a blank line between them are
///   treated as separate payloads
/// - `[DONE]` ends the stream, even if more bytes follow
/// - malformed payloads are skipped
/// - a transport error is yielded once and ends the stream
pub fn sse_content_stream<S, B, E>(byte_stream: S) -> TextStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = DeltaState {
        bytes: Box::pin(byte_stream),
        decoder: SseDecoder::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    Box::pin(futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => {
                    for event in state.decoder.feed(chunk.as_ref()) {
                        if state.accept(event) {
                            break;
                        }
                    }
                }
                Some(Err(e)) => {
                    state
                        .pending
                        .push_back(Err(PyGeniusError::network(format!("Stream error: {}", e))));
                    state.finished = true;
                }
                None => {
                    if let Some(event) = state.decoder.finish() {
                        state.accept(event);
                    }
                    state.finished = true;
                }
            }
        }
    }))
}

struct DeltaState<S> {
    bytes: Pin<Box<S>>,
    decoder: SseDecoder,
    pending: VecDeque<PyGeniusResult<String>>,
    finished: bool,
}

impl<S> DeltaState<S> {
    /// Queue the delta carried by `event`; returns true once the stream is done
    fn accept(&mut self, event: SseEvent) -> bool {
        if event.is_done() {
            self.finished = true;
            return true;
        }
        if let Some(content) = delta_content(&event.data) {
            self.push_delta(content);
            return false;
        }
        if !event.data.contains('\n') {
            tracing::trace!("Skipping malformed stream event: {}", event.data);
            return false;
        }

        // `data:` lines sent without blank-line separators arrive as one
        // event; each line is then its own payload.
        for line in event.data.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if line == "[DONE]" {
                self.finished = true;
                return true;
            }
            match delta_content(line) {
                Some(content) => self.push_delta(content),
                None => tracing::trace!("Skipping malformed stream line: {}", line),
            }
        }
        false
    }

    fn push_delta(&mut self, content: String) {
        if !content.is_empty() {
            self.pending.push_back(Ok(content));
        }
    }
}

/// `choices[0].delta.content`, or `None` if the payload is not a delta
fn delta_content(data: &str) -> Option<String> {
    let json: Value = serde_json::from_str(data).ok()?;
    let choice = json.get("choices")?.as_array()?.first()?;
    Some(
        choice
            .pointer("/delta/content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    )
}

/// Concatenate a text stream into one string
pub async fn collect_text(mut stream: TextStream) -> PyGeniusResult<String> {
    let mut text = String::new();
    while let Some(piece) = stream.next().await {
        text.push_str(&piece?);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn delta(content: &str) -> String {
        format!(
            "data: {}\n\n",
            serde_json::json!({"choices": [{"index": 0, "delta": {"content": content}}]})
        )
    }

    fn chunks(parts: Vec<String>) -> TextStream {
        let items: Vec<Result<Vec<u8>, std::io::Error>> =
            parts.into_iter().map(|p| Ok(p.into_bytes())).collect();
        sse_content_stream(stream::iter(items))
    }

    #[tokio::test]
    async fn test_deltas_in_order_until_done() {
        let body = format!("{}{}data: [DONE]\n\n{}", delta("Hel"), delta("lo"), delta("ignored"));
        let pieces: Vec<String> = chunks(vec![body])
            .map(|item| item.unwrap())
            .collect()
            .await;
        assert_eq!(pieces, vec!["Hel", "lo"]);
    }

    #[tokio::test]
    async fn test_whitespace_deltas_are_kept() {
        let body = format!("{}{}{}", delta("a"), delta(" "), delta("b"));
        let text = collect_text(chunks(vec![body])).await.unwrap();
        assert_eq!(text, "a b");
    }

    #[tokio::test]
    async fn test_event_split_across_chunks() {
        let whole = delta("split");
        let (head, tail) = whole.split_at(17);
        let text = collect_text(chunks(vec![head.to_string(), tail.to_string()]))
            .await
            .unwrap();
        assert_eq!(text, "split");
    }

    #[tokio::test]
    async fn test_malformed_and_role_only_events_skipped() {
        let role_only = "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n";
        let body = format!("{}data: {{not json\n\n: keep-alive\n\n{}", role_only, delta("ok"));
        let text = collect_text(chunks(vec![body])).await.unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_transport_error_ends_stream() {
        let items: Vec<Result<Vec<u8>, std::io::Error>> = vec![
            Ok(delta("partial").into_bytes()),
            Err(std::io::Error::other("connection reset")),
            Ok(delta("never").into_bytes()),
        ];
        let results: Vec<PyGeniusResult<String>> =
            sse_content_stream(stream::iter(items)).collect().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_deref().unwrap(), "partial");
        assert!(matches!(results[1], Err(PyGeniusError::Network(_))));
    }

    #[tokio::test]
    async fn test_single_newline_framing_yields_every_delta() {
        let line = |content: &str| {
            format!(
                "data: {}\n",
                serde_json::json!({"choices": [{"index": 0, "delta": {"content": content}}]})
            )
        };
        let body = format!("{}{}data: [DONE]\n{}", line("Hel"), line("lo"), line("ignored"));
        let text = collect_text(chunks(vec![body])).await.unwrap();
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn test_single_newline_framing_split_across_chunks() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\r\n\
                    data: {\"choices\":[{\"delta\":{\"content\":\"b\"}}]}\r\n";
        let (head, tail) = body.split_at(30);
        let text = collect_text(chunks(vec![head.to_string(), tail.to_string()]))
            .await
            .unwrap();
        assert_eq!(text, "ab");
    }

    #[tokio::test]
    async fn test_unterminated_final_event_is_flushed() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"tail\"}}]}".to_string();
        let text = collect_text(chunks(vec![body])).await.unwrap();
        assert_eq!(text, "tail");
    }
}
