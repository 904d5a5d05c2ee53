//! Server-Sent Events decoder for chat-completion streams
//!
//! Bytes are buffered until a blank line closes an event, so both events
//! split across network chunks and multi-byte UTF-8 characters split across
//! chunk boundaries decode correctly. OpenRouter interleaves keep-alive
//! comment lines (`: OPENROUTER PROCESSING`); those are dropped.

/// A parsed SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event type (`event:` field), rarely set by OpenAI-compatible servers
    pub event_type: Option<String>,
    /// Event payload, multi-line `data:` fields joined with `\n`
    pub data: String,
}

impl SseEvent {
    /// Create an event with just data
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            event_type: None,
            data: data.into(),
        }
    }

    /// Check if this is the `[DONE]` sentinel
    pub fn is_done(&self) -> bool {
        self.data.trim() == "[DONE]"
    }
}

/// Buffered SSE decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Create a new decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes and return every event completed by them
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some((end, delimiter_len)) = find_event_boundary(&self.buffer) {
            let raw: Vec<u8> = self.buffer.drain(..end + delimiter_len).collect();
            if let Some(event) = parse_event(&raw[..end]) {
                events.push(event);
            }
        }
        events
    }

    /// Flush whatever is left once the byte stream has ended
    ///
    /// Servers occasionally close the connection without the trailing blank
    /// line after the last event.
    pub fn finish(&mut self) -> Option<SseEvent> {
        let raw = std::mem::take(&mut self.buffer);
        parse_event(&raw)
    }

    /// Check if there's buffered data not yet forming a complete event
    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty()
    }
}

/// Position and length of the first blank-line delimiter
fn find_event_boundary(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = find(buffer, b"\n\n").map(|pos| (pos, 2));
    let crlf = find(buffer, b"\r\n\r\n").map(|pos| (pos, 4));
    match (lf, crlf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn parse_event(raw: &[u8]) -> Option<SseEvent> {
    let text = String::from_utf8_lossy(raw);
    let mut event_type = None;
    let mut data_lines: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with(':') {
            continue;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };

        match field {
            "data" => data_lines.push(value),
            "event" => event_type = Some(value.trim().to_string()),
            // id/retry are meaningless for completion streams
            _ => {}
        }
    }

    if data_lines.is_empty() {
        return None;
    }

    Some(SseEvent {
        event_type,
        data: data_lines.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: {\"a\":1}\n\n");
        assert_eq!(events, vec![SseEvent::new("{\"a\":1}")]);
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: {\"choices\":[{\"del").is_empty());
        assert!(decoder.has_remaining());
        let events = decoder.feed(b"ta\":{}}]}\n\ndata: [DONE]\n\n");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].data, "{\"choices\":[{\"delta\":{}}]}");
        assert!(events[1].is_done());
    }

    #[test]
    fn test_keep_alive_comments_are_ignored() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b": OPENROUTER PROCESSING\n\n: OPENROUTER PROCESSING\n\ndata: x\n\n");
        assert_eq!(events, vec![SseEvent::new("x")]);
    }

    #[test]
    fn test_crlf_delimiters() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"event: delta\r\ndata: hi\r\n\r\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type.as_deref(), Some("delta"));
        assert_eq!(events[0].data, "hi");
    }

    #[test]
    fn test_multi_line_data_joined() {
        let mut decoder = SseDecoder::new();
        let events = decoder.feed(b"data: line1\ndata: line2\n\n");
        assert_eq!(events[0].data, "line1\nline2");
    }

    #[test]
    fn test_utf8_split_inside_character() {
        // "é" is C3 A9, "🐍" is F0 9F 90 8D
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: caf\xC3").is_empty());
        assert!(decoder.feed(b"\xA9 \xF0\x9F").is_empty());
        let events = decoder.feed(b"\x90\x8D\n\n");
        assert_eq!(events[0].data, "café 🐍");
    }

    #[test]
    fn test_finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"data: [DONE]").is_empty());
        let last = decoder.finish().unwrap();
        assert!(last.is_done());
        assert!(!decoder.has_remaining());
    }

    #[test]
    fn test_event_without_data_is_dropped() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.feed(b"event: ping\n\n").is_empty());
    }
}
