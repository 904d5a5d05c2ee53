//! Chat-completion transport

pub mod backend;
pub mod client;
mod client_tests;
pub mod messages;
pub mod sanitize;
pub mod sse_decoder;
pub mod streaming;

pub use backend::{ChatBackend, OfflineBackend};
#[cfg(test)]
pub use backend::MockChatBackend;
pub use client::{OpenRouterClient, extract_message_content};
pub use messages::{ChatMessage, ChatRequest, MessageRole};
pub use sanitize::sanitize_error_text;
pub use sse_decoder::{SseDecoder, SseEvent};
pub use streaming::{TextStream, collect_text, sse_content_stream};
