//! The seam between the assist engine and a hosted chat-completion API

use crate::error::PyGeniusResult;
use crate::llm::streaming::TextStream;
use async_trait::async_trait;

/// A hosted chat-completion endpoint
///
/// Every assist action is a single system + user exchange, so the trait is
/// deliberately narrow. Swapping vendors means writing another implementor.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Whether credentials are configured; without them the engine never
    /// attempts a remote call.
    fn has_api_key(&self) -> bool;

    /// Send one exchange and return the assistant's reply text
    async fn complete(&self, system: &str, user: &str) -> PyGeniusResult<String>;

    /// Send one exchange and stream the reply as incremental text pieces
    async fn stream(&self, system: &str, user: &str) -> PyGeniusResult<TextStream>;
}

/// Backend used when the AI is switched off entirely
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineBackend;

#[async_trait]
impl ChatBackend for OfflineBackend {
    fn has_api_key(&self) -> bool {
        false
    }

    async fn complete(&self, _system: &str, _user: &str) -> PyGeniusResult<String> {
        Err(crate::error::PyGeniusError::NotConfigured)
    }

    async fn stream(&self, _system: &str, _user: &str) -> PyGeniusResult<TextStream> {
        Err(crate::error::PyGeniusError::NotConfigured)
    }
}
