//! OpenRouter chat-completions client

use crate::config::AiConfig;
use crate::error::{PyGeniusError, PyGeniusResult};
use crate::llm::backend::ChatBackend;
use crate::llm::messages::ChatRequest;
use crate::llm::sanitize::sanitize_error_text;
use crate::llm::streaming::{TextStream, sse_content_stream};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// HTTP client for an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenRouterClient {
    config: AiConfig,
    http_client: Client,
}

impl OpenRouterClient {
    /// Create a client with the configured timeouts
    pub fn new(config: AiConfig) -> PyGeniusResult<Self> {
        config.validate()?;

        let timeouts = &config.timeouts;
        let http_client = Client::builder()
            .connect_timeout(timeouts.connect_timeout())
            .read_timeout(timeouts.read_timeout())
            .build()
            .map_err(|e| PyGeniusError::config(format!("Failed to create HTTP client: {}", e)))?;

        debug!(
            "Created OpenRouter client for model '{}' with timeouts: connect={}s, read={}s, write={}s",
            config.model,
            timeouts.connect_timeout_secs,
            timeouts.read_timeout_secs,
            timeouts.write_timeout_secs
        );

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client around an existing HTTP client
    pub fn with_http_client(config: AiConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Authenticated POST for `body`
    ///
    /// One-shot requests are capped at the total timeout. Streams are only
    /// bounded by the read timeout between chunks, so a long answer that
    /// keeps arriving is never cut off.
    pub(crate) fn build_request(&self, body: &ChatRequest) -> PyGeniusResult<RequestBuilder> {
        let api_key = self.config.api_key().ok_or(PyGeniusError::NotConfigured)?;

        let request = self
            .http_client
            .post(self.config.completions_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(body);

        Ok(if body.stream {
            request
        } else {
            request.timeout(self.config.timeouts.total_timeout())
        })
    }

    fn request_body(&self, system: &str, user: &str) -> ChatRequest {
        ChatRequest::new(
            self.config.model.clone(),
            system,
            user,
            self.config.temperature,
            self.config.max_tokens,
        )
    }

    async fn send(&self, body: &ChatRequest) -> PyGeniusResult<reqwest::Response> {
        let response = self
            .build_request(body)?
            .send()
            .await
            .map_err(|e| PyGeniusError::network(format!("OpenRouter request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let sanitized = sanitize_error_text(&error_text);
            warn!("OpenRouter API error (status {}): {}", status, sanitized);
            return Err(PyGeniusError::api(status.as_u16(), sanitized));
        }

        Ok(response)
    }

    /// One-shot completion
    #[instrument(skip(self, system, user), level = "debug")]
    pub async fn chat(&self, system: &str, user: &str) -> PyGeniusResult<String> {
        let body = self.request_body(system, user);
        let response = self.send(&body).await?;

        let text = response
            .text()
            .await
            .map_err(|e| PyGeniusError::network(format!("Failed to read response body: {}", e)))?;
        let json: Value = serde_json::from_str(&text).map_err(|e| {
            PyGeniusError::parse(format!("Failed to parse OpenRouter response: {}", e))
        })?;

        extract_message_content(&json)
    }

    /// Streaming completion
    #[instrument(skip(self, system, user), level = "debug")]
    pub async fn chat_stream(&self, system: &str, user: &str) -> PyGeniusResult<TextStream> {
        let body = self.request_body(system, user).streaming();
        let response = self.send(&body).await?;
        Ok(sse_content_stream(response.bytes_stream()))
    }
}

/// `choices[0].message.content` from a completion response
pub fn extract_message_content(json: &Value) -> PyGeniusResult<String> {
    let choice = json
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| PyGeniusError::missing_field("choices"))?;

    choice
        .pointer("/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| PyGeniusError::missing_field("choices[0].message.content"))
}

#[async_trait]
impl ChatBackend for OpenRouterClient {
    fn has_api_key(&self) -> bool {
        self.config.has_api_key()
    }

    async fn complete(&self, system: &str, user: &str) -> PyGeniusResult<String> {
        self.chat(system, user).await
    }

    async fn stream(&self, system: &str, user: &str) -> PyGeniusResult<TextStream> {
        self.chat_stream(system, user).await
    }
}
