//! Configuration data structures

use crate::error::{PyGeniusError, PyGeniusResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default OpenRouter API base URL
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default model routed through OpenRouter
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
/// `HTTP-Referer` header OpenRouter requires for attribution
pub const DEFAULT_REFERER: &str = "https://pygenius.ai";
/// `X-Title` header OpenRouter requires for attribution
pub const DEFAULT_TITLE: &str = "PyGenius AI";
/// Name of the flat preference file inside the data directory
pub const PREFS_FILE_NAME: &str = "pygenius_prefs.json";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyGeniusConfig {
    /// Remote AI settings
    pub ai: AiConfig,
    /// Where progress and scripts are stored
    pub storage: StorageConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Editor assistance settings
    pub editor: EditorConfig,
}

impl PyGeniusConfig {
    /// Validate the whole configuration
    pub fn validate(&self) -> PyGeniusResult<()> {
        self.ai.validate()?;
        self.ai.timeouts.validate()?;
        Ok(())
    }
}

/// Chat-completion endpoint settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// OpenRouter API key. `None` means every action takes the offline path.
    pub api_key: Option<String>,
    /// API base URL; `/chat/completions` is appended
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token cap
    pub max_tokens: u32,
    /// Value of the `HTTP-Referer` header
    pub referer: String,
    /// Value of the `X-Title` header
    pub title: String,
    /// HTTP timeouts
    pub timeouts: TimeoutConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl AiConfig {
    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The API key, if one is set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Whether a usable API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Masked form of the key for display
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key().map(mask_api_key)
    }

    /// Full chat-completions URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Validate the AI settings
    pub fn validate(&self) -> PyGeniusResult<()> {
        if self.model.trim().is_empty() {
            return Err(PyGeniusError::config("Model name must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(PyGeniusError::config("Base URL must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(PyGeniusError::config(format!(
                "Temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(PyGeniusError::config("max_tokens must be greater than 0"));
        }
        Ok(())
    }
}

impl fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.masked_api_key())
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

/// Mask an API key, keeping only a short prefix and suffix
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// Timeout configuration for the chat-completions client
///
/// Mirrors the connect/read/write split of a classic HTTP client:
/// - **Connection timeout**: time allowed to establish a connection
/// - **Read timeout**: time allowed between body reads
/// - **Write timeout**: time allowed for sending the request
///
/// One-shot requests are also capped at the sum of the three. Streaming
/// responses have no overall cap; only the read timeout applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection timeout in seconds (default 30)
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds (default 60)
    pub read_timeout_secs: u64,
    /// Write timeout in seconds (default 30)
    pub write_timeout_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            read_timeout_secs: 60,
            write_timeout_secs: 30,
        }
    }
}

impl TimeoutConfig {
    /// Connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Read timeout as Duration
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Total request cap as Duration
    pub fn total_timeout(&self) -> Duration {
        Duration::from_secs(
            self.connect_timeout_secs + self.read_timeout_secs + self.write_timeout_secs,
        )
    }

    /// Validate timeout configuration
    pub fn validate(&self) -> PyGeniusResult<()> {
        if self.connect_timeout_secs == 0
            || self.read_timeout_secs == 0
            || self.write_timeout_secs == 0
        {
            return Err(PyGeniusError::config("Timeouts must be greater than 0"));
        }
        Ok(())
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; defaults to the platform data dir + `pygenius`
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolved data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .or_else(dirs::home_dir)
                .unwrap_or_default()
                .join("pygenius")
        })
    }

    /// Path of the preference file
    pub fn prefs_path(&self) -> PathBuf {
        self.data_dir().join(PREFS_FILE_NAME)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, compact, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Editor assistance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Quiet period after the last edit before bug analysis runs
    pub analysis_debounce_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            analysis_debounce_ms: 800,
        }
    }
}

impl EditorConfig {
    /// Debounce as Duration
    pub fn analysis_debounce(&self) -> Duration {
        Duration::from_millis(self.analysis_debounce_ms)
    }
}
