//! Error types for PyGenius

use thiserror::Error;

/// Result type alias for PyGenius operations
pub type PyGeniusResult<T> = Result<T, PyGeniusError>;

/// Main error type for PyGenius
///
/// The AI layer never surfaces these to the learner directly: the engine
/// converts every remote failure into a local fallback. They exist so the
/// fallback decision can be logged and tested.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PyGeniusError {
    /// Transport failure (connect, timeout, broken body)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status from the chat-completions endpoint
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Response body was not the JSON we expected
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON parsed, but a required field was absent
    #[error("Missing field in response: {0}")]
    MissingField(String),

    /// No API key configured
    #[error("OpenRouter API key not configured")]
    NotConfigured,

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// Preference store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid input errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PyGeniusError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a new API error
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new missing-field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether the failure is likely to go away on its own
    /// (network trouble, rate limiting, server errors).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<std::io::Error> for PyGeniusError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PyGeniusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for PyGeniusError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Api {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}
