//! Configuration loading from files and the environment

use crate::config::model::PyGeniusConfig;
use crate::error::{PyGeniusError, PyGeniusResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "pygenius_config.json";

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Built-in defaults (resets everything loaded so far)
    Default,
    /// Configuration from a JSON or TOML file
    File(PathBuf),
    /// Configuration from environment variables
    Environment,
}

/// Configuration loader with support for multiple sources
///
/// Sources are applied in the order they were added; later sources win.
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Load configuration from all sources, reading the process environment
    pub fn load(self) -> PyGeniusResult<PyGeniusConfig> {
        if self
            .sources
            .iter()
            .any(|source| matches!(source, ConfigSource::Environment))
        {
            // A missing .env is the common case
            if let Ok(path) = dotenv::dotenv() {
                tracing::debug!("Loaded environment from {}", path.display());
            }
        }
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Load configuration with a custom environment lookup
    pub fn load_with_env<F>(self, lookup: F) -> PyGeniusResult<PyGeniusConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PyGeniusConfig::default();

        for source in &self.sources {
            match source {
                ConfigSource::Default => {
                    tracing::debug!("Loading default config");
                    config = PyGeniusConfig::default();
                }
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config from file: {}", path.display());
                    if let Some(file_config) = load_from_file(path)? {
                        config = file_config;
                    }
                }
                ConfigSource::Environment => {
                    tracing::debug!("Loading config from environment");
                    apply_env(&mut config, &lookup)?;
                }
            }
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from a file
///
/// Supports JSON and TOML based on file extension.
/// Returns `None` if the file doesn't exist.
pub fn load_from_file(path: &Path) -> PyGeniusResult<Option<PyGeniusConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| {
        PyGeniusError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            PyGeniusError::config(format!(
                "Failed to parse TOML config '{}': {}",
                path.display(),
                e
            ))
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            PyGeniusError::config(format!(
                "Failed to parse JSON config '{}': {}",
                path.display(),
                e
            ))
        })?,
    };

    Ok(Some(config))
}

/// Write a configuration file (JSON or TOML by extension)
pub fn save_to_file(config: &PyGeniusConfig, path: &Path) -> PyGeniusResult<()> {
    let content = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::to_string_pretty(config)
            .map_err(|e| PyGeniusError::config(format!("Failed to serialize TOML: {}", e)))?,
        _ => serde_json::to_string_pretty(config)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    Ok(())
}

/// Overlay environment variables onto `config`
///
/// `PYGENIUS_API_KEY` takes precedence over the vendor-standard
/// `OPENROUTER_API_KEY`.
fn apply_env<F>(config: &mut PyGeniusConfig, lookup: &F) -> PyGeniusResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(key) = non_empty("PYGENIUS_API_KEY").or_else(|| non_empty("OPENROUTER_API_KEY")) {
        config.ai.api_key = Some(key);
    }
    if let Some(model) = non_empty("PYGENIUS_MODEL") {
        config.ai.model = model;
    }
    if let Some(base_url) = non_empty("PYGENIUS_BASE_URL") {
        config.ai.base_url = base_url;
    }
    if let Some(temperature) = non_empty("PYGENIUS_TEMPERATURE") {
        config.ai.temperature = temperature
            .trim()
            .parse()
            .map_err(|_| PyGeniusError::config("Invalid PYGENIUS_TEMPERATURE value"))?;
    }
    if let Some(max_tokens) = non_empty("PYGENIUS_MAX_TOKENS") {
        config.ai.max_tokens = max_tokens
            .trim()
            .parse()
            .map_err(|_| PyGeniusError::config("Invalid PYGENIUS_MAX_TOKENS value"))?;
    }
    if let Some(data_dir) = non_empty("PYGENIUS_DATA_DIR") {
        config.storage.data_dir = Some(PathBuf::from(data_dir));
    }
    if let Some(level) = non_empty("PYGENIUS_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = non_empty("PYGENIUS_LOG_FORMAT") {
        config.logging.format = format;
    }

    Ok(())
}
