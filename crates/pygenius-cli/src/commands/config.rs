//! Configuration management commands

use crate::console::CliConsole;
use anyhow::{Context, bail};
use pygenius_core::PyGeniusConfig;
use pygenius_core::config::save_to_file;
use std::path::Path;

/// Show the effective configuration (file + environment)
pub fn show(config: &PyGeniusConfig, config_file: &Path, console: &CliConsole) {
    console.print_header("Configuration");
    if config_file.exists() {
        console.success(&format!("Loaded configuration from: {}", config_file.display()));
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            config_file.display()
        ));
    }

    let ai = &config.ai;
    console.field(
        "API key",
        &ai.masked_api_key()
            .unwrap_or_else(|| "not set (offline mode)".to_string()),
    );
    console.field("Model", &ai.model);
    console.field("Endpoint", &ai.completions_url());
    console.field("Temperature", &ai.temperature.to_string());
    console.field("Max tokens", &ai.max_tokens.to_string());
    console.field(
        "Timeouts",
        &format!(
            "connect {}s, read {}s, write {}s",
            ai.timeouts.connect_timeout_secs,
            ai.timeouts.read_timeout_secs,
            ai.timeouts.write_timeout_secs
        ),
    );
    console.field(
        "Data file",
        &config.storage.prefs_path().display().to_string(),
    );
    console.field(
        "Logging",
        &format!("{} ({})", config.logging.level, config.logging.format),
    );
    console.field(
        "Analysis debounce",
        &format!("{} ms", config.editor.analysis_debounce_ms),
    );
}

/// Write a configuration file with defaults
pub fn init(config_file: &Path, force: bool, console: &CliConsole) -> anyhow::Result<()> {
    console.print_header("Configuration Initialization");

    if config_file.exists() && !force {
        console.info("Use --force to overwrite");
        bail!(
            "Configuration file already exists: {}",
            config_file.display()
        );
    }

    save_to_file(&PyGeniusConfig::default(), config_file)
        .with_context(|| format!("Failed to write {}", config_file.display()))?;

    console.success(&format!("Created configuration file: {}", config_file.display()));
    console.info("Set OPENROUTER_API_KEY or add \"api_key\" under \"ai\" to enable AI answers");
    Ok(())
}
