//! CLI commands

pub mod assist;
pub mod config;
pub mod lesson;
pub mod packages;
pub mod progress;
pub mod scripts;

use crate::args::CodeInput;
use anyhow::Context;
use pygenius_core::{AiEngine, Preferences, PyGeniusConfig};
use std::io::{IsTerminal, Read};
use std::path::Path;
use std::sync::Arc;

/// Read code from `--file`, or from stdin when it is piped
pub fn read_code(input: &CodeInput) -> anyhow::Result<String> {
    match &input.file {
        Some(path) => read_file(path),
        None => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                return Ok(String::new());
            }
            let mut code = String::new();
            stdin
                .lock()
                .read_to_string(&mut code)
                .context("Failed to read code from stdin")?;
            Ok(code)
        }
    }
}

pub fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn engine(config: &PyGeniusConfig) -> anyhow::Result<AiEngine> {
    AiEngine::from_config(&config.ai).context("Failed to set up the assist engine")
}

pub fn open_prefs(config: &PyGeniusConfig) -> anyhow::Result<Arc<Preferences>> {
    let path = config.storage.prefs_path();
    tracing::debug!("Opening preferences at {}", path.display());
    let prefs = Preferences::open(&path)
        .with_context(|| format!("Failed to open progress store {}", path.display()))?;
    Ok(Arc::new(prefs))
}
