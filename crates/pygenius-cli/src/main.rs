//! PyGenius CLI application
//!
//! A command-line front end for the PyGenius AI tutor.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/pygenius-cli
//! ```
//!
//! Assist commands (`ask`, `explain`, `bugs`, `optimize`, `voice`,
//! `complete`, `explain-error`, `lesson`) talk to OpenRouter when a key is
//! configured and fall back to local heuristics otherwise. The remaining
//! commands manage local state: saved scripts, progress, packages and the
//! configuration file.

mod args;
mod commands;
mod console;
mod logging;
mod router;

use clap::Parser;
use pygenius_core::ConfigLoader;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .with_defaults()
        .with_file(&cli.config_file)
        .with_env()
        .load()?;

    logging::init(&config.logging, cli.verbose);
    tracing::debug!(config = ?config, "Configuration loaded");

    router::route(cli, config).await
}
