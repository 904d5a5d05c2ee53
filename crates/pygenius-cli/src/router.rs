//! Command routing logic for CLI

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;
use crate::console::CliConsole;
use pygenius_core::PyGeniusConfig;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: PyGeniusConfig) -> anyhow::Result<()> {
    let console = CliConsole::new(cli.verbose);

    let result = match cli.command {
        // Assist commands
        Commands::Ask {
            question,
            stream,
            input,
        } => commands::assist::ask(&config, &console, &question, stream, &input).await,
        Commands::Explain { input } => commands::assist::explain(&config, &console, &input).await,
        Commands::Bugs { input, line } => {
            commands::assist::bugs(&config, &console, &input, line).await
        }
        Commands::Optimize { input } => {
            commands::assist::optimize(&config, &console, &input).await
        }
        Commands::Voice { description } => {
            commands::assist::voice(&config, &console, &description).await
        }
        Commands::Complete { cursor, input } => {
            commands::assist::complete(&config, &console, &input, cursor)
        }
        Commands::ExplainError { message, input } => {
            commands::assist::explain_error(&config, &console, &message, &input).await
        }
        Commands::Lesson { kind, level, check } => {
            commands::lesson::run(&config, &console, kind, level, check.as_deref()).await
        }

        // Local state
        Commands::Scripts { action } => commands::scripts::run(&config, &console, action),
        Commands::Progress { record_run } => {
            commands::progress::show(&config, &console, record_run)
        }
        Commands::Packages { action } => commands::packages::run(&config, &console, action),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::show(&config, &cli.config_file, &console);
                Ok(())
            }
            ConfigAction::Init { force } => {
                commands::config::init(&cli.config_file, force, &console)
            }
        },
    };

    if let Err(e) = &result {
        tracing::debug!(error = ?e, "Command failed");
    }
    result
}
