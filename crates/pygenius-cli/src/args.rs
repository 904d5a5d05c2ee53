//! CLI argument definitions using clap
//!
//! - pygenius ask "question" --file main.py
//! - pygenius bugs < main.py
//! - pygenius lesson loops beginner --check attempt.py
//! - pygenius scripts/progress/packages/config   # Local state

use clap::{Args, Parser, Subcommand};
use pygenius_core::{DifficultyLevel, LessonType};
use pygenius_core::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pygenius")]
#[command(about = "PyGenius - AI tutor for learning Python")]
#[command(
    long_about = r#"PyGenius - AI tutor for learning Python

Every assist command works offline. With an OpenRouter API key
(OPENROUTER_API_KEY) answers come from the configured model; without
one, or when the service fails, local heuristics answer instead.

Code is read from --file, or from stdin when it is piped."#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (JSON or TOML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the code under discussion comes from
#[derive(Args, Clone, Debug, Default)]
pub struct CodeInput {
    /// Python file to read; stdin is used when omitted and piped
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the tutor a question about your code
    Ask {
        /// The question
        question: String,

        /// Print the answer as it arrives
        #[arg(long)]
        stream: bool,

        #[command(flatten)]
        input: CodeInput,
    },

    /// Explain what a piece of code does
    Explain {
        #[command(flatten)]
        input: CodeInput,
    },

    /// Predict likely bugs
    Bugs {
        #[command(flatten)]
        input: CodeInput,

        /// Show the suggested fix for this line
        #[arg(long)]
        line: Option<u32>,
    },

    /// Suggest optimizations
    Optimize {
        #[command(flatten)]
        input: CodeInput,
    },

    /// Turn a spoken description into code
    Voice {
        /// What the code should do, e.g. "create a function called greet"
        description: String,
    },

    /// Completion suggestions at a cursor position
    Complete {
        /// Cursor offset in characters; defaults to the end of the code
        #[arg(long)]
        cursor: Option<usize>,

        #[command(flatten)]
        input: CodeInput,
    },

    /// Explain a Python error message
    ExplainError {
        /// The error message, e.g. "KeyError: 'name'"
        message: String,

        #[command(flatten)]
        input: CodeInput,
    },

    /// Show a lesson, or check an attempt at its challenge
    Lesson {
        /// Topic: variables, loops, functions, classes, list-comprehension, data-structures
        kind: LessonType,

        /// Level: beginner, intermediate, advanced
        #[arg(default_value = "beginner")]
        level: DifficultyLevel,

        /// Python file with your solution to the challenge
        #[arg(long)]
        check: Option<PathBuf>,
    },

    /// Manage saved scripts
    Scripts {
        #[command(subcommand)]
        action: ScriptsAction,
    },

    /// Show streak, completed lessons and run count
    Progress {
        /// Count one code run
        #[arg(long)]
        record_run: bool,
    },

    /// Manage the installed package list
    Packages {
        #[command(subcommand)]
        action: PackagesAction,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ScriptsAction {
    /// Save a script under a name
    Save {
        name: String,

        #[command(flatten)]
        input: CodeInput,
    },

    /// List saved scripts
    List,

    /// Print a saved script
    Show { name: String },

    /// Delete a saved script
    Delete { name: String },
}

#[derive(Subcommand, Clone)]
pub enum PackagesAction {
    /// List installed packages
    List,

    /// Install a package
    Install { name: String },

    /// Uninstall a package
    Uninstall { name: String },

    /// Search installed packages by name
    Search { query: String },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display current configuration settings
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_file() {
        let cli = Cli::try_parse_from(["pygenius", "ask", "why?", "--stream", "-f", "main.py"])
            .unwrap();
        match cli.command {
            Commands::Ask {
                question,
                stream,
                input,
            } => {
                assert_eq!(question, "why?");
                assert!(stream);
                assert_eq!(input.file, Some(PathBuf::from("main.py")));
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_parse_lesson_enums() {
        let cli = Cli::try_parse_from(["pygenius", "lesson", "list-comprehension", "advanced"])
            .unwrap();
        match cli.command {
            Commands::Lesson { kind, level, check } => {
                assert_eq!(kind, LessonType::ListComprehension);
                assert_eq!(level, DifficultyLevel::Advanced);
                assert!(check.is_none());
            }
            _ => panic!("expected lesson"),
        }
    }

    #[test]
    fn test_lesson_level_defaults_to_beginner() {
        let cli = Cli::try_parse_from(["pygenius", "lesson", "loops"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Lesson {
                level: DifficultyLevel::Beginner,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_lesson_rejected() {
        assert!(Cli::try_parse_from(["pygenius", "lesson", "monads"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli =
            Cli::try_parse_from(["pygenius", "packages", "list", "--config-file", "x.toml"])
                .unwrap();
        assert_eq!(cli.config_file, PathBuf::from("x.toml"));
        assert!(matches!(
            cli.command,
            Commands::Packages {
                action: PackagesAction::List
            }
        ));
    }
}
