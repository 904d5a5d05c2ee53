//! CLI console utilities

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use pygenius_core::{BugPrediction, Severity};
use std::time::Duration;

/// CLI console for formatted output
pub struct CliConsole {
    verbose: bool,
}

impl CliConsole {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print an info message (verbose only)
    pub fn info(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "ℹ".blue().bold(), message);
        }
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message.green());
    }

    pub fn warn(&self, message: &str) {
        println!("{} {}", "⚠".yellow().bold(), message.yellow());
    }

    pub fn print_header(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
        println!("{}", "=".repeat(title.chars().count()).dimmed());
    }

    /// Print a labelled value
    pub fn field(&self, label: &str, value: &str) {
        println!("  {}: {}", label.cyan(), value);
    }

    pub fn print_bug(&self, bug: &BugPrediction) {
        let severity = match bug.severity {
            Severity::Critical => bug.severity.as_str().red().bold(),
            Severity::High => bug.severity.as_str().red(),
            Severity::Medium => bug.severity.as_str().yellow(),
            Severity::Low => bug.severity.as_str().dimmed(),
        };
        println!(
            "  {} {} {}",
            format!("line {}:", bug.line).cyan().bold(),
            format!("[{}]", severity),
            bug.message
        );
        if !bug.fix_suggestion.is_empty() {
            println!("    {} {}", "fix:".dimmed(), bug.fix_suggestion.dimmed());
        }
    }

    /// Spinner shown while an assist request is in flight
    ///
    /// Hidden when the AI is offline since local answers are instant.
    pub fn spinner(&self, message: &str, remote: bool) -> ProgressBar {
        if !remote {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
