//! Learner progress summary

use crate::commands::open_prefs;
use crate::console::CliConsole;
use chrono::{Local, TimeZone};
use pygenius_core::{PyGeniusConfig, UserProgress};

pub fn show(config: &PyGeniusConfig, console: &CliConsole, record_run: bool) -> anyhow::Result<()> {
    let progress = UserProgress::open(open_prefs(config)?)?;

    if record_run {
        let runs = progress.increment_code_runs()?;
        console.success(&format!("Recorded run #{}", runs));
    }

    console.print_header("Your Progress");
    console.field("Coding streak", &format!("{} day(s)", progress.coding_streak()));
    console.field("Code runs", &progress.total_code_runs().to_string());

    console.field("Last active", &format_visit(progress.previous_visit()));

    let lessons = progress.completed_lessons();
    console.field("Lessons completed", &lessons.len().to_string());
    for title in &lessons {
        println!("    ✓ {}", title);
    }
    Ok(())
}

/// Local time of the visit before this one, or "never"
fn format_visit(previous: Option<i64>) -> String {
    previous
        .and_then(|millis| Local.timestamp_millis_opt(millis).single())
        .map(|when| when.format("%b %d, %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}
