//! Lesson display and solution checking

use crate::commands::{engine, open_prefs, read_file};
use crate::console::CliConsole;
use colored::*;
use pygenius_core::{
    DifficultyLevel, Lesson, LessonCatalog, LessonType, PyGeniusConfig, UserProgress,
};
use std::path::Path;

/// Show a lesson, or grade `check` against the lesson last shown
pub async fn run(
    config: &PyGeniusConfig,
    console: &CliConsole,
    kind: LessonType,
    level: DifficultyLevel,
    check: Option<&Path>,
) -> anyhow::Result<()> {
    let engine = engine(config)?;
    let progress = UserProgress::open(open_prefs(config)?)?;

    let Some(path) = check else {
        let spinner = console.spinner("Generating lesson...", engine.is_ai_available());
        let lesson = engine.generate_lesson(kind, level).await;
        spinner.finish_and_clear();

        progress.set_current_lesson(kind, &lesson)?;
        print_lesson(console, &lesson, progress.is_lesson_completed(&lesson.title));
        return Ok(());
    };

    let lesson = progress.current_lesson(kind, level).unwrap_or_else(|| {
        console.info("No lesson shown for this topic yet, checking against the built-in one");
        LessonCatalog::new().lesson(kind, level)
    });

    let attempt = read_file(path)?;
    let spinner = console.spinner("Checking your solution...", engine.is_ai_available());
    let result = engine.check_solution(&lesson, &attempt).await;
    spinner.finish_and_clear();

    if result.passed {
        progress.mark_lesson_completed(&lesson.title)?;
        console.success(&format!("Lesson completed: {}", lesson.title));
        println!("{}", result.feedback);
    } else {
        console.warn("Not solved yet");
        println!("{}", result.feedback);
    }
    Ok(())
}

fn print_lesson(console: &CliConsole, lesson: &Lesson, completed: bool) {
    let title = if completed {
        format!("{} ✓", lesson.title)
    } else {
        lesson.title.clone()
    };
    console.print_header(&title);
    console.field("Difficulty", lesson.difficulty.as_str());
    println!();
    println!("{}", lesson.description);
    println!();
    println!("{}", lesson.code.green());
    println!();
    println!("{} {}", "Challenge:".bold(), lesson.challenge);
    for (i, hint) in lesson.hints.iter().enumerate() {
        println!("  {} {}", format!("Hint {}:", i + 1).dimmed(), hint);
    }
}
