//! Assist commands: tutor, explanations, bug analysis, completion

use crate::args::CodeInput;
use crate::commands::{engine, read_code};
use crate::console::CliConsole;
use colored::*;
use futures::StreamExt;
use pygenius_core::{AiEngine, PyGeniusConfig};
use std::io::{self, Write};

pub async fn ask(
    config: &PyGeniusConfig,
    console: &CliConsole,
    question: &str,
    stream: bool,
    input: &CodeInput,
) -> anyhow::Result<()> {
    let engine = engine(config)?;
    let code = read_code(input)?;

    if stream {
        let mut pieces = engine.stream_tutor_response(question, &code);
        let mut stdout = io::stdout();
        while let Some(piece) = pieces.next().await {
            write!(stdout, "{}", piece)?;
            stdout.flush()?;
        }
        writeln!(stdout)?;
        return Ok(());
    }

    let spinner = console.spinner("Thinking...", engine.is_ai_available());
    let answer = engine.ask_tutor(question, &code).await;
    spinner.finish_and_clear();
    println!("{}", answer);
    Ok(())
}

pub async fn explain(
    config: &PyGeniusConfig,
    console: &CliConsole,
    input: &CodeInput,
) -> anyhow::Result<()> {
    let engine = engine(config)?;
    let code = read_code(input)?;

    let spinner = console.spinner("Analyzing your code...", engine.is_ai_available());
    let explanation = engine.explain_code(&code).await;
    spinner.finish_and_clear();
    println!("{}", explanation);
    Ok(())
}

pub async fn optimize(
    config: &PyGeniusConfig,
    console: &CliConsole,
    input: &CodeInput,
) -> anyhow::Result<()> {
    let engine = engine(config)?;
    let code = read_code(input)?;

    let spinner = console.spinner("Analyzing for optimizations...", engine.is_ai_available());
    let suggestions = engine.optimize_code(&code).await;
    spinner.finish_and_clear();
    println!("{}", suggestions);
    Ok(())
}

pub async fn voice(
    config: &PyGeniusConfig,
    console: &CliConsole,
    description: &str,
) -> anyhow::Result<()> {
    let engine = engine(config)?;

    let spinner = console.spinner("Generating code...", engine.is_ai_available());
    let code = engine.voice_to_code(description).await;
    spinner.finish_and_clear();
    println!("{}", code);
    Ok(())
}

pub async fn bugs(
    config: &PyGeniusConfig,
    console: &CliConsole,
    input: &CodeInput,
    line: Option<u32>,
) -> anyhow::Result<()> {
    let engine = engine(config)?;
    let code = read_code(input)?;

    let spinner = console.spinner("Looking for bugs...", engine.is_ai_available());
    let predictions = engine.analyze_for_bugs(&code).await;
    spinner.finish_and_clear();

    if predictions.is_empty() {
        console.success("No likely bugs found");
        return Ok(());
    }

    console.print_header(&format!("{} potential issue(s)", predictions.len()));
    for bug in &predictions {
        console.print_bug(bug);
    }

    if let Some(line) = line {
        println!();
        match AiEngine::describe_fix(&predictions, line) {
            Some(fix) => println!("{}", fix),
            None => console.warn(&format!("No issue reported on line {}", line)),
        }
    }
    Ok(())
}

pub fn complete(
    config: &PyGeniusConfig,
    console: &CliConsole,
    input: &CodeInput,
    cursor: Option<usize>,
) -> anyhow::Result<()> {
    let engine = engine(config)?;
    let code = read_code(input)?;
    let cursor = cursor.unwrap_or_else(|| code.chars().count());

    let suggestions = engine.code_completion(&code, cursor);
    if suggestions.is_empty() {
        console.info("No suggestions at this position");
        return Ok(());
    }

    for suggestion in suggestions {
        println!(
            "{:<24} {} {}",
            suggestion.text.bold(),
            format!("{:?}", suggestion.kind).to_lowercase().cyan(),
            suggestion.description.dimmed()
        );
    }
    Ok(())
}

pub async fn explain_error(
    config: &PyGeniusConfig,
    console: &CliConsole,
    message: &str,
    input: &CodeInput,
) -> anyhow::Result<()> {
    let engine = engine(config)?;
    let code = read_code(input)?;

    let spinner = console.spinner("Explaining error...", engine.is_ai_available());
    let explanation = engine.explain_error(message, &code).await;
    spinner.finish_and_clear();

    console.print_header(&explanation.error_type);
    println!("{}", explanation.explanation);
    println!();
    println!("{} {}", "💡".yellow(), explanation.suggestion);
    if !explanation.example.is_empty() {
        println!();
        println!("{}", "Example:".bold());
        println!("{}", explanation.example);
    }
    Ok(())
}
