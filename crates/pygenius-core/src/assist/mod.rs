//! Prompting, parsing and orchestration of assist actions

pub mod engine;
#[cfg(test)]
mod engine_tests;
pub mod parse;
pub mod prompts;
pub mod types;

pub use engine::{AiEngine, STREAM_KEY_MISSING};
pub use prompts::Prompt;
pub use types::{
    AiSuggestion, BugPrediction, DifficultyLevel, ErrorExplanation, Lesson, LessonType, PyPackage,
    ScriptEntry, Severity, SolutionFeedback, SuggestionType,
};
