//! PyGenius Core Library
//!
//! AI tutor engine for a Python learning IDE: an OpenRouter chat-completion
//! client, prompt builders and response parsers, deterministic offline
//! fallbacks, and the learner's progress store.

pub mod assist;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod knowledge;
pub mod llm;
pub mod packages;
pub mod progress;
pub mod session;

// Re-export commonly used types
pub use assist::{
    AiEngine, AiSuggestion, BugPrediction, DifficultyLevel, ErrorExplanation, Lesson, LessonType,
    PyPackage, ScriptEntry, Severity, SolutionFeedback, SuggestionType,
};
pub use config::{AiConfig, ConfigLoader, ConfigSource, PyGeniusConfig};
pub use error::{PyGeniusError, PyGeniusResult};
pub use knowledge::LessonCatalog;
pub use llm::{ChatBackend, OfflineBackend, OpenRouterClient};
pub use packages::PackageRegistry;
pub use progress::{Preferences, UserProgress};
pub use session::{AssistSession, AssistState};
