//! Value types produced by the assist engine

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of an editor suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionType {
    Completion,
    Import,
    Method,
    Variable,
    Snippet,
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub text: String,
    pub kind: SuggestionType,
    #[serde(default)]
    pub description: String,
}

impl AiSuggestion {
    pub fn new(text: impl Into<String>, kind: SuggestionType, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            description: description.into(),
        }
    }
}

/// How bad a predicted bug is
///
/// Serialized upper-case. Deserialization is case-insensitive and maps
/// anything unrecognised to `Low`, since models invent their own labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Lenient parse used for model output
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "MEDIUM" => Severity::Medium,
            "HIGH" => Severity::High,
            "CRITICAL" => Severity::Critical,
            _ => Severity::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Severity::parse_lenient(&value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A suspected problem on one line of the learner's code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugPrediction {
    /// 1-based line number; 0 when the model could not place it
    pub line: u32,
    pub message: String,
    pub severity: Severity,
    pub fix_suggestion: String,
}

impl BugPrediction {
    pub fn new(
        line: u32,
        message: impl Into<String>,
        severity: Severity,
        fix_suggestion: impl Into<String>,
    ) -> Self {
        Self {
            line,
            message: message.into(),
            severity,
            fix_suggestion: fix_suggestion.into(),
        }
    }
}

/// Plain-language account of a Python error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExplanation {
    pub error_type: String,
    pub explanation: String,
    pub suggestion: String,
    #[serde(default)]
    pub example: String,
}

impl ErrorExplanation {
    pub fn new(
        error_type: impl Into<String>,
        explanation: impl Into<String>,
        suggestion: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            error_type: error_type.into(),
            explanation: explanation.into(),
            suggestion: suggestion.into(),
            example: example.into(),
        }
    }
}

/// Lesson topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonType {
    Variables,
    Loops,
    Functions,
    Classes,
    ListComprehension,
    DataStructures,
}

impl LessonType {
    pub const ALL: [LessonType; 6] = [
        LessonType::Variables,
        LessonType::Loops,
        LessonType::Functions,
        LessonType::Classes,
        LessonType::ListComprehension,
        LessonType::DataStructures,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonType::Variables => "VARIABLES",
            LessonType::Loops => "LOOPS",
            LessonType::Functions => "FUNCTIONS",
            LessonType::Classes => "CLASSES",
            LessonType::ListComprehension => "LIST_COMPREHENSION",
            LessonType::DataStructures => "DATA_STRUCTURES",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_variant(s);
        LessonType::ALL
            .into_iter()
            .find(|variant| variant.as_str() == wanted)
            .ok_or_else(|| format!("Unknown lesson type: {}", s))
    }
}

/// Lesson difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 3] = [
        DifficultyLevel::Beginner,
        DifficultyLevel::Intermediate,
        DifficultyLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "BEGINNER",
            DifficultyLevel::Intermediate => "INTERMEDIATE",
            DifficultyLevel::Advanced => "ADVANCED",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_variant(s);
        DifficultyLevel::ALL
            .into_iter()
            .find(|variant| variant.as_str() == wanted)
            .ok_or_else(|| format!("Unknown difficulty level: {}", s))
    }
}

fn normalize_variant(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

/// An interactive coding lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub description: String,
    pub code: String,
    pub challenge: String,
    pub hints: Vec<String>,
    pub solution: String,
    pub difficulty: DifficultyLevel,
}

/// Outcome of grading a lesson attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionFeedback {
    pub passed: bool,
    pub feedback: String,
}

/// A saved script body with its save time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub content: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ScriptEntry {
    pub fn new(content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            content: content.into(),
            timestamp,
        }
    }

    /// Save time as `MMM dd, HH:mm` in local time
    pub fn formatted_date(&self) -> String {
        self.formatted_date_in(&Local)
    }

    /// Save time as `MMM dd, HH:mm` in the given zone
    pub fn formatted_date_in<Tz>(&self, zone: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        match zone.timestamp_millis_opt(self.timestamp).single() {
            Some(when) => when.format("%b %d, %H:%M").to_string(),
            None => String::new(),
        }
    }
}

/// A package in the mocked installed list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PyPackage {
    pub name: String,
    pub version: String,
}

impl PyPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}
