//! Assist engine: remote AI first, deterministic local fallback always

use crate::assist::parse::{parse_bug_predictions, parse_error_explanation, parse_lesson};
use crate::assist::prompts::{self, Prompt};
use crate::assist::types::{
    AiSuggestion, BugPrediction, DifficultyLevel, ErrorExplanation, Lesson, LessonType,
    SolutionFeedback,
};
use crate::config::AiConfig;
use crate::error::{PyGeniusError, PyGeniusResult};
use crate::heuristics::{
    OPTIMIZATION_TIPS, analyze_locally, code_completion, explain_code_locally,
    offline_tutor_reply, voice_to_code_locally,
};
use crate::knowledge::{LessonCatalog, explain_error_locally};
use crate::llm::{ChatBackend, OfflineBackend, OpenRouterClient};
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, warn};

pub const STREAM_KEY_MISSING: &str = "⚠️ API key not configured.";

/// Entry point for every assist action
///
/// No operation fails: a missing API key routes straight to the local
/// heuristics, and any remote failure is logged and answered locally.
#[derive(Clone)]
pub struct AiEngine {
    backend: Arc<dyn ChatBackend>,
    catalog: LessonCatalog,
}

impl AiEngine {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            catalog: LessonCatalog::new(),
        }
    }

    /// Engine backed by OpenRouter, or fully offline when no key is set
    pub fn from_config(config: &AiConfig) -> PyGeniusResult<Self> {
        if !config.has_api_key() {
            debug!("No API key configured, assist engine runs offline");
            return Ok(Self::offline());
        }
        let client = OpenRouterClient::new(config.clone())?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineBackend))
    }

    pub fn is_ai_available(&self) -> bool {
        self.backend.has_api_key()
    }

    async fn remote(&self, action: &str, prompt: &Prompt) -> Option<PyGeniusResult<String>> {
        if !self.is_ai_available() {
            debug!("{}: no API key, using local fallback", action);
            return None;
        }
        Some(self.backend.complete(&prompt.system, &prompt.user).await)
    }

    /// Completion candidates for the cursor position; always local
    pub fn code_completion(&self, code: &str, cursor: usize) -> Vec<AiSuggestion> {
        code_completion(code, cursor)
    }

    pub async fn analyze_for_bugs(&self, code: &str) -> Vec<BugPrediction> {
        let reply = self.remote("analyze_for_bugs", &prompts::analyze_bugs(code)).await;
        match reply.map(|r| r.and_then(|text| parse_bug_predictions(&text))) {
            Some(Ok(predictions)) => predictions,
            Some(Err(e)) => {
                log_fallback("analyze_for_bugs", &e);
                analyze_locally(code)
            }
            None => analyze_locally(code),
        }
    }

    pub async fn explain_error(&self, message: &str, code: &str) -> ErrorExplanation {
        match self
            .remote("explain_error", &prompts::explain_error(message, code))
            .await
        {
            Some(Ok(text)) => parse_error_explanation(&text),
            Some(Err(e)) => {
                log_fallback("explain_error", &e);
                explain_error_locally(message)
            }
            None => explain_error_locally(message),
        }
    }

    pub async fn explain_code(&self, code: &str) -> String {
        match self.remote("explain_code", &prompts::explain_code(code)).await {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                log_fallback("explain_code", &e);
                explain_code_locally(code)
            }
            None => explain_code_locally(code),
        }
    }

    pub async fn ask_tutor(&self, question: &str, code: &str) -> String {
        match self.remote("ask_tutor", &prompts::tutor(question, code)).await {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                log_fallback("ask_tutor", &e);
                format!(
                    "❌ Error: {}\n\nPlease check your internet connection and API key.",
                    e
                )
            }
            None => offline_tutor_reply(question, code),
        }
    }

    pub async fn optimize_code(&self, code: &str) -> String {
        match self.remote("optimize_code", &prompts::optimize_code(code)).await {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                log_fallback("optimize_code", &e);
                OPTIMIZATION_TIPS.to_string()
            }
            None => OPTIMIZATION_TIPS.to_string(),
        }
    }

    pub async fn voice_to_code(&self, spoken: &str) -> String {
        match self.remote("voice_to_code", &prompts::generate_code(spoken)).await {
            Some(Ok(text)) => text,
            Some(Err(e)) => {
                log_fallback("voice_to_code", &e);
                voice_to_code_locally(spoken)
            }
            None => voice_to_code_locally(spoken),
        }
    }

    pub async fn generate_lesson(&self, kind: LessonType, level: DifficultyLevel) -> Lesson {
        let reply = self
            .remote("generate_lesson", &prompts::generate_lesson(kind, level))
            .await;
        match reply.map(|r| r.and_then(|text| parse_lesson(&text, level))) {
            Some(Ok(lesson)) => lesson,
            Some(Err(e)) => {
                log_fallback("generate_lesson", &e);
                self.catalog.lesson(kind, level)
            }
            None => self.catalog.lesson(kind, level),
        }
    }

    /// Grade a lesson attempt
    ///
    /// Offline, only an exact match with the reference solution passes.
    pub async fn check_solution(&self, lesson: &Lesson, attempt: &str) -> SolutionFeedback {
        let matches_solution = attempt
            .trim()
            .to_lowercase()
            .eq(&lesson.solution.trim().to_lowercase());

        let (feedback, passed) = if self.is_ai_available() {
            let prompt = prompts::check_solution(lesson, attempt);
            let text = match self.backend.complete(&prompt.system, &prompt.user).await {
                Ok(text) => text,
                Err(e) => {
                    log_fallback("check_solution", &e);
                    format!(
                        "❌ Error: {}\n\nPlease check your internet connection and API key.",
                        e
                    )
                }
            };
            let passed = matches_solution || feedback_says_correct(&text);
            (text, passed)
        } else if matches_solution {
            (
                "Your code matches the expected solution. Great job!".to_string(),
                true,
            )
        } else {
            let hint = lesson
                .hints
                .first()
                .map(String::as_str)
                .unwrap_or("Re-read the lesson code.");
            (
                format!(
                    "Not quite yet. Compare your code with the challenge:\n{}\n\nHint: {}",
                    lesson.challenge, hint
                ),
                false,
            )
        };

        SolutionFeedback {
            passed,
            feedback: if passed {
                format!("✓ {}", feedback)
            } else {
                feedback
            },
        }
    }

    /// Issue/fix/severity text for the first prediction on `line`
    pub fn describe_fix(predictions: &[BugPrediction], line: u32) -> Option<String> {
        predictions.iter().find(|p| p.line == line).map(|fix| {
            format!(
                "🐛 Issue on line {}: {}\n\n💡 Suggested fix:\n{}\n\n⚠️ Severity: {}",
                fix.line, fix.message, fix.fix_suggestion, fix.severity
            )
        })
    }

    /// Tutor reply as incremental text; failures arrive as text items
    pub fn stream_tutor_response(&self, question: &str, code: &str) -> BoxStream<'static, String> {
        if !self.is_ai_available() {
            return stream::iter([STREAM_KEY_MISSING.to_string()]).boxed();
        }

        let backend = Arc::clone(&self.backend);
        let prompt = prompts::stream_tutor(question, code);

        stream::once(async move { backend.stream(&prompt.system, &prompt.user).await })
            .flat_map(|opened| match opened {
                Ok(pieces) => pieces
                    .map(|piece| match piece {
                        Ok(text) => text,
                        Err(e) => {
                            log_fallback("stream_tutor_response", &e);
                            stream_failure_text(&e)
                        }
                    })
                    .boxed(),
                Err(e) => {
                    log_fallback("stream_tutor_response", &e);
                    stream::iter([stream_failure_text(&e)]).boxed()
                }
            })
            .boxed()
    }
}

fn log_fallback(action: &str, error: &PyGeniusError) {
    warn!(
        transient = error.is_transient(),
        "{} failed, falling back: {}", action, error
    );
}

fn feedback_says_correct(feedback: &str) -> bool {
    if feedback.contains('✓') {
        return true;
    }
    let lower = feedback.to_lowercase();
    lower.contains("correct") && !lower.contains("incorrect") && !lower.contains("not correct")
}

/// Text item standing in for a failed stream
fn stream_failure_text(error: &PyGeniusError) -> String {
    match error {
        PyGeniusError::NotConfigured => STREAM_KEY_MISSING.to_string(),
        PyGeniusError::Api { status, .. } => {
            let reason = reqwest::StatusCode::from_u16(*status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or_default();
            format!("Error: {} - {}", status, reason)
        }
        PyGeniusError::Network(message) => format!("\n\n❌ Network error: {}", message),
        other => format!("\n\n❌ Network error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_says_correct() {
        assert!(feedback_says_correct("That's correct!"));
        assert!(feedback_says_correct("✓ Works"));
        assert!(!feedback_says_correct("This is incorrect."));
        assert!(!feedback_says_correct("Not correct yet"));
        assert!(!feedback_says_correct("Try again"));
    }

    #[test]
    fn test_stream_failure_text() {
        assert_eq!(
            stream_failure_text(&PyGeniusError::api(401, "{}")),
            "Error: 401 - Unauthorized"
        );
        assert_eq!(
            stream_failure_text(&PyGeniusError::network("reset")),
            "\n\n❌ Network error: reset"
        );
    }

    #[test]
    fn test_describe_fix_picks_first_on_line() {
        let predictions = vec![
            BugPrediction::new(2, "first", crate::assist::types::Severity::High, "fix it"),
            BugPrediction::new(2, "second", crate::assist::types::Severity::Low, "other"),
        ];
        assert_eq!(
            AiEngine::describe_fix(&predictions, 2).unwrap(),
            "🐛 Issue on line 2: first\n\n💡 Suggested fix:\nfix it\n\n⚠️ Severity: HIGH"
        );
        assert!(AiEngine::describe_fix(&predictions, 3).is_none());
    }
}
