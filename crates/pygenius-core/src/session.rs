//! Interactive assist session
//!
//! Holds at most one in-flight assist request. Submitting another cancels
//! the previous one, and a cancelled request never publishes its result.
//! Bug analysis runs on its own debounced slot so typing does not cancel
//! an open tutor question.

use crate::assist::engine::AiEngine;
use crate::config::PyGeniusConfig;
use crate::error::PyGeniusResult;
use crate::assist::types::{BugPrediction, DifficultyLevel, ErrorExplanation, Lesson, LessonType};
use parking_lot::Mutex;
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Snapshot published to subscribers after every change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistState {
    /// An assist request is in flight
    pub processing: bool,
    /// A debounced bug analysis is in flight
    pub analyzing: bool,
    /// Latest tutor/explain/optimize text, or the placeholder while waiting
    pub response: String,
    pub bug_predictions: Vec<BugPrediction>,
    pub last_error: Option<ErrorExplanation>,
    pub current_lesson: Option<Lesson>,
}

enum Outcome {
    Response(String),
    ErrorExplained(ErrorExplanation),
    Lesson(Lesson),
}

impl Outcome {
    fn apply(self, state: &mut AssistState) {
        match self {
            Outcome::Response(text) => state.response = text,
            Outcome::ErrorExplained(explanation) => {
                state.response = explanation.explanation.clone();
                state.last_error = Some(explanation);
            }
            Outcome::Lesson(lesson) => {
                state.response = lesson.description.clone();
                state.current_lesson = Some(lesson);
            }
        }
    }
}

/// Assist requests bound to one editor
pub struct AssistSession {
    engine: AiEngine,
    state_tx: watch::Sender<AssistState>,
    current: Mutex<Option<CancellationToken>>,
    analysis: Mutex<Option<CancellationToken>>,
    debounce: Duration,
}

impl AssistSession {
    pub fn new(engine: AiEngine, debounce: Duration) -> Self {
        let (state_tx, _) = watch::channel(AssistState::default());
        Self {
            engine,
            state_tx,
            current: Mutex::new(None),
            analysis: Mutex::new(None),
            debounce,
        }
    }

    /// Session on the configured backend, debounced by `editor.analysis_debounce_ms`
    pub fn from_config(config: &PyGeniusConfig) -> PyGeniusResult<Self> {
        let engine = AiEngine::from_config(&config.ai)?;
        Ok(Self::new(engine, config.editor.analysis_debounce()))
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<AssistState> {
        self.state_tx.subscribe()
    }

    /// Current state snapshot
    pub fn state(&self) -> AssistState {
        self.state_tx.borrow().clone()
    }

    pub fn engine(&self) -> &AiEngine {
        &self.engine
    }

    pub fn ask(&self, question: &str, code: &str) {
        let (question, code) = (question.to_string(), code.to_string());
        self.submit("Thinking...", move |engine| async move {
            Outcome::Response(engine.ask_tutor(&question, &code).await)
        });
    }

    pub fn explain_code(&self, code: &str) {
        let code = code.to_string();
        self.submit("Analyzing your code...", move |engine| async move {
            Outcome::Response(engine.explain_code(&code).await)
        });
    }

    pub fn optimize(&self, code: &str) {
        let code = code.to_string();
        self.submit("Analyzing for optimizations...", move |engine| async move {
            Outcome::Response(engine.optimize_code(&code).await)
        });
    }

    pub fn explain_error(&self, message: &str, code: &str) {
        let (message, code) = (message.to_string(), code.to_string());
        self.submit("Explaining error...", move |engine| async move {
            Outcome::ErrorExplained(engine.explain_error(&message, &code).await)
        });
    }

    pub fn load_lesson(&self, kind: LessonType, level: DifficultyLevel) {
        self.submit("Generating lesson...", move |engine| async move {
            Outcome::Lesson(engine.generate_lesson(kind, level).await)
        });
    }

    /// Publish the fix description for `line`, if a prediction covers it
    pub fn fix_at_line(&self, line: u32) -> bool {
        self.state_tx.send_if_modified(|state| {
            match AiEngine::describe_fix(&state.bug_predictions, line) {
                Some(text) => {
                    state.response = text;
                    true
                }
                None => false,
            }
        })
    }

    /// Restart the debounce timer for bug analysis of `code`
    pub fn code_changed(&self, code: &str) {
        let token = CancellationToken::new();
        if let Some(previous) = self.analysis.lock().replace(token.clone()) {
            previous.cancel();
        }

        let engine = self.engine.clone();
        let state_tx = self.state_tx.clone();
        let debounce = self.debounce;
        let code = code.to_string();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }

            state_tx.send_if_modified(|state| {
                if token.is_cancelled() {
                    return false;
                }
                state.analyzing = true;
                true
            });

            let predictions = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Bug analysis superseded");
                    return;
                }
                predictions = engine.analyze_for_bugs(&code) => predictions,
            };

            state_tx.send_if_modified(|state| {
                if token.is_cancelled() {
                    return false;
                }
                state.bug_predictions = predictions;
                state.analyzing = false;
                true
            });
        });
    }

    /// Cancel the in-flight request and any pending analysis
    pub fn cancel(&self) {
        if let Some(token) = self.current.lock().take() {
            token.cancel();
        }
        if let Some(token) = self.analysis.lock().take() {
            token.cancel();
        }
        self.state_tx.send_if_modified(|state| {
            let changed = state.processing || state.analyzing;
            state.processing = false;
            state.analyzing = false;
            changed
        });
    }

    fn submit<F, Fut>(&self, placeholder: &str, work: F)
    where
        F: FnOnce(AiEngine) -> Fut,
        Fut: Future<Output = Outcome> + Send + 'static,
    {
        let token = CancellationToken::new();
        {
            let mut slot = self.current.lock();
            if let Some(previous) = slot.replace(token.clone()) {
                debug!("Cancelling superseded assist request");
                previous.cancel();
            }
            self.state_tx.send_modify(|state| {
                state.processing = true;
                state.response = placeholder.to_string();
            });
        }

        let job = work(self.engine.clone());
        let state_tx = self.state_tx.clone();

        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => return,
                outcome = job => outcome,
            };

            state_tx.send_if_modified(|state| {
                if token.is_cancelled() {
                    return false;
                }
                outcome.apply(state);
                state.processing = false;
                true
            });
        });
    }
}

impl Drop for AssistSession {
    fn drop(&mut self) {
        if let Some(token) = self.current.get_mut().take() {
            token.cancel();
        }
        if let Some(token) = self.analysis.get_mut().take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PyGeniusResult;
    use crate::llm::{ChatBackend, TextStream};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies after a delay taken from the first word of the question
    struct DelayedBackend {
        calls: AtomicUsize,
        reply: fn(&str) -> String,
    }

    impl DelayedBackend {
        fn new(reply: fn(&str) -> String) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply,
            })
        }
    }

    #[async_trait]
    impl ChatBackend for DelayedBackend {
        fn has_api_key(&self) -> bool {
            true
        }

        async fn complete(&self, _system: &str, user: &str) -> PyGeniusResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let secs = user
                .split_whitespace()
                .next()
                .and_then(|word| word.parse::<u64>().ok())
                .unwrap_or(0);
            tokio::time::sleep(Duration::from_secs(secs)).await;
            Ok((self.reply)(user))
        }

        async fn stream(&self, _system: &str, _user: &str) -> PyGeniusResult<TextStream> {
            Err(crate::error::PyGeniusError::NotConfigured)
        }
    }

    fn echo(user: &str) -> String {
        format!("answer: {}", user.trim())
    }

    fn one_issue(_user: &str) -> String {
        r#"{"issues":[{"line":1,"message":"suspicious","severity":"HIGH","fix":"rewrite"}]}"#
            .to_string()
    }

    fn session_with(backend: Arc<DelayedBackend>) -> AssistSession {
        AssistSession::new(AiEngine::new(backend), Duration::from_millis(800))
    }

    #[tokio::test(start_paused = true)]
    async fn test_placeholder_then_response() {
        let session = session_with(DelayedBackend::new(echo));
        let mut rx = session.subscribe();

        session.ask("1 what is a dict", "");
        assert_eq!(session.state().response, "Thinking...");
        assert!(session.state().processing);

        let state = rx.wait_for(|s| !s.processing).await.unwrap().clone();
        assert_eq!(state.response, "answer: 1 what is a dict");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_request_supersedes_older() {
        let backend = DelayedBackend::new(echo);
        let session = session_with(backend.clone());
        let mut rx = session.subscribe();

        session.ask("5 slow question", "");
        session.explain_code("1");

        let state = rx.wait_for(|s| !s.processing).await.unwrap().clone();
        assert!(state.response.contains("Please explain this Python code"));

        // Long after the slow request would have finished
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.state().response, state.response);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_processing_and_drops_result() {
        let session = session_with(DelayedBackend::new(echo));
        session.ask("3 anything", "");
        session.cancel();

        tokio::time::sleep(Duration::from_secs(5)).await;
        let state = session.state();
        assert!(!state.processing);
        assert_eq!(state.response, "Thinking...");
    }

    #[tokio::test(start_paused = true)]
    async fn test_code_changes_are_debounced() {
        let backend = DelayedBackend::new(one_issue);
        let session = session_with(backend.clone());
        let mut rx = session.subscribe();

        for code in ["x", "x =", "x = 1"] {
            session.code_changed(code);
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);

        let state = rx
            .wait_for(|s| !s.bug_predictions.is_empty() && !s.analyzing)
            .await
            .unwrap()
            .clone();
        assert_eq!(state.bug_predictions[0].message, "suspicious");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config_uses_configured_debounce() {
        let mut config = PyGeniusConfig::default();
        config.editor.analysis_debounce_ms = 2_000;
        let session = AssistSession::from_config(&config).unwrap();
        assert!(!session.engine().is_ai_available());

        let mut rx = session.subscribe();
        let start = tokio::time::Instant::now();
        session.code_changed("total = 1\ntotal = 2");

        tokio::time::sleep(Duration::from_millis(1_900)).await;
        assert!(!rx.has_changed().unwrap());

        rx.changed().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fix_at_line_and_lesson() {
        let session = session_with(DelayedBackend::new(one_issue));
        let mut rx = session.subscribe();

        session.code_changed("x = 1 / 0");
        rx.wait_for(|s| !s.bug_predictions.is_empty()).await.unwrap();

        assert!(session.fix_at_line(1));
        assert!(session.state().response.starts_with("🐛 Issue on line 1: suspicious"));
        assert!(!session.fix_at_line(9));
    }

    #[tokio::test(start_paused = true)]
    async fn test_offline_lesson_and_error() {
        let session = AssistSession::new(AiEngine::offline(), Duration::from_millis(800));
        let mut rx = session.subscribe();

        session.load_lesson(LessonType::Functions, DifficultyLevel::Beginner);
        let state = rx.wait_for(|s| !s.processing).await.unwrap().clone();
        assert_eq!(state.current_lesson.unwrap().title, "Functions");

        session.explain_error("KeyError: 'b'", "");
        let state = rx
            .wait_for(|s| !s.processing && s.last_error.is_some())
            .await
            .unwrap()
            .clone();
        assert_eq!(state.last_error.unwrap().error_type, "KeyError");
    }
}
