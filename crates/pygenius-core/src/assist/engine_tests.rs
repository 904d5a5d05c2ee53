//! Engine fallback behaviour against a mocked backend

use crate::assist::engine::{AiEngine, STREAM_KEY_MISSING};
use crate::assist::types::{DifficultyLevel, LessonType, Severity};
use crate::error::PyGeniusError;
use crate::heuristics::OPTIMIZATION_TIPS;
use crate::knowledge::LessonCatalog;
use crate::llm::{MockChatBackend, TextStream};
use futures::{StreamExt, stream};
use std::sync::Arc;

fn engine_with(mock: MockChatBackend) -> AiEngine {
    AiEngine::new(Arc::new(mock))
}

fn online_mock() -> MockChatBackend {
    let mut mock = MockChatBackend::new();
    mock.expect_has_api_key().return_const(true);
    mock
}

fn offline_mock() -> MockChatBackend {
    let mut mock = MockChatBackend::new();
    mock.expect_has_api_key().return_const(false);
    mock.expect_complete().never();
    mock.expect_stream().never();
    mock
}

fn replying(text: &'static str) -> MockChatBackend {
    let mut mock = online_mock();
    mock.expect_complete()
        .times(1)
        .returning(move |_, _| Ok(text.to_string()));
    mock
}

fn failing(error: PyGeniusError) -> MockChatBackend {
    let mut mock = online_mock();
    mock.expect_complete()
        .times(1)
        .returning(move |_, _| Err(error.clone()));
    mock
}

fn text_stream(items: Vec<Result<String, PyGeniusError>>) -> TextStream {
    Box::pin(stream::iter(items))
}

#[tokio::test]
async fn test_bugs_from_remote_reply() {
    let engine = engine_with(replying(
        r#"{"issues":[{"line":2,"message":"Off by one","severity":"MEDIUM","fix":"use range(n)"}]}"#,
    ));
    let bugs = engine.analyze_for_bugs("for i in range(n+1):\n    pass").await;
    assert_eq!(bugs.len(), 1);
    assert_eq!(bugs[0].severity, Severity::Medium);
    assert_eq!(bugs[0].fix_suggestion, "use range(n)");
}

#[tokio::test]
async fn test_bugs_fall_back_on_unparseable_reply() {
    let engine = engine_with(replying("Looks fine to me!"));
    let bugs = engine.analyze_for_bugs("x = 1 / 0").await;
    assert!(bugs.iter().any(|b| b.severity == Severity::High));
}

#[tokio::test]
async fn test_bugs_fall_back_on_network_error() {
    let engine = engine_with(failing(PyGeniusError::network("timed out")));
    let bugs = engine.analyze_for_bugs("def f(items=[]):\n    return items").await;
    assert_eq!(bugs[0].message, "Mutable default argument detected");
}

#[tokio::test]
async fn test_offline_never_calls_backend() {
    let engine = engine_with(offline_mock());
    assert!(!engine.is_ai_available());

    let explanation = engine.explain_error("NameError: name 'y' is not defined", "").await;
    assert_eq!(explanation.error_type, "NameError");
    assert_eq!(engine.optimize_code("x").await, OPTIMIZATION_TIPS);
    assert_eq!(
        engine.voice_to_code("create function hello").await,
        "def hello():\n    pass"
    );
    assert!(
        engine
            .ask_tutor("hello", "")
            .await
            .starts_with("⚠️ AI service not available.")
    );
}

#[tokio::test]
async fn test_explain_error_remote_json_and_prose() {
    let engine = engine_with(replying(
        "```json\n{\"errorType\":\"TypeError\",\"explanation\":\"str + int\",\"suggestion\":\"cast\"}\n```",
    ));
    let parsed = engine.explain_error("TypeError", "'a' + 1").await;
    assert_eq!(parsed.error_type, "TypeError");
    assert_eq!(parsed.suggestion, "cast");

    let engine = engine_with(replying("You added a string to a number."));
    let parsed = engine.explain_error("TypeError", "'a' + 1").await;
    assert_eq!(parsed.error_type, "Analysis");
    assert_eq!(parsed.explanation, "You added a string to a number.");
}

#[tokio::test]
async fn test_explain_error_network_failure_uses_table() {
    let engine = engine_with(failing(PyGeniusError::api(502, "bad gateway")));
    let parsed = engine.explain_error("IndexError: list index out of range", "").await;
    assert_eq!(parsed.error_type, "IndexError");
}

#[tokio::test]
async fn test_tutor_prompt_contains_code_context() {
    let mut mock = online_mock();
    mock.expect_complete()
        .withf(|system, user| {
            system.starts_with("You are PyGenius AI") && user.contains("```python\nx = 1\n```")
        })
        .times(1)
        .returning(|_, _| Ok("x holds one".to_string()));
    let engine = engine_with(mock);
    assert_eq!(engine.ask_tutor("what is x?", "x = 1").await, "x holds one");
}

#[tokio::test]
async fn test_tutor_remote_error_message() {
    let engine = engine_with(failing(PyGeniusError::network("dns failure")));
    let reply = engine.ask_tutor("hi", "").await;
    assert_eq!(
        reply,
        "❌ Error: Network error: dns failure\n\nPlease check your internet connection and API key."
    );
}

#[tokio::test]
async fn test_optimize_and_voice_on_error() {
    let engine = engine_with(failing(PyGeniusError::network("down")));
    assert_eq!(engine.optimize_code("x").await, OPTIMIZATION_TIPS);

    let engine = engine_with(failing(PyGeniusError::network("down")));
    assert!(engine.voice_to_code("fibonacci").await.starts_with("def fibonacci"));
}

#[tokio::test]
async fn test_lesson_remote_and_fallback() {
    let engine = engine_with(replying(
        r#"{"title":"While Loops","description":"d","code":"c","challenge":"ch","hints":["h"],"solution":"s"}"#,
    ));
    let lesson = engine
        .generate_lesson(LessonType::Loops, DifficultyLevel::Advanced)
        .await;
    assert_eq!(lesson.title, "While Loops");
    assert_eq!(lesson.difficulty, DifficultyLevel::Advanced);

    let engine = engine_with(replying("I'd rather chat about loops."));
    let lesson = engine
        .generate_lesson(LessonType::Classes, DifficultyLevel::Beginner)
        .await;
    assert_eq!(
        lesson,
        LessonCatalog::new().lesson(LessonType::Classes, DifficultyLevel::Beginner)
    );
}

#[tokio::test]
async fn test_check_solution_remote_feedback() {
    let catalog = LessonCatalog::new();
    let lesson = catalog.lesson(LessonType::Functions, DifficultyLevel::Beginner);

    let engine = engine_with(replying("Correct! Nicely done."));
    let result = engine.check_solution(&lesson, "def square(n): return n*n").await;
    assert!(result.passed);
    assert_eq!(result.feedback, "✓ Correct! Nicely done.");

    let engine = engine_with(replying("This is incorrect: you never return."));
    let result = engine.check_solution(&lesson, "def square(n): n*n").await;
    assert!(!result.passed);
}

#[tokio::test]
async fn test_check_solution_offline_exact_match() {
    let lesson = LessonCatalog::new().lesson(LessonType::ListComprehension, DifficultyLevel::Beginner);
    let engine = engine_with(offline_mock());

    let pass = engine
        .check_solution(&lesson, "  RESULT = [x for x in range(20) if x % 3 == 0]\n")
        .await;
    assert!(pass.passed);
    assert!(pass.feedback.starts_with("✓ "));

    let fail = engine.check_solution(&lesson, "result = []").await;
    assert!(!fail.passed);
}

#[tokio::test]
async fn test_stream_without_key() {
    let engine = engine_with(offline_mock());
    let pieces: Vec<String> = engine.stream_tutor_response("q", "").collect().await;
    assert_eq!(pieces, vec![STREAM_KEY_MISSING.to_string()]);
}

#[tokio::test]
async fn test_stream_pieces_and_mid_stream_failure() {
    let mut mock = online_mock();
    mock.expect_stream().times(1).returning(|_, _| {
        Ok(text_stream(vec![
            Ok("Lists ".to_string()),
            Ok("are mutable".to_string()),
            Err(PyGeniusError::network("connection reset")),
        ]))
    });
    let engine = engine_with(mock);

    let pieces: Vec<String> = engine.stream_tutor_response("lists?", "").collect().await;
    assert_eq!(
        pieces,
        vec![
            "Lists ".to_string(),
            "are mutable".to_string(),
            "\n\n❌ Network error: connection reset".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_stream_http_error_becomes_single_item() {
    let mut mock = online_mock();
    mock.expect_stream()
        .times(1)
        .returning(|_, _| Err(PyGeniusError::api(429, "slow down")));
    let engine = engine_with(mock);

    let pieces: Vec<String> = engine.stream_tutor_response("q", "").collect().await;
    assert_eq!(pieces, vec!["Error: 429 - Too Many Requests".to_string()]);
}

#[test]
fn test_completion_is_local_even_when_online() {
    let mut mock = online_mock();
    mock.expect_complete().never();
    let engine = engine_with(mock);
    let suggestions = engine.code_completion("import js", 9);
    assert_eq!(suggestions[0].text, "import json");
}
