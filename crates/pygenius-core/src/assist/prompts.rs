//! System/user prompt pairs for each assist action

use crate::assist::types::{DifficultyLevel, Lesson, LessonType};

/// A system + user message pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    fn new(system: &str, user: impl Into<String>) -> Self {
        Self {
            system: system.to_string(),
            user: user.into(),
        }
    }
}

const TUTOR_SYSTEM: &str = "You are PyGenius AI, a helpful Python programming tutor.
You help users learn Python, fix errors, and write better code.
Be concise but thorough. Provide code examples when helpful.
If there's a code context, analyze it in your response.";

const STREAM_TUTOR_SYSTEM: &str = "You are PyGenius AI, a helpful Python programming tutor.
Be concise but thorough. Provide code examples when helpful.";

const EXPLAIN_CODE_SYSTEM: &str = "You are a Python code explainer.
Explain the provided Python code clearly and concisely.
Break down:
1. What the code does overall
2. Key concepts used
3. Important functions/classes
4. Any potential issues or improvements
Use emoji icons to make it engaging.";

const EXPLAIN_ERROR_SYSTEM: &str = r#"You are a Python error expert. Analyze the error and provide:
1. Error type (one of: SyntaxError, NameError, TypeError, ValueError, IndexError, KeyError, AttributeError, ImportError, RuntimeError, ZeroDivisionError, FileNotFoundError, Other)
2. A clear explanation in plain English
3. A specific suggestion to fix the error
4. A corrected code example if applicable

Respond in this exact JSON format:
{
  "errorType": "ErrorName",
  "explanation": "explanation here",
  "suggestion": "fix suggestion here",
  "example": "corrected code here (optional)"
}"#;

const ANALYZE_BUGS_SYSTEM: &str = r#"You are a Python code reviewer. Analyze the code for:
- Syntax errors
- Logic bugs
- Performance issues
- Security concerns
- Best practice violations

For each issue found, provide:
1. Line number (or approximate)
2. Issue description
3. Severity (LOW, MEDIUM, HIGH, CRITICAL)
4. Fix suggestion

Respond in this exact JSON format:
{
  "issues": [
    {
      "line": 5,
      "message": "description of issue",
      "severity": "HIGH",
      "fix": "suggested fix"
    }
  ]
}
If no issues found, return {"issues": []}"#;

const GENERATE_CODE_SYSTEM: &str = "You are a Python code generator.
Generate clean, well-commented Python code based on the user's description.
Use best practices and include error handling where appropriate.
Only return the code, no explanations unless requested.";

const GENERATE_LESSON_SYSTEM: &str = r#"You are a Python curriculum designer. Create an interactive coding lesson.
Respond in this exact JSON format:
{
  "title": "Lesson Title",
  "description": "Lesson description",
  "code": "starter code with TODO comments",
  "challenge": "what the user needs to do",
  "hints": ["hint 1", "hint 2", "hint 3"],
  "solution": "complete working solution"
}"#;

const OPTIMIZE_CODE_SYSTEM: &str = "You are a Python optimization expert.
Analyze the provided code and suggest optimizations for:
- Performance
- Readability
- Pythonic style
- Memory usage

Provide the optimized code with comments explaining the changes.";

fn fenced(code: &str) -> String {
    format!("```python\n{}\n```", code)
}

/// Question prefixed with the editor contents when there are any
fn with_code_context(question: &str, code: &str) -> String {
    let mut user = String::new();
    if !code.trim().is_empty() {
        user.push_str("Here's my current code:\n");
        user.push_str(&fenced(code));
        user.push_str("\n\n");
    }
    user.push_str(question);
    user.push('\n');
    user
}

pub fn tutor(question: &str, code: &str) -> Prompt {
    Prompt::new(TUTOR_SYSTEM, with_code_context(question, code))
}

pub fn stream_tutor(question: &str, code: &str) -> Prompt {
    Prompt::new(STREAM_TUTOR_SYSTEM, with_code_context(question, code))
}

pub fn explain_code(code: &str) -> Prompt {
    Prompt::new(
        EXPLAIN_CODE_SYSTEM,
        format!("Please explain this Python code:\n{}", fenced(code)),
    )
}

pub fn explain_error(message: &str, code: &str) -> Prompt {
    Prompt::new(
        EXPLAIN_ERROR_SYSTEM,
        format!("Error message: {}\n\nCode context:\n{}", message, fenced(code)),
    )
}

pub fn analyze_bugs(code: &str) -> Prompt {
    Prompt::new(
        ANALYZE_BUGS_SYSTEM,
        format!("Please analyze this Python code for bugs:\n{}", fenced(code)),
    )
}

/// The description is sent as-is
pub fn generate_code(description: &str) -> Prompt {
    Prompt::new(GENERATE_CODE_SYSTEM, description)
}

pub fn generate_lesson(kind: LessonType, level: DifficultyLevel) -> Prompt {
    Prompt::new(
        GENERATE_LESSON_SYSTEM,
        format!(
            "Create a {} lesson about {} in Python.\nMake it engaging and practical with a real coding challenge.",
            level, kind
        ),
    )
}

pub fn optimize_code(code: &str) -> Prompt {
    Prompt::new(
        OPTIMIZE_CODE_SYSTEM,
        format!("Please optimize this Python code:\n{}", fenced(code)),
    )
}

/// Grading request, sent through the tutor persona without code context
pub fn check_solution(lesson: &Lesson, attempt: &str) -> Prompt {
    let question = format!(
        "Check if this code solves the challenge:\n\n\
         Challenge: {}\n\n\
         User's code:\n{}\n\n\
         Expected solution:\n{}\n\n\
         Is this correct? Provide brief feedback.",
        lesson.challenge,
        fenced(attempt),
        fenced(&lesson.solution)
    );
    tutor(&question, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutor_without_code_is_just_the_question() {
        let prompt = tutor("What is a tuple?", "   ");
        assert_eq!(prompt.user, "What is a tuple?\n");
        assert!(prompt.system.starts_with("You are PyGenius AI"));
    }

    #[test]
    fn test_tutor_with_code_context() {
        let prompt = tutor("Why?", "x = 1");
        assert_eq!(
            prompt.user,
            "Here's my current code:\n```python\nx = 1\n```\n\nWhy?\n"
        );
    }

    #[test]
    fn test_stream_tutor_uses_shorter_system_prompt() {
        let full = tutor("q", "");
        let short = stream_tutor("q", "");
        assert!(short.system.len() < full.system.len());
        assert_eq!(short.user, full.user);
    }

    #[test]
    fn test_generate_code_passes_description_through() {
        assert_eq!(generate_code("sort a list").user, "sort a list");
    }

    #[test]
    fn test_lesson_prompt_names_level_and_topic() {
        let prompt = generate_lesson(LessonType::ListComprehension, DifficultyLevel::Advanced);
        assert!(prompt.user.starts_with("Create a ADVANCED lesson about LIST_COMPREHENSION in Python."));
        assert!(prompt.system.contains("\"hints\""));
    }

    #[test]
    fn test_error_prompt_asks_for_json() {
        let prompt = explain_error("NameError: x", "print(x)");
        assert!(prompt.system.contains("\"errorType\""));
        assert!(prompt.user.starts_with("Error message: NameError: x\n\nCode context:\n```python\nprint(x)\n```"));
    }
}
