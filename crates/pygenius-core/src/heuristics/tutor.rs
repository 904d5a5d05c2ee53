//! Canned tutor replies for when no model is reachable

use crate::heuristics::explain::explain_code_locally;

pub const OPTIMIZATION_TIPS: &str = "⚠️ AI service not available.

General optimization tips:
• Use list comprehensions: [x*2 for x in items]
• Use built-in functions: sum(), max(), min()
• Use generators for large datasets
• Avoid repeated calculations - cache results
• Use sets for membership testing (O(1))

Connect to the internet for code-specific optimization!";

/// Full offline reply: a service notice followed by the basic answer
pub fn offline_tutor_reply(question: &str, code: &str) -> String {
    format!(
        "⚠️ AI service not available.\n\n\
         Please check your internet connection.\n\n\
         ---\n\n\
         Meanwhile, I can still help with basic pattern matching:\n\n\
         {}",
        basic_response(question, code)
    )
}

/// Keyword-matched answer; the first matching topic wins
pub fn basic_response(question: &str, code: &str) -> String {
    let lower = question.to_lowercase();
    let mentions = |word: &str| lower.contains(word);

    if mentions("hello") || mentions("hi ") {
        "Hello! I'm PyGenius AI. I can help you learn Python!".to_string()
    } else if mentions("error") || mentions("fix") {
        "I can help fix errors! Please make sure your code is in the editor, \
         and I'll analyze it when you run it."
            .to_string()
    } else if mentions("explain") {
        if code.trim().is_empty() {
            "Please write some code in the editor first, then I can explain it!".to_string()
        } else {
            explain_code_locally(code)
        }
    } else if mentions("optimize") || mentions("improve") {
        "To optimize code:\n\
         • Use list comprehensions instead of loops\n\
         • Use built-in functions like map(), filter()\n\
         • Avoid repeated calculations\n\
         • Use appropriate data structures"
            .to_string()
    } else if mentions("help") {
        "I can help you with:\n\
         • Explaining Python code\n\
         • Fixing errors\n\
         • Learning Python concepts\n\
         • Code optimization tips\n\n\
         Configure an OpenRouter API key for AI-powered responses!"
            .to_string()
    } else {
        "I'm your AI Python tutor! Ask me about:\n\
         • Code explanations\n\
         • Error fixing\n\
         • Python concepts\n\n\
         💡 Configure an OpenRouter API key for more intelligent responses!"
            .to_string()
    }
}
