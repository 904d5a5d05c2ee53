//! Spoken-command templates for offline code generation

const LOOP_FILLER_WORDS: [&str; 2] = ["through", "over"];

/// Turn a spoken command into a code template
pub fn voice_to_code_locally(spoken: &str) -> String {
    let lower = spoken.to_ascii_lowercase();

    if lower.contains("create function") || lower.contains("define function") {
        let name = word_after(spoken, &lower, "function ").unwrap_or("my_function");
        return format!("def {}():\n    pass", name);
    }

    if lower.contains("for loop") || lower.contains("loop through") {
        let collection = loop_collection(spoken, &lower).unwrap_or("items");
        return format!("for item in {}:\n    # Process each item\n    pass", collection);
    }

    if lower.contains("if statement") || lower.contains("check if") {
        return "if condition:\n    # Do something\n    pass\nelse:\n    # Do something else\n    pass"
            .to_string();
    }

    if lower.contains("fibonacci") {
        return FIBONACCI_TEMPLATE.to_string();
    }

    if lower.contains("list comprehension") {
        return "# List comprehension syntax\n[x for x in range(10) if condition]".to_string();
    }

    format!(
        "# Voice command: \"{}\"\n\
         # Try: 'Create function hello', 'For loop items', 'Fibonacci'\n\
         # Or connect to the internet for AI code generation!\n\
         pass",
        spoken
    )
}

const FIBONACCI_TEMPLATE: &str = "def fibonacci(n, memo={}):
    if n in memo:
        return memo[n]
    if n <= 1:
        return n
    memo[n] = fibonacci(n-1, memo) + fibonacci(n-2, memo)
    return memo[n]";

/// First word of `original` following `marker`, located case-insensitively
///
/// `lower` must be the ASCII-lowercased `original`, so byte offsets agree.
fn word_after<'a>(original: &'a str, lower: &str, marker: &str) -> Option<&'a str> {
    let start = lower.find(marker)? + marker.len();
    original[start..].split_whitespace().next()
}

fn loop_collection<'a>(original: &'a str, lower: &str) -> Option<&'a str> {
    let start = lower.find("loop ")? + "loop ".len();
    original[start..]
        .split_whitespace()
        .find(|word| !LOOP_FILLER_WORDS.contains(&word.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_function_uses_spoken_name() {
        assert_eq!(
            voice_to_code_locally("Create function greet_user please"),
            "def greet_user():\n    pass"
        );
        assert_eq!(
            voice_to_code_locally("define function"),
            "def my_function():\n    pass"
        );
    }

    #[test]
    fn test_loop_through_skips_filler() {
        assert_eq!(
            voice_to_code_locally("Loop through numbers"),
            "for item in numbers:\n    # Process each item\n    pass"
        );
        assert!(voice_to_code_locally("for loop").starts_with("for item in items:"));
    }

    #[test]
    fn test_if_and_fibonacci_templates() {
        assert!(voice_to_code_locally("check if it rains").starts_with("if condition:"));
        assert!(voice_to_code_locally("Write Fibonacci").contains("memo[n] = fibonacci(n-1, memo)"));
    }

    #[test]
    fn test_unrecognised_command_echoes_text() {
        let code = voice_to_code_locally("make coffee");
        assert!(code.starts_with("# Voice command: \"make coffee\""));
        assert!(code.ends_with("pass"));
    }
}
