//! Keyword-driven code summary

pub const BASIC_SCRIPT_EXPLANATION: &str = "This is Python code. It appears to be a basic script.\n\n\
💡 Configure an OpenRouter API key for detailed AI explanations!";

/// One emoji-prefixed line per recognised feature, or the basic-script text
pub fn explain_code_locally(code: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    if code.contains("def ") {
        lines.push(format!(
            "📦 This code defines {} function(s).",
            code.matches("def ").count()
        ));
    }

    if code.contains("class ") {
        lines.push(format!("🏗️ Defines {} class(es).", code.matches("class ").count()));
    }

    if code.contains("import ") || code.contains("from ") {
        lines.push("📚 Uses external libraries.".to_string());
    }

    let library_hint = [
        ("plt.plot", "📊 Creates a line plot using matplotlib."),
        ("plt.scatter", "📊 Creates a scatter plot."),
        ("plt.bar", "📊 Creates a bar chart."),
        ("pd.read_csv", "📁 Reads data from a CSV file."),
        ("np.array", "🔢 Works with NumPy arrays for numerical computation."),
    ]
    .into_iter()
    .find(|(needle, _)| code.contains(needle));
    if let Some((_, hint)) = library_hint {
        lines.push(hint.to_string());
    }

    if code.contains("for ") && code.contains("range") && code.contains("append") {
        lines.push("🔄 Uses a loop to build a list iteratively.".to_string());
    } else if code.contains('[') && code.contains("for ") && code.contains("in ") {
        lines.push("⚡ Uses list comprehension for concise list creation.".to_string());
    } else if looks_recursive(code) {
        lines.push("🔄 This appears to be a recursive function.".to_string());
    }

    if lines.is_empty() {
        BASIC_SCRIPT_EXPLANATION.to_string()
    } else {
        lines.join("\n")
    }
}

/// The first defined function's name equals the first returned call's name
fn looks_recursive(code: &str) -> bool {
    let (Some(defined), Some(returned)) = (
        name_before_paren(code, "def "),
        name_before_paren(code, "return "),
    ) else {
        return false;
    };
    !defined.is_empty() && defined == returned
}

fn name_before_paren<'a>(code: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = &code[code.find(keyword)? + keyword.len()..];
    let name = rest.split('(').next().unwrap_or(rest);
    Some(name.trim())
}
