//! Pattern-based completions for the editor

use crate::assist::types::{AiSuggestion, SuggestionType};
use crate::heuristics::ASSIGNMENT_RE;

const COMPLETION_KEYWORDS: [&str; 5] = ["if", "for", "while", "def", "class"];

const COMMON_IMPORTS: [(&str, &str); 9] = [
    ("numpy", "import numpy as np"),
    ("pandas", "import pandas as pd"),
    ("matplotlib", "import matplotlib.pyplot as plt"),
    ("random", "import random"),
    ("datetime", "from datetime import datetime"),
    ("json", "import json"),
    ("os", "import os"),
    ("sys", "import sys"),
    ("math", "import math"),
];

const MATPLOTLIB_METHODS: [(&str, &str); 10] = [
    ("plt.plot(x, y)", "Create line plot"),
    ("plt.scatter(x, y)", "Create scatter plot"),
    ("plt.bar(x, height)", "Create bar chart"),
    ("plt.hist(data)", "Create histogram"),
    ("plt.xlabel('label')", "Set x-axis label"),
    ("plt.ylabel('label')", "Set y-axis label"),
    ("plt.title('Title')", "Set plot title"),
    ("plt.grid(True)", "Show grid"),
    ("plt.legend()", "Show legend"),
    ("plt.show()", "Display plot"),
];

const NUMPY_METHODS: [(&str, &str); 8] = [
    ("np.array([1, 2, 3])", "Create array"),
    ("np.zeros((3, 3))", "Create zeros array"),
    ("np.ones((3, 3))", "Create ones array"),
    ("np.linspace(0, 10, 100)", "Linearly spaced values"),
    ("np.arange(0, 10, 0.1)", "Range with step"),
    ("np.random.rand(10)", "Random values"),
    ("np.mean(data)", "Calculate mean"),
    ("np.std(data)", "Standard deviation"),
];

const PANDAS_METHODS: [(&str, &str); 6] = [
    ("pd.read_csv('file.csv')", "Read CSV file"),
    ("pd.DataFrame(data)", "Create DataFrame"),
    ("df.head()", "First 5 rows"),
    ("df.describe()", "Statistics summary"),
    ("df['column']", "Select column"),
    ("df.loc[row, col]", "Label-based selection"),
];

/// Suggestions for the line the cursor sits on
///
/// `cursor` counts characters and is clamped to the end of `code`.
pub fn code_completion(code: &str, cursor: usize) -> Vec<AiSuggestion> {
    let before_cursor: String = code.chars().take(cursor).collect();
    let current_line = before_cursor.rsplit('\n').next().unwrap_or_default();

    let mut suggestions = line_suggestions(current_line);

    for name in defined_variables(code) {
        if !current_line.contains(name.as_str()) {
            let description = format!("Variable: {}", name);
            suggestions.push(AiSuggestion::new(name, SuggestionType::Variable, description));
        }
    }

    suggestions
}

fn line_suggestions(line: &str) -> Vec<AiSuggestion> {
    if line.starts_with("import ") || line.starts_with("from ") {
        let partial = line.rsplit(' ').next().unwrap_or_default();
        return COMMON_IMPORTS
            .iter()
            .filter(|(module, _)| module.starts_with(partial))
            .map(|(module, statement)| {
                AiSuggestion::new(*statement, SuggestionType::Import, format!("Import {}", module))
            })
            .collect();
    }

    let methods: &[(&str, &str)] = if line.contains("plt.") {
        &MATPLOTLIB_METHODS
    } else if line.contains("np.") {
        &NUMPY_METHODS
    } else if line.contains("pd.") {
        &PANDAS_METHODS
    } else if line.contains("for ") {
        return vec![
            AiSuggestion::new(
                "for i in range(len(data)):",
                SuggestionType::Completion,
                "Iterate with index",
            ),
            AiSuggestion::new(
                "for item in items:",
                SuggestionType::Completion,
                "Iterate over collection",
            ),
        ];
    } else if line.contains("if __name__") {
        return vec![AiSuggestion::new(
            "if __name__ == \"__main__\":",
            SuggestionType::Completion,
            "Entry point guard",
        )];
    } else {
        &[]
    };

    methods
        .iter()
        .map(|(text, description)| AiSuggestion::new(*text, SuggestionType::Method, *description))
        .collect()
}

/// Names assigned anywhere in `code`, in first-definition order
pub fn defined_variables(code: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in ASSIGNMENT_RE.captures_iter(code) {
        if captures.get(2).is_some() {
            continue;
        }
        let name = &captures[1];
        if COMPLETION_KEYWORDS.contains(&name) || names.iter().any(|known| known == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(suggestions: &[AiSuggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_import_prefix_filters_modules() {
        let code = "import ma";
        let suggestions = code_completion(code, code.len());
        assert_eq!(
            texts(&suggestions),
            vec!["import matplotlib.pyplot as plt", "import math"]
        );
        assert!(suggestions.iter().all(|s| s.kind == SuggestionType::Import));
    }

    #[test]
    fn test_from_import_uses_last_word() {
        let code = "from date";
        let suggestions = code_completion(code, code.len());
        assert_eq!(texts(&suggestions), vec!["from datetime import datetime"]);
    }

    #[test]
    fn test_library_methods() {
        let code = "import numpy as np\nx = np.";
        let suggestions = code_completion(code, code.len());
        assert_eq!(suggestions[0].text, "np.array([1, 2, 3])");
        assert_eq!(suggestions[0].kind, SuggestionType::Method);
        // x is already on the current line
        assert!(!texts(&suggestions).contains(&"x"));
    }

    #[test]
    fn test_plt_beats_np_on_same_line() {
        let code = "plt.plot(np.";
        let suggestions = code_completion(code, code.len());
        assert_eq!(suggestions.len(), MATPLOTLIB_METHODS.len());
    }

    #[test]
    fn test_for_loop_completions() {
        let code = "for ";
        let suggestions = code_completion(code, 4);
        assert_eq!(
            texts(&suggestions),
            vec!["for i in range(len(data)):", "for item in items:"]
        );
    }

    #[test]
    fn test_variables_in_definition_order_skipping_comparisons() {
        let code = "total = 0\ncount = 1\nif total == count:\n    total = 2\n";
        assert_eq!(defined_variables(code), vec!["total", "count"]);
    }

    #[test]
    fn test_variable_suggestions_exclude_current_line() {
        let code = "alpha = 1\nbeta = 2\nprint(alpha";
        let suggestions = code_completion(code, code.chars().count());
        assert_eq!(texts(&suggestions), vec!["beta"]);
        assert_eq!(suggestions[0].description, "Variable: beta");
    }

    #[test]
    fn test_cursor_counts_chars_and_is_clamped() {
        let code = "café = 1\nimport ra";
        let suggestions = code_completion(code, 10_000);
        assert_eq!(suggestions[0].text, "import random");

        // Cursor just after "café = 1": still on the first line
        let on_first_line = code_completion(code, 8);
        assert!(on_first_line.is_empty());
    }

    #[test]
    fn test_no_match_yields_only_variables() {
        let code = "value = 3\n";
        let suggestions = code_completion(code, code.len());
        assert_eq!(texts(&suggestions), vec!["value"]);
    }
}
