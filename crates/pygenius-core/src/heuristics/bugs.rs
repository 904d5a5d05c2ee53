//! Line-by-line bug heuristics used when remote analysis is unavailable

use crate::assist::types::{BugPrediction, Severity};
use crate::heuristics::ASSIGNMENT_RE;

const NON_VARIABLE_KEYWORDS: [&str; 6] = ["if", "for", "while", "def", "class", "return"];

/// Run every rule over every line
pub fn analyze_locally(code: &str) -> Vec<BugPrediction> {
    let lines: Vec<&str> = code.lines().collect();
    let mut issues = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line_number = u32::try_from(index + 1).unwrap_or(u32::MAX);

        if line.contains('/') && !line.contains("==") && (line.contains("/0") || line.contains("/ "))
        {
            issues.push(BugPrediction::new(
                line_number,
                "Possible ZeroDivisionError if divisor is 0",
                Severity::High,
                "Add check: if divisor != 0:",
            ));
        }

        if line.contains("def ") && (line.contains("=[]") || line.contains("={}")) {
            issues.push(BugPrediction::new(
                line_number,
                "Mutable default argument detected",
                Severity::Medium,
                "Use None and initialize inside function",
            ));
        }

        if line.contains("except:") && !line.contains("Exception") {
            issues.push(BugPrediction::new(
                line_number,
                "Bare except clause catches all exceptions including KeyboardInterrupt",
                Severity::Medium,
                "Use 'except SpecificException:' instead",
            ));
        }

        for captures in ASSIGNMENT_RE.captures_iter(line) {
            if captures.get(2).is_some() {
                continue;
            }
            let name = &captures[1];
            if NON_VARIABLE_KEYWORDS.contains(&name) {
                continue;
            }
            let reassignment = format!("{} =", name);
            let used_later = lines[index + 1..]
                .iter()
                .any(|later| later.contains(name) && !later.contains(&reassignment));
            if !used_later {
                issues.push(BugPrediction::new(
                    line_number,
                    format!("Variable '{}' may be unused (dead code)", name),
                    Severity::Low,
                    "Remove unused variable or use it",
                ));
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(issues: &[BugPrediction]) -> Vec<(u32, &str)> {
        issues.iter().map(|i| (i.line, i.message.as_str())).collect()
    }

    #[test]
    fn test_division_flagged_high() {
        let issues = analyze_locally("x = 10\nprint(x / y)");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].fix_suggestion, "Add check: if divisor != 0:");
    }

    #[test]
    fn test_division_inside_comparison_ignored() {
        let issues = analyze_locally("print(a / b == c)");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_mutable_default_and_bare_except() {
        let code = "def add(item, bucket=[]):\n    try:\n        bucket.append(item)\n    except:\n        pass";
        let issues = analyze_locally(code);
        assert_eq!(
            messages(&issues),
            vec![
                (1, "Mutable default argument detected"),
                (4, "Bare except clause catches all exceptions including KeyboardInterrupt"),
            ]
        );
    }

    #[test]
    fn test_except_exception_is_fine() {
        assert!(analyze_locally("try:\n    pass\nexcept Exception:\n    pass").is_empty());
    }

    #[test]
    fn test_unused_variable_low() {
        let issues = analyze_locally("unused = 5\nused = 1\nprint(used)");
        assert_eq!(messages(&issues), vec![(1, "Variable 'unused' may be unused (dead code)")]);
        assert_eq!(issues[0].severity, Severity::Low);
    }

    #[test]
    fn test_reassignment_does_not_count_as_use() {
        let issues = analyze_locally("total = 1\ntotal = 2");
        assert_eq!(
            messages(&issues),
            vec![
                (1, "Variable 'total' may be unused (dead code)"),
                (2, "Variable 'total' may be unused (dead code)"),
            ]
        );
    }

    #[test]
    fn test_clean_code_has_no_issues() {
        assert!(analyze_locally("name = 'Ada'\nprint(name)").is_empty());
        assert!(analyze_locally("").is_empty());
    }
}
