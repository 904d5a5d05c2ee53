//! Saved-script line format: `name|timestamp|content`, one script per line
//!
//! Backslash, pipe, newline and carriage return are escaped in the name and
//! content. The store's historical empty value `{}` decodes to no scripts.

use crate::assist::types::ScriptEntry;
use std::collections::BTreeMap;

pub const EMPTY_MARKER: &str = "{}";

pub fn serialize_scripts(scripts: &BTreeMap<String, ScriptEntry>) -> String {
    scripts
        .iter()
        .map(|(name, entry)| {
            format!(
                "{}|{}|{}",
                escape(name),
                entry.timestamp,
                escape(&entry.content)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn deserialize_scripts(raw: &str) -> BTreeMap<String, ScriptEntry> {
    if raw.trim().is_empty() || raw == EMPTY_MARKER {
        return BTreeMap::new();
    }

    raw.split('\n')
        .filter(|line| !line.is_empty())
        .map(|line| {
            let [name, timestamp, content] = split_fields(line);
            let timestamp = timestamp.trim().parse::<i64>().unwrap_or(0);
            (name, ScriptEntry::new(content, timestamp))
        })
        .collect()
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '|' => escaped.push_str("\\|"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Split on the first two unescaped pipes and unescape each field
fn split_fields(line: &str) -> [String; 3] {
    let mut fields: [String; 3] = Default::default();
    let mut index = 0;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some('n') => fields[index].push('\n'),
                Some('r') => fields[index].push('\r'),
                Some(other) => fields[index].push(other),
                None => fields[index].push('\\'),
            },
            '|' if index < 2 => index += 1,
            other => fields[index].push(other),
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiline_content_with_pipes_survives() {
        let mut scripts = BTreeMap::new();
        scripts.insert(
            "a|b.py".to_string(),
            ScriptEntry::new("x = 1 | 2\nprint('\\n')\r\n", 1_700_000_000_000),
        );
        scripts.insert("main.py".to_string(), ScriptEntry::new("", 5));

        let raw = serialize_scripts(&scripts);
        assert_eq!(raw.lines().count(), 2);
        assert_eq!(deserialize_scripts(&raw), scripts);
    }

    #[test]
    fn test_legacy_and_empty_values() {
        assert!(deserialize_scripts("{}").is_empty());
        assert!(deserialize_scripts("").is_empty());
    }

    #[test]
    fn test_legacy_escaped_pipes_in_content() {
        let scripts = deserialize_scripts("calc.py|42|a \\| b");
        assert_eq!(scripts["calc.py"], ScriptEntry::new("a | b", 42));
    }

    #[test]
    fn test_missing_or_bad_timestamp_is_zero() {
        let scripts = deserialize_scripts("only_name\nbad.py|soon|x");
        assert_eq!(scripts["only_name"], ScriptEntry::new("", 0));
        assert_eq!(scripts["bad.py"], ScriptEntry::new("x", 0));
    }

    #[test]
    fn test_unescaped_pipe_in_content_kept() {
        let scripts = deserialize_scripts("p.py|1|a|b");
        assert_eq!(scripts["p.py"].content, "a|b");
    }
}
