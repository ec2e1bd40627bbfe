use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use serde_json::Value;

/// Read a whole input source; `-` means stdin.
pub(crate) fn read_source(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(source).with_context(|| format!("failed to read {source}"))
}

pub(crate) fn read_messages(source: &str) -> Result<Vec<String>> {
    let raw = read_source(source)?;
    parse_messages(&raw).with_context(|| format!("invalid message input {source}"))
}

pub(crate) fn read_json(source: &str) -> Result<Value> {
    let raw = read_source(source)?;
    serde_json::from_str(&raw).with_context(|| format!("{source} is not valid JSON"))
}

/// A JSON array of strings, or otherwise one message per line.  Blank lines
/// are left in place; the corpus drops them.
pub(crate) fn parse_messages(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') {
        let messages: Vec<String> = serde_json::from_str(trimmed)
            .context("input starts with '[' but is not a JSON array of strings")?;
        return Ok(messages);
    }
    Ok(raw.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn json_array_input() {
        let messages = parse_messages(r#"  ["hi there", "multi\nline"]"#).unwrap();
        assert_eq!(messages, vec!["hi there", "multi\nline"]);
    }

    #[test]
    fn line_input() {
        let messages = parse_messages("first\n\nsecond\r\n").unwrap();
        assert_eq!(messages, vec!["first", "", "second"]);
    }

    #[test]
    fn malformed_json_array_is_an_error() {
        let err = parse_messages("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("JSON array of strings"), "error = {err}");
    }

    #[test]
    fn reads_messages_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chat.txt");
        fs::write(&path, "hello\nworld\n").unwrap();
        let messages = read_messages(path.to_str().unwrap()).unwrap();
        assert_eq!(messages, vec!["hello", "world"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_source("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
