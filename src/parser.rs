//! Record input: turns text or TOML sources into domain records.
//!
//! Text format, one record per line:
//!
//! ```text
//! # id parent_id
//! 0 0
//! 1, 0
//! 2 1   # trailing comments are fine
//! ```
//!
//! TOML format:
//!
//! ```toml
//! [[record]]
//! id = 0
//! parent_id = 0
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::Record;

static RECORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*(?:,\s*|\s+)(\d+)$").expect("record line pattern is valid")
});

/// Errors reading records from an input source.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record on line {line}: {content:?}")]
    InvalidLine { line: usize, content: String },

    #[error("invalid TOML records: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Input source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Text,
    Toml,
}

impl InputFormat {
    /// `.toml` files are TOML, everything else is text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecordFile {
    #[serde(default)]
    record: Vec<Record>,
}

/// Parse `<id> <parent_id>` lines; blank lines and `#` comments are skipped.
pub fn parse_text(content: &str) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let data = match line.find('#') {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        // Skip empty lines and comments
        if data.is_empty() {
            continue;
        }

        let invalid = || ParseError::InvalidLine {
            line: idx + 1,
            content: line.to_string(),
        };
        let caps = RECORD_LINE.captures(data).ok_or_else(invalid)?;
        let id = caps[1].parse().map_err(|_| invalid())?;
        let parent_id = caps[2].parse().map_err(|_| invalid())?;
        records.push(Record { id, parent_id });
    }

    Ok(records)
}

/// Parse `[[record]]` tables with `id` and `parent_id` keys.
pub fn parse_toml(content: &str) -> Result<Vec<Record>, ParseError> {
    let file: RecordFile = toml::from_str(content)?;
    Ok(file.record)
}

/// Read records from `path`, choosing the format by file extension.
#[instrument(level = "debug")]
pub fn read_records(path: &Path) -> Result<Vec<Record>, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = InputFormat::from_path(path);
    let records = match format {
        InputFormat::Text => parse_text(&content)?,
        InputFormat::Toml => parse_toml(&content)?,
    };
    debug!(?format, count = records.len(), "records read");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_text_with_comments_and_separators() {
        let content = r#"
# id parent_id
0 0
1, 0
2	1   # tab separated

3,1
"#;
        let records = parse_text(content).unwrap();
        assert_eq!(
            records,
            vec![
                Record::new(0, 0),
                Record::new(1, 0),
                Record::new(2, 1),
                Record::new(3, 1),
            ]
        );
    }

    #[rstest]
    #[case::negative("0 0\n-1 0\n", 2)]
    #[case::single_field("0\n", 1)]
    #[case::three_fields("0 0 0\n", 1)]
    #[case::word("0 0\n1 root\n", 2)]
    #[case::overflow("99999999999999999999999 0\n", 1)]
    fn test_parse_text_rejects_invalid_line(#[case] content: &str, #[case] expected_line: usize) {
        match parse_text(content) {
            Err(ParseError::InvalidLine { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected InvalidLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_text_empty_is_empty() {
        assert!(parse_text("# nothing here\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_toml() {
        let content = r#"
[[record]]
id = 1
parent_id = 0

[[record]]
id = 0
parent_id = 0
"#;
        let records = parse_toml(content).unwrap();
        assert_eq!(records, vec![Record::new(1, 0), Record::new(0, 0)]);
    }

    #[test]
    fn test_parse_toml_rejects_negative_id() {
        let content = "[[record]]\nid = -1\nparent_id = 0\n";
        assert!(matches!(parse_toml(content), Err(ParseError::Toml(_))));
    }

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("a.toml")), InputFormat::Toml);
        assert_eq!(InputFormat::from_path(Path::new("a.TOML")), InputFormat::Toml);
        assert_eq!(InputFormat::from_path(Path::new("a.txt")), InputFormat::Text);
        assert_eq!(InputFormat::from_path(Path::new("records")), InputFormat::Text);
    }
}
