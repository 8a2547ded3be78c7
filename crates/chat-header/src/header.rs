//! Validated `@Types:` header values.

use regex_lite::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Exactly three comma-separated categories after a tab.
const OVERRIDE_LINE_PATTERN: &str = r"^@Types:\t(\S+), (\S+), (\S+)$";

fn override_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(OVERRIDE_LINE_PATTERN).expect("override pattern is valid"))
}

/// Errors for header parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("malformed @Types line: {line:?}")]
    Malformed { line: String },
}

/// A header line of the form `@Types:\t<a>, <b>, <c>`.
///
/// The stored line has no terminator and is written verbatim into documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypesHeader {
    line: String,
    categories: [String; 3],
}

impl TypesHeader {
    /// Parse a single line, ignoring one trailing `\n` or `\r\n`.
    pub fn parse(line: &str) -> Result<Self, HeaderError> {
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);

        let caps = override_line_regex()
            .captures(line)
            .ok_or_else(|| HeaderError::Malformed {
                line: line.to_string(),
            })?;

        Ok(Self {
            line: line.to_string(),
            categories: [
                caps[1].to_string(),
                caps[2].to_string(),
                caps[3].to_string(),
            ],
        })
    }

    /// The full header line.
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// The three category tokens in declared order.
    pub fn categories(&self) -> &[String; 3] {
        &self.categories
    }
}

impl fmt::Display for TypesHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}
