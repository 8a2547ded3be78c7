//! `@Types:` header and record-marker matching.
//!
//! Both patterns scan in multi-line mode, so `^` anchors at every line start.
//! A header match runs to the end of its line but never includes the line
//! terminator (neither `\n` nor the `\r` of a CRLF pair).

use regex_lite::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// `^@Types:.*$`, without swallowing a `\r` before the newline.
const HEADER_PATTERN: &str = r"(?m)^@Types:[^\r\n]*";

const RECORD_MARKER_PATTERN: &str = r"(?m)^\*";

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEADER_PATTERN).expect("header pattern is valid"))
}

fn record_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RECORD_MARKER_PATTERN).expect("record marker pattern is valid"))
}

/// Whether any line of `text` is an `@Types:` header.
pub fn has_header(text: &str) -> bool {
    header_regex().is_match(text)
}

/// Byte ranges of every header line in `text`, in document order.
///
/// Ranges exclude line terminators.
pub fn locate_headers(text: &str) -> Vec<Range<usize>> {
    header_regex().find_iter(text).map(|m| m.range()).collect()
}

/// Byte offset of the start of the first record line, if any.
pub fn first_record_marker(text: &str) -> Option<usize> {
    record_marker_regex().find(text).map(|m| m.start())
}
