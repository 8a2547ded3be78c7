//! Header rewriting for a single document.

use crate::matcher::{first_record_marker, locate_headers};
use serde::Serialize;

/// How a document was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateKind {
    /// Existing header lines were overwritten.
    Replaced { count: usize },
    /// A header was inserted before the first record.
    Inserted,
}

/// Outcome of [`apply_header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderUpdate {
    /// The new text differs from the input.
    Updated { text: String, kind: UpdateKind },
    /// The input already carries the header (or has nowhere to put it).
    NoChange,
}

impl HeaderUpdate {
    pub fn is_changed(&self) -> bool {
        matches!(self, HeaderUpdate::Updated { .. })
    }

    /// The rewritten text, if any.
    pub fn into_text(self) -> Option<String> {
        match self {
            HeaderUpdate::Updated { text, .. } => Some(text),
            HeaderUpdate::NoChange => None,
        }
    }
}

/// Apply `header_line` to `text`.
///
/// When `text` has header lines, every one of them becomes `header_line`.
/// Otherwise `header_line` plus a newline goes in front of the first line
/// starting with `*`; the newline is `\r\n` when the neighbouring line ends
/// that way. Text with neither is left alone. The result is `NoChange`
/// whenever the output equals the input.
pub fn apply_header(text: &str, header_line: &str) -> HeaderUpdate {
    let headers = locate_headers(text);

    let (new_text, kind) = if !headers.is_empty() {
        let count = headers.len();
        (replace_ranges(text, &headers, header_line), UpdateKind::Replaced { count })
    } else if let Some(at) = first_record_marker(text) {
        let newline = line_terminator_near(text, at);
        let mut out = String::with_capacity(text.len() + header_line.len() + newline.len());
        out.push_str(&text[..at]);
        out.push_str(header_line);
        out.push_str(newline);
        out.push_str(&text[at..]);
        (out, UpdateKind::Inserted)
    } else {
        return HeaderUpdate::NoChange;
    };

    if new_text == text {
        HeaderUpdate::NoChange
    } else {
        HeaderUpdate::Updated {
            text: new_text,
            kind,
        }
    }
}

/// Terminator of the line ending at `at`, or of the line starting there
/// when `at` is the start of the text.
fn line_terminator_near(text: &str, at: usize) -> &'static str {
    let crlf = if at > 0 {
        text[..at].ends_with("\r\n")
    } else {
        text.find('\n')
            .map(|nl| text[..nl].ends_with('\r'))
            .unwrap_or(false)
    };
    if crlf {
        "\r\n"
    } else {
        "\n"
    }
}

fn replace_ranges(text: &str, ranges: &[std::ops::Range<usize>], replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in ranges {
        out.push_str(&text[last..range.start]);
        out.push_str(replacement);
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}
