//! Inline-comment extraction from review markdown.
//!
//! The review template asks the model to emit line-specific feedback as
//! anchored sections:
//!
//! ```text
//! <a name="feedback-1"></a>
//! ### 1. File: src/lib.rs Lines: 10-12
//! ...
//! **Suggested Comment:** Prefer `?` over `unwrap()` here.
//! ```
//!
//! The scanner walks the lines once, tracking the current anchor id and the
//! most recent `### ... File:` heading. A suggested comment becomes an
//! [`InlineCommentDirective`] only when an anchor is active and the latest
//! heading parses; anything else is skipped silently. Model output is not
//! guaranteed to follow the template, so results are best-effort.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref ANCHOR_RE: Regex = Regex::new(r#"^<a name="(feedback-[^"]*)""#).unwrap();
    static ref HEADING_RE: Regex = Regex::new(r"^###\s").unwrap();
}

const SUGGESTED_LABELS: [&str; 2] = ["**Suggested Comment:**", "Suggested Comment:"];

/// One comment to anchor at `path:line` in the change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineCommentDirective {
    pub path: String,
    /// First line of the commented range (1-based).
    pub line: u32,
    pub body: String,
}

/// File target taken from a `### N. File: <path> Lines: <start>[-<end>]` heading.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileTarget {
    path: String,
    line: u32,
}

/// What the scanner knows about the nearest heading above the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HeadingState {
    /// No `### ... File:` heading seen yet.
    None,
    /// Heading seen but path or line could not be read.
    Malformed,
    Target(FileTarget),
}

/// Line scanner state.
#[derive(Debug)]
struct Scanner {
    anchor: Option<String>,
    heading: HeadingState,
    out: Vec<InlineCommentDirective>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            anchor: None,
            heading: HeadingState::None,
            out: Vec::new(),
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim_start();

        if let Some(cap) = ANCHOR_RE.captures(line) {
            self.anchor = Some(cap[1].to_string());
            return;
        }

        if HEADING_RE.is_match(line) && line.contains("File:") {
            self.heading = match parse_heading(line) {
                Some(target) => HeadingState::Target(target),
                None => HeadingState::Malformed,
            };
            return;
        }

        if let Some(text) = suggested_comment(line) {
            self.on_suggestion(text);
        }
    }

    fn on_suggestion(&mut self, text: &str) {
        let Some(anchor) = &self.anchor else {
            return;
        };
        let HeadingState::Target(target) = &self.heading else {
            return;
        };
        if text.is_empty() {
            return;
        }

        self.out.push(InlineCommentDirective {
            path: target.path.clone(),
            line: target.line,
            body: format!("{text} ([See review](#{anchor}))"),
        });
    }
}

/// Extracts inline directives from review markdown, in document order.
pub fn extract_inline_directives(feedback: &str) -> Vec<InlineCommentDirective> {
    let mut scanner = Scanner::new();
    for line in feedback.lines() {
        scanner.feed(line);
    }
    scanner.out
}

/// Returns the trimmed comment text if `line` carries the suggestion label.
fn suggested_comment(line: &str) -> Option<&str> {
    SUGGESTED_LABELS
        .iter()
        .find_map(|label| line.strip_prefix(label))
        .map(str::trim)
}

/// Reads path and start line from a heading already known to contain `File:`.
fn parse_heading(line: &str) -> Option<FileTarget> {
    let (_, after_file) = line.split_once("File:")?;
    let (path_part, lines_part) = after_file.split_once("Lines:")?;

    let path = path_part.trim().trim_matches('`').trim();
    if path.is_empty() {
        return None;
    }

    // "10-12", "[10-12]", "L10-L12", "10, 14" → first run of digits.
    let digits = lines_part.trim_start_matches(|c: char| !c.is_ascii_digit());
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let line: u32 = digits[..end].parse().ok().filter(|n| *n > 0)?;

    Some(FileTarget {
        path: path.to_string(),
        line,
    })
}
