//! Document outline extraction
//!
//! Recognizes ATX-style headings (a run of `#` markers, whitespace,
//! then text), skipping fenced code blocks so a `# comment` inside a
//! fence is never mistaken for a heading. The outline is the panels'
//! view of document structure and the anchor for the fill-section
//! workflow.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#+)\s+(.+)$").expect("heading pattern is valid"));
static TRAILING_MARKERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*#+\s*$").expect("trailing marker pattern is valid"));

/// A heading in the document outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Heading depth (number of `#` markers)
    pub level: usize,

    /// Heading text with markers stripped
    pub text: String,

    /// Source line, 1-indexed
    pub line: usize,
}

/// Word and line counts for the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocStats {
    pub words: usize,
    pub lines: usize,
}

/// Extract all headings in document order
pub fn extract_outline(lines: &[String]) -> Vec<OutlineItem> {
    let mut items = Vec::new();
    let mut in_fence = false;

    for (i, line) in lines.iter().enumerate() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            let markers = &caps[1];
            let text = TRAILING_MARKERS_RE.replace(caps[2].trim(), "").to_string();
            items.push(OutlineItem {
                level: markers.len(),
                text,
                line: i + 1,
            });
        }
    }

    items
}

/// Heading titles in document order (the outline snapshot carried by
/// fill requests)
pub fn outline_titles(lines: &[String]) -> Vec<String> {
    extract_outline(lines).into_iter().map(|i| i.text).collect()
}

/// Nearest heading at or above the cursor line (1-indexed), or None
/// if the cursor precedes every heading
pub fn current_heading(lines: &[String], cursor_line: usize) -> Option<OutlineItem> {
    extract_outline(lines)
        .into_iter()
        .take_while(|item| item.line <= cursor_line)
        .last()
}

/// Whether a section (heading line exclusive, up to the next heading
/// or end of document) contains only whitespace
pub fn section_is_empty(lines: &[String], heading: &OutlineItem) -> bool {
    let next_heading_line = extract_outline(lines)
        .into_iter()
        .find(|item| item.line > heading.line)
        .map(|item| item.line)
        .unwrap_or(lines.len() + 1);

    // heading.line is 1-indexed; the section body starts on the next line
    lines
        .iter()
        .take(next_heading_line.saturating_sub(1))
        .skip(heading.line)
        .all(|line| line.trim().is_empty())
}

/// Word and line counts over the whole document
pub fn doc_stats(lines: &[String]) -> DocStats {
    let words = lines.iter().map(|l| l.split_whitespace().count()).sum();
    DocStats {
        words,
        lines: lines.len(),
    }
}
