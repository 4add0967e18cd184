//! Document context snapshots
//!
//! The session serializes the whole document plus a bounded cursor
//! neighborhood to `context.json` before every request signal and on
//! editing triggers, so panels always see fresh context paired with a
//! request. Snapshots are recreated wholesale, never patched.

use super::workspace::Workspace;
use crate::config::QuillConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Artifact name for the serialized context
pub const CONTEXT_FILE: &str = "context.json";

/// Snapshot of the document and cursor neighborhood
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContext {
    /// Full line sequence
    pub lines: Vec<String>,

    /// Cursor line, 1-indexed, always within [1, lines.len()]
    pub cursor_line: usize,

    /// Cursor column, 0-indexed
    pub cursor_col: usize,

    /// Bounded window of lines above the cursor
    pub before: Vec<String>,

    /// The line under the cursor
    pub current: String,

    /// Bounded window of lines below the cursor
    pub after: Vec<String>,

    /// Source file path as shown to panels
    pub filename: String,

    /// Capture time, unix milliseconds
    pub timestamp: i64,
}

impl DocumentContext {
    /// Capture a snapshot. Cursor and windows are clamped to document
    /// bounds; an empty document snapshots as a single empty line.
    pub fn capture(
        lines: &[String],
        cursor_line: usize,
        cursor_col: usize,
        filename: &str,
        config: &QuillConfig,
    ) -> Self {
        let lines: Vec<String> = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines.to_vec()
        };

        let cursor_line = cursor_line.clamp(1, lines.len());
        let idx = cursor_line - 1;

        let before_start = idx.saturating_sub(config.context_lines_before);
        let after_end = (idx + 1 + config.context_lines_after).min(lines.len());

        Self {
            before: lines[before_start..idx].to_vec(),
            current: lines[idx].clone(),
            after: lines[idx + 1..after_end].to_vec(),
            cursor_line,
            cursor_col,
            filename: filename.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            lines,
        }
    }
}

impl Workspace {
    /// Publish a context snapshot. Best effort: a write failure is
    /// logged and swallowed so it can never abort editing.
    pub fn publish_context(&self, context: &DocumentContext) {
        if let Err(e) = self.write_json(CONTEXT_FILE, context) {
            warn!("Failed to publish context snapshot: {}", e);
        }
    }

    /// Read back the last published context, if any
    pub fn context(&self) -> Option<DocumentContext> {
        self.read_json(CONTEXT_FILE)
    }
}
