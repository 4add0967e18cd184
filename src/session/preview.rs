//! In-session preview state
//!
//! A preview is an unaccepted candidate text shown inline, anchored to
//! the line that was current when it was shown. It is purely local
//! state, never persisted: Idle until non-empty panel output is shown,
//! Active until accepted, cleared, or the cursor leaves the anchor
//! line.

/// Local preview lifecycle state
#[derive(Debug, Clone, Default)]
pub struct PreviewSession {
    text: String,
    anchor_line: usize,
    active: bool,
}

impl PreviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a preview is currently shown
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Captured candidate text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The 1-indexed line the preview is bound to
    pub fn anchor_line(&self) -> usize {
        self.anchor_line
    }

    /// Capture text and anchor, entering Active
    pub fn activate(&mut self, text: String, anchor_line: usize) {
        self.text = text;
        self.anchor_line = anchor_line;
        self.active = true;
    }

    /// Drop captured text and return to Idle
    pub fn clear(&mut self) {
        self.text.clear();
        self.anchor_line = 0;
        self.active = false;
    }

    /// Cursor moved: clear if it left the anchor line. Returns true if
    /// the preview was cleared.
    pub fn on_cursor_line(&mut self, cursor_line: usize) -> bool {
        if self.active && cursor_line != self.anchor_line {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Rendered annotation lines, never more than `max_lines` rows; a
    /// truncated multi-line candidate ends with a remainder marker
    /// that counts toward the bound
    pub fn annotation(&self, max_lines: usize) -> Vec<String> {
        if !self.active || self.text.trim().is_empty() {
            return Vec::new();
        }

        let all: Vec<&str> = self.text.lines().collect();
        let max_lines = max_lines.max(1);
        if all.len() <= max_lines {
            return all.iter().map(|l| l.to_string()).collect();
        }

        let shown = max_lines - 1;
        let mut out: Vec<String> = all[..shown].iter().map(|l| l.to_string()).collect();
        out.push(format!("(+{} more lines)", all.len() - shown));
        out
    }
}
