//! Scheduled and event-driven triggers
//!
//! The session never receives push notifications from panels; it is
//! driven by discrete editor events plus a periodic idle tick. The
//! tick refreshes the context snapshot and re-reads the preview
//! artifact so panel-side updates surface without user action.

use super::SessionState;
use crate::editor::TextBuffer;

/// Discrete triggers the editor feeds into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Periodic idle tick
    IdleTick,
    /// Buffer was written to disk
    Saved,
    /// Buffer text changed
    TextChanged,
    /// Cursor position changed
    CursorMoved,
}

impl SessionState {
    /// Dispatch a scheduler event. Returns a status string only when
    /// something user-visible happened.
    ///
    /// Edits can relocate the cursor (a newline, a backspace joining
    /// lines), so every event runs the preview's leave-anchor check
    /// before anything re-reads the preview artifact. Automatic
    /// snapshots stop while the session is toggled off.
    pub fn handle_event(&mut self, buffer: &TextBuffer, event: SessionEvent) -> Option<String> {
        let cleared = self.preview.on_cursor_line(buffer.cursor_line_1());

        match event {
            SessionEvent::IdleTick => {
                if self.is_enabled() {
                    self.snapshot(buffer);
                }
                if self.preview.is_active() {
                    // Surface panel-side preview edits between polls;
                    // the anchor is unchanged since the cursor is
                    // still on it
                    self.show_preview(buffer);
                }
            }
            SessionEvent::Saved | SessionEvent::TextChanged => {
                if self.is_enabled() {
                    self.snapshot(buffer);
                }
            }
            SessionEvent::CursorMoved => {}
        }

        cleared.then(|| "Preview cleared".to_string())
    }
}
