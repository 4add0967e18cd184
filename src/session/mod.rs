//! Editor session state and command surface
//!
//! SessionState owns everything the coordination protocol needs on the
//! editor side: the workspace handle, configuration, the enabled flag,
//! and the local preview. Every command returns only a user-visible
//! status string; failures degrade to a status message, never to an
//! aborted session.

mod preview;
mod scheduler;

pub use preview::PreviewSession;
pub use scheduler::SessionEvent;

use crate::config::QuillConfig;
use crate::editor::{paragraph, TextBuffer};
use crate::outline;
use crate::protocol::{DocumentContext, FillRequest, SignalChannel, SuggestionMode, Workspace};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, warn};

/// Direction for cycling the previewed candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Prev,
}

/// Per-session protocol state
pub struct SessionState {
    workspace: Workspace,
    config: QuillConfig,
    preview: PreviewSession,
    enabled: bool,
    filename: String,
}

impl SessionState {
    /// Start a session against a workspace directory
    pub fn new(workspace: Workspace, config: QuillConfig, filename: impl Into<String>) -> Self {
        Self {
            workspace,
            config,
            preview: PreviewSession::new(),
            enabled: true,
            filename: filename.into(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &QuillConfig {
        &self.config
    }

    pub fn preview(&self) -> &PreviewSession {
        &self.preview
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Session teardown: drop any rendered preview; nothing persists
    pub fn shutdown(&mut self) {
        self.preview.clear();
    }

    /// Publish a context snapshot for the current buffer. Best effort.
    pub fn snapshot(&self, buffer: &TextBuffer) {
        let context = DocumentContext::capture(
            &buffer.lines_vec(),
            buffer.cursor_line_1(),
            buffer.cursor.column,
            &self.filename,
            &self.config,
        );
        self.workspace.publish_context(&context);
    }

    fn disabled_status(&self) -> Option<String> {
        if self.enabled {
            None
        } else {
            Some("Quill is disabled (toggle to re-enable)".to_string())
        }
    }

    /// Request candidate texts for the cursor paragraph
    pub fn request_suggestions(&mut self, buffer: &TextBuffer) -> String {
        if let Some(status) = self.disabled_status() {
            return status;
        }
        self.snapshot(buffer);
        self.workspace.emit(SignalChannel::Suggestions);
        "Suggestions requested".to_string()
    }

    /// Ask the outline panel to refresh from the source file
    pub fn refresh_outline(&mut self, buffer: &TextBuffer) -> String {
        if let Some(status) = self.disabled_status() {
            return status;
        }
        self.snapshot(buffer);
        self.workspace.emit(SignalChannel::Outline);
        "Outline refresh requested".to_string()
    }

    /// Request a document review
    pub fn request_review(&mut self, buffer: &TextBuffer) -> String {
        if let Some(status) = self.disabled_status() {
            return status;
        }
        self.snapshot(buffer);
        self.workspace.emit(SignalChannel::Review);
        "Review requested".to_string()
    }

    /// Fill-section workflow. `confirm` is consulted only when the
    /// section already has content; declining is terminal with no side
    /// effect, as is a cursor with no heading above it.
    pub fn fill_section<F>(&mut self, buffer: &TextBuffer, confirm: F) -> String
    where
        F: FnOnce(&str) -> bool,
    {
        if let Some(status) = self.disabled_status() {
            return status;
        }

        let lines = buffer.lines_vec();
        let heading = match outline::current_heading(&lines, buffer.cursor_line_1()) {
            Some(heading) => heading,
            None => return "No heading above cursor".to_string(),
        };

        if !outline::section_is_empty(&lines, &heading) && !confirm(&heading.text) {
            return "Fill cancelled".to_string();
        }

        self.snapshot(buffer);

        let request = FillRequest {
            heading: heading.text.clone(),
            heading_line: heading.line,
            depth: heading.level,
            outline: outline::outline_titles(&lines),
            timestamp: Utc::now().timestamp_millis(),
        };
        match self.workspace.write_fill_request(&request) {
            Ok(()) => format!("Fill requested for '{}'", heading.text),
            Err(e) => {
                warn!("Failed to write fill request: {}", e);
                "Failed to write fill request".to_string()
            }
        }
    }

    /// Read the preview artifact and show it anchored to the current
    /// line. Absent or empty state is a no-op.
    pub fn show_preview(&mut self, buffer: &TextBuffer) -> String {
        let state = match self.workspace.preview_state() {
            Some(state) if state.has_text() => state,
            _ => {
                debug!("No preview text available");
                return "No preview available".to_string();
            }
        };

        self.preview.activate(state.text, buffer.cursor_line_1());
        if state.count > 0 {
            format!("Previewing suggestion {}/{}", state.index + 1, state.count)
        } else {
            "Previewing suggestion".to_string()
        }
    }

    /// Cycle the previewed candidate: signal the panel, pause briefly
    /// so it can update the preview artifact, then show whatever is
    /// there. The pause is a bounded heuristic, not a completion wait;
    /// a slow panel means a stale (or no) preview until the next tick.
    pub async fn cycle_preview(
        &mut self,
        buffer: &TextBuffer,
        direction: CycleDirection,
    ) -> String {
        if let Some(status) = self.disabled_status() {
            return status;
        }

        let channel = match direction {
            CycleDirection::Next => SignalChannel::PreviewNext,
            CycleDirection::Prev => SignalChannel::PreviewPrev,
        };
        self.workspace.emit(channel);

        tokio::time::sleep(Duration::from_millis(self.config.cycle_delay_ms)).await;
        self.show_preview(buffer)
    }

    /// Clear any rendered preview
    pub fn clear_preview(&mut self) -> String {
        self.preview.clear();
        "Preview cleared".to_string()
    }

    /// Accept the captured preview text into the document, replacing
    /// or inserting per the current suggestion mode
    pub fn accept_preview(&mut self, buffer: &mut TextBuffer) -> String {
        if !self.preview.is_active() || self.preview.text().trim().is_empty() {
            return "Nothing to accept".to_string();
        }

        let lines: Vec<String> = self.preview.text().lines().map(str::to_string).collect();
        let status = self.apply_suggestion(buffer, &lines);
        self.preview.clear();
        status
    }

    /// Insert the n-th numbered suggestion directly, bypassing preview
    pub fn insert_suggestion(&mut self, buffer: &mut TextBuffer, n: usize) -> String {
        if n == 0 || n > self.config.clamped_suggestion_count() {
            return format!("Suggestion {} not ready", n);
        }
        let text = match self.workspace.suggestion(n) {
            Some(text) => text,
            None => return format!("Suggestion {} not ready", n),
        };

        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let status = self.apply_suggestion(buffer, &lines);
        self.preview.clear();
        status
    }

    fn apply_suggestion(&self, buffer: &mut TextBuffer, lines: &[String]) -> String {
        match self.workspace.suggestion_mode() {
            SuggestionMode::Alternatives => {
                paragraph::replace_current(buffer, lines);
                "Replaced paragraph".to_string()
            }
            SuggestionMode::NextParagraph => {
                paragraph::insert_after(buffer, lines);
                "Inserted paragraph".to_string()
            }
        }
    }

    /// Toggle the whole coordination surface on or off
    pub fn toggle_enabled(&mut self) -> String {
        self.enabled = !self.enabled;
        if self.enabled {
            "Quill enabled".to_string()
        } else {
            "Quill disabled".to_string()
        }
    }

    /// Persist a model override for panels to pick up
    pub fn set_model(&mut self, model: &str) -> String {
        match self.workspace.set_model_override(model) {
            Ok(()) => format!("Model set to {}", model),
            Err(e) => {
                warn!("Failed to write model override: {}", e);
                "Failed to set model".to_string()
            }
        }
    }

    /// Surface the latest review report as a one-line status; the
    /// full critique lives in the review panel
    pub fn show_review(&self) -> String {
        match self.workspace.review_report() {
            Some(report) if !report.critique.trim().is_empty() => {
                let first = report.critique.lines().next().unwrap_or_default();
                format!("Review: {}", first)
            }
            _ => "No review available".to_string(),
        }
    }

    /// Report the effective model
    pub fn show_model(&self) -> String {
        match self.workspace.model_override() {
            Some(over) => format!("Model: {} (override)", over.model),
            None => match &self.config.default_model {
                Some(model) => format!("Model: {} (default)", model),
                None => "Model: panel default".to_string(),
            },
        }
    }
}
