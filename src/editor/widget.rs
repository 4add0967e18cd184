//! Editor widget for rendering the text buffer
//!
//! Line numbers, cursor, scrolling, and the inline preview annotation
//! rendered directly beneath the preview's anchor line.

use super::buffer::TextBuffer;
use super::cursor::Position;
use crate::session::PreviewSession;
use ratatui::{
    buffer::Buffer as RatatuiBuffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, StatefulWidget, Widget},
};

/// Editor widget state
pub struct EditorState {
    /// Vertical scroll offset (line number)
    pub scroll_offset: usize,

    /// Whether to show line numbers
    pub show_line_numbers: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            scroll_offset: 0,
            show_line_numbers: true,
        }
    }
}

impl EditorState {
    /// Scroll to ensure cursor is visible
    pub fn ensure_cursor_visible(&mut self, cursor: &Position, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if cursor.line >= self.scroll_offset + viewport_height {
            self.scroll_offset = cursor.line - viewport_height + 1;
        }
        if cursor.line < self.scroll_offset {
            self.scroll_offset = cursor.line;
        }
    }
}

/// Editor widget for the document buffer
pub struct EditorWidget<'a> {
    buffer: &'a TextBuffer,
    preview: Option<&'a PreviewSession>,
    preview_max_lines: usize,
    block: Option<Block<'a>>,
    focused: bool,
}

impl<'a> EditorWidget<'a> {
    /// Create new editor widget
    pub fn new(buffer: &'a TextBuffer) -> Self {
        Self {
            buffer,
            preview: None,
            preview_max_lines: 6,
            block: None,
            focused: false,
        }
    }

    /// Attach the preview session for inline annotation rendering
    pub fn preview(mut self, preview: &'a PreviewSession, max_lines: usize) -> Self {
        self.preview = Some(preview);
        self.preview_max_lines = max_lines;
        self
    }

    /// Set block styling
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Set focus state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn line_number_width(&self) -> usize {
        let line_count = self.buffer.line_count();
        if line_count == 0 {
            return 3;
        }
        (line_count.ilog10() as usize + 1).max(3)
    }

    /// Annotation lines for a given document line, if the preview is
    /// anchored there (anchor is 1-indexed)
    fn annotation_after(&self, line_idx: usize) -> Vec<String> {
        match self.preview {
            Some(preview) if preview.is_active() && preview.anchor_line() == line_idx + 1 => {
                preview.annotation(self.preview_max_lines)
            }
            _ => Vec::new(),
        }
    }
}

impl<'a> StatefulWidget for EditorWidget<'a> {
    type State = EditorState;

    fn render(self, area: Rect, buf: &mut RatatuiBuffer, state: &mut Self::State) {
        let inner_area = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        state.ensure_cursor_visible(&self.buffer.cursor, inner_area.height as usize);

        let line_num_width = if state.show_line_numbers {
            self.line_number_width() as u16 + 2
        } else {
            0
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(line_num_width), Constraint::Min(10)])
            .split(inner_area);

        let gutter = chunks[0];
        let content = chunks[1];

        let viewport_height = content.height as usize;
        let viewport_width = content.width as usize;
        let line_count = self.buffer.line_count();

        // Screen rows advance past both document lines and annotation
        // rows, so a preview pushes later lines down instead of
        // overdrawing them.
        let mut row = 0usize;
        let mut line_idx = state.scroll_offset;

        while row < viewport_height && line_idx < line_count {
            let y = content.y + row as u16;
            let line_text = self.buffer.line(line_idx).unwrap_or_default();
            let is_cursor_line = line_idx == self.buffer.cursor.line;

            if state.show_line_numbers && gutter.width > 0 {
                let style = if is_cursor_line && self.focused {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let num = format!(
                    "{:>width$}",
                    line_idx + 1,
                    width = gutter.width.saturating_sub(1) as usize
                );
                buf.set_string(gutter.x, y, &num, style);
            }

            let visible: String = line_text.chars().take(viewport_width).collect();
            buf.set_string(content.x, y, &visible, Style::default());

            if is_cursor_line && self.focused {
                let col = self.buffer.cursor.column;
                if col < viewport_width {
                    let x = content.x + col as u16;
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_style(cell.style().add_modifier(Modifier::REVERSED));
                    }
                }
            }

            row += 1;

            for annotation in self.annotation_after(line_idx) {
                if row >= viewport_height {
                    break;
                }
                let y = content.y + row as u16;
                let text: String = format!("▸ {}", annotation)
                    .chars()
                    .take(viewport_width)
                    .collect();
                buf.set_string(
                    content.x,
                    y,
                    &text,
                    Style::default().fg(Color::Green).add_modifier(Modifier::ITALIC),
                );
                row += 1;
            }

            line_idx += 1;
        }
    }
}
