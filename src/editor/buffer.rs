//! Text buffer with rope data structure
//!
//! Character-level editing goes through the rope; the coordination
//! protocol views the buffer as a plain line sequence, so the buffer
//! also exposes line-oriented accessors and a wholesale line rewrite
//! used by the paragraph editor.

use super::cursor::{Movement, Position};
use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::path::PathBuf;

/// Text buffer holding the document being written
pub struct TextBuffer {
    /// Text content (rope for efficient editing)
    pub content: Rope,

    /// File path (if loaded from disk)
    pub path: Option<PathBuf>,

    /// Whether buffer has unsaved changes
    pub dirty: bool,

    /// Cursor position
    pub cursor: Position,
}

impl TextBuffer {
    /// Create an empty buffer
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            content: Rope::new(),
            path,
            dirty: false,
            cursor: Position::default(),
        }
    }

    /// Create a buffer from text (used heavily by tests)
    pub fn from_text(text: &str) -> Self {
        Self {
            content: Rope::from_str(text),
            path: None,
            dirty: false,
            cursor: Position::default(),
        }
    }

    /// Load file contents from disk
    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        self.content = Rope::from_str(&content);
        self.path = Some(path);
        self.dirty = false;
        self.cursor = Position::default();
        Ok(())
    }

    /// Save buffer to disk
    pub fn save_file(&mut self) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No file path set"))?;

        fs::write(path, self.content.to_string())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        self.dirty = false;
        Ok(())
    }

    /// Insert text at the cursor position
    pub fn insert(&mut self, text: &str) {
        let pos = self.cursor_to_char_idx();
        self.content.insert(pos, text);
        self.dirty = true;

        // Advance the cursor through the inserted text
        let newlines = text.matches('\n').count();
        if newlines > 0 {
            self.cursor.line += newlines;
            self.cursor.column = text.rsplit('\n').next().map(|t| t.chars().count()).unwrap_or(0);
        } else {
            self.cursor.column += text.chars().count();
        }
    }

    /// Delete the character at the cursor
    pub fn delete(&mut self) {
        let pos = self.cursor_to_char_idx();
        if pos >= self.content.len_chars() {
            return;
        }
        self.content.remove(pos..pos + 1);
        self.dirty = true;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor.column == 0 && self.cursor.line == 0 {
            return;
        }
        self.move_cursor(Movement::Left);
        self.delete();
    }

    /// Get line count
    pub fn line_count(&self) -> usize {
        self.content.len_lines()
    }

    /// Get a line by 0-indexed position, without its trailing newline
    pub fn line(&self, idx: usize) -> Option<String> {
        if idx >= self.content.len_lines() {
            return None;
        }
        Some(self.content.line(idx).to_string().trim_end_matches('\n').to_string())
    }

    /// The whole document as a line sequence (the protocol's view)
    pub fn lines_vec(&self) -> Vec<String> {
        self.content
            .to_string()
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    /// Replace the entire document with a new line sequence. The
    /// cursor is clamped afterwards; callers position it explicitly.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.content = Rope::from_str(&lines.join("\n"));
        self.dirty = true;
        self.clamp_cursor();
    }

    /// Cursor line at the protocol boundary: 1-indexed, clamped
    pub fn cursor_line_1(&self) -> usize {
        (self.cursor.line + 1).min(self.line_count().max(1))
    }

    /// Get text content as string
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Move cursor
    pub fn move_cursor(&mut self, movement: Movement) {
        match movement {
            Movement::Left => {
                if self.cursor.column > 0 {
                    self.cursor.column -= 1;
                } else if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.column = self.line_len(self.cursor.line);
                }
            }
            Movement::Right => {
                if self.cursor.column < self.line_len(self.cursor.line) {
                    self.cursor.column += 1;
                } else if self.cursor.line + 1 < self.line_count() {
                    self.cursor.line += 1;
                    self.cursor.column = 0;
                }
            }
            Movement::Up => {
                if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.line));
                }
            }
            Movement::Down => {
                if self.cursor.line + 1 < self.line_count() {
                    self.cursor.line += 1;
                    self.cursor.column = self.cursor.column.min(self.line_len(self.cursor.line));
                }
            }
            Movement::LineStart => {
                self.cursor.column = 0;
            }
            Movement::LineEnd => {
                self.cursor.column = self.line_len(self.cursor.line);
            }
            Movement::BufferStart => {
                self.cursor = Position::default();
            }
            Movement::BufferEnd => {
                self.cursor.line = self.line_count().saturating_sub(1);
                self.cursor.column = self.line_len(self.cursor.line);
            }
        }
    }

    /// Length of a line in characters, 0 for out-of-range lines
    fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn clamp_cursor(&mut self) {
        let max_line = self.line_count().saturating_sub(1);
        if self.cursor.line > max_line {
            self.cursor.line = max_line;
        }
        let len = self.line_len(self.cursor.line);
        if self.cursor.column > len {
            self.cursor.column = len;
        }
    }

    /// Convert cursor position to character index
    fn cursor_to_char_idx(&self) -> usize {
        let line = self.cursor.line.min(self.content.len_lines().saturating_sub(1));
        let line_start = self.content.line_to_char(line);
        let line_len = self.line_len(line);
        line_start + self.cursor.column.min(line_len)
    }
}
