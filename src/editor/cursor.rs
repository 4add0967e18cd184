//! Cursor position and movement

/// Position in a text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
}

/// Cursor movement commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Move left one character
    Left,
    /// Move right one character
    Right,
    /// Move up one line
    Up,
    /// Move down one line
    Down,
    /// Move to start of line
    LineStart,
    /// Move to end of line
    LineEnd,
    /// Move to start of buffer
    BufferStart,
    /// Move to end of buffer
    BufferEnd,
}
