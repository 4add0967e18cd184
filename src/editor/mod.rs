//! Document buffer and paragraph editing
//!
//! A single rope-backed buffer, cursor movement, and the
//! blank-line-delimited paragraph operations the suggestion protocol
//! edits through.

mod buffer;
mod cursor;
pub mod paragraph;
mod widget;

pub use buffer::TextBuffer;
pub use cursor::{Movement, Position};
pub use widget::{EditorState, EditorWidget};
