//! Paragraph-level editing
//!
//! Paragraphs are blank-line-delimited runs of text. Accepting a
//! suggestion either inserts a new paragraph after the current line or
//! replaces the paragraph under the cursor, depending on the
//! suggestion mode.

use super::buffer::TextBuffer;
use super::cursor::Position;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Inclusive line bounds (0-indexed) of the paragraph containing the
/// cursor line. A blank cursor line is its own one-line "paragraph" so
/// replacement never reaches out of range.
pub fn paragraph_bounds(lines: &[String], cursor_line: usize) -> (usize, usize) {
    if lines.is_empty() {
        return (0, 0);
    }
    let cursor = cursor_line.min(lines.len() - 1);
    if is_blank(&lines[cursor]) {
        return (cursor, cursor);
    }

    let mut start = cursor;
    while start > 0 && !is_blank(&lines[start - 1]) {
        start -= 1;
    }
    let mut end = cursor;
    while end + 1 < lines.len() && !is_blank(&lines[end + 1]) {
        end += 1;
    }
    (start, end)
}

/// Insert a blank separator plus the given lines immediately after the
/// current line; the cursor moves to the first inserted line.
pub fn insert_after(buffer: &mut TextBuffer, new_lines: &[String]) {
    if new_lines.is_empty() {
        return;
    }

    let mut lines = buffer.lines_vec();
    let at = (buffer.cursor.line + 1).min(lines.len());

    let mut inserted = Vec::with_capacity(new_lines.len() + 1);
    inserted.push(String::new());
    inserted.extend(new_lines.iter().cloned());
    lines.splice(at..at, inserted);

    buffer.set_lines(lines);
    buffer.cursor = Position {
        line: at + 1,
        column: 0,
    };
}

/// Replace the paragraph under the cursor with the given lines; the
/// cursor lands on the first replaced line. An empty replacement
/// deletes the paragraph.
pub fn replace_current(buffer: &mut TextBuffer, new_lines: &[String]) {
    let mut lines = buffer.lines_vec();
    if lines.is_empty() {
        lines.push(String::new());
    }

    let (start, end) = paragraph_bounds(&lines, buffer.cursor.line);
    lines.splice(start..=end, new_lines.iter().cloned());
    if lines.is_empty() {
        lines.push(String::new());
    }

    buffer.set_lines(lines);
    buffer.cursor = Position {
        line: start.min(buffer.line_count().saturating_sub(1)),
        column: 0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bounds_middle_paragraph() {
        let doc = lines(&["a", "", "b1", "b2", "", "c"]);
        assert_eq!(paragraph_bounds(&doc, 2), (2, 3));
        assert_eq!(paragraph_bounds(&doc, 3), (2, 3));
    }

    #[test]
    fn test_bounds_touching_document_edges() {
        let doc = lines(&["a1", "a2", "", "z"]);
        assert_eq!(paragraph_bounds(&doc, 0), (0, 1));
        assert_eq!(paragraph_bounds(&doc, 3), (3, 3));
    }

    #[test]
    fn test_bounds_one_line_document() {
        let doc = lines(&["only"]);
        assert_eq!(paragraph_bounds(&doc, 0), (0, 0));
        // Cursor beyond the end is clamped
        assert_eq!(paragraph_bounds(&doc, 10), (0, 0));
    }

    #[test]
    fn test_bounds_blank_cursor_line() {
        let doc = lines(&["a", "", "b"]);
        assert_eq!(paragraph_bounds(&doc, 1), (1, 1));
    }

    #[test]
    fn test_insert_after() {
        let mut buffer = TextBuffer::from_text("first\nlast");
        buffer.cursor = Position { line: 0, column: 3 };

        insert_after(&mut buffer, &lines(&["new para"]));

        assert_eq!(buffer.lines_vec(), vec!["first", "", "new para", "last"]);
        assert_eq!(buffer.cursor, Position { line: 2, column: 0 });
    }

    #[test]
    fn test_insert_after_last_line() {
        let mut buffer = TextBuffer::from_text("only");
        insert_after(&mut buffer, &lines(&["x", "y"]));

        assert_eq!(buffer.lines_vec(), vec!["only", "", "x", "y"]);
        assert_eq!(buffer.cursor.line, 2);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut buffer = TextBuffer::from_text("only");
        insert_after(&mut buffer, &[]);
        assert_eq!(buffer.lines_vec(), vec!["only"]);
    }

    #[test]
    fn test_replace_changes_count_by_m_minus_k() {
        // k = 2 paragraph lines, m = 3 replacement lines
        let mut buffer = TextBuffer::from_text("head\n\nold1\nold2\n\ntail");
        buffer.cursor = Position { line: 2, column: 0 };
        let before = buffer.line_count();

        replace_current(&mut buffer, &lines(&["n1", "n2", "n3"]));

        assert_eq!(buffer.line_count(), before + 1);
        assert_eq!(
            buffer.lines_vec(),
            vec!["head", "", "n1", "n2", "n3", "", "tail"]
        );
        // Content outside the original bounds untouched
        assert_eq!(buffer.cursor, Position { line: 2, column: 0 });
    }

    #[test]
    fn test_replace_one_line_document() {
        let mut buffer = TextBuffer::from_text("lonely");
        replace_current(&mut buffer, &lines(&["better"]));

        assert_eq!(buffer.lines_vec(), vec!["better"]);
        assert_eq!(buffer.cursor, Position { line: 0, column: 0 });
    }

    #[test]
    fn test_replace_paragraph_at_document_start() {
        let mut buffer = TextBuffer::from_text("p1a\np1b\n\nrest");
        buffer.cursor = Position { line: 1, column: 0 };

        replace_current(&mut buffer, &lines(&["new"]));
        assert_eq!(buffer.lines_vec(), vec!["new", "", "rest"]);
    }

    #[test]
    fn test_replace_paragraph_at_document_end() {
        let mut buffer = TextBuffer::from_text("rest\n\ntail1\ntail2");
        buffer.cursor = Position { line: 3, column: 0 };

        replace_current(&mut buffer, &lines(&["t"]));
        assert_eq!(buffer.lines_vec(), vec!["rest", "", "t"]);
    }

    #[test]
    fn test_replace_with_empty_deletes_paragraph() {
        let mut buffer = TextBuffer::from_text("a\n\nmid\n\nz");
        buffer.cursor = Position { line: 2, column: 0 };

        replace_current(&mut buffer, &[]);
        assert_eq!(buffer.lines_vec(), vec!["a", "", "", "z"]);
        assert_eq!(buffer.cursor.line, 2);
    }

    #[test]
    fn test_replace_entire_single_paragraph_document() {
        let mut buffer = TextBuffer::from_text("a\nb\nc");
        buffer.cursor = Position { line: 1, column: 0 };

        replace_current(&mut buffer, &[]);
        assert_eq!(buffer.lines_vec(), vec![""]);
        assert_eq!(buffer.cursor, Position { line: 0, column: 0 });
    }
}
