//! Integration tests for the file coordination protocol

use quill::config::QuillConfig;
use quill::editor::{Position, TextBuffer};
use quill::protocol::{DocumentContext, SignalChannel, Workspace, CONTEXT_FILE, FILL_REQUEST_FILE};
use quill::session::SessionState;
use std::fs;
use tempfile::TempDir;

fn workspace() -> (Workspace, TempDir) {
    let temp = TempDir::new().unwrap();
    let ws = Workspace::new(temp.path().join("runtime")).unwrap();
    (ws, temp)
}

#[test]
fn test_signal_is_single_file_no_history() {
    let (ws, _temp) = workspace();

    ws.emit(SignalChannel::Suggestions);
    let first = ws.read_string("request_suggestions").unwrap();
    let first_ms: i64 = first.parse().unwrap();
    assert!(first_ms > 0);

    // A second emission overwrites; only the latest survives
    ws.emit(SignalChannel::Suggestions);
    let entries = fs::read_dir(ws.root()).unwrap().count();
    assert_eq!(entries, 1);

    let second_ms: i64 = ws.read_string("request_suggestions").unwrap().parse().unwrap();
    assert!(second_ms >= first_ms);
}

#[test]
fn test_each_channel_has_its_own_file() {
    let (ws, _temp) = workspace();

    ws.emit(SignalChannel::Outline);
    ws.emit(SignalChannel::Review);
    ws.emit(SignalChannel::PreviewNext);
    ws.emit(SignalChannel::PreviewPrev);

    assert!(ws.exists("request_outline"));
    assert!(ws.exists("request_review"));
    assert!(ws.exists("preview_next"));
    assert!(ws.exists("preview_prev"));
    assert!(!ws.exists("request_suggestions"));
}

#[test]
fn test_context_snapshot_windows_clamp_at_edges() {
    let (ws, _temp) = workspace();
    let config = QuillConfig {
        context_lines_before: 3,
        context_lines_after: 2,
        ..Default::default()
    };

    let lines: Vec<String> = (1..=10).map(|n| format!("line {}", n)).collect();

    // Cursor near the top: before-window is just the lines that exist
    let context = DocumentContext::capture(&lines, 2, 0, "draft.md", &config);
    assert_eq!(context.before, vec!["line 1"]);
    assert_eq!(context.current, "line 2");
    assert_eq!(context.after, vec!["line 3", "line 4"]);
    assert_eq!(context.cursor_line, 2);

    ws.publish_context(&context);
    let read = ws.context().unwrap();
    assert_eq!(read.current, "line 2");
    assert_eq!(read.filename, "draft.md");
    assert!(read.timestamp > 0);
}

#[test]
fn test_context_cursor_clamped_to_document() {
    let config = QuillConfig::default();
    let lines = vec!["only".to_string()];

    let context = DocumentContext::capture(&lines, 99, 0, "draft.md", &config);
    assert_eq!(context.cursor_line, 1);
    assert_eq!(context.current, "only");
    assert!(context.after.is_empty());
}

#[test]
fn test_context_empty_document() {
    let config = QuillConfig::default();
    let context = DocumentContext::capture(&[], 1, 0, "draft.md", &config);
    assert_eq!(context.lines, vec![String::new()]);
    assert_eq!(context.cursor_line, 1);
}

#[test]
fn test_malformed_context_reads_as_absent() {
    let (ws, _temp) = workspace();
    ws.write_atomic(CONTEXT_FILE, "not json at all").unwrap();
    assert!(ws.context().is_none());
}

#[test]
fn test_fill_without_heading_writes_nothing() {
    let (ws, _temp) = workspace();
    let mut session = SessionState::new(ws.clone(), QuillConfig::default(), "draft.md");
    let buffer = TextBuffer::from_text("no headings here\njust prose");

    let status = session.fill_section(&buffer, |_| true);
    assert_eq!(status, "No heading above cursor");
    assert!(!ws.exists(FILL_REQUEST_FILE));
    // Not even a context snapshot: the request never started
    assert!(!ws.exists(CONTEXT_FILE));
}

#[test]
fn test_fill_declined_writes_nothing() {
    let (ws, _temp) = workspace();
    let mut session = SessionState::new(ws.clone(), QuillConfig::default(), "draft.md");
    let mut buffer = TextBuffer::from_text("# Intro\nalready written");
    buffer.cursor = Position { line: 1, column: 0 };

    let status = session.fill_section(&buffer, |heading| {
        assert_eq!(heading, "Intro");
        false
    });
    assert_eq!(status, "Fill cancelled");
    assert!(!ws.exists(FILL_REQUEST_FILE));
}

#[test]
fn test_fill_empty_section_skips_confirmation() {
    let (ws, _temp) = workspace();
    let mut session = SessionState::new(ws.clone(), QuillConfig::default(), "draft.md");
    let mut buffer = TextBuffer::from_text("# Intro\ntext\n## Empty\n\n# Next");
    buffer.cursor = Position { line: 3, column: 0 };

    // Confirm callback must never fire for an empty section
    let status = session.fill_section(&buffer, |_| panic!("asked to confirm empty section"));
    assert_eq!(status, "Fill requested for 'Empty'");

    let request: quill::protocol::FillRequest = ws.read_json(FILL_REQUEST_FILE).unwrap();
    assert_eq!(request.heading, "Empty");
    assert_eq!(request.heading_line, 3);
    assert_eq!(request.depth, 2);
    assert_eq!(request.outline, vec!["Intro", "Empty", "Next"]);

    // Fill also refreshed the context snapshot
    assert!(ws.context().is_some());
}
