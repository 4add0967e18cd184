//! Main Quill application
//!
//! Ratatui event loop wiring keybindings to the session command
//! surface, plus the y/n prompt for filling a non-empty section.

use crate::config::QuillConfig;
use crate::editor::{EditorState, EditorWidget, Movement, TextBuffer};
use crate::outline;
use crate::session::{CycleDirection, SessionEvent, SessionState};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::cell::Cell;
use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Quitting,
}

/// Main Quill application
pub struct QuillApp {
    config: QuillConfig,
    buffer: TextBuffer,
    editor_state: EditorState,
    session: SessionState,
    state: AppState,
    status: String,
    /// Heading awaiting fill confirmation, if any
    pending_fill: Option<String>,
}

impl QuillApp {
    /// Create the application around an open buffer and session
    pub fn new(config: QuillConfig, buffer: TextBuffer, session: SessionState) -> Self {
        Self {
            config,
            buffer,
            editor_state: EditorState::default(),
            session,
            state: AppState::Running,
            status: "Quill | ^Q quit  ^S save  ^G suggest  ^F fill  ^R review  ^N/^P cycle  ^A accept".to_string(),
            pending_fill: None,
        }
    }

    /// Load file into the buffer
    pub fn load_file(&mut self, path: PathBuf) -> Result<()> {
        self.buffer.load_file(path.clone())?;
        self.status = format!("Loaded: {}", path.display());
        Ok(())
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = self.event_loop(&mut terminal).await;

        // Teardown: nothing carries over between sessions
        self.session.shutdown();
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let tick = Duration::from_millis(self.config.idle_tick_ms);
        let mut last_tick = Instant::now();

        loop {
            self.render(terminal)?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key).await?;
                }
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();
                self.session.handle_event(&self.buffer, SessionEvent::IdleTick);
            }

            if self.state == AppState::Quitting {
                break;
            }
        }

        Ok(())
    }

    /// Handle a key event
    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // A pending fill confirmation captures the next key
        if let Some(heading) = self.pending_fill.take() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.status = self.session.fill_section(&self.buffer, |_| true);
                }
                _ => {
                    self.status = format!("Fill of '{}' cancelled", heading);
                }
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match (key.code, ctrl) {
            // Quit
            (KeyCode::Char('q'), true) | (KeyCode::Char('c'), true) => {
                self.state = AppState::Quitting;
            }

            // Save
            (KeyCode::Char('s'), true) => {
                match self.buffer.save_file() {
                    Ok(()) => self.status = "Saved".to_string(),
                    Err(e) => self.status = format!("Error saving: {}", e),
                }
                self.session.handle_event(&self.buffer, SessionEvent::Saved);
            }

            // Panel requests
            (KeyCode::Char('g'), true) => {
                self.status = self.session.request_suggestions(&self.buffer);
            }
            (KeyCode::Char('o'), true) => {
                self.status = self.session.refresh_outline(&self.buffer);
            }
            (KeyCode::Char('r'), true) => {
                self.status = self.session.request_review(&self.buffer);
            }
            (KeyCode::Char('e'), true) => {
                self.status = self.session.show_review();
            }
            (KeyCode::Char('f'), true) => {
                let needs_confirm: Cell<Option<String>> = Cell::new(None);
                let status = self.session.fill_section(&self.buffer, |heading| {
                    needs_confirm.set(Some(heading.to_string()));
                    false
                });
                if let Some(heading) = needs_confirm.take() {
                    self.status =
                        format!("Section '{}' has content. Fill anyway? (y/n)", heading);
                    self.pending_fill = Some(heading);
                } else {
                    self.status = status;
                }
            }

            // Preview
            (KeyCode::Char('n'), true) => {
                self.status = self
                    .session
                    .cycle_preview(&self.buffer, CycleDirection::Next)
                    .await;
            }
            (KeyCode::Char('p'), true) => {
                self.status = self
                    .session
                    .cycle_preview(&self.buffer, CycleDirection::Prev)
                    .await;
            }
            (KeyCode::Char('a'), true) => {
                self.status = self.session.accept_preview(&mut self.buffer);
                self.session
                    .handle_event(&self.buffer, SessionEvent::TextChanged);
            }
            (KeyCode::Char('x'), true) => {
                self.status = self.session.clear_preview();
            }

            // Session toggles
            (KeyCode::Char('t'), true) => {
                self.status = self.session.toggle_enabled();
            }
            (KeyCode::Char('l'), true) => {
                self.status = self.session.show_model();
            }

            // Alt+1..5: insert a numbered suggestion directly
            (KeyCode::Char(c @ '1'..='5'), false) if alt => {
                let n = c.to_digit(10).unwrap_or(1) as usize;
                self.status = self.session.insert_suggestion(&mut self.buffer, n);
                self.session
                    .handle_event(&self.buffer, SessionEvent::TextChanged);
            }

            // Text input
            (KeyCode::Char(c), false) => {
                self.buffer.insert(&c.to_string());
                self.session
                    .handle_event(&self.buffer, SessionEvent::TextChanged);
            }
            (KeyCode::Enter, _) => {
                self.buffer.insert("\n");
                self.session
                    .handle_event(&self.buffer, SessionEvent::TextChanged);
            }
            (KeyCode::Backspace, _) => {
                self.buffer.backspace();
                self.session
                    .handle_event(&self.buffer, SessionEvent::TextChanged);
            }
            (KeyCode::Delete, _) => {
                self.buffer.delete();
                self.session
                    .handle_event(&self.buffer, SessionEvent::TextChanged);
            }

            // Cursor movement
            (KeyCode::Left, _) => self.move_cursor(Movement::Left),
            (KeyCode::Right, _) => self.move_cursor(Movement::Right),
            (KeyCode::Up, _) => self.move_cursor(Movement::Up),
            (KeyCode::Down, _) => self.move_cursor(Movement::Down),
            (KeyCode::Home, _) => self.move_cursor(Movement::LineStart),
            (KeyCode::End, _) => self.move_cursor(Movement::LineEnd),

            _ => {}
        }

        Ok(())
    }

    fn move_cursor(&mut self, movement: Movement) {
        self.buffer.move_cursor(movement);
        if let Some(status) = self
            .session
            .handle_event(&self.buffer, SessionEvent::CursorMoved)
        {
            self.status = status;
        }
    }

    /// Render UI
    fn render(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let buffer = &self.buffer;
        let status = &self.status;
        let preview = self.session.preview();
        let preview_max = self.config.preview_max_lines;
        let editor_state = &mut self.editor_state;

        let stats = outline::doc_stats(&buffer.lines_vec());
        let enabled_mark = if self.session.is_enabled() { "" } else { " | disabled" };
        let preview_mark = if preview.is_active() { " | previewing" } else { "" };
        let info_text = format!(
            "Ln {}, Col {} | {} words · {} lines{}{}",
            buffer.cursor.line + 1,
            buffer.cursor.column + 1,
            stats.words,
            stats.lines,
            enabled_mark,
            preview_mark,
        );

        let title = match &buffer.path {
            Some(path) => format!(
                " {}{} ",
                path.display(),
                if buffer.dirty { "*" } else { "" }
            ),
            None => format!(" [untitled]{} ", if buffer.dirty { "*" } else { "" }),
        };

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Status at top
                    Constraint::Min(10),   // Editor
                    Constraint::Length(1), // Info bar at bottom
                ])
                .split(frame.area());

            let status_widget = Paragraph::new(format!(" {}", status))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray));
            frame.render_widget(status_widget, chunks[0]);

            let editor_widget = EditorWidget::new(buffer)
                .preview(preview, preview_max)
                .block(Block::default().borders(Borders::NONE).title(title.clone()))
                .focused(true);
            frame.render_stateful_widget(editor_widget, chunks[1], editor_state);

            let info_widget =
                Paragraph::new(info_text.clone()).style(Style::default().fg(Color::DarkGray));
            frame.render_widget(info_widget, chunks[2]);
        })?;

        Ok(())
    }
}
