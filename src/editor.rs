//! The edit loop: turns logical key events into document operations.
//!
//! `Editor` owns the document plus everything around it that the screen
//! shows: the window size, the transient message line, the quit
//! confirmation counter and the prompt (save-as or find) when one is open.
//! Like `Document`, it assumes a single writer.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::document::Document;
use crate::error::{EditorError, Result};
use crate::event::Key;
use crate::search::{FindSession, FindStep};
use crate::viewport::Cursor;

pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// A message for the message line and when it was set
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

#[derive(Debug)]
enum PromptKind {
    SaveAs,
    Find(FindSession),
}

#[derive(Debug)]
struct Prompt {
    kind: PromptKind,
    input: String,
}

impl Prompt {
    fn display(&self) -> String {
        match self.kind {
            PromptKind::SaveAs => format!("Save as: {} (ESC to cancel)", self.input),
            PromptKind::Find(_) => format!("Search: {} (ESC/Arrows/Enter)", self.input),
        }
    }
}

/// How a key ended (or didn't end) a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptOutcome {
    Editing,
    Accepted,
    Cancelled,
}

pub struct Editor {
    document: Document,
    config: Config,

    /// Text rows available (terminal height minus status and message lines)
    screen_rows: usize,
    screen_cols: usize,

    message: Option<StatusMessage>,
    quit_times: usize,
    prompt: Option<Prompt>,
    should_quit: bool,
}

impl Editor {
    /// Create an editor for a terminal of `width` x `height` cells
    pub fn new(config: Config, width: u16, height: u16) -> Self {
        let document =
            Document::with_languages(Arc::new(config.languages.clone()), config.tab_stop);
        let mut editor = Self {
            document,
            quit_times: config.quit_times,
            config,
            screen_rows: 0,
            screen_cols: 0,
            message: None,
            prompt: None,
            should_quit: false,
        };
        editor.resize(width, height);
        editor.set_message(HELP_MESSAGE);
        editor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    pub fn screen_cols(&self) -> usize {
        self.screen_cols
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    /// Open a file into the document. On failure the document is unchanged.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.document.open(path)?;
        self.scroll();
        Ok(())
    }

    /// Adapt to a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen_rows = (height as usize).saturating_sub(2);
        self.screen_cols = width as usize;
        self.scroll();
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
        });
    }

    /// The message line text, regardless of age
    pub fn message_text(&self) -> &str {
        self.message.as_ref().map_or("", |m| m.text.as_str())
    }

    /// The message if it is still fresh at `now`
    pub fn visible_message(&self, now: Instant) -> Option<&str> {
        let timeout = Duration::from_secs(self.config.message_timeout_secs);
        self.message
            .as_ref()
            .filter(|m| !m.text.is_empty() && now.saturating_duration_since(m.set_at) < timeout)
            .map(|m| m.text.as_str())
    }

    fn scroll(&mut self) {
        self.document.scroll(self.screen_rows, self.screen_cols);
    }

    /// Process one key event
    pub fn handle_key(&mut self, key: Key) {
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            self.scroll();
            return;
        }

        match key {
            Key::Enter => self.document.insert_newline(),
            Key::Ctrl('q') => {
                if self.document.is_dirty() && self.quit_times > 0 {
                    self.set_message(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    self.quit_times -= 1;
                    return;
                }
                tracing::info!("Quit requested");
                self.should_quit = true;
                return;
            }
            Key::Ctrl('s') => self.save(),
            Key::Ctrl('f') => self.start_find(),
            Key::Home => self.document.cursor.x = 0,
            Key::End => self.document.cursor.x = self.document.cursor_row_len(),
            Key::Backspace | Key::Ctrl('h') => self.document.delete_char(),
            Key::Delete => {
                self.move_cursor(Key::Right);
                self.document.delete_char();
            }
            Key::PageUp | Key::PageDown => self.page(key),
            Key::Up | Key::Down | Key::Left | Key::Right => self.move_cursor(key),
            Key::Ctrl('l') | Key::Esc => {}
            other => {
                if let Some(byte) = other.typed_byte() {
                    self.document.insert_char(byte);
                }
            }
        }

        self.quit_times = self.config.quit_times;
        self.scroll();
    }

    fn move_cursor(&mut self, key: Key) {
        let Cursor { mut x, mut y } = self.document.cursor;
        let row_len = self.document.cursor_row_len();
        let len = self.document.len();
        match key {
            Key::Left => {
                if x != 0 {
                    x -= 1;
                } else if y > 0 {
                    y -= 1;
                    x = self.document.row(y).map_or(0, |row| row.len());
                }
            }
            Key::Right if y < len => {
                if x < row_len {
                    x += 1;
                } else if x == row_len {
                    y += 1;
                    x = 0;
                }
            }
            Key::Up => y = y.saturating_sub(1),
            Key::Down if y < len => y += 1,
            _ => {}
        }

        self.document.cursor = Cursor { x, y };
        self.snap_cursor();
    }

    /// Keep the cursor inside the document and its row
    fn snap_cursor(&mut self) {
        let y = self.document.cursor.y.min(self.document.len());
        self.document.cursor.y = y;
        let row_len = self.document.cursor_row_len();
        self.document.cursor.x = self.document.cursor.x.min(row_len);
    }

    fn page(&mut self, key: Key) {
        let row_offset = self.document.viewport.row_offset;
        if key == Key::PageUp {
            self.document.cursor.y = row_offset;
        } else {
            self.document.cursor.y =
                (row_offset + self.screen_rows.saturating_sub(1)).min(self.document.len());
        }
        self.snap_cursor();

        let step = if key == Key::PageUp { Key::Up } else { Key::Down };
        for _ in 0..self.screen_rows {
            self.move_cursor(step);
        }
    }

    fn save(&mut self) {
        if self.document.filename().is_none() {
            self.open_prompt(PromptKind::SaveAs);
            return;
        }

        match self.document.save() {
            Ok(written) => self.set_message(format!("{} bytes written to disk", written)),
            Err(EditorError::NoFilename) => self.set_message("Save aborted"),
            Err(EditorError::Save { path, source }) => {
                tracing::warn!("Failed to save {:?}: {}", path, source);
                self.set_message(format!("Can't save! I/O error: {}", source));
            }
            Err(e) => {
                tracing::warn!("Failed to save: {}", e);
                self.set_message(format!("Can't save! {}", e));
            }
        }
    }

    fn start_find(&mut self) {
        let session = FindSession::begin(&self.document);
        self.open_prompt(PromptKind::Find(session));
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let prompt = Prompt {
            kind,
            input: String::new(),
        };
        self.set_message(prompt.display());
        self.prompt = Some(prompt);
    }

    fn handle_prompt_key(&mut self, key: Key) {
        let Some(mut prompt) = self.prompt.take() else {
            return;
        };

        let outcome = match key {
            k if k.is_erase() => {
                prompt.input.pop();
                PromptOutcome::Editing
            }
            Key::Esc => PromptOutcome::Cancelled,
            Key::Enter if !prompt.input.is_empty() => PromptOutcome::Accepted,
            Key::Char(c) if c.is_ascii() && !c.is_ascii_control() => {
                prompt.input.push(c);
                PromptOutcome::Editing
            }
            _ => PromptOutcome::Editing,
        };

        if let PromptKind::Find(session) = &mut prompt.kind {
            let step = match (outcome, key) {
                (PromptOutcome::Cancelled, _) => FindStep::Cancel,
                (PromptOutcome::Accepted, _) => FindStep::Accept,
                (_, Key::Right | Key::Down) => FindStep::Next,
                (_, Key::Left | Key::Up) => FindStep::Previous,
                _ => FindStep::Restart,
            };
            session.step(&mut self.document, prompt.input.as_bytes(), step);
        }

        match outcome {
            PromptOutcome::Editing => {
                self.set_message(prompt.display());
                self.prompt = Some(prompt);
            }
            PromptOutcome::Cancelled => match prompt.kind {
                PromptKind::SaveAs => self.set_message("Save aborted"),
                PromptKind::Find(_) => self.set_message(""),
            },
            PromptOutcome::Accepted => match prompt.kind {
                PromptKind::SaveAs => {
                    self.set_message("");
                    self.document.set_filename(prompt.input);
                    self.save();
                }
                PromptKind::Find(_) => self.set_message(""),
            },
        }
    }
}
