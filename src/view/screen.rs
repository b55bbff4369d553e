//! Backend-independent picture of one frame.
//!
//! `Screen::compose` reads the editor state and produces exactly what
//! should be on the terminal: the visible slice of every text row with its
//! highlight classes, the status line and the message line, plus where the
//! cursor goes. Rendering backends only paint this.

use std::time::Instant;

use crate::editor::Editor;
use crate::highlight::HighlightClass;

/// One line of the text area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenLine {
    /// Visible part of a document row
    Text {
        text: Vec<u8>,
        highlight: Vec<HighlightClass>,
    },
    /// Past the end of the document
    Filler,
    /// The centered banner shown in an empty document
    Welcome(String),
}

impl ScreenLine {
    /// Plain text of the line, with control bytes shown as `?`
    pub fn to_plain(&self) -> String {
        match self {
            ScreenLine::Text { text, .. } => text
                .iter()
                .map(|&b| if b.is_ascii_control() || !b.is_ascii() { '?' } else { b as char })
                .collect(),
            ScreenLine::Filler => "~".to_string(),
            ScreenLine::Welcome(banner) => banner.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub width: usize,
    pub lines: Vec<ScreenLine>,
    /// Status line, padded to the full width
    pub status: String,
    /// Message line, empty once the message has expired
    pub message: String,
    /// Cursor cell (column, row)
    pub cursor: (usize, usize),
}

pub fn welcome_banner(width: usize) -> String {
    let mut welcome = format!("Kite editor -- version {}", env!("CARGO_PKG_VERSION"));
    welcome.truncate(width);

    let mut padding = (width - welcome.len()) / 2;
    let mut line = String::with_capacity(width);
    if padding > 0 {
        line.push('~');
        padding -= 1;
    }
    line.extend(std::iter::repeat(' ').take(padding));
    line.push_str(&welcome);
    line
}

/// Lay out `left` and `right` on one line of `width` columns; `right` is
/// only shown when it fits flush against the right edge.
pub fn status_line(left: &str, right: &str, width: usize) -> String {
    let mut line: String = left.chars().take(width).collect();
    let mut len = line.chars().count();
    let right_len = right.chars().count();
    while len < width {
        if width - len == right_len {
            line.push_str(right);
            break;
        }
        line.push(' ');
        len += 1;
    }
    line
}

impl Screen {
    /// Compose the frame for the editor's current state at time `now`
    pub fn compose(editor: &Editor, now: Instant) -> Self {
        let doc = editor.document();
        let width = editor.screen_cols();
        let height = editor.screen_rows();
        let viewport = doc.viewport;

        let mut lines = Vec::with_capacity(height);
        for y in 0..height {
            let file_row = y + viewport.row_offset;
            let line = match doc.row(file_row) {
                Some(row) => {
                    let start = viewport.col_offset.min(row.rendered().len());
                    let end = (start + width).min(row.rendered().len());
                    ScreenLine::Text {
                        text: row.rendered()[start..end].to_vec(),
                        highlight: row.highlight()[start..end].to_vec(),
                    }
                }
                None if doc.is_empty() && y == height / 3 => ScreenLine::Welcome(welcome_banner(width)),
                None => ScreenLine::Filler,
            };
            lines.push(line);
        }

        let name = doc
            .filename()
            .map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string());
        let left = format!(
            "{:.20} - {} lines {}",
            name,
            doc.len(),
            if doc.is_dirty() { "(modified)" } else { "" }
        );
        let right = format!(
            "{} | {}/{}",
            doc.syntax().map_or("no ft", |s| s.filetype.as_str()),
            doc.cursor.y + 1,
            doc.len()
        );

        let message = editor
            .visible_message(now)
            .map(|m| m.chars().take(width).collect::<String>())
            .unwrap_or_default();

        Screen {
            width,
            lines,
            status: status_line(&left, &right, width),
            message,
            cursor: viewport.screen_cursor(doc.cursor),
        }
    }

    /// The text area as plain lines, for tests and debugging
    pub fn text_lines(&self) -> Vec<String> {
        self.lines.iter().map(ScreenLine::to_plain).collect()
    }
}
