//! The in-memory document: rows, cursor, viewport and dirty tracking.
//!
//! All structural mutation goes through here so that row indices, tab
//! expansion and highlighting stay consistent. Positions handed in from
//! cursor arithmetic are not validated by callers: row and column requests
//! out of range are clamped or ignored, never reported.
//!
//! A `Document` is meant to be owned and mutated by a single control flow
//! (the edit loop). It is not synchronized; concurrent mutation is not
//! supported.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{EditorError, Result};
use crate::highlight;
use crate::row::{Row, TAB_STOP};
use crate::syntax::{self, Syntax};
use crate::viewport::{Cursor, Viewport};

/// Direction of a find step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A find hit: the row and the rendered column where the query starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub row: usize,
    pub rx: usize,
}

pub struct Document {
    rows: Vec<Row>,
    pub cursor: Cursor,
    pub viewport: Viewport,

    /// Number of content changes since the last load/save
    dirty: usize,

    filename: Option<PathBuf>,

    /// Rule sets available for selection, in match order
    languages: Arc<Vec<Syntax>>,
    /// Index into `languages` of the active rule set
    syntax: Option<usize>,

    tab_stop: usize,
}

impl Document {
    /// Create an empty document using the built-in languages
    pub fn new() -> Self {
        Self::with_languages(Arc::new(syntax::builtin_languages()), TAB_STOP)
    }

    pub fn with_languages(languages: Arc<Vec<Syntax>>, tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            cursor: Cursor::default(),
            viewport: Viewport::default(),
            dirty: 0,
            filename: None,
            languages,
            syntax: None,
            tab_stop: tab_stop.max(1),
        }
    }

    /// Build a document from lines of text (no filename, not dirty)
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new();
        for line in lines {
            doc.insert_row(doc.rows.len() as isize, line);
        }
        doc.dirty = 0;
        doc
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub(crate) fn row_mut(&mut self, at: usize) -> Option<&mut Row> {
        self.rows.get_mut(at)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Set the filename and reselect the language from it
    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.filename = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };
        self.select_syntax();
    }

    /// The active rule set, if any
    pub fn syntax(&self) -> Option<&Syntax> {
        self.syntax.and_then(|idx| self.languages.get(idx))
    }

    /// Pick the first rule set matching the filename and rehighlight every
    /// row. No filename (or no match) disables highlighting.
    pub fn select_syntax(&mut self) {
        self.pick_syntax();
        let syntax = self.syntax.and_then(|idx| self.languages.get(idx));
        highlight::update_all(&mut self.rows, syntax);
    }

    fn pick_syntax(&mut self) {
        // Patterns apply to the last path component, so `Makefile` matches
        // `src/Makefile` as well
        let name = self
            .filename
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.syntax = syntax::select(&self.languages, &name);
        tracing::debug!(
            "Selected language {:?} for {:?}",
            self.syntax().map(|s| s.filetype.as_str()),
            name
        );
    }

    /// Rehighlight `rows[at]`, cascading down while comment state changes
    fn rehighlight(&mut self, at: usize) {
        let syntax = self.syntax.and_then(|idx| self.languages.get(idx));
        highlight::update_from(&mut self.rows, at, syntax);
    }

    /// Insert a row at `at` (clamped to `[0, len]`) and return where it went
    pub fn insert_row(&mut self, at: isize, text: impl Into<Vec<u8>>) -> usize {
        let idx = usize::try_from(at).unwrap_or(0).min(self.rows.len());

        let mut row = Row::new(idx, text, self.tab_stop);
        // The row below was highlighted starting from this end state
        row.comment_open = idx > 0 && self.rows[idx - 1].comment_open;
        self.rows.insert(idx, row);
        for (i, row) in self.rows.iter_mut().enumerate().skip(idx + 1) {
            row.index = i;
        }
        self.dirty += 1;
        self.rehighlight(idx);
        idx
    }

    /// Remove the row at `at`; no-op when out of range
    pub fn delete_row(&mut self, at: isize) {
        let Ok(idx) = usize::try_from(at) else {
            return;
        };
        if idx >= self.rows.len() {
            return;
        }

        self.rows.remove(idx);
        for (i, row) in self.rows.iter_mut().enumerate().skip(idx) {
            row.index = i;
        }
        self.dirty += 1;

        // the row that moved up has a new predecessor
        self.rehighlight(idx);
    }

    /// Type `ch` at the cursor and move right
    pub fn insert_char(&mut self, ch: u8) {
        if self.cursor.y == self.rows.len() {
            self.insert_row(self.rows.len() as isize, Vec::new());
        }
        let y = self.cursor.y.min(self.rows.len() - 1);
        self.rows[y].insert_char(self.cursor.x as isize, ch);
        self.rehighlight(y);
        self.dirty += 1;
        self.cursor.x += 1;
    }

    /// Break the current row at the cursor, moving the cursor to the start of
    /// the next row.
    pub fn insert_newline(&mut self) {
        let y = self.cursor.y;
        if self.cursor.x == 0 || y >= self.rows.len() {
            self.insert_row(y as isize, Vec::new());
        } else {
            let tail = self.rows[y].split_off(self.cursor.x);
            self.insert_row(y as isize + 1, tail);
            self.rehighlight(y);
        }
        self.dirty += 1;
        self.cursor.y += 1;
        self.cursor.x = 0;
    }

    /// Backspace: remove the character left of the cursor, joining with the
    /// previous row at column 0.
    pub fn delete_char(&mut self) {
        let Cursor { x, y } = self.cursor;
        if y >= self.rows.len() || (x == 0 && y == 0) {
            return;
        }

        if x > 0 {
            self.rows[y].delete_char(x as isize - 1);
            self.rehighlight(y);
            self.dirty += 1;
            self.cursor.x -= 1;
        } else {
            let tail = self.rows[y].text().to_vec();
            self.delete_row(y as isize);
            let prev = y - 1;
            self.cursor.x = self.rows[prev].len();
            self.rows[prev].append_text(&tail);
            self.rehighlight(prev);
            self.dirty += 1;
            self.cursor.y = prev;
        }
    }

    /// Join every row's text with `terminator`, including after the last row
    pub fn rows_to_string(&self, terminator: &[u8]) -> Vec<u8> {
        let total: usize = self
            .rows
            .iter()
            .map(|row| row.len() + terminator.len())
            .sum();
        let mut buf = Vec::with_capacity(total);
        for row in &self.rows {
            buf.extend_from_slice(row.text());
            buf.extend_from_slice(terminator);
        }
        buf
    }

    /// Replace the content with `content` split on `\n` / `\r\n`.
    /// A trailing terminator does not produce an extra empty row.
    pub fn load_bytes(&mut self, content: &[u8]) {
        self.rows.clear();
        self.cursor = Cursor::default();
        self.viewport = Viewport::default();

        for line in split_lines(content) {
            let at = self.rows.len();
            self.rows.push(Row::new(at, line, self.tab_stop));
        }
        let syntax = self.syntax.and_then(|idx| self.languages.get(idx));
        highlight::update_all(&mut self.rows, syntax);
        self.dirty = 0;
    }

    /// Open `path`, replacing the current content.
    ///
    /// The whole file is read before anything changes, so a failed open leaves
    /// the document as it was.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|source| EditorError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.filename = Some(path.to_path_buf());
        self.pick_syntax();
        self.load_bytes(&content);
        tracing::info!("Opened {:?} ({} rows)", path, self.rows.len());
        Ok(())
    }

    /// Write the document to its filename, returning the bytes written.
    ///
    /// Without a filename this fails with [`EditorError::NoFilename`] and the
    /// dirty state is left alone, as it is on an I/O error.
    pub fn save(&mut self) -> Result<usize> {
        let Some(path) = self.filename.clone() else {
            return Err(EditorError::NoFilename);
        };
        let content = self.rows_to_string(b"\n");
        std::fs::write(&path, &content).map_err(|source| EditorError::Save {
            path: path.clone(),
            source,
        })?;

        self.dirty = 0;
        tracing::info!("Saved {:?} ({} bytes)", path, content.len());
        Ok(content.len())
    }

    /// Set a new filename (reselecting the language) and save there
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<usize> {
        self.set_filename(path);
        self.save()
    }

    /// Find `query` in the rendered text of the rows after `from`, stepping
    /// in `direction` and wrapping around. `None` starts from the top (or
    /// the bottom, backwards). Every row is examined at most once, `from`
    /// itself last.
    pub fn find(&self, query: &[u8], from: Option<usize>, direction: Direction) -> Option<Match> {
        let n = self.rows.len();
        if n == 0 || query.is_empty() {
            return None;
        }

        let mut current = from.map(|r| r.min(n - 1));
        for _ in 0..n {
            let next = match (current, direction) {
                (None, Direction::Forward) => 0,
                (None, Direction::Backward) => n - 1,
                (Some(r), Direction::Forward) => (r + 1) % n,
                (Some(r), Direction::Backward) => (r + n - 1) % n,
            };
            current = Some(next);

            let rendered = self.rows[next].rendered();
            if let Some(rx) = find_bytes(rendered, query) {
                return Some(Match { row: next, rx });
            }
        }
        None
    }

    /// Scroll the viewport to keep the cursor visible
    pub fn scroll(&mut self, screen_rows: usize, screen_cols: usize) {
        self.viewport
            .scroll(self.cursor, &self.rows, screen_rows, screen_cols);
    }

    /// Length of the row under the cursor (0 past the last row)
    pub fn cursor_row_len(&self) -> usize {
        self.rows.get(self.cursor.y).map_or(0, Row::len)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on `\n`, dropping a `\r` before it. No row for a trailing terminator.
pub fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = content.strip_suffix(b"\n").unwrap_or(content);
    let empty = content.is_empty();
    body.split(|&b| b == b'\n')
        .filter(move |_| !empty)
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
