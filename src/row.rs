//! A single line of a document.
//!
//! A row keeps three views of its line in step:
//! - `text`: the raw bytes as typed or loaded (one byte per logical column)
//! - `rendered`: `text` with tabs expanded to the next tab stop
//! - `highlight`: one class per rendered column
//!
//! Every mutator re-renders before it returns, so `highlight.len() ==
//! rendered.len()` holds whenever a caller can observe the row. Classes are
//! reset to `Normal` on re-render; the owning document runs the highlighter
//! on the row afterwards.

use crate::highlight::HighlightClass;

/// Default distance between tab stops
pub const TAB_STOP: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Position within the document, maintained by the document
    pub(crate) index: usize,

    text: Vec<u8>,
    rendered: Vec<u8>,
    pub(crate) highlight: Vec<HighlightClass>,

    /// True if this row ends inside an unterminated multi-line comment
    pub(crate) comment_open: bool,

    tab_stop: usize,
}

impl Row {
    pub fn new(index: usize, text: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let mut row = Self {
            index,
            text: text.into(),
            rendered: Vec::new(),
            highlight: Vec::new(),
            comment_open: false,
            tab_stop: tab_stop.max(1),
        };
        row.render();
        row
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    pub fn highlight(&self) -> &[HighlightClass] {
        &self.highlight
    }

    pub fn comment_open(&self) -> bool {
        self.comment_open
    }

    /// Length of the raw text in logical columns
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Recompute `rendered` from `text`, padding each tab to the next
    /// multiple of the tab stop (at least one space).
    pub fn render(&mut self) {
        self.rendered.clear();
        for &byte in &self.text {
            if byte == b'\t' {
                self.rendered.push(b' ');
                while self.rendered.len() % self.tab_stop != 0 {
                    self.rendered.push(b' ');
                }
            } else {
                self.rendered.push(byte);
            }
        }
        self.highlight.clear();
        self.highlight
            .resize(self.rendered.len(), HighlightClass::Normal);
    }

    /// Convert a logical column into a visual (rendered) column
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &byte in self.text.iter().take(cx) {
            rx = self.advance(rx, byte);
        }
        rx
    }

    /// Convert a visual column back into a logical column.
    ///
    /// Returns the column of the character covering `rx`; a position inside a
    /// tab's padding resolves to the tab itself. Positions past the end give
    /// the row length.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &byte) in self.text.iter().enumerate() {
            cur_rx = self.advance(cur_rx, byte);
            if cur_rx > rx {
                return cx;
            }
        }
        self.text.len()
    }

    fn advance(&self, rx: usize, byte: u8) -> usize {
        if byte == b'\t' {
            rx + (self.tab_stop - 1) - (rx % self.tab_stop) + 1
        } else {
            rx + 1
        }
    }

    /// Insert `ch` at logical column `at`. Positions outside `[0, len]`
    /// append at the end instead.
    pub fn insert_char(&mut self, at: isize, ch: u8) {
        let idx = match usize::try_from(at) {
            Ok(idx) if idx <= self.text.len() => idx,
            _ => self.text.len(),
        };
        self.text.insert(idx, ch);
        self.render();
    }

    /// Remove the character at logical column `at`; out of range is a no-op.
    pub fn delete_char(&mut self, at: isize) {
        let Ok(idx) = usize::try_from(at) else {
            return;
        };
        if idx >= self.text.len() {
            return;
        }
        self.text.remove(idx);
        self.render();
    }

    pub fn append_text(&mut self, suffix: &[u8]) {
        self.text.extend_from_slice(suffix);
        self.render();
    }

    /// Cut the row at logical column `at`, returning everything after it
    pub fn split_off(&mut self, at: usize) -> Vec<u8> {
        let at = at.min(self.text.len());
        let tail = self.text.split_off(at);
        self.render();
        tail
    }

    /// Replace `highlight[range]` with `Match`, returning the previous classes
    /// so the caller can undo the overlay with [`Row::restore_highlight`].
    pub fn overlay_match(&mut self, start: usize, len: usize) -> Vec<HighlightClass> {
        let saved = self.highlight.clone();
        let end = (start + len).min(self.highlight.len());
        if start < end {
            self.highlight[start..end].fill(HighlightClass::Match);
        }
        saved
    }

    /// Put back a snapshot taken by [`Row::overlay_match`]. A snapshot that no
    /// longer fits the rendered text is dropped.
    pub fn restore_highlight(&mut self, saved: Vec<HighlightClass>) {
        if saved.len() == self.rendered.len() {
            self.highlight = saved;
        }
    }
}
