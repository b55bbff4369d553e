//! Incremental find.
//!
//! A `FindSession` lives while the find prompt is open. Every keystroke
//! removes the previous MATCH overlay, runs one search step and paints the
//! new match. The overlay is a snapshot/restore of the matched row's
//! highlight, so the underlying classes are never lost.

use crate::document::{Direction, Document, Match};
use crate::highlight::HighlightClass;
use crate::viewport::{Cursor, Viewport};

/// What the keystroke that triggered a find step asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindStep {
    /// The query changed: search again from the top
    Restart,
    /// Jump to the next match after the current one
    Next,
    /// Jump to the previous match before the current one
    Previous,
    /// Accept the current match and end the session
    Accept,
    /// Abandon the search, restoring the position find started from
    Cancel,
}

#[derive(Debug)]
struct SavedHighlight {
    row: usize,
    highlight: Vec<HighlightClass>,
}

#[derive(Debug)]
pub struct FindSession {
    last_match: Option<usize>,
    direction: Direction,
    saved_highlight: Option<SavedHighlight>,

    saved_cursor: Cursor,
    saved_viewport: Viewport,
}

impl FindSession {
    /// Start a session, remembering where the cursor was
    pub fn begin(doc: &Document) -> Self {
        Self {
            last_match: None,
            direction: Direction::Forward,
            saved_highlight: None,
            saved_cursor: doc.cursor,
            saved_viewport: doc.viewport,
        }
    }

    /// Run one step of the search for `query`. Returns the match found, if
    /// any. `Accept` and `Cancel` only clean up.
    pub fn step(&mut self, doc: &mut Document, query: &[u8], step: FindStep) -> Option<Match> {
        self.clear_overlay(doc);

        match step {
            FindStep::Accept => {
                self.reset();
                return None;
            }
            FindStep::Cancel => {
                self.reset();
                doc.cursor = self.saved_cursor;
                doc.viewport = self.saved_viewport;
                return None;
            }
            FindStep::Next => self.direction = Direction::Forward,
            FindStep::Previous => self.direction = Direction::Backward,
            FindStep::Restart => self.reset(),
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let found = doc.find(query, self.last_match, self.direction)?;
        tracing::debug!("Find {:?}: match at row {} col {}", step, found.row, found.rx);

        self.last_match = Some(found.row);
        let cx = doc.row(found.row).map_or(0, |row| row.rx_to_cx(found.rx));
        doc.cursor = Cursor { x: cx, y: found.row };
        // Push the offset past the end so the next scroll puts the match at the top
        doc.viewport.row_offset = doc.len();

        if let Some(row) = doc.row_mut(found.row) {
            let highlight = row.overlay_match(found.rx, query.len());
            self.saved_highlight = Some(SavedHighlight {
                row: found.row,
                highlight,
            });
        }
        Some(found)
    }

    /// Row currently carrying the MATCH overlay
    pub fn overlay_row(&self) -> Option<usize> {
        self.saved_highlight.as_ref().map(|saved| saved.row)
    }

    fn reset(&mut self) {
        self.last_match = None;
        self.direction = Direction::Forward;
    }

    fn clear_overlay(&mut self, doc: &mut Document) {
        if let Some(saved) = self.saved_highlight.take() {
            if let Some(row) = doc.row_mut(saved.row) {
                row.restore_highlight(saved.highlight);
            }
        }
    }
}
