use crate::row::Row;

/// Logical cursor position: `x` indexes a row's raw text, `y` the row list.
///
/// `y == rows.len()` is the "past the last row" position, where typing
/// starts a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

/// Top-left corner of the visible window, in row / rendered-column space,
/// plus the rendered column of the cursor from the last scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    pub rx: usize,
}

impl Viewport {
    /// Scroll minimally so the cursor is inside the
    /// `screen_rows` x `screen_cols` window.
    ///
    /// Only depends on the cursor, the rows and the current offsets, so calling
    /// it again with the same inputs changes nothing.
    pub fn scroll(&mut self, cursor: Cursor, rows: &[Row], screen_rows: usize, screen_cols: usize) {
        self.rx = rows.get(cursor.y).map_or(0, |row| row.cx_to_rx(cursor.x));

        let screen_rows = screen_rows.max(1);
        let screen_cols = screen_cols.max(1);

        if cursor.y < self.row_offset {
            self.row_offset = cursor.y;
        }
        if cursor.y >= self.row_offset + screen_rows {
            self.row_offset = cursor.y + 1 - screen_rows;
        }
        if self.rx < self.col_offset {
            self.col_offset = self.rx;
        }
        if self.rx >= self.col_offset + screen_cols {
            self.col_offset = self.rx + 1 - screen_cols;
        }
    }

    /// Cursor position relative to the window (column, row)
    pub fn screen_cursor(&self, cursor: Cursor) -> (usize, usize) {
        (
            self.rx.saturating_sub(self.col_offset),
            cursor.y.saturating_sub(self.row_offset),
        )
    }
}
