//! The visible window onto the buffer.

use crate::codec::CodepointCursor;
use crate::cursor::Cursor;
use crate::line::Line;
use crate::width;

/// Horizontal scroll anchor for a single row, tracked in both coordinate
/// systems like the cursor itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchor {
    /// Byte offset where the row starts rendering.
    pub byte: usize,
    /// Display column of `byte` within the row.
    pub vcol: usize,
}

impl Anchor {
    pub fn reset(&mut self) {
        *self = Anchor::default();
    }

    /// Keep the cursor's glyph inside a window of `text_cols` columns.
    ///
    /// Moving left past the anchor snaps the anchor onto the cursor. When
    /// the cursor runs off the right edge, walk backward from it
    /// accumulating glyph widths until a full window of text fits; a
    /// double-width glyph straddling the boundary is receded past entirely
    /// rather than split.
    pub fn follow(&mut self, line: &Line, cursor: &Cursor, text_cols: usize) {
        if cursor.byte_col < self.byte {
            self.byte = cursor.byte_col;
            self.vcol = cursor.vcol;
        }
        if text_cols > 0 && cursor.vcol >= self.vcol + text_cols {
            let mut it = CodepointCursor::new(line.bytes(), cursor.byte_col);
            let mut receded = 0;
            while receded < text_cols {
                match it.prev() {
                    Some(cp) => receded += width::glyph_width(cp),
                    None => break,
                }
            }
            self.byte = it.pos();
            self.vcol = cursor.vcol.saturating_sub(receded);
        }
    }
}

/// The viewport: scroll state plus terminal dimensions.
///
/// Horizontal scrolling applies to the cursor row only; every other row
/// renders from byte 0.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// First visible row.
    pub top_row: usize,
    /// Horizontal anchor for the cursor row.
    pub anchor: Anchor,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            top_row: 0,
            anchor: Anchor::default(),
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Rows available for text; the bottom row holds the status line.
    pub fn text_rows(&self) -> usize {
        (self.height as usize).saturating_sub(1).max(1)
    }

    /// Columns available for text once the gutter is subtracted.
    pub fn text_cols(&self, gutter: usize) -> usize {
        (self.width as usize).saturating_sub(gutter)
    }

    /// One-step vertical scroll toward the cursor row. Movement commands
    /// change the row by at most one, so a single step always catches up.
    pub fn scroll_vertical(&mut self, row: usize) {
        if row < self.top_row {
            self.top_row -= 1;
        } else if row >= self.top_row + self.text_rows() {
            self.top_row += 1;
        }
    }
}
