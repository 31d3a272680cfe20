//! Cursor state: one position tracked in three coordinates at once.

use crate::codec::{self, Codepoint};
use crate::line::Line;
use crate::width;

/// The cursor: a row plus a column expressed both in bytes and in display
/// columns.
///
/// The columns are allowed to go stale across operations (vertical motion
/// over a shorter line leaves them past the end) and are clamped lazily
/// against the active line at the point of use, never asserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub row: usize,
    pub byte_col: usize,
    pub vcol: usize,
}

impl Cursor {
    /// Clamp both columns into the line's range.
    pub fn clamp_to(&mut self, line: &Line) {
        self.byte_col = self.byte_col.min(line.len());
        self.vcol = self.vcol.min(line.vwidth());
    }

    /// Step one codepoint left within `line`. Returns false at the line
    /// start; the caller decides whether that crosses to another row.
    pub fn left_in(&mut self, line: &Line) -> bool {
        self.clamp_to(line);
        if self.byte_col == 0 {
            return false;
        }
        let start = codec::decode_backward(line.bytes(), self.byte_col);
        let (cp, _) = codec::decode_forward(line.bytes(), start);
        self.byte_col = start;
        self.vcol = self.vcol.saturating_sub(width::glyph_width(cp));
        true
    }

    /// Step one codepoint right within `line`. Returns false at the line
    /// end.
    pub fn right_in(&mut self, line: &Line) -> bool {
        self.clamp_to(line);
        if self.byte_col >= line.len() {
            return false;
        }
        let (cp, end) = codec::decode_forward(line.bytes(), self.byte_col);
        self.byte_col = end;
        self.vcol += width::glyph_width(cp);
        true
    }

    /// Insert at the cursor within `line`, keeping both columns
    /// consistent.
    pub fn insert_in(&mut self, line: &mut Line, cp: Codepoint) {
        self.clamp_to(line);
        let outcome = line.insert(self.byte_col, cp);
        self.byte_col += outcome.len;
        if outcome.remeasured {
            self.vcol = width::prefix_width(line.bytes(), self.byte_col);
        } else {
            self.vcol += width::glyph_width(cp);
        }
    }

    /// Delete the codepoint under the cursor. Returns false at the line
    /// end.
    pub fn delete_in(&mut self, line: &mut Line) -> bool {
        self.clamp_to(line);
        match line.remove(self.byte_col) {
            Some(outcome) => {
                if outcome.remeasured {
                    self.vcol = width::prefix_width(line.bytes(), self.byte_col);
                }
                true
            }
            None => false,
        }
    }

    /// Delete the codepoint before the cursor. Returns false at the line
    /// start.
    pub fn backspace_in(&mut self, line: &mut Line) -> bool {
        self.clamp_to(line);
        if self.byte_col == 0 {
            return false;
        }
        let start = codec::decode_backward(line.bytes(), self.byte_col);
        if let Some(outcome) = line.remove(start) {
            self.byte_col = start;
            if outcome.remeasured {
                self.vcol = width::prefix_width(line.bytes(), start);
            } else {
                self.vcol = self.vcol.saturating_sub(width::glyph_width(outcome.cp));
            }
        }
        true
    }
}
