//! A single line of the document: raw bytes plus a cached display width.

use crate::codec::{self, Codepoint};
use crate::width;

/// Outcome of a single-codepoint edit on a [`Line`].
#[derive(Debug, Clone, Copy)]
pub struct EditOutcome {
    /// The codepoint that was inserted or removed.
    pub cp: Codepoint,
    /// Its encoded byte length.
    pub len: usize,
    /// Whether the whole line was remeasured. Callers tracking a display
    /// column must re-derive it when this is set, because neighbouring
    /// bytes may now decode differently.
    pub remeasured: bool,
}

/// One line of text.
///
/// The bytes are arbitrary (not necessarily valid UTF-8) and the cached
/// virtual length (total display width) is brought back in sync by every
/// mutating method before it returns.
///
/// Width updates are incremental only when the edit provably cannot change
/// how neighbouring bytes decode: editing a valid codepoint in an ASCII
/// neighbourhood. Anything touching an invalid-byte boundary remeasures the
/// line, since a one-byte change there can fuse two broken spans into a
/// valid sequence or split a valid sequence into broken spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8>,
    vwidth: usize,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let vwidth = width::line_width(&bytes);
        Self { bytes, vwidth }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Cached total display width.
    pub fn vwidth(&self) -> usize {
        self.vwidth
    }

    /// Insert one encoded codepoint at `at` (a codepoint boundary).
    ///
    /// A valid scalar starts with a lead byte and so cannot complete a
    /// broken sequence to its left; in an ASCII neighbourhood its width is
    /// simply added to the cache. An invalid byte, or any insertion right
    /// after multibyte content, can change how the seam decodes, so those
    /// remeasure.
    pub fn insert(&mut self, at: usize, cp: Codepoint) -> EditOutcome {
        let seam_at_risk = self.bytes[at.saturating_sub(3)..at.min(self.bytes.len())]
            .iter()
            .any(|&b| b >= 0x80);
        let encoded = cp.encode();
        let len = encoded.len();
        self.bytes.splice(at..at, encoded);
        let remeasured = !cp.is_scalar() || seam_at_risk;
        if remeasured {
            self.vwidth = width::line_width(&self.bytes);
        } else {
            self.vwidth += width::glyph_width(cp);
        }
        EditOutcome { cp, len, remeasured }
    }

    /// Remove the codepoint starting at `at`, if any.
    ///
    /// Removing an invalid byte can let its neighbours merge into a valid
    /// sequence; removing a valid codepoint can do the same when a
    /// would-be lead sits just before it (its missing continuations may
    /// now follow). Both cases remeasure.
    pub fn remove(&mut self, at: usize) -> Option<EditOutcome> {
        if at >= self.bytes.len() {
            return None;
        }
        let (cp, end) = codec::decode_forward(&self.bytes, at);
        let len = end - at;
        // A lead byte looks ahead up to three bytes, so any non-ASCII byte
        // just before the cut can change meaning once the cut closes.
        let seam_at_risk = self.bytes[at.saturating_sub(3)..at].iter().any(|&b| b >= 0x80);
        self.bytes.drain(at..end);
        let remeasured = !cp.is_scalar() || seam_at_risk;
        if remeasured {
            self.vwidth = width::line_width(&self.bytes);
        } else {
            self.vwidth -= width::glyph_width(cp);
        }
        Some(EditOutcome { cp, len, remeasured })
    }

    /// Split at `at` (a codepoint boundary); returns the tail.
    ///
    /// The head keeps `head_width` as its cache (the caller's prefix width
    /// is exact at a boundary); the tail is measured from scratch.
    pub fn split_off(&mut self, at: usize, head_width: usize) -> Line {
        let tail = self.bytes.split_off(at);
        self.vwidth = head_width;
        Line::from_bytes(tail)
    }

    /// Append another line's bytes.
    ///
    /// The joined line is always remeasured: a byte that was invalid only
    /// because its line ended can fuse with the start of the other side
    /// into a valid sequence, so summing the two caches is not sound.
    pub fn merge(&mut self, other: Line) {
        self.bytes.extend(other.bytes);
        self.vwidth = width::line_width(&self.bytes);
    }
}
