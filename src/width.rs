//! Terminal display widths for decoded codepoints.
//!
//! Column math everywhere else in the editor rests on this table. Wide and
//! combining characters follow the East-Asian-width data shipped with the
//! `unicode-width` crate; everything the terminal cannot print directly
//! (controls, DEL, undecodable bytes) renders as a two-character glyph and
//! is therefore two columns wide.

use unicode_width::UnicodeWidthChar;

use crate::codec::{Codepoint, CodepointCursor};

/// Columns a tab occupies.
pub const TAB_WIDTH: usize = 2;

/// Display width in terminal columns of a single codepoint.
///
/// Control characters and DEL render as a caret pair and invalid bytes as
/// two hex digits, so both count 2. Scalar values the width tables do not
/// cover (including shape-decoded values that are not `char`s) count 0.
pub fn glyph_width(cp: Codepoint) -> usize {
    match cp {
        Codepoint::Invalid(_) => 2,
        Codepoint::Scalar(0x09) => TAB_WIDTH,
        Codepoint::Scalar(v) if v < 0x20 || v == 0x7F => 2,
        Codepoint::Scalar(v) => char::from_u32(v).and_then(|c| c.width()).unwrap_or(0),
    }
}

/// Total display width of a byte slice.
pub fn line_width(bytes: &[u8]) -> usize {
    prefix_width(bytes, bytes.len())
}

/// Sum of glyph widths from byte 0 up to `byte_col`.
///
/// Decodes forward until the position reaches or passes `byte_col`, so an
/// offset inside a multi-byte sequence counts that whole codepoint.
pub fn prefix_width(bytes: &[u8], byte_col: usize) -> usize {
    let mut cursor = CodepointCursor::new(bytes, 0);
    let mut total = 0;
    while cursor.pos() < byte_col {
        match cursor.next() {
            Some(cp) => total += glyph_width(cp),
            None => break,
        }
    }
    total
}

/// Largest codepoint boundary whose prefix width does not exceed `target`.
///
/// Never overshoots: a codepoint that would push the accumulated width past
/// `target` is not consumed. Vertical motion re-snaps through this, which
/// is what keeps it from drifting right over short or wide-glyph lines.
pub fn byte_for_width(bytes: &[u8], target: usize) -> usize {
    let mut cursor = CodepointCursor::new(bytes, 0);
    let mut total = 0;
    while let Some(cp) = cursor.peek() {
        let w = glyph_width(cp);
        if total + w > target {
            break;
        }
        total += w;
        cursor.next();
    }
    cursor.pos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_widths() {
        assert_eq!(glyph_width(Codepoint::Scalar('a' as u32)), 1);
        assert_eq!(glyph_width(Codepoint::Scalar('\t' as u32)), TAB_WIDTH);
        assert_eq!(glyph_width(Codepoint::Scalar(0x01)), 2); // ^A
        assert_eq!(glyph_width(Codepoint::Scalar(0x7F)), 2); // ^?
        assert_eq!(glyph_width(Codepoint::Invalid(0x89)), 2); // hex pair
        assert_eq!(glyph_width(Codepoint::Scalar('世' as u32)), 2);
        assert_eq!(glyph_width(Codepoint::Scalar(0x0301)), 0); // combining acute
    }

    #[test]
    fn test_line_width_mixed_content() {
        // "a" + invalid byte + "世" = 1 + 2 + 2
        let bytes = [b'a', 0x89, 0xE4, 0xB8, 0x96];
        assert_eq!(line_width(&bytes), 5);
    }

    #[test]
    fn test_prefix_width_is_monotonic() {
        let bytes = [b'a', 0x89, 0xE4, 0xB8, 0x96, b'\t', b'b'];
        let mut last = 0;
        for col in 0..=bytes.len() {
            let w = prefix_width(&bytes, col);
            assert!(w >= last, "width decreased at byte {col}");
            last = w;
        }
    }

    #[test]
    fn test_byte_for_width_never_overshoots() {
        let bytes = "世界".as_bytes(); // two width-2 glyphs, 3 bytes each
        assert_eq!(byte_for_width(bytes, 0), 0);
        assert_eq!(byte_for_width(bytes, 1), 0); // half a glyph: stay put
        assert_eq!(byte_for_width(bytes, 2), 3);
        assert_eq!(byte_for_width(bytes, 3), 3);
        assert_eq!(byte_for_width(bytes, 4), 6);
        assert_eq!(byte_for_width(bytes, 100), 6);
    }

    #[test]
    fn test_byte_for_width_lands_on_exact_columns() {
        let bytes = b"abc";
        assert_eq!(byte_for_width(bytes, 2), 2);
        assert_eq!(prefix_width(bytes, byte_for_width(bytes, 2)), 2);
    }
}
