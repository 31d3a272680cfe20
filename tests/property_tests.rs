// Property-based tests using proptest
// These generate arbitrary byte sequences (valid and invalid UTF-8 mixed)
// and verify the codec, width, and editing invariants.

use proptest::prelude::*;

use rawl::buffer::Buffer;
use rawl::codec::{decode_forward, Codepoint, CodepointCursor};
use rawl::config::Config;
use rawl::editor::Editor;
use rawl::input::Command;
use rawl::line::Line;
use rawl::width;

/// Arbitrary bytes, deliberately skewed toward UTF-8 structure so lead and
/// continuation bytes actually meet each other.
fn raw_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            3 => any::<u8>(),
            2 => (b'a'..=b'z').prop_map(|b| b),
            1 => Just(0xC3u8),
            1 => Just(0xE2u8),
            1 => Just(0xF0u8),
            2 => (0x80u8..=0xBF).prop_map(|b| b),
        ],
        0..64,
    )
}

/// Line content: raw bytes without newlines.
fn line_bytes() -> impl Strategy<Value = Vec<u8>> {
    raw_bytes().prop_map(|mut v| {
        v.retain(|&b| b != b'\n');
        v
    })
}

proptest! {
    #[test]
    fn prop_backward_iteration_inverts_forward(bytes in raw_bytes()) {
        let mut forward = vec![0];
        let mut cursor = CodepointCursor::new(&bytes, 0);
        while cursor.next().is_some() {
            forward.push(cursor.pos());
        }

        let mut backward = vec![bytes.len()];
        let mut cursor = CodepointCursor::new(&bytes, bytes.len());
        while cursor.prev().is_some() {
            backward.push(cursor.pos());
        }
        backward.reverse();

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_scalar_encode_decode_round_trips(c in any::<char>()) {
        let cp = Codepoint::from_char(c);
        let bytes = cp.encode();
        prop_assert_eq!(bytes.len(), c.len_utf8());
        prop_assert_eq!(decode_forward(&bytes, 0), (cp, bytes.len()));
    }

    #[test]
    fn prop_invalid_byte_encode_recovers_the_byte(b in 0x80u8..=0xBF) {
        prop_assert_eq!(Codepoint::Invalid(b).encode(), vec![b]);
    }

    #[test]
    fn prop_prefix_width_is_monotonic(bytes in raw_bytes()) {
        let mut last = 0;
        for col in 0..=bytes.len() {
            let w = width::prefix_width(&bytes, col);
            prop_assert!(w >= last);
            last = w;
        }
        prop_assert_eq!(last, width::line_width(&bytes));
    }

    #[test]
    fn prop_byte_for_width_never_overshoots(bytes in raw_bytes(), target in 0usize..64) {
        let at = width::byte_for_width(&bytes, target);
        prop_assert!(width::prefix_width(&bytes, at) <= target);
    }

    #[test]
    fn prop_line_width_cache_matches_recompute_after_edits(
        bytes in line_bytes(),
        c in any::<char>(),
        at_frac in 0usize..8,
    ) {
        let mut line = Line::from_bytes(bytes);
        // Pick a codepoint boundary to edit at.
        let mut cursor = CodepointCursor::new(line.bytes(), 0);
        for _ in 0..at_frac {
            if cursor.next().is_none() {
                break;
            }
        }
        let at = cursor.pos();
        line.insert(at, Codepoint::from_char(c));
        prop_assert_eq!(line.vwidth(), width::line_width(line.bytes()));
        let _ = line.remove(at);
        prop_assert_eq!(line.vwidth(), width::line_width(line.bytes()));
    }

    #[test]
    fn prop_insert_then_backspace_restores_the_line(
        bytes in line_bytes(),
        c in any::<char>(),
        steps in 0usize..8,
    ) {
        let mut editor = Editor::new(
            Buffer::from_bytes(&bytes),
            Config::default(),
            (80, 24),
        );
        for _ in 0..steps {
            editor.apply(Command::MoveRight);
        }
        if editor.cursor.row != 0 {
            // Walked off the single line; nothing left to edit on row 0.
            return Ok(());
        }
        let before = editor.buffer.line(0).unwrap().clone();
        editor.apply(Command::Insert(Codepoint::from_char(c)));
        editor.apply(Command::Backspace);
        prop_assert_eq!(editor.buffer.line(0).unwrap(), &before);
    }

    #[test]
    fn prop_down_then_up_never_gains_columns(
        first in line_bytes(),
        second in line_bytes(),
        steps in 0usize..12,
    ) {
        let mut content = first;
        content.push(b'\n');
        content.extend(second);
        let mut editor = Editor::new(
            Buffer::from_bytes(&content),
            Config::default(),
            (200, 24),
        );
        for _ in 0..steps {
            editor.apply(Command::MoveRight);
        }
        if editor.cursor.row != 0 {
            // Walked off the first line; the property is about row 0.
            return Ok(());
        }
        let original = editor.cursor.vcol;
        editor.apply(Command::MoveDown);
        editor.apply(Command::MoveUp);
        prop_assert!(editor.cursor.vcol <= original);
        prop_assert_eq!(editor.cursor.row, 0);
    }

    #[test]
    fn prop_buffer_round_trips_arbitrary_content(bytes in raw_bytes()) {
        let buffer = Buffer::from_bytes(&bytes);
        let saved = buffer.to_bytes();
        // Serialization is the content with every line newline-terminated;
        // loading it back yields identical lines.
        let reloaded = Buffer::from_bytes(&saved);
        prop_assert_eq!(buffer.len(), reloaded.len());
        for (a, b) in buffer.lines().zip(reloaded.lines()) {
            prop_assert_eq!(a.bytes(), b.bytes());
        }
    }
}
