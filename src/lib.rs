//! rawl: the editing core of a small terminal text editor.
//!
//! The buffer is a sequence of byte lines, never required to be valid
//! UTF-8, and the cursor is tracked simultaneously in byte offsets and
//! terminal display columns. Undecodable bytes stay editable as first-class
//! units and round-trip byte for byte.

pub mod buffer;
pub mod codec;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod input;
pub mod line;
pub mod prompt;
pub mod render;
pub mod viewport;
pub mod width;
