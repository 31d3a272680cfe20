//! A one-line input prompt for interactive questions (file names).

use crate::codec::Codepoint;
use crate::cursor::Cursor;
use crate::line::Line;
use crate::viewport::Anchor;
use crate::width;

/// What to do with the input once the prompt is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Save the buffer to the entered path.
    SaveAs,
}

/// Modal one-line input state.
///
/// Reuses the document's cursor arithmetic on a single line; row-crossing
/// navigation and line splitting do not apply here. The document cursor is
/// untouched while a prompt is open.
#[derive(Debug)]
pub struct Prompt {
    pub question: String,
    pub line: Line,
    pub cursor: Cursor,
    pub anchor: Anchor,
    pub action: PromptAction,
}

impl Prompt {
    pub fn new(question: impl Into<String>, action: PromptAction) -> Self {
        Self {
            question: question.into(),
            line: Line::new(),
            cursor: Cursor::default(),
            anchor: Anchor::default(),
            action,
        }
    }

    /// Display width of the question text.
    pub fn question_width(&self) -> usize {
        width::line_width(self.question.as_bytes())
    }

    pub fn insert(&mut self, cp: Codepoint) {
        self.cursor.insert_in(&mut self.line, cp);
    }

    pub fn delete(&mut self) {
        self.cursor.delete_in(&mut self.line);
    }

    pub fn backspace(&mut self) {
        self.cursor.backspace_in(&mut self.line);
    }

    pub fn move_left(&mut self) {
        self.cursor.left_in(&self.line);
    }

    pub fn move_right(&mut self) {
        self.cursor.right_in(&self.line);
    }

    /// Keep the prompt cursor visible within `text_cols`.
    pub fn follow_scroll(&mut self, text_cols: usize) {
        let mut clamped = self.cursor;
        clamped.clamp_to(&self.line);
        self.anchor.follow(&self.line, &clamped, text_cols);
    }

    /// The entered text, lossily decoded for use as a path.
    pub fn input(&self) -> String {
        String::from_utf8_lossy(self.line.bytes()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_builds_input() {
        let mut prompt = Prompt::new("Save as:", PromptAction::SaveAs);
        for c in "a/b.txt".chars() {
            prompt.insert(Codepoint::from_char(c));
        }
        assert_eq!(prompt.input(), "a/b.txt");
        assert_eq!(prompt.cursor.byte_col, 7);
    }

    #[test]
    fn test_edit_in_the_middle() {
        let mut prompt = Prompt::new("Save as:", PromptAction::SaveAs);
        for c in "ab".chars() {
            prompt.insert(Codepoint::from_char(c));
        }
        prompt.move_left();
        prompt.backspace();
        assert_eq!(prompt.input(), "b");
        assert_eq!(prompt.cursor.byte_col, 0);
    }

    #[test]
    fn test_cursor_stays_within_the_line() {
        let mut prompt = Prompt::new("Save as:", PromptAction::SaveAs);
        prompt.move_left();
        assert_eq!(prompt.cursor.byte_col, 0);
        prompt.insert(Codepoint::from_char('x'));
        prompt.move_right();
        assert_eq!(prompt.cursor.byte_col, 1);
    }
}
