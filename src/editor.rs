//! The editing engine: command dispatch, cursor/viewport coordination, and
//! text mutation.
//!
//! Everything here is synchronous owned state: one command is processed to
//! completion, the caller redraws, and only then is the next command read.

use std::io;
use std::path::PathBuf;

use crate::buffer::Buffer;
use crate::codec::Codepoint;
use crate::config::Config;
use crate::cursor::Cursor;
use crate::input::Command;
use crate::line::Line;
use crate::prompt::{Prompt, PromptAction};
use crate::viewport::Viewport;
use crate::width;

/// Gutter columns reserved when line numbers are shown: five digits plus a
/// separating space.
pub const GUTTER_WIDTH: usize = 6;

/// Severity of a transient status message, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// A transient status-line message; lives until the next processed
/// command.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// The whole editor state for one open document.
pub struct Editor {
    pub buffer: Buffer,
    pub cursor: Cursor,
    pub viewport: Viewport,
    pub prompt: Option<Prompt>,
    pub message: Option<StatusMessage>,
    pub config: Config,
    running: bool,
}

impl Editor {
    pub fn new(buffer: Buffer, config: Config, size: (u16, u16)) -> Self {
        Self {
            buffer,
            cursor: Cursor::default(),
            viewport: Viewport::new(size.0, size.1),
            prompt: None,
            message: None,
            config,
            running: true,
        }
    }

    /// False once a quit command has been processed.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Gutter columns currently reserved for line numbers.
    pub fn gutter_width(&self) -> usize {
        if self.config.line_numbers {
            GUTTER_WIDTH
        } else {
            0
        }
    }

    /// Process one command to completion.
    pub fn apply(&mut self, cmd: Command) {
        if !matches!(cmd, Command::Resize(..)) {
            self.message = None;
        }
        if self.prompt.is_some() {
            self.apply_prompt(cmd);
        } else {
            self.apply_edit(cmd);
        }
    }

    fn apply_edit(&mut self, cmd: Command) {
        let prev_row = self.cursor.row;
        match cmd {
            Command::Insert(cp) => self.insert(cp),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::Delete => self.delete(),
            Command::Backspace => self.backspace(),
            Command::Split => self.split(),
            Command::Resize(width, height) => self.viewport.resize(width, height),
            Command::Save => {
                self.save_interactive(false);
                return;
            }
            Command::SaveAs => {
                self.save_interactive(true);
                return;
            }
            Command::Quit => {
                self.running = false;
                return;
            }
            Command::Cancel => return,
            Command::Unknown => {
                tracing::trace!("ignoring unmapped input");
                return;
            }
        }
        if self.cursor.row != prev_row {
            self.viewport.anchor.reset();
        }
        self.scroll_to_cursor();
    }

    fn apply_prompt(&mut self, cmd: Command) {
        match cmd {
            Command::Split => {
                if let Some(prompt) = self.prompt.take() {
                    self.finish_prompt(prompt);
                }
            }
            Command::Cancel | Command::Quit => {
                self.prompt = None;
                self.message = Some(StatusMessage::error("Save aborted"));
            }
            Command::Resize(width, height) => self.viewport.resize(width, height),
            cmd => {
                if let Some(prompt) = self.prompt.as_mut() {
                    match cmd {
                        Command::Insert(cp) => prompt.insert(cp),
                        Command::MoveLeft => prompt.move_left(),
                        Command::MoveRight => prompt.move_right(),
                        Command::Delete => prompt.delete(),
                        Command::Backspace => prompt.backspace(),
                        // Vertical motion never leaves the prompt line.
                        _ => {}
                    }
                }
                self.adjust_prompt_scroll();
            }
        }
    }

    fn finish_prompt(&mut self, prompt: Prompt) {
        match prompt.action {
            PromptAction::SaveAs => {
                let input = prompt.input();
                if input.is_empty() {
                    self.message = Some(StatusMessage::error("Save aborted"));
                    return;
                }
                let result = self.buffer.save_to_file(PathBuf::from(&input));
                self.report_save(result);
            }
        }
    }

    fn adjust_prompt_scroll(&mut self) {
        let total = self.viewport.width as usize;
        if let Some(prompt) = self.prompt.as_mut() {
            let text_cols = total.saturating_sub(prompt.question_width() + 2);
            prompt.follow_scroll(text_cols);
        }
    }

    // Navigation ---------------------------------------------------------

    fn move_left(&mut self) {
        let moved = match self.buffer.line(self.cursor.row) {
            Some(line) => self.cursor.left_in(line),
            None => false,
        };
        if !moved && self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.move_to_line_end();
        }
    }

    fn move_right(&mut self) {
        if self.cursor.row >= self.buffer.len() {
            return;
        }
        let moved = match self.buffer.line(self.cursor.row) {
            Some(line) => self.cursor.right_in(line),
            None => false,
        };
        if !moved {
            self.cursor.row += 1;
            self.cursor.byte_col = 0;
            self.cursor.vcol = 0;
        }
    }

    fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.resnap_columns();
        }
    }

    fn move_down(&mut self) {
        if self.cursor.row < self.buffer.len() {
            self.cursor.row += 1;
            self.resnap_columns();
        }
    }

    /// Two-step re-snap after a row change: land on the byte offset whose
    /// prefix width best approximates the remembered visual column (never
    /// past it), then re-derive the exact visual column from that offset.
    fn resnap_columns(&mut self) {
        match self.buffer.line(self.cursor.row) {
            Some(line) => {
                self.cursor.byte_col = width::byte_for_width(line.bytes(), self.cursor.vcol);
                self.cursor.vcol = width::prefix_width(line.bytes(), self.cursor.byte_col);
            }
            None => {
                self.cursor.byte_col = 0;
                self.cursor.vcol = 0;
            }
        }
    }

    fn move_to_line_end(&mut self) {
        if let Some(line) = self.buffer.line(self.cursor.row) {
            self.cursor.byte_col = line.len();
            self.cursor.vcol = line.vwidth();
        }
    }

    // Mutation -----------------------------------------------------------

    fn insert(&mut self, cp: Codepoint) {
        if self.cursor.row == self.buffer.len() {
            self.buffer.push_line(Line::new());
        }
        let row = self.cursor.row;
        if let Some(line) = self.buffer.line_mut(row) {
            self.cursor.insert_in(line, cp);
        }
        self.buffer.mark_dirty();
    }

    fn delete(&mut self) {
        let row = self.cursor.row;
        let deleted = match self.buffer.line_mut(row) {
            Some(line) => self.cursor.delete_in(line),
            None => false,
        };
        if deleted {
            self.buffer.mark_dirty();
        } else if row + 1 < self.buffer.len() {
            // End of line: pull the next line up.
            let next = self.buffer.remove_line(row + 1);
            if let Some(line) = self.buffer.line_mut(row) {
                line.merge(next);
            }
            self.buffer.mark_dirty();
        }
    }

    fn backspace(&mut self) {
        let row = self.cursor.row;
        let deleted = match self.buffer.line_mut(row) {
            Some(line) => self.cursor.backspace_in(line),
            None => false,
        };
        if deleted {
            self.buffer.mark_dirty();
            return;
        }
        if row == 0 {
            return;
        }
        if row == self.buffer.len() {
            // Past the last line; nothing to merge, just land on its end.
            self.cursor.row -= 1;
            self.move_to_line_end();
            return;
        }
        // Start of line: fold it into the previous one, cursor at the
        // join point.
        let removed = self.buffer.remove_line(row);
        self.cursor.row -= 1;
        if let Some(line) = self.buffer.line_mut(self.cursor.row) {
            self.cursor.byte_col = line.len();
            self.cursor.vcol = line.vwidth();
            line.merge(removed);
        }
        self.buffer.mark_dirty();
    }

    fn split(&mut self) {
        if self.cursor.row == self.buffer.len() {
            // Past the end: materialize the row instead of splitting.
            self.buffer.push_line(Line::new());
            self.cursor.byte_col = 0;
            self.cursor.vcol = 0;
        } else {
            let row = self.cursor.row;
            if let Some(line) = self.buffer.line(self.cursor.row) {
                self.cursor.clamp_to(line);
            }
            let at = self.cursor.byte_col;
            let head_width = self.cursor.vcol;
            if let Some(line) = self.buffer.line_mut(row) {
                let tail = line.split_off(at, head_width);
                self.buffer.insert_line(row + 1, tail);
            }
            self.cursor.row += 1;
            self.cursor.byte_col = 0;
            self.cursor.vcol = 0;
        }
        self.buffer.mark_dirty();
    }

    // Saving -------------------------------------------------------------

    fn save_interactive(&mut self, force_prompt: bool) {
        if force_prompt || self.buffer.path().is_none() {
            self.prompt = Some(Prompt::new("Save as:", PromptAction::SaveAs));
        } else {
            let result = self.buffer.save();
            self.report_save(result);
        }
    }

    fn report_save(&mut self, result: io::Result<()>) {
        match result {
            Ok(()) => {
                let name = self
                    .buffer
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                tracing::info!(path = %name, "buffer saved");
                self.message = Some(StatusMessage::success(format!("Saved {name}")));
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                self.message = Some(StatusMessage::error(format!("Save failed: {err}")));
            }
        }
    }

    // Scrolling ----------------------------------------------------------

    /// Re-anchor the viewport so the (clamped) cursor stays visible.
    fn scroll_to_cursor(&mut self) {
        self.viewport.scroll_vertical(self.cursor.row);
        let text_cols = self.viewport.text_cols(self.gutter_width());
        let empty = Line::new();
        let line = self.buffer.line(self.cursor.row).unwrap_or(&empty);
        let mut clamped = self.cursor;
        clamped.clamp_to(line);
        self.viewport.anchor.follow(line, &clamped, text_cols);
    }
}
