//! Translation from raw terminal events to editor commands.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::codec::Codepoint;

/// One editor command. Every state change is driven by exactly one of
/// these; the editing core never sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(Codepoint),
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Delete,
    Backspace,
    /// Insert a line break, or confirm the active prompt.
    Split,
    Save,
    SaveAs,
    /// Abort the active prompt.
    Cancel,
    Quit,
    Resize(u16, u16),
    /// Anything unmapped; processed as a no-op.
    Unknown,
}

/// Map a terminal event to a command.
///
/// Escape-sequence decoding is crossterm's concern; window resizes arrive
/// here as ordinary events in the command stream, never from signal
/// context.
pub fn translate(event: Event) -> Command {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Resize(width, height) => Command::Resize(width, height),
        _ => Command::Unknown,
    }
}

fn translate_key(key: KeyEvent) -> Command {
    if key.kind == KeyEventKind::Release {
        return Command::Unknown;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Command::Quit,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Command::Save,
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => Command::SaveAs,
        (KeyCode::Esc, _) => Command::Cancel,
        (KeyCode::Left, _) => Command::MoveLeft,
        (KeyCode::Right, _) => Command::MoveRight,
        (KeyCode::Up, _) => Command::MoveUp,
        (KeyCode::Down, _) => Command::MoveDown,
        (KeyCode::Backspace, _) => Command::Backspace,
        (KeyCode::Delete, _) => Command::Delete,
        (KeyCode::Enter, _) => Command::Split,
        (KeyCode::Tab, KeyModifiers::NONE) => Command::Insert(Codepoint::from_char('\t')),
        (KeyCode::Char(c), modifiers)
            if modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT =>
        {
            Command::Insert(Codepoint::from_char(c))
        }
        _ => Command::Unknown,
    }
}
