//! Drawing the editor state into a ratatui frame.
//!
//! Every glyph the width model counts as two columns is expanded here to a
//! two-character form: invalid bytes as reverse-video hex digits, control
//! characters as reverse-video caret pairs, tabs as spaces. The actual
//! escape-sequence plumbing is ratatui's concern.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line as UiLine, Span, Text},
    Frame,
};

use crate::codec::{Codepoint, CodepointCursor};
use crate::editor::{Editor, Severity};
use crate::line::Line;
use crate::width::{self, TAB_WIDTH};

/// Render one full frame: text rows, then the status/prompt line.
pub fn draw(frame: &mut Frame, editor: &Editor) {
    let area = frame.area();
    if area.height == 0 || area.width == 0 {
        return;
    }
    let text_area = Rect::new(0, 0, area.width, area.height.saturating_sub(1));
    let status_area = Rect::new(0, area.height - 1, area.width, 1);

    draw_text(frame, editor, text_area);
    draw_status(frame, editor, status_area);
    frame.set_cursor_position(cursor_position(editor, area));
}

fn draw_text(frame: &mut Frame, editor: &Editor, area: Rect) {
    let gutter = editor.gutter_width();
    let text_cols = (area.width as usize).saturating_sub(gutter);
    let top = editor.viewport.top_row;

    let mut rows = Vec::with_capacity(area.height as usize);
    for screen_row in 0..area.height as usize {
        let row = top + screen_row;
        let mut spans = Vec::new();
        match editor.buffer.line(row) {
            Some(line) => {
                if gutter > 0 {
                    spans.push(gutter_span(row, row == editor.cursor.row));
                }
                let start = if row == editor.cursor.row {
                    editor.viewport.anchor.byte
                } else {
                    0
                };
                let (mut content, truncated) = row_spans(line, start, text_cols.saturating_sub(1));
                spans.append(&mut content);
                if truncated {
                    spans.push(Span::styled("$", Style::new().blue().bold()));
                }
            }
            None => {
                if gutter > 0 {
                    spans.push(Span::raw(" ".repeat(gutter)));
                }
                spans.push(Span::styled("~", Style::new().blue()));
            }
        }
        rows.push(UiLine::from(spans));
    }
    frame.render_widget(Text::from(rows), area);
}

fn gutter_span(row: usize, is_cursor_row: bool) -> Span<'static> {
    let style = if is_cursor_row {
        Style::new().white()
    } else {
        Style::new().dark_gray()
    };
    Span::styled(format!("{:>5} ", row + 1), style)
}

/// Expand one line into display spans, starting at `start` and stopping
/// once `budget` columns are filled. Returns the spans and whether content
/// was cut off.
fn row_spans(line: &Line, start: usize, budget: usize) -> (Vec<Span<'static>>, bool) {
    let reversed = Style::new().add_modifier(Modifier::REVERSED);
    let mut spans = Vec::new();
    let mut cursor = CodepointCursor::new(line.bytes(), start);
    let mut taken = 0;
    loop {
        let from = cursor.pos();
        let Some(cp) = cursor.next() else {
            return (spans, false);
        };
        let w = width::glyph_width(cp);
        if taken + w > budget {
            return (spans, true);
        }
        match cp {
            Codepoint::Invalid(b) => {
                spans.push(Span::styled(format!("{b:02X}"), reversed));
            }
            Codepoint::Scalar(0x09) => {
                spans.push(Span::raw(" ".repeat(TAB_WIDTH)));
            }
            Codepoint::Scalar(0x7F) => {
                spans.push(Span::styled("^?", reversed));
            }
            Codepoint::Scalar(v) if v < 0x20 => {
                spans.push(Span::styled(
                    format!("^{}", (b'@' + v as u8) as char),
                    reversed,
                ));
            }
            Codepoint::Scalar(_) => {
                let glyph = String::from_utf8_lossy(&line.bytes()[from..cursor.pos()]);
                spans.push(Span::raw(glyph.into_owned()));
            }
        }
        taken += w;
    }
}

fn draw_status(frame: &mut Frame, editor: &Editor, area: Rect) {
    let spans = if let Some(prompt) = &editor.prompt {
        let text_cols = (area.width as usize).saturating_sub(prompt.question_width() + 2);
        let mut spans = vec![
            Span::styled(prompt.question.clone(), Style::new().cyan().bold()),
            Span::raw("  "),
        ];
        let (mut input, truncated) =
            row_spans(&prompt.line, prompt.anchor.byte, text_cols.saturating_sub(1));
        spans.append(&mut input);
        if truncated {
            spans.push(Span::styled("$", Style::new().blue().bold()));
        }
        spans
    } else if let Some(message) = &editor.message {
        vec![Span::styled(
            message.text.clone(),
            severity_style(message.severity),
        )]
    } else {
        let name = editor
            .buffer
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| String::from("[no name]"));
        let mut spans = vec![
            Span::styled("rawl", Style::new().green().bold()),
            Span::raw(" - "),
            Span::styled(name, Style::new().magenta().bold()),
        ];
        if editor.buffer.is_dirty() {
            spans.push(Span::styled("*", Style::new().red().bold()));
        }
        spans.push(Span::styled(
            format!(
                "  {} lines  {}:{}",
                editor.buffer.len(),
                editor.cursor.row + 1,
                editor.cursor.vcol + 1
            ),
            Style::new().cyan(),
        ));
        spans
    };
    frame.render_widget(UiLine::from(spans), area);
}

fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::new().cyan(),
        Severity::Success => Style::new().green().bold(),
        Severity::Error => Style::new().red().bold(),
    }
}

/// Screen coordinates for the terminal cursor, clamped into the frame.
fn cursor_position(editor: &Editor, area: Rect) -> Position {
    let max_x = area.width.saturating_sub(1);
    let max_y = area.height.saturating_sub(1);
    if let Some(prompt) = &editor.prompt {
        let vcol = prompt.cursor.vcol.min(prompt.line.vwidth());
        let x = prompt.question_width() + 2 + vcol.saturating_sub(prompt.anchor.vcol);
        return Position::new((x as u16).min(max_x), max_y);
    }
    let line_vwidth = editor
        .buffer
        .line(editor.cursor.row)
        .map(Line::vwidth)
        .unwrap_or(0);
    let vcol = editor.cursor.vcol.min(line_vwidth);
    let x = editor.gutter_width() + vcol.saturating_sub(editor.viewport.anchor.vcol);
    let y = editor.cursor.row.saturating_sub(editor.viewport.top_row);
    Position::new((x as u16).min(max_x), (y as u16).min(max_y))
}
