//! Paint a [`Screen`] with ratatui

use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::screen::{Screen, ScreenLine};
use super::theme::Theme;
use crate::highlight::HighlightClass;

/// Glyph for a byte that can't be shown as itself: `^A`..`^Z` style
/// letters for the low control codes, `?` for everything else.
pub fn control_glyph(byte: u8) -> char {
    if byte <= 26 {
        (b'@' + byte) as char
    } else {
        '?'
    }
}

fn is_printable(byte: u8) -> bool {
    byte.is_ascii() && !byte.is_ascii_control()
}

/// Build the styled line for one row, merging runs of equal style
fn text_line<'a>(text: &[u8], highlight: &[HighlightClass], theme: &Theme) -> Line<'a> {
    let mut spans: Vec<Span<'a>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for (i, &byte) in text.iter().enumerate() {
        let (ch, style) = if is_printable(byte) {
            let class = highlight.get(i).copied().unwrap_or_default();
            (byte as char, theme.style_for(class))
        } else {
            (control_glyph(byte), theme.control_style())
        };

        if run_style != Some(style) {
            if let Some(prev) = run_style {
                spans.push(Span::styled(std::mem::take(&mut run), prev));
            }
            run_style = Some(style);
        }
        run.push(ch);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }

    Line::from(spans)
}

/// Draw the whole frame: text area, status line, message line, cursor
pub fn render(frame: &mut Frame, screen: &Screen, theme: &Theme) {
    let area = frame.area();
    let [text_area, status_area, message_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let lines: Vec<Line> = screen
        .lines
        .iter()
        .map(|line| match line {
            ScreenLine::Text { text, highlight } => text_line(text, highlight, theme),
            ScreenLine::Filler => Line::from(Span::styled("~", theme.filler_style())),
            ScreenLine::Welcome(banner) => Line::from(Span::styled(banner.clone(), theme.filler_style())),
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.editor_bg)),
        text_area,
    );

    frame.render_widget(
        Paragraph::new(screen.status.clone()).style(theme.status_style()),
        status_area,
    );
    frame.render_widget(
        Paragraph::new(screen.message.clone()).style(theme.message_style()),
        message_area,
    );

    let (col, row) = screen.cursor;
    frame.set_cursor_position(cursor_cell(text_area, col, row));
}

fn cursor_cell(area: Rect, col: usize, row: usize) -> Position {
    let x = area.x + u16::try_from(col).unwrap_or(u16::MAX).min(area.width.saturating_sub(1));
    let y = area.y + u16::try_from(row).unwrap_or(u16::MAX).min(area.height.saturating_sub(1));
    Position::new(x, y)
}
