//! Input bar: prompt, verbatim buffer, terminal cursor.

use ratatui::{
    layout::Position,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::state::InputState;
use crate::ui::theme::colors;

const PROMPT: &str = " ▸ ";

pub fn render(f: &mut Frame, input: &InputState, area: ratatui::prelude::Rect) {
    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(input.value(), Style::default().fg(colors::TEXT)),
    ]);
    let block = Block::default()
        .style(Style::default().bg(colors::ELEVATED))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER))
        .border_type(BorderType::Plain);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(line), inner);

    f.set_cursor_position(Position { x: cursor_x(input, inner), y: inner.y });
}

/// Column of the cursor, pinned to the last cell of the bar.
fn cursor_x(input: &InputState, inner: ratatui::prelude::Rect) -> u16 {
    let typed = input.value().get(..input.cursor).map(|s| s.chars().count()).unwrap_or(0);
    let offset = u16::try_from(PROMPT.chars().count() + typed).unwrap_or(u16::MAX);
    inner
        .x
        .saturating_add(offset)
        .min(inner.x.saturating_add(inner.width.saturating_sub(1)))
}
