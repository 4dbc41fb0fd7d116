//! Status bar: pending replies on the left, shortcuts on the right.

use ratatui::{style::Style, text::Span, widgets::Paragraph, Frame};

use crate::ui::theme::colors;

const SHORTCUTS: &str = " PgUp/PgDn scroll  ↑↓ history  ^O conversation  Enter send  Esc quit ";

fn pending_label(pending: usize, spinner_char: char) -> String {
    match pending {
        0 => " Ready".to_string(),
        1 => format!(" {spinner_char} Waiting for reply…"),
        n => format!(" {spinner_char} Waiting for {n} replies…"),
    }
}

pub fn render(f: &mut Frame, area: ratatui::prelude::Rect, pending: usize, spinner_char: char) {
    let left = pending_label(pending, spinner_char);
    let width = area.width as usize;
    let pad = width.saturating_sub(left.chars().count() + SHORTCUTS.chars().count());
    let line = format!("{}{}{}", left, " ".repeat(pad), SHORTCUTS);
    let span = Span::styled(line, Style::default().fg(colors::MUTED).bg(colors::ELEVATED));
    f.render_widget(Paragraph::new(span), area);
}
