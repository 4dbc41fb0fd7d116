//! Header line: client name, version, endpoint.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::colors;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Truncate to `max_chars` from the end with ellipsis.
fn truncate_end(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    let take = max_chars.saturating_sub(1);
    format!("…{}", s.chars().skip(count - take).collect::<String>())
}

pub fn render(f: &mut Frame, area: ratatui::prelude::Rect, endpoint: &str) {
    let title = format!(" Ask (v{VERSION}) ");
    let room = (area.width as usize).saturating_sub(title.chars().count() + 1);
    let line = Line::from(vec![
        Span::styled(title, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(truncate_end(endpoint, room), Style::default().fg(colors::TEXT_DIM)),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().bg(colors::ELEVATED)), area);
}
