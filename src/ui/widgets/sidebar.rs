//! Conversation sidebar: submitted questions, newest last.

use ratatui::{
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::theme::colors;

pub fn render(f: &mut Frame, history: &[String], area: ratatui::prelude::Rect) {
    let block = Block::default()
        .title(" Conversation ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::ELEVATED));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if history.is_empty() {
        let p = Paragraph::new("No questions yet").style(Style::default().fg(colors::MUTED));
        f.render_widget(p, inner);
        return;
    }

    let skip = history.len().saturating_sub(inner.height as usize);
    let items: Vec<ListItem> = history
        .iter()
        .skip(skip)
        .map(|q| {
            let first = q.lines().next().unwrap_or("");
            ListItem::new(Line::from(format!("• {first}")))
                .style(Style::default().fg(colors::TEXT_DIM))
        })
        .collect();
    f.render_widget(List::new(items), inner);
}
