//! Transcript: labelled turns, per-turn typing rows, tail-following scroll.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::{ChatState, Entry, Message, MessageRole};
use crate::ui::markdown;
use crate::ui::theme::{colors, MESSAGE_GAP};

const CHAT_TEXT: Color = Color::White;
/// Continuation indent under a label.
const HANG: &str = "     ";

fn label_style(role: MessageRole) -> Style {
    match role {
        MessageRole::User => Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        MessageRole::Bot => Style::default().fg(colors::ACCENT_SOFT).add_modifier(Modifier::BOLD),
        MessageRole::Error => Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
        MessageRole::System => Style::default().fg(colors::TEXT_DIM),
    }
}

/// User and error text is shown verbatim; only replies go through markdown.
fn message_lines(msg: &Message) -> Vec<Line<'static>> {
    let content_style = match msg.role {
        MessageRole::Error => Style::default().fg(colors::ERROR),
        MessageRole::System => Style::default().fg(colors::TEXT_DIM),
        _ => Style::default().fg(CHAT_TEXT),
    };
    let body: Vec<Line<'static>> = if msg.role == MessageRole::Bot {
        markdown::to_lines(&msg.content)
    } else if msg.content.is_empty() {
        vec![Line::from("")]
    } else {
        msg.content
            .lines()
            .map(|s| Line::from(Span::styled(s.to_string(), content_style)))
            .collect()
    };

    let label = msg.role.label();
    body.into_iter()
        .enumerate()
        .map(|(i, line)| {
            let mut spans = match (label, i) {
                ("", _) => vec![],
                (label, 0) => vec![Span::styled(format!("{label}: "), label_style(msg.role))],
                _ => vec![Span::raw(HANG)],
            };
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect()
}

fn typing_line(spinner_char: char) -> Line<'static> {
    Line::from(vec![
        Span::styled("Assistant: ", label_style(MessageRole::Bot)),
        Span::styled(format!("{spinner_char} "), Style::default().fg(colors::ACCENT)),
        Span::styled("typing…", Style::default().fg(colors::MUTED)),
    ])
}

fn entry_lines(entry: &Entry, spinner_char: char) -> Vec<Line<'static>> {
    match entry {
        Entry::Turn(msg) => message_lines(msg),
        Entry::Typing(_) => vec![typing_line(spinner_char)],
    }
}

fn transcript_lines(chat: &ChatState, spinner_char: char) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, entry) in chat.entries.iter().enumerate() {
        if i > 0 {
            lines.extend(std::iter::repeat_with(|| Line::from("")).take(MESSAGE_GAP));
        }
        lines.extend(entry_lines(entry, spinner_char));
    }
    lines
}

fn wrapped(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(lines).wrap(Wrap { trim: false })
}

/// Rows the transcript occupies at `width`; unwrapped when the width is unknown.
pub fn transcript_height(chat: &ChatState, width: u16) -> usize {
    let lines = transcript_lines(chat, ' ');
    if width == 0 {
        return lines.len();
    }
    wrapped(lines).line_count(width)
}

pub fn render(f: &mut Frame, chat: &ChatState, area: ratatui::prelude::Rect, spinner_char: char) {
    let mut lines = transcript_lines(chat, spinner_char);
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask anything.  Enter to send · Ctrl+O conversations",
            Style::default().fg(colors::MUTED),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let para = wrapped(lines).style(Style::default().fg(CHAT_TEXT).bg(colors::BG));
    let max_scroll = para.line_count(inner.width).saturating_sub(inner.height as usize);
    let scroll = if chat.follow { max_scroll } else { chat.scroll.min(max_scroll) };
    let para = para.scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(para, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Transcript, TurnToken};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(chat: &ChatState, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, chat, area, '*');
            })
            .unwrap();
        let cells = terminal.backend().buffer().content().to_vec();
        cells
            .chunks(width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn markup_in_turns_is_drawn_literally() {
        let mut chat = ChatState::default();
        chat.append_turn(Message::user("<script>x</script>".into()));
        chat.append_turn(Message::bot("<b>ok</b>".into()));
        let rows = draw(&chat, 40, 6);
        assert!(rows.iter().any(|r| r.contains("You: <script>x</script>")), "{rows:#?}");
        assert!(rows.iter().any(|r| r.contains("Assistant: <b>ok</b>")), "{rows:#?}");
    }

    #[test]
    fn typing_row_sits_at_its_turn() {
        let mut chat = ChatState::default();
        chat.append_turn(Message::user("hello".into()));
        chat.append_indicator(TurnToken::new(0));
        let rows = draw(&chat, 40, 6);
        let you = rows.iter().position(|r| r.contains("You: hello")).unwrap();
        let typing = rows.iter().position(|r| r.contains("typing…")).unwrap();
        assert!(typing > you);
    }

    #[test]
    fn follow_mode_shows_latest_turn() {
        let mut chat = ChatState { viewport_height: 3, ..Default::default() };
        for i in 0..10 {
            chat.append_turn(Message::user(format!("msg {i}")));
        }
        chat.scroll_to_end();
        let rows = draw(&chat, 30, 5);
        assert!(rows.iter().any(|r| r.contains("You: msg 9")), "{rows:#?}");
        assert!(!rows.iter().any(|r| r.contains("You: msg 0")));
    }

    #[test]
    fn follow_mode_shows_end_of_wrapped_reply() {
        let mut chat = ChatState::default();
        chat.append_turn(Message::user("hello".into()));
        chat.append_turn(Message::bot(
            "one two three four five six seven eight nine ten eleven twelve END".into(),
        ));
        chat.scroll_to_end();
        let rows = draw(&chat, 24, 6);
        assert!(rows.iter().any(|r| r.contains("END")), "{rows:#?}");
    }

    #[test]
    fn scrolling_up_from_the_tail_moves_by_wrapped_rows() {
        let mut chat = ChatState { viewport_height: 4, viewport_width: 22, ..Default::default() };
        chat.append_turn(Message::user("hello".into()));
        chat.append_turn(Message::bot(
            "one two three four five six seven eight nine ten eleven twelve END".into(),
        ));
        chat.scroll_to_end();
        chat.scroll_up(1);
        let rows = draw(&chat, 24, 6);
        assert!(!rows.iter().any(|r| r.contains("END")), "{rows:#?}");
        chat.scroll_down(1);
        let rows = draw(&chat, 24, 6);
        assert!(rows.iter().any(|r| r.contains("END")), "{rows:#?}");
    }

    #[test]
    fn multi_line_user_text_hangs_under_label() {
        let msg = Message::user("first\nsecond".into());
        let lines = message_lines(&msg);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[0].content, HANG);
    }
}
