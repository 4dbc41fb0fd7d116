//! Markdown to ratatui lines for assistant turns.
//!
//! Raw HTML is never interpreted: block and inline HTML come through as
//! literal text so a reply containing `<script>` shows exactly that.
//! Punctuation is kept as typed and links keep their source form.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::colors;

const MD_TEXT: Color = Color::White;
const RULE: &str = "────────────────────────────────────────";
const CELL_SEP: &str = " │ ";

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    in_code_block: bool,
    in_heading: bool,
    emphasis: usize,
    /// One entry per open list; `Some(n)` is the next ordered number.
    lists: Vec<Option<u64>>,
    /// Cells already emitted on the current table row.
    cells: usize,
}

impl LineBuilder {
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn text_style(&self) -> Style {
        if self.in_heading {
            Style::default().fg(colors::HEADING).add_modifier(Modifier::BOLD)
        } else if self.emphasis > 0 {
            Style::default().fg(MD_TEXT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MD_TEXT)
        }
    }

    fn push_code_lines(&mut self, text: &str) {
        for line in text.lines() {
            self.lines.push(Line::from(vec![
                Span::styled(" ┃ ", Style::default().fg(colors::BORDER).bg(colors::CODE_BG)),
                Span::styled(line.to_string(), Style::default().fg(MD_TEXT).bg(colors::CODE_BG)),
            ]));
        }
    }

    fn push_literal(&mut self, text: &str) {
        let style = Style::default().fg(MD_TEXT);
        if text.contains('\n') {
            self.flush();
            for line in text.lines() {
                self.lines.push(Line::from(Span::styled(line.to_string(), style)));
            }
        } else {
            self.current.push(Span::styled(text.to_string(), style));
        }
    }

    fn start_item(&mut self) {
        let depth = self.lists.len();
        let indent = "  ".repeat(depth.saturating_sub(1));
        let marker = match self.lists.last_mut() {
            Some(Some(n)) => {
                let marker = format!("{indent}{n}. ");
                *n += 1;
                marker
            }
            _ if depth <= 1 => format!("{indent}• "),
            _ => format!("{indent}◦ "),
        };
        self.current.push(Span::styled(marker, Style::default().fg(colors::ACCENT)));
    }

    fn link_open(&mut self, kind: LinkType, image: bool) {
        let open = match (kind, image) {
            (LinkType::Autolink | LinkType::Email, _) => "<",
            (_, true) => "![",
            (_, false) => "[",
        };
        self.current.push(Span::styled(open, Style::default().fg(colors::ACCENT)));
    }

    fn link_close(&mut self, kind: LinkType, dest: &str) {
        let close = match kind {
            LinkType::Autolink | LinkType::Email => ">".to_string(),
            _ => format!("]({dest})"),
        };
        self.current.push(Span::styled(close, Style::default().fg(colors::ACCENT)));
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Link(kind, ..)) => self.link_open(kind, false),
            Event::Start(Tag::Image(kind, ..)) => self.link_open(kind, true),
            Event::End(Tag::Link(kind, dest, _)) | Event::End(Tag::Image(kind, dest, _)) => {
                self.link_close(kind, &dest)
            }
            Event::Start(Tag::Table(_)) => self.flush(),
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => self.cells = 0,
            Event::Start(Tag::TableCell) => {
                if self.cells > 0 {
                    self.current.push(Span::styled(CELL_SEP, Style::default().fg(colors::BORDER)));
                }
                self.cells += 1;
            }
            Event::End(Tag::TableHead) | Event::End(Tag::TableRow) => self.flush(),
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.in_code_block = true;
            }
            Event::End(Tag::CodeBlock(_)) => self.in_code_block = false,
            Event::Start(Tag::Heading(..)) => {
                self.flush();
                self.in_heading = true;
            }
            Event::End(Tag::Heading(..)) => {
                self.in_heading = false;
                self.flush();
            }
            Event::Start(Tag::List(start)) => {
                self.flush();
                self.lists.push(start);
            }
            Event::End(Tag::List(_)) => {
                self.lists.pop();
            }
            Event::Start(Tag::Item) => self.start_item(),
            Event::Start(Tag::Strong) | Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(Tag::Strong) | Event::End(Tag::Emphasis) => {
                self.emphasis = self.emphasis.saturating_sub(1);
            }
            Event::End(Tag::Item) | Event::End(Tag::Paragraph) => self.flush(),
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Text(t) if self.in_code_block => self.push_code_lines(&t),
            Event::Text(t) => {
                let style = self.text_style();
                self.current.push(Span::styled(t.to_string(), style));
            }
            Event::Code(t) => self.current.push(Span::styled(
                format!(" {t} "),
                Style::default().fg(colors::ACCENT).bg(colors::CODE_BG),
            )),
            Event::Html(t) => self.push_literal(&t),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(RULE, Style::default().fg(colors::BORDER))));
            }
            _ => {}
        }
    }
}

/// Convert a reply to owned lines; never returns an empty list.
pub fn to_lines(md: &str) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::default();
    for event in Parser::new_ext(md, Options::ENABLE_TABLES) {
        builder.handle(event);
    }
    builder.flush();
    if builder.lines.is_empty() {
        builder.lines.push(Line::from(""));
    }
    builder.lines
}
