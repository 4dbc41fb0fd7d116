//! Single-column layout; the chat row splits off a sidebar when the menu is open.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HEADER_HEIGHT, INPUT_HEIGHT, MARGIN_X, MIN_CHAT_LINES, SIDEBAR_WIDTH, STATUS_HEIGHT};

#[derive(Clone, Debug)]
pub struct LayoutRegions {
    pub header: Rect,
    pub chat: Rect,
    pub sidebar: Option<Rect>,
    pub input: Rect,
    pub status: Rect,
}

pub fn compute(area: Rect, menu_visible: bool) -> LayoutRegions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MIN_CHAT_LINES),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let body = Rect {
        x: area.x + MARGIN_X,
        y: chunks[1].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    let (sidebar, chat) = if menu_visible {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(body);
        (Some(cols[0]), cols[1])
    } else {
        (None, body)
    };
    LayoutRegions {
        header: chunks[0],
        chat,
        sidebar,
        input: chunks[2],
        status: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_takes_width_from_chat() {
        let area = Rect::new(0, 0, 100, 30);
        let closed = compute(area, false);
        let open = compute(area, true);
        assert!(closed.sidebar.is_none());
        assert_eq!(open.sidebar.map(|r| r.width), Some(SIDEBAR_WIDTH));
        assert_eq!(open.chat.width + SIDEBAR_WIDTH, closed.chat.width);
        assert_eq!(open.chat.height, closed.chat.height);
    }
}
