//! Frame render: header, chat (+ sidebar), input bar, status.

use ratatui::Frame;

use crate::app::App;
use crate::ui::layout;
use crate::ui::theme::SPINNER;
use crate::ui::widgets::{
    render_chat, render_header, render_input, render_sidebar, render_status,
};

pub fn render(f: &mut Frame, app: &mut App, tick: usize) {
    let regions = layout::compute(f.area(), app.state.menu_visible);
    let spinner_char = SPINNER[tick % SPINNER.len()];

    // Chat block has a border on each side.
    let chat = app.widget.transcript_mut();
    chat.viewport_height = regions.chat.height.saturating_sub(2) as usize;
    chat.viewport_width = regions.chat.width.saturating_sub(2);

    render_header(f, regions.header, app.endpoint_label());
    if let Some(sidebar) = regions.sidebar {
        render_sidebar(f, &app.state.history, sidebar);
    }
    render_chat(f, app.widget.transcript(), regions.chat, spinner_char);
    render_input(f, app.widget.input(), regions.input);
    render_status(f, regions.status, app.widget.pending_count(), spinner_char);
}
