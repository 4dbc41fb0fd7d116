//! App container: chat widget, history, menu, and action dispatch.

use crate::actions::Action;
use crate::state::{AppState, ChatState, Message, Transcript};
use crate::widget::{ChatWidget, WidgetError};

const PAGE: usize = 10;

pub struct App {
    pub state: AppState,
    pub widget: ChatWidget<ChatState>,
    endpoint_label: String,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl App {
    pub fn new(widget: ChatWidget<ChatState>, endpoint_label: String) -> Self {
        Self {
            state: AppState::default(),
            widget,
            endpoint_label,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn endpoint_label(&self) -> &str {
        &self.endpoint_label
    }

    pub fn bootstrap(&mut self) -> Result<(), WidgetError> {
        self.widget.initialize()?;
        self.widget.transcript_mut().append_turn(Message::system(format!(
            "Connected to {}. Type a message and press Enter.",
            self.endpoint_label
        )));
        Ok(())
    }

    /// Applies replies that arrived since the last tick.
    pub fn poll_results(&mut self) {
        self.widget.poll_responses();
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::Char(c) => self.widget.input_mut().insert(c),
            Action::Backspace => self.widget.input_mut().backspace(),
            Action::ClearInput => self.widget.input_mut().clear(),
            Action::Submit => self.submit_input(),

            Action::ChatScrollUp => self.widget.transcript_mut().scroll_up(1),
            Action::ChatScrollDown => self.widget.transcript_mut().scroll_down(1),
            Action::ChatScrollPageUp => self.widget.transcript_mut().scroll_up(PAGE),
            Action::ChatScrollPageDown => self.widget.transcript_mut().scroll_down(PAGE),
            Action::ChatScrollTop => self.widget.transcript_mut().scroll_to_top(),
            Action::ChatScrollBottom => self.widget.transcript_mut().scroll_to_end(),

            Action::HistoryUp => self.history_up(),
            Action::HistoryDown => self.history_down(),

            Action::ToggleMenu => self.state.toggle_menu(),
        }
    }

    fn submit_input(&mut self) {
        let raw = self.widget.input().value().to_string();
        if let Err(e) = self.widget.handle_submit() {
            tracing::warn!(error = %e, "submit ignored");
            return;
        }
        if !raw.is_empty() && self.state.history.last() != Some(&raw) {
            self.state.history.push(raw);
        }
        self.state.history_index = self.state.history.len();
    }

    fn history_up(&mut self) {
        if self.state.history_index > 0 {
            self.state.history_index -= 1;
            let entry = self.state.history[self.state.history_index].clone();
            self.widget.input_mut().set(entry);
        }
    }

    fn history_down(&mut self) {
        if self.state.history_index < self.state.history.len() {
            self.state.history_index += 1;
            let entry = self
                .state
                .history
                .get(self.state.history_index)
                .cloned()
                .unwrap_or_default();
            self.widget.input_mut().set(entry);
        }
    }
}
