//! Keybindings: Enter submit, Esc/Ctrl+C quit, Ctrl+L clear, Ctrl+O conversation panel,
//! Up/Down history, PgUp/PgDn and Ctrl+arrows scroll.

use crate::actions::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

pub fn key_to_action(event: &KeyEvent) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);
    let ctrl = mods.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('l') if ctrl => Some(Action::ClearInput),
        KeyCode::Char('o') if ctrl => Some(Action::ToggleMenu),
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter if mods.is_empty() => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),

        KeyCode::Up if ctrl => Some(Action::ChatScrollUp),
        KeyCode::Down if ctrl => Some(Action::ChatScrollDown),
        KeyCode::Home if ctrl => Some(Action::ChatScrollTop),
        KeyCode::End if ctrl => Some(Action::ChatScrollBottom),
        KeyCode::Up => Some(Action::HistoryUp),
        KeyCode::Down => Some(Action::HistoryDown),
        KeyCode::PageUp => Some(Action::ChatScrollPageUp),
        KeyCode::PageDown => Some(Action::ChatScrollPageDown),

        // Allow Shift/Alt for accented chars; only block Ctrl/Cmd.
        KeyCode::Char(c) if !ctrl && !mods.contains(KeyModifiers::SUPER) => Some(Action::Char(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn enter_submits_and_ctrl_o_toggles_menu() {
        assert_eq!(key_to_action(&press(KeyCode::Enter, KeyModifiers::NONE)), Some(Action::Submit));
        assert_eq!(
            key_to_action(&press(KeyCode::Char('o'), KeyModifiers::CONTROL)),
            Some(Action::ToggleMenu)
        );
    }

    #[test]
    fn plain_letters_go_to_input() {
        assert_eq!(key_to_action(&press(KeyCode::Char('q'), KeyModifiers::NONE)), Some(Action::Char('q')));
        assert_eq!(key_to_action(&press(KeyCode::Char('<'), KeyModifiers::SHIFT)), Some(Action::Char('<')));
    }

    #[test]
    fn release_events_are_ignored() {
        let event = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(key_to_action(&event), None);
    }

    #[test]
    fn ctrl_arrows_scroll_plain_arrows_recall_history() {
        assert_eq!(key_to_action(&press(KeyCode::Up, KeyModifiers::CONTROL)), Some(Action::ChatScrollUp));
        assert_eq!(key_to_action(&press(KeyCode::Up, KeyModifiers::NONE)), Some(Action::HistoryUp));
        assert_eq!(key_to_action(&press(KeyCode::End, KeyModifiers::CONTROL)), Some(Action::ChatScrollBottom));
    }
}
