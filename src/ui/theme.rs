//! Theme: dark canvas, accent labels, red error turns.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Main canvas (chat area).
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Header, input bar, status, sidebar.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// Prompt and You label.
    pub const ACCENT: Color = Color::Rgb(0x6b, 0xbc, 0xff);
    /// Assistant label.
    pub const ACCENT_SOFT: Color = Color::Rgb(0x99, 0xd4, 0xff);
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    /// Hints.
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    pub const CODE_BG: Color = Color::Rgb(0x1e, 0x24, 0x2e);
    pub const HEADING: Color = Color::Rgb(0xe8, 0xc5, 0x7a);
    pub const ERROR: Color = Color::Rgb(0xf0, 0x6c, 0x6c);
}

pub const HEADER_HEIGHT: u16 = 1;
pub const MIN_CHAT_LINES: u16 = 3;
pub const STATUS_HEIGHT: u16 = 1;
/// Top border + prompt line.
pub const INPUT_HEIGHT: u16 = 2;
/// Blank line between messages.
pub const MESSAGE_GAP: usize = 1;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
pub const SIDEBAR_WIDTH: u16 = 28;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
