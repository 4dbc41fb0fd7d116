//! TUI widgets: header, chat, input, status, conversation sidebar.

mod chat;
mod header;
mod input;
mod sidebar;
mod status;

pub use chat::transcript_height;
pub use chat::render as render_chat;
pub use header::render as render_header;
pub use input::render as render_input;
pub use sidebar::render as render_sidebar;
pub use status::render as render_status;
