//! App state: transcript, input field, history, menu.

/// Chat message role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Bot,
    Error,
    System,
}

impl MessageRole {
    /// Transcript label; empty for the startup banner.
    pub fn label(self) -> &'static str {
        match self {
            MessageRole::User => "You",
            MessageRole::Bot => "Assistant",
            MessageRole::Error => "Error",
            MessageRole::System => "",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: String) -> Self {
        Self { role: MessageRole::User, content }
    }
    pub fn bot(content: String) -> Self {
        Self { role: MessageRole::Bot, content }
    }
    pub fn error(content: String) -> Self {
        Self { role: MessageRole::Error, content }
    }
    pub fn system(content: String) -> Self {
        Self { role: MessageRole::System, content }
    }

    /// "You: hello", or the bare content for unlabelled roles.
    pub fn display_text(&self) -> String {
        match self.role.label() {
            "" => self.content.clone(),
            label => format!("{}: {}", label, self.content),
        }
    }
}

/// Identifies one submitted turn from request to response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnToken(u64);

impl TurnToken {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for TurnToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// One rendered row group in the transcript.
#[derive(Clone, Debug)]
pub enum Entry {
    Turn(Message),
    Typing(TurnToken),
}

/// Rendering interface the chat widget drives.
pub trait Transcript {
    fn append_turn(&mut self, message: Message);
    fn append_indicator(&mut self, token: TurnToken);
    /// Removes the indicator for `token` only. Returns false if none exists.
    fn remove_indicator(&mut self, token: TurnToken) -> bool;
    /// Puts `message` where the indicator for `token` was. Falls back to
    /// appending when the indicator is gone. Returns whether it was found.
    fn resolve_indicator(&mut self, token: TurnToken, message: Message) -> bool {
        let found = self.remove_indicator(token);
        self.append_turn(message);
        found
    }
    fn scroll_to_end(&mut self);
}

/// Chat: ordered entries + scroll position.
#[derive(Clone, Debug)]
pub struct ChatState {
    pub entries: Vec<Entry>,
    /// First visible line when not following the tail.
    pub scroll: usize,
    /// Pin the view to the last line.
    pub follow: bool,
    /// Inner size of the chat area from the last draw.
    pub viewport_height: usize,
    pub viewport_width: u16,
}

impl Default for ChatState {
    fn default() -> Self {
        Self { entries: Vec::new(), scroll: 0, follow: true, viewport_height: 0, viewport_width: 0 }
    }
}

impl ChatState {
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|e| match e {
            Entry::Turn(m) => Some(m),
            Entry::Typing(_) => None,
        })
    }

    pub fn indicator_count(&self) -> usize {
        self.entries.iter().filter(|e| matches!(e, Entry::Typing(_))).count()
    }

    /// Rows the transcript occupies once wrapped at the last drawn width.
    pub fn line_count(&self) -> usize {
        crate::ui::transcript_height(self, self.viewport_width)
    }

    pub fn max_scroll(&self) -> usize {
        self.line_count().saturating_sub(self.viewport_height)
    }

    /// Scroll offset to draw with.
    pub fn effective_scroll(&self) -> usize {
        if self.follow {
            self.max_scroll()
        } else {
            self.scroll.min(self.max_scroll())
        }
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.effective_scroll().saturating_sub(lines);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.max_scroll();
        self.scroll = self.effective_scroll().saturating_add(lines).min(max);
        self.follow = self.scroll >= max;
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
        self.follow = false;
    }
}

impl Transcript for ChatState {
    fn append_turn(&mut self, message: Message) {
        self.entries.push(Entry::Turn(message));
    }

    fn append_indicator(&mut self, token: TurnToken) {
        self.entries.push(Entry::Typing(token));
    }

    fn remove_indicator(&mut self, token: TurnToken) -> bool {
        match self.entries.iter().position(|e| matches!(e, Entry::Typing(t) if *t == token)) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    fn resolve_indicator(&mut self, token: TurnToken, message: Message) -> bool {
        match self.entries.iter().position(|e| matches!(e, Entry::Typing(t) if *t == token)) {
            Some(idx) => {
                self.entries[idx] = Entry::Turn(message);
                true
            }
            None => {
                self.entries.push(Entry::Turn(message));
                false
            }
        }
    }

    fn scroll_to_end(&mut self) {
        self.follow = true;
        self.scroll = self.max_scroll();
    }
}

/// Single-line text field with a byte cursor.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub buffer: String,
    pub cursor: usize,
}

impl InputState {
    pub fn insert(&mut self, c: char) {
        let pos = self.cursor.min(self.buffer.len());
        self.buffer.insert(pos, c);
        self.cursor = pos + c.len_utf8();
    }

    pub fn backspace(&mut self) {
        let pos = self.cursor.min(self.buffer.len());
        if let Some((idx, _)) = self.buffer[..pos].char_indices().next_back() {
            self.buffer.remove(idx);
            self.cursor = idx;
        }
    }

    pub fn set(&mut self, value: String) {
        self.cursor = value.len();
        self.buffer = value;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Returns the value verbatim and leaves the field empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.buffer)
    }

    pub fn value(&self) -> &str {
        self.buffer.as_str()
    }
}

/// Global app state outside the widget: history and the menu panel.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub history: Vec<String>,
    pub history_index: usize,
    pub menu_visible: bool,
}

impl AppState {
    pub fn toggle_menu(&mut self) {
        self.menu_visible = !self.menu_visible;
    }
}
