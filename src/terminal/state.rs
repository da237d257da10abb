use ratatui::widgets::ListState;

/// Mail shown in the detail pane.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedMail {
    pub ident: String,
    pub subject: String,
    pub body: String,
}

/// Terminal-side state the list widget does not own: cursor position, the
/// opened mail, and the status line.
pub struct UiState {
    pub cursor: ListState,
    pub opened: Option<OpenedMail>,
    pub has_checked: bool,
    pub notice: String,
    pub body_scroll: u16,
}

impl UiState {
    pub fn new() -> Self {
        let mut s = Self {
            cursor: ListState::default(),
            opened: None,
            has_checked: false,
            notice: String::new(),
            body_scroll: 0,
        };
        s.cursor.select(Some(0));
        s
    }

    pub fn move_cursor(&mut self, delta: i32, len: usize) {
        if len == 0 {
            self.cursor.select(None);
            return;
        }
        let cur = self.cursor.selected().unwrap_or(0) as i32;
        let next = (cur + delta).clamp(0, len as i32 - 1) as usize;
        self.cursor.select(Some(next));
    }

    pub fn reset_scroll(&mut self, len: usize) {
        self.cursor.select(if len > 0 { Some(0) } else { None });
        self.body_scroll = 0;
    }

    pub fn scroll_body(&mut self, delta: i32) {
        if self.opened.is_none() {
            return;
        }
        if delta < 0 {
            self.body_scroll = self.body_scroll.saturating_sub((-delta) as u16);
        } else {
            self.body_scroll = self.body_scroll.saturating_add(delta as u16);
        }
    }

    pub fn close_mail(&mut self) {
        self.opened = None;
        self.body_scroll = 0;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
