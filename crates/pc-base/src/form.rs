/// Editable text buffer backing the form inputs and text areas.
///
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
    /// Newlines are accepted (text area) instead of dropped (input)
    pub multiline: bool,
    /// Shown but not editable (path of a prompt being edited)
    pub read_only: bool,
}

impl TextField {
    pub fn input() -> Self {
        Self::default()
    }

    pub fn text_area() -> Self {
        Self { multiline: true, ..Self::default() }
    }

    /// Replace the content and put the cursor at the end
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if !self.multiline {
            self.text.retain(|c| c != '\n' && c != '\r');
        }
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn insert_char(&mut self, c: char) {
        if self.read_only || (c == '\n' && !self.multiline) {
            return;
        }
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text, normalizing line endings
    pub fn insert_str(&mut self, s: &str) {
        if self.read_only {
            return;
        }
        let mut normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        if !self.multiline {
            normalized = normalized.replace('\n', " ");
        }
        self.text.insert_str(self.cursor, &normalized);
        self.cursor += normalized.len();
    }

    pub fn backspace(&mut self) {
        if self.read_only || self.cursor == 0 {
            return;
        }
        let prev = self.prev_boundary();
        self.text.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.read_only || self.cursor >= self.text.len() {
            return;
        }
        let next = self.next_boundary();
        self.text.replace_range(self.cursor..next, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    /// Start of the current line
    pub fn move_home(&mut self) {
        self.cursor = self.line_start(self.cursor);
    }

    /// End of the current line
    pub fn move_end(&mut self) {
        self.cursor = self.text[self.cursor..].find('\n').map(|i| self.cursor + i).unwrap_or(self.text.len());
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = self.text[start..self.cursor].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor = self.offset_at_col(prev_start, col);
    }

    pub fn move_down(&mut self) {
        let Some(nl) = self.text[self.cursor..].find('\n').map(|i| self.cursor + i) else {
            self.cursor = self.text.len();
            return;
        };
        let col = self.text[self.line_start(self.cursor)..self.cursor].chars().count();
        self.cursor = self.offset_at_col(nl + 1, col);
    }

    /// (line, column) of the cursor, both zero-based, column in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let col = before[self.line_start(self.cursor)..].chars().count();
        (line, col)
    }

    fn line_start(&self, pos: usize) -> usize {
        self.text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    /// Byte offset `col` chars into the line starting at `start`, clamped to that line
    fn offset_at_col(&self, start: usize, col: usize) -> usize {
        let mut offset = start;
        for (taken, c) in self.text[start..].chars().enumerate() {
            if taken == col || c == '\n' {
                break;
            }
            offset += c.len_utf8();
        }
        offset
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..].chars().next().map(|c| self.cursor + c.len_utf8()).unwrap_or(self.cursor)
    }
}
