use std::cmp::min;

/// Multi-line text with a cursor. `cursor_x` counts characters, not bytes.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    pub lines: Vec<String>,
    pub cursor_x: usize,
    pub cursor_y: usize,
    /// Set by every edit; callers reset it once they have reacted.
    pub modified: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_x: 0,
            cursor_y: 0,
            modified: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.set_text(text);
        buf
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn current_line(&self) -> &str {
        &self.lines[self.cursor_y]
    }

    fn line_len(&self, y: usize) -> usize {
        self.lines[y].chars().count()
    }

    fn byte_index(line: &str, x: usize) -> usize {
        line.char_indices()
            .nth(x)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.insert_newline();
            return;
        }
        let line = &mut self.lines[self.cursor_y];
        let at = Self::byte_index(line, self.cursor_x);
        line.insert(at, c);
        self.cursor_x += 1;
        self.modified = true;
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_y];
        let at = Self::byte_index(line, self.cursor_x);
        let remainder = line.split_off(at);
        self.cursor_y += 1;
        self.cursor_x = 0;
        self.lines.insert(self.cursor_y, remainder);
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        if self.cursor_x > 0 {
            let line = &mut self.lines[self.cursor_y];
            let at = Self::byte_index(line, self.cursor_x - 1);
            line.remove(at);
            self.cursor_x -= 1;
            self.modified = true;
        } else if self.cursor_y > 0 {
            let current = self.lines.remove(self.cursor_y);
            self.cursor_y -= 1;
            self.cursor_x = self.line_len(self.cursor_y);
            self.lines[self.cursor_y].push_str(&current);
            self.modified = true;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_x < self.line_len(self.cursor_y) {
            let line = &mut self.lines[self.cursor_y];
            let at = Self::byte_index(line, self.cursor_x);
            line.remove(at);
            self.modified = true;
        } else if self.cursor_y + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_y + 1);
            self.lines[self.cursor_y].push_str(&next);
            self.modified = true;
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_x > 0 {
            self.cursor_x -= 1;
        } else if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = self.line_len(self.cursor_y);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_x < self.line_len(self.cursor_y) {
            self.cursor_x += 1;
        } else if self.cursor_y + 1 < self.lines.len() {
            self.cursor_y += 1;
            self.cursor_x = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor_y > 0 {
            self.cursor_y -= 1;
            self.cursor_x = min(self.cursor_x, self.line_len(self.cursor_y));
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor_y + 1 < self.lines.len() {
            self.cursor_y += 1;
            self.cursor_x = min(self.cursor_x, self.line_len(self.cursor_y));
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor_x = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor_x = self.line_len(self.cursor_y);
    }

    /// Replace the content and park the cursor at the end. Does not count
    /// as an edit.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(String::from).collect();
        self.cursor_y = self.lines.len() - 1;
        self.cursor_x = self.line_len(self.cursor_y);
        self.modified = false;
    }

    pub fn clear(&mut self) {
        self.set_text("");
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert_eq!(buf.lines, vec![""]);
        assert_eq!((buf.cursor_x, buf.cursor_y), (0, 0));
        assert!(!buf.modified);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_puts_cursor_at_end() {
        let buf = TextBuffer::from_text("SELECT id\nFROM users");
        assert_eq!(buf.lines, vec!["SELECT id", "FROM users"]);
        assert_eq!((buf.cursor_x, buf.cursor_y), (10, 1));
        assert!(!buf.modified);
    }

    #[test]
    fn test_insert_and_text() {
        let mut buf = TextBuffer::new();
        for c in "id=1".chars() {
            buf.insert_char(c);
        }
        assert_eq!(buf.text(), "id=1");
        assert!(buf.modified);
    }

    #[test]
    fn test_insert_multibyte() {
        let mut buf = TextBuffer::from_text("name='é'");
        buf.move_left();
        buf.insert_char('è');
        assert_eq!(buf.text(), "name='éè'");
        buf.backspace();
        buf.backspace();
        assert_eq!(buf.text(), "name=''");
    }

    #[test]
    fn test_newline_and_join() {
        let mut buf = TextBuffer::from_text("SELECT id FROM t");
        buf.move_to_line_start();
        for _ in 0..9 {
            buf.move_right();
        }
        buf.insert_newline();
        assert_eq!(buf.lines, vec!["SELECT id", " FROM t"]);
        buf.backspace();
        assert_eq!(buf.text(), "SELECT id FROM t");
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut buf = TextBuffer::from_text("a\nb");
        buf.move_up();
        buf.move_to_line_end();
        buf.delete();
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut buf = TextBuffer::new();
        buf.backspace();
        assert!(!buf.modified);
    }

    #[test]
    fn test_vertical_moves_clamp() {
        let mut buf = TextBuffer::from_text("long line\nab");
        buf.move_up();
        buf.move_to_line_end();
        buf.move_down();
        assert_eq!((buf.cursor_x, buf.cursor_y), (2, 1));
    }
}
