//! Editable text surface.
//!
//! Line storage with a (row, col) cursor in char units. Every content change
//! bumps a revision counter, which lets callers tell edits from pure cursor
//! movement.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Forward,
    Back,
    Head,
    End,
    Top,
    Bottom,
}

/// Spaces inserted for the Tab key.
const TAB: &str = "    ";

#[derive(Debug, Clone)]
pub struct TextBuffer {
    /// Never empty; an empty buffer is one empty line.
    lines: Vec<String>,
    row: usize,
    col: usize,
    revision: u64,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            revision: 0,
        }
    }
}

impl TextBuffer {
    /// Creates a buffer holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::default();
        buf.set_text(text);
        buf
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full content, lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the content is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// Cursor position as (row, col) in char units.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Counter bumped on every content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the whole content and moves the cursor to the end.
    ///
    /// Keeps the revision when the text is unchanged.
    pub fn set_text(&mut self, text: &str) {
        if !self.lines.iter().map(String::as_str).eq(text.split('\n')) {
            self.lines = text.split('\n').map(str::to_string).collect();
            self.revision += 1;
        }
        self.move_cursor(CursorMove::Bottom);
        self.move_cursor(CursorMove::End);
    }

    /// Inserts text after the last character and leaves the cursor there.
    pub fn append_str(&mut self, text: &str) {
        self.move_cursor(CursorMove::Bottom);
        self.move_cursor(CursorMove::End);
        self.insert_str(text);
    }

    /// Inserts text at the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        let at = byte_offset(&self.lines[self.row], self.col);
        let tail = self.lines[self.row].split_off(at);

        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.lines[self.row].push_str(first);
        }
        for piece in pieces {
            self.row += 1;
            self.lines.insert(self.row, piece.to_string());
        }

        self.col = char_len(&self.lines[self.row]);
        self.lines[self.row].push_str(&tail);
        self.revision += 1;
    }

    /// Deletes the char before the cursor, joining with the previous line at
    /// column zero.
    pub fn delete_prev_char(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            self.remove_char_at_cursor();
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
            self.lines[self.row].push_str(&line);
            self.revision += 1;
        }
    }

    /// Deletes the char under the cursor, joining with the next line at the
    /// end of a line.
    pub fn delete_next_char(&mut self) {
        if self.col < char_len(&self.lines[self.row]) {
            self.remove_char_at_cursor();
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            self.revision += 1;
        }
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let last_row = self.lines.len() - 1;
        match movement {
            CursorMove::Up => self.row = self.row.saturating_sub(1),
            CursorMove::Down => self.row = (self.row + 1).min(last_row),
            CursorMove::Forward => {
                if self.col < char_len(&self.lines[self.row]) {
                    self.col += 1;
                } else if self.row < last_row {
                    self.row += 1;
                    self.col = 0;
                }
            }
            CursorMove::Back => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = char_len(&self.lines[self.row]);
                }
            }
            CursorMove::Head => self.col = 0,
            CursorMove::End => self.col = char_len(&self.lines[self.row]),
            CursorMove::Top => self.row = 0,
            CursorMove::Bottom => self.row = last_row,
        }
        self.col = self.col.min(char_len(&self.lines[self.row]));
    }

    /// Applies a key press. Returns true if the content changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        let before = self.revision;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                let mut utf8 = [0u8; 4];
                self.insert_str(ch.encode_utf8(&mut utf8));
            }
            KeyCode::Enter => self.insert_str("\n"),
            KeyCode::Tab => self.insert_str(TAB),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left => self.move_cursor(CursorMove::Back),
            KeyCode::Right => self.move_cursor(CursorMove::Forward),
            KeyCode::Up => self.move_cursor(CursorMove::Up),
            KeyCode::Down => self.move_cursor(CursorMove::Down),
            KeyCode::Home if ctrl => self.move_cursor(CursorMove::Top),
            KeyCode::End if ctrl => self.move_cursor(CursorMove::Bottom),
            KeyCode::Home => self.move_cursor(CursorMove::Head),
            KeyCode::End => self.move_cursor(CursorMove::End),
            _ => {}
        }
        self.revision != before
    }

    fn remove_char_at_cursor(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_offset(line, self.col);
        line.remove(at);
        self.revision += 1;
    }
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte offset of char column `col`, or the line length past the end.
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn set_text_keeps_trailing_newlines() {
        let buf = TextBuffer::from_text("a = {\n}\n\n");
        assert_eq!(buf.text(), "a = {\n}\n\n");
        assert_eq!(buf.cursor(), (3, 0));
    }

    #[test]
    fn set_text_with_same_content_keeps_revision() {
        let mut buf = TextBuffer::from_text("abc");
        let rev = buf.revision();
        buf.set_text("abc");
        assert_eq!(buf.revision(), rev);
        buf.set_text("abd");
        assert!(buf.revision() > rev);
    }

    #[test]
    fn append_str_goes_to_end_regardless_of_cursor() {
        let mut buf = TextBuffer::from_text("first\nsecond");
        buf.move_cursor(CursorMove::Top);
        buf.move_cursor(CursorMove::Head);

        buf.append_str("block\n\n");

        assert_eq!(buf.text(), "first\nsecondblock\n\n");
        assert_eq!(buf.cursor(), (3, 0));
    }

    #[test]
    fn insert_multiline_in_middle_of_line() {
        let mut buf = TextBuffer::from_text("ab");
        buf.move_cursor(CursorMove::Back);
        buf.insert_str("1\n2\n3");
        assert_eq!(buf.lines(), ["a1", "2", "3b"]);
        assert_eq!(buf.cursor(), (2, 1));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_cursor(CursorMove::Head);
        assert!(buf.input(key(KeyCode::Backspace)));
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), (0, 2));
    }

    #[test]
    fn delete_removes_multibyte_char() {
        let mut buf = TextBuffer::from_text("aéb");
        buf.move_cursor(CursorMove::Head);
        buf.move_cursor(CursorMove::Forward);
        assert!(buf.input(key(KeyCode::Delete)));
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn delete_at_end_joins_next_line() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_cursor(CursorMove::Top);
        buf.move_cursor(CursorMove::End);
        buf.delete_next_char();
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn backspace_at_start_is_not_an_edit() {
        let mut buf = TextBuffer::from_text("abc");
        buf.move_cursor(CursorMove::Head);
        assert!(!buf.input(key(KeyCode::Backspace)));
    }

    #[test]
    fn vertical_moves_clamp_column() {
        let mut buf = TextBuffer::from_text("long line\nab");
        buf.move_cursor(CursorMove::Up);
        buf.move_cursor(CursorMove::End);
        buf.move_cursor(CursorMove::Down);
        assert_eq!(buf.cursor(), (1, 2));
    }

    #[test]
    fn cursor_keys_do_not_count_as_edits() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(!buf.input(key(KeyCode::Left)));
        assert!(!buf.input(key(KeyCode::Home)));
        assert!(buf.input(key(KeyCode::Char('x'))));
        assert_eq!(buf.text(), "xabc");
    }

    #[test]
    fn tab_inserts_spaces() {
        let mut buf = TextBuffer::default();
        buf.input(key(KeyCode::Tab));
        assert_eq!(buf.text(), "    ");
    }

    #[test]
    fn is_blank_ignores_whitespace_lines() {
        assert!(TextBuffer::default().is_blank());
        assert!(TextBuffer::from_text("  \n\t\n").is_blank());
        assert!(!TextBuffer::from_text("\n}\n").is_blank());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut buf = TextBuffer::default();
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;
        assert!(!buf.input(release));
        assert_eq!(buf.text(), "");
    }
}
