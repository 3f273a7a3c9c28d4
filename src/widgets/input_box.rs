//! Single-line text input with cursor handling and horizontal scrolling.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CURSOR_BG, COLOR_TEXT};

/// A single-line input field.
///
/// Holds content, a character-index cursor, and a horizontal scroll offset
/// so long values stay visible. Rendering goes through
/// [`InputBoxWidget`], which adds the border, title, and optional masking
/// (password fields).
#[derive(Debug, Clone, Default)]
pub struct InputBox {
    content: String,
    cursor: usize,
    scroll: usize,
}

impl InputBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// An input pre-filled with `content`, cursor at the end.
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self {
            content,
            cursor,
            scroll: 0,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.content.chars().count();
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn byte_index(&self) -> usize {
        self.content
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.content.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index();
            self.content.remove(idx);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.chars().count() {
            let idx = self.byte_index();
            self.content.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.content.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.chars().count();
    }

    /// Route an editing key into the field. Returns `true` if consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.move_home();
                true
            }
            KeyCode::End => {
                self.move_end();
                true
            }
            _ => false,
        }
    }

    fn visible_window(&self, width: usize) -> (usize, String) {
        let mut scroll = self.scroll;
        if width > 0 {
            if self.cursor < scroll {
                scroll = self.cursor;
            }
            if self.cursor >= scroll + width {
                scroll = self.cursor - width + 1;
            }
        }
        let text: String = self.content.chars().skip(scroll).take(width).collect();
        (scroll, text)
    }
}

/// Renderable wrapper for [`InputBox`].
pub struct InputBoxWidget<'a> {
    input: &'a InputBox,
    title: &'a str,
    focused: bool,
    masked: bool,
}

impl<'a> InputBoxWidget<'a> {
    pub fn new(input: &'a InputBox, title: &'a str, focused: bool) -> Self {
        Self {
            input,
            title,
            focused,
            masked: false,
        }
    }

    /// Render `•` instead of the stored characters (password fields).
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }
}

impl Widget for InputBoxWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            COLOR_ACCENT
        } else {
            COLOR_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let width = inner.width as usize;
        let (scroll, visible) = self.input.visible_window(width);
        let shown: String = if self.masked {
            visible.chars().map(|_| '•').collect()
        } else {
            visible
        };

        buf.set_string(inner.x, inner.y, &shown, Style::default().fg(COLOR_TEXT));

        if self.focused {
            let cursor_x = (self.input.cursor - scroll) as u16;
            if cursor_x < inner.width {
                let under = shown.chars().nth(cursor_x as usize).unwrap_or(' ');
                buf.set_string(
                    inner.x + cursor_x,
                    inner.y,
                    under.to_string(),
                    Style::default().fg(COLOR_BORDER).bg(COLOR_CURSOR_BG),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_read() {
        let mut input = InputBox::new();
        assert!(input.is_empty());
        input.insert_char('h');
        input.insert_char('i');
        assert_eq!(input.content(), "hi");
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = InputBox::with_content("abc");
        input.backspace();
        assert_eq!(input.content(), "ab");
        input.move_home();
        input.delete();
        assert_eq!(input.content(), "b");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = InputBox::with_content("ab");
        input.move_right();
        input.move_right();
        input.move_left();
        input.move_left();
        input.move_left();
        input.insert_char('x');
        assert_eq!(input.content(), "xab");
    }

    #[test]
    fn insert_mid_string() {
        let mut input = InputBox::with_content("ad");
        input.move_home();
        input.move_right();
        input.insert_char('b');
        input.insert_char('c');
        assert_eq!(input.content(), "abcd");
    }

    #[test]
    fn handles_multibyte_chars() {
        let mut input = InputBox::new();
        input.insert_char('é');
        input.insert_char('ü');
        input.backspace();
        assert_eq!(input.content(), "é");
    }

    #[test]
    fn set_content_moves_cursor_to_end() {
        let mut input = InputBox::new();
        input.set_content("09:00");
        input.insert_char('!');
        assert_eq!(input.content(), "09:00!");
    }

    #[test]
    fn visible_window_follows_cursor() {
        let input = InputBox::with_content("0123456789");
        let (scroll, text) = input.visible_window(4);
        // Cursor at end: window shows the tail.
        assert_eq!(scroll, 7);
        assert_eq!(text, "789");
    }

    #[test]
    fn key_routing() {
        use crossterm::event::{KeyEvent, KeyModifiers};
        let mut input = InputBox::new();
        assert!(input.handle_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)));
        assert!(input.handle_key(&KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE)));
        assert!(!input.handle_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
        assert!(input.is_empty());
    }
}
