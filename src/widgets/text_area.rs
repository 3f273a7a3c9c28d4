//! Multi-line plain-text editor for draft content.
//!
//! Line-based model with a (row, col) cursor and vertical scrolling. Keeps
//! no styling state; rendering borrows the buffer through [`TextAreaWidget`].

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use crate::ui::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CURSOR_BG, COLOR_TEXT};

#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: 0,
        }
    }

    /// Replace the whole buffer, cursor to the start.
    pub fn set_content(&mut self, content: &str) {
        self.lines = content.split('\n').map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
    }

    /// The buffer joined back into one string.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    fn line_chars(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_index(&self, row: usize, col: usize) -> usize {
        self.lines[row]
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(self.lines[row].len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.row, self.col);
        self.lines[self.row].insert(idx, c);
        self.col += 1;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let idx = self.byte_index(self.row, self.col);
        let rest = self.lines[self.row].split_off(idx);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    /// Delete before the cursor, joining lines at a line start.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let idx = self.byte_index(self.row, self.col);
            self.lines[self.row].remove(idx);
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_chars(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    /// Delete at the cursor, joining lines at a line end.
    pub fn delete(&mut self) {
        if self.col < self.line_chars(self.row) {
            let idx = self.byte_index(self.row, self.col);
            self.lines[self.row].remove(idx);
        } else if self.row + 1 < self.lines.len() {
            let line = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&line);
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_chars(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_chars(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_chars(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.col = 0;
    }

    pub fn move_end(&mut self) {
        self.col = self.line_chars(self.row);
    }

    /// Route an editing key into the buffer. Returns `true` if consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    fn scrolled_for(&self, height: usize) -> usize {
        let mut scroll = self.scroll;
        if self.row < scroll {
            scroll = self.row;
        }
        if height > 0 && self.row >= scroll + height {
            scroll = self.row - height + 1;
        }
        scroll
    }
}

/// Renderable wrapper for [`TextArea`].
pub struct TextAreaWidget<'a> {
    area: &'a TextArea,
    title: &'a str,
    focused: bool,
}

impl<'a> TextAreaWidget<'a> {
    pub fn new(area: &'a TextArea, title: &'a str, focused: bool) -> Self {
        Self {
            area,
            title,
            focused,
        }
    }
}

impl Widget for TextAreaWidget<'_> {
    fn render(self, rect: Rect, buf: &mut Buffer) {
        let border_color = if self.focused {
            COLOR_ACCENT
        } else {
            COLOR_BORDER
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(self.title);
        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let height = inner.height as usize;
        let width = inner.width as usize;
        let scroll = self.area.scrolled_for(height);

        for (i, line) in self
            .area
            .lines
            .iter()
            .skip(scroll)
            .take(height)
            .enumerate()
        {
            let shown: String = line.chars().take(width).collect();
            buf.set_string(
                inner.x,
                inner.y + i as u16,
                &shown,
                Style::default().fg(COLOR_TEXT),
            );
        }

        if self.focused {
            let rel_row = self.area.row.saturating_sub(scroll);
            let col = self.area.col.min(width.saturating_sub(1));
            if rel_row < height {
                let under = self.area.lines[self.area.row]
                    .chars()
                    .nth(col)
                    .unwrap_or(' ');
                buf.set_string(
                    inner.x + col as u16,
                    inner.y + rel_row as u16,
                    under.to_string(),
                    Style::default().fg(COLOR_BORDER).bg(COLOR_CURSOR_BG),
                );
            }
        }
    }
}
