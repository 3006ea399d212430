//! Text input component.
//!
//! This module provides a single-line text input widget with support for:
//! - Character input and deletion
//! - Cursor movement (left/right, home/end)
//! - Read-only fields that display but ignore edits
//! - Visual focus indication

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme::theme;

/// A text input widget.
///
/// The cursor counts characters, not bytes, so multi-byte input is safe.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
    /// Whether edits are ignored.
    read_only: bool,
}

impl TextInput {
    /// Create a new empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Make the input read-only or editable.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move cursor to end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Byte offset of the character at `char_idx`.
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        let len = self.value.chars().count();
        match (key.code, key.modifiers) {
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                if self.cursor < len {
                    self.cursor += 1;
                }
                false
            }
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = len;
                false
            }
            _ if self.read_only => false,
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    true
                } else {
                    false
                }
            }
            (KeyCode::Delete, _) => {
                if self.cursor < len {
                    let at = self.byte_offset(self.cursor);
                    self.value.remove(at);
                    true
                } else {
                    false
                }
            }
            // Ctrl+U - clear line
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    false
                } else {
                    self.clear();
                    true
                }
            }
            // Ctrl+W - delete word before cursor
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return false;
                }
                let end = self.byte_offset(self.cursor);
                let before = &self.value[..end];
                let trimmed = before.trim_end();
                let start = trimmed
                    .rfind(char::is_whitespace)
                    .map(|i| i + 1)
                    .unwrap_or(0);
                let removed = self.value[start..end].chars().count();
                self.value.replace_range(start..end, "");
                self.cursor -= removed;
                true
            }
            _ => false,
        }
    }

    /// Render the input field with a label in its border.
    pub fn render_with_label(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let t = theme();

        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let display = if showing_placeholder {
            self.placeholder.as_str()
        } else {
            self.value.as_str()
        };

        let style = if showing_placeholder || self.read_only {
            Style::default().fg(t.input_placeholder)
        } else if focused {
            Style::default().fg(t.border_focused)
        } else {
            Style::default().fg(t.input_fg)
        };

        let border_style = if focused {
            Style::default().fg(t.border_focused)
        } else {
            Style::default().fg(t.border)
        };

        let title_style = if focused {
            Style::default()
                .fg(t.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.fg)
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(display).style(style).block(block), area);

        if focused && !self.read_only {
            let cursor_x = area.x + 1 + self.cursor as u16;
            if cursor_x < area.x + area.width.saturating_sub(1) {
                frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
impl TextInput {
    /// Create a new input with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_value(value);
        input
    }

    /// Check whether the input is read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Get the cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::new();
        type_str(&mut input, "Jane");
        assert_eq!(input.value(), "Jane");
        assert_eq!(input.cursor(), 4);
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut input = TextInput::with_value("Jne");
        input.handle_input(key(KeyCode::Home));
        input.handle_input(key(KeyCode::Right));
        assert!(input.handle_input(key(KeyCode::Char('a'))));
        assert_eq!(input.value(), "Jane");
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::with_value("abc");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "ab");
        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "b");
        input.handle_input(key(KeyCode::Home));
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new();
        type_str(&mut input, "Zoë");
        assert_eq!(input.cursor(), 3);
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Zo");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::with_value("hello");
        let ctrl_u = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert!(input.handle_input(ctrl_u));
        assert!(input.is_empty());
        assert!(!input.handle_input(ctrl_u));
    }

    #[test]
    fn test_ctrl_w_deletes_word() {
        let mut input = TextInput::with_value("Leanne Graham");
        let ctrl_w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert!(input.handle_input(ctrl_w));
        assert_eq!(input.value(), "Leanne ");
        assert_eq!(input.cursor(), 7);
    }

    #[test]
    fn test_read_only_ignores_edits() {
        let mut input = TextInput::with_value("Bret");
        input.set_read_only(true);
        assert!(!input.handle_input(key(KeyCode::Char('x'))));
        assert!(!input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "Bret");
        // Cursor movement still works
        input.handle_input(key(KeyCode::Home));
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_clear() {
        let mut input = TextInput::with_value("abc");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }
}
