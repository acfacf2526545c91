//! Rope-backed offset/position conversion for headless documents.

use crate::host::Position;
use ropey::Rope;

/// Line index over a document's text.
///
/// Rope provides O(log N) conversion between character offsets and logical positions.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an index over an empty document.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build an index from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Position of `char_offset`, clamped to the end of the document.
    pub fn char_offset_to_position(&self, char_offset: usize) -> Position {
        let char_offset = char_offset.min(self.rope.len_chars());

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);
        Position::new(line_idx, char_offset - line_start_char)
    }

    /// Character offset of `position`, clamped to the line and document end.
    pub fn position_to_char_offset(&self, position: Position) -> usize {
        if position.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }

        let line_start_char = self.rope.line_to_char(position.line);
        line_start_char + position.column.min(self.line_len(position.line))
    }

    /// Characters on `line`, excluding its line break (`\r\n` counts as one break).
    fn line_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        if len > 0 && is_line_break(slice.char(len - 1)) {
            len -= 1;
            if slice.char(len) == '\n' && len > 0 && slice.char(len - 1) == '\r' {
                len -= 1;
            }
        }
        len
    }

    /// Total line count.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Complete text.
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}
