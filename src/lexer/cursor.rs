//! Character cursor over the source text

use super::token::SourceLocation;

/// Walks the source one character at a time, tracking line and column.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    pub fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Peek at the current character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek `n` characters past the current one
    pub fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Consume one character. Newlines bump the line and reset the column.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Index of the next unread character
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Text between two positions previously returned by [`Cursor::position`]
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.input.len());
        let start = start.min(end);
        self.input[start..end].iter().collect()
    }

    /// Character at an absolute index, consumed or not
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.input.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_lines() {
        let mut cursor = Cursor::new("a\nbc");
        assert_eq!(cursor.location(), SourceLocation::new(1, 1));
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.location(), SourceLocation::new(1, 2));
        assert_eq!(cursor.advance(), Some('\n'));
        assert_eq!(cursor.location(), SourceLocation::new(2, 1));
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.location(), SourceLocation::new(2, 3));
    }

    #[test]
    fn test_peek_and_slice() {
        let mut cursor = Cursor::new("tile x");
        assert_eq!(cursor.peek(), Some('t'));
        assert_eq!(cursor.peek_ahead(5), Some('x'));
        assert_eq!(cursor.peek_ahead(6), None);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice(0, cursor.position()), "ti");
        assert_eq!(cursor.slice(4, 99), " x");
        assert_eq!(cursor.char_at(0), Some('t'));
        assert_eq!(cursor.char_at(6), None);
    }
}
