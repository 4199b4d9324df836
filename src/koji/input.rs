//! Input stream
//!
//!     A single-character lookahead cursor over the source text. The stream is the only thing
//!     the lexer reads from; it never looks at the source string directly.
//!
//!     Positions are character offsets (Unicode scalar values), not bytes, so that token ranges
//!     map one-to-one onto the characters a consumer displays. The stream also keeps the byte
//!     offset of the cursor, which lets the lexer slice token values out of the source without
//!     copying characters one by one.
//!
//!     Line and column are 0-based and only used for diagnostics. The line increments and the
//!     column resets exactly when the consumed character is a newline.

use std::fmt;

/// An unrecoverable stream-level failure, carrying the cursor location at the time it was raised.
///
/// Ordinary lexical errors are never reported this way; they live on tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.message, self.line, self.column)
    }
}

impl std::error::Error for StreamError {}

/// Character cursor over a borrowed source string.
#[derive(Debug, Clone)]
pub struct InputStream<'src> {
    source: &'src str,
    /// Cursor position in characters.
    pos: usize,
    /// Cursor position in bytes, always on a char boundary.
    byte_pos: usize,
    line: usize,
    column: usize,
    /// Source length in characters.
    len: usize,
}

impl<'src> InputStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            byte_pos: 0,
            line: 0,
            column: 0,
            len: source.chars().count(),
        }
    }

    /// Consume the character at the cursor. Returns `None` once the input is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        self.byte_pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// The character at the cursor, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.byte_pos..].chars().next()
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.len
    }

    /// Consume characters while `predicate` holds and return the consumed slice.
    pub fn read_while<F>(&mut self, predicate: F) -> &'src str
    where
        F: Fn(char) -> bool,
    {
        let start = self.byte_pos;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.next();
        }
        &self.source[start..self.byte_pos]
    }

    /// Build a diagnostic for an unrecoverable failure at the current cursor location.
    ///
    /// The caller decides how to raise it (usually by returning it inside an `Err`).
    pub fn fail(&self, message: impl Into<String>) -> StreamError {
        StreamError {
            message: message.into(),
            line: self.line,
            column: self.column,
        }
    }

    /// Slice of the source between two byte offsets previously obtained from [`byte_offset`](Self::byte_offset).
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        &self.source[start..end]
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Cursor position in characters.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn byte_offset(&self) -> usize {
        self.byte_pos
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Source length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_peek() {
        let mut input = InputStream::new("ab");
        assert_eq!(input.peek(), Some('a'));
        assert_eq!(input.next(), Some('a'));
        assert_eq!(input.peek(), Some('b'));
        assert_eq!(input.next(), Some('b'));
        assert_eq!(input.peek(), None);
        assert_eq!(input.next(), None);
        assert!(input.at_end());
    }

    #[test]
    fn test_exhaustion_is_not_an_error() {
        let mut input = InputStream::new("");
        assert!(input.at_end());
        assert_eq!(input.next(), None);
        assert_eq!(input.next(), None);
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_positions_count_characters_not_bytes() {
        let mut input = InputStream::new("橋本");
        input.next();
        assert_eq!(input.position(), 1);
        assert_eq!(input.byte_offset(), 3);
        input.next();
        assert_eq!(input.position(), 2);
        assert_eq!(input.len(), 2);
        assert!(input.at_end());
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut input = InputStream::new("ab\nc");
        input.next();
        input.next();
        assert_eq!((input.line(), input.column()), (0, 2));
        input.next();
        assert_eq!((input.line(), input.column()), (1, 0));
        input.next();
        assert_eq!((input.line(), input.column()), (1, 1));
    }

    #[test]
    fn test_read_while() {
        let mut input = InputStream::new("あいう（");
        let run = input.read_while(|ch| ch != '（');
        assert_eq!(run, "あいう");
        assert_eq!(input.peek(), Some('（'));
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn test_fail_carries_location() {
        let mut input = InputStream::new("a\nbc");
        input.next();
        input.next();
        input.next();
        let err = input.fail("unexpected end of input");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 1);
        assert_eq!(err.to_string(), "unexpected end of input (1:1)");
    }
}
