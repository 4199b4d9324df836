//! The token
//!
//!     A token is the atomic lexical unit: a type, the exact substring it consumed, a half-open
//!     character range `[start, end)` into the source and its 0-based emission index.
//!
//!     Bracket-class tokens additionally carry `pair_index`, the index of their matching
//!     counterpart. The link is always mutual once established. A bracket-class token that ends up
//!     without a pair is always an error token.
//!
//!     Tokens are created by the lexer and are immutable afterwards, with two exceptions owned by
//!     the lexer itself: an opener receives its `pair_index` when its closer is lexed, and openers
//!     left on the bracket stack at end of input are marked as errors.

use super::error::TokenError;
use super::kind::TokenType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenType,
    pub value: String,
    pub start: usize,
    pub end: usize,
    /// Emission order; equal to this token's position in the full token sequence.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TokenError>,
}

impl Token {
    pub fn new(
        kind: TokenType,
        value: impl Into<String>,
        range: Range<usize>,
        index: usize,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            start: range.start,
            end: range.end,
            index,
            pair_index: None,
            error: None,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn covers(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error message; present exactly when the token is an error.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn is_paired(&self) -> bool {
        self.pair_index.is_some()
    }

    pub(crate) fn mark_error(&mut self, error: TokenError) {
        self.error = Some(error);
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}) {}..{}",
            self.kind, self.value, self.start, self.end
        )
    }
}
