//! Common lexer module
//!
//! Errors raised by the lexing API itself. Malformed input is never one of them; it is reported
//! on tokens. These only cover misuse of the pull interface.

use crate::koji::input::StreamError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A token was demanded after the input was exhausted.
    UnexpectedEnd(StreamError),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedEnd(err) => write!(f, "Lexing error: {}", err),
        }
    }
}

impl std::error::Error for LexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LexError::UnexpectedEnd(err) => Some(err),
        }
    }
}

impl From<LexError> for String {
    fn from(err: LexError) -> Self {
        err.to_string()
    }
}
