//! Lexer
//!
//! This module turns koji source text into a flat, indexed token stream.
//!
//! Structure:
//!     A single hand-written pass over an input stream. There is no separate grammar file and no
//!     transformation pipeline: the markup is small enough that one character of lookahead and a
//!     handful of context flags decide every token.
//!
//!     - state.rs     Context flags (tag name, inline body, block tag, the four bracket bodies)
//!     - brackets.rs  The bracket stack shared by every bracket kind
//!     - lexer.rs     The lexer proper: dispatch, pair linking, finalization
//!     - common.rs    Errors for misuse of the pull interface
//!
//! Error Tolerance
//!
//!     Lexing never stops on malformed input. Unmatched brackets, line breaks where they are not
//!     allowed and unrecognized characters all produce ordinary tokens with their error set, and
//!     lexing carries on with the next character. Consumers read errors off the tokens.

pub mod brackets;
pub mod common;
pub mod lexer;
pub mod state;

pub use brackets::{BracketStack, StackEntry};
pub use common::LexError;
pub use lexer::Lexer;
pub use state::ContextFlags;

use crate::koji::token::Token;

/// Lex a whole source string with the default messages.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize_all()
}
