//! Core token types and helpers shared across the lexer, the document model and tooling.
//!
//!     core     The token itself: type, value, character range, index, pair link, error.
//!     kind     The closed set of token types and the bracket families they belong to.
//!     glyph    Character classification and the markup glyph table.
//!     error    Token-attached errors and their human-readable messages.

pub mod core;
pub mod error;
pub mod glyph;
pub mod kind;

pub use self::core::Token;
pub use error::{ErrorKind, Messages, TokenError};
pub use glyph::{classify, CharClass};
pub use kind::{BracketKind, Side, TokenType};
