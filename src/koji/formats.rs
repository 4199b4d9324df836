//! Output format implementations for token streams
//!
//! This module contains the formats a token sequence can be written in:
//! - Structured data (json, yaml) through serde
//! - A line-per-token dump for inspection (tokenviz)
//! - The source text rebuilt from tokens (simple, via the detokenizer)

pub mod detokenizer;
pub mod registry;
pub mod serialized;
pub mod tokenviz;

pub use detokenizer::{detokenize, SimpleFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{JsonFormatter, YamlFormatter};
pub use tokenviz::{to_tokenviz_str, TokenvizFormatter};

use crate::koji::token::Token;

/// Serialize tokens with one of the built-in formats, by name.
pub fn serialize_tokens(tokens: &[Token], format: &str) -> Result<String, FormatError> {
    FormatRegistry::with_defaults().serialize(tokens, format)
}
