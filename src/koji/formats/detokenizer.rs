//! Detokenizer
//!
//! Tokens are contiguous and each one keeps the exact text it consumed, so joining the values in
//! order reproduces the source.

use super::registry::{FormatError, Formatter};
use crate::koji::token::Token;

pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.value.as_str()).collect()
}

/// The `simple` format: the source text rebuilt from tokens.
pub struct SimpleFormatter;

impl Formatter for SimpleFormatter {
    fn name(&self) -> &str {
        "simple"
    }

    fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError> {
        Ok(detokenize(tokens))
    }

    fn description(&self) -> &str {
        "Source text rebuilt from token values"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koji::lexing::tokenize;

    #[test]
    fn test_detokenize_preserves_errors_and_newlines() {
        let source = "［表紙］\n橋本（はし【もと）】\t《人\n名》";
        assert_eq!(detokenize(&tokenize(source)), source);
    }

    #[test]
    fn test_detokenize_partial_stream() {
        let tokens = tokenize("橋本（はしもと）");
        assert_eq!(detokenize(&tokens[1..]), "（はしもと）");
        assert_eq!(detokenize(&[]), "");
    }
}
