//! Tokenviz
//!
//!     A line-per-token text dump for eyeballing lexer output:
//!
//!         0000 INLINE_START 0..1 "《" ↔ 0004
//!         0002 LB 2..3 "\n" ✗ ここに改行を含めることはできません。
//!
//!     Index, type, character range and the debug-quoted value, then the partner index for paired
//!     tokens and the message for error tokens.

use super::registry::{FormatError, Formatter};
use crate::koji::token::Token;
use std::fmt::Write;

pub fn to_tokenviz_str(tokens: &[Token]) -> String {
    let mut lines = Vec::with_capacity(tokens.len());
    for token in tokens {
        lines.push(tokenviz_line(token));
    }
    lines.join("\n")
}

fn tokenviz_line(token: &Token) -> String {
    let mut line = format!(
        "{:04} {} {}..{} {:?}",
        token.index, token.kind, token.start, token.end, token.value
    );
    if let Some(pair) = token.pair_index {
        let _ = write!(line, " ↔ {:04}", pair);
    }
    if let Some(message) = token.error_message() {
        let _ = write!(line, " ✗ {}", message);
    }
    line
}

pub struct TokenvizFormatter;

impl Formatter for TokenvizFormatter {
    fn name(&self) -> &str {
        "tokenviz"
    }

    fn serialize(&self, tokens: &[Token]) -> Result<String, FormatError> {
        Ok(to_tokenviz_str(tokens))
    }

    fn description(&self) -> &str {
        "One line per token with ranges, pair links and errors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::koji::lexing::tokenize;

    #[test]
    fn test_tokenviz_pairs() {
        let output = to_tokenviz_str(&tokenize("橋本（はしもと）"));
        insta::assert_snapshot!(output, @r#"
0000 TEXT_SEGMENT 0..2 "橋本"
0001 FURIGANA_START 2..3 "（" ↔ 0003
0002 FURIGANA 3..7 "はしもと"
0003 FURIGANA_END 7..8 "）" ↔ 0001
"#);
    }

    #[test]
    fn test_tokenviz_errors() {
        let output = to_tokenviz_str(&tokenize("《人\n名》"));
        insta::assert_snapshot!(output, @r#"
0000 INLINE_START 0..1 "《" ↔ 0004
0001 INLINE_NAME 1..2 "人"
0002 LB 2..3 "\n" ✗ ここに改行を含めることはできません。
0003 INLINE_NAME 3..4 "名"
0004 INLINE_END 4..5 "》" ↔ 0000
"#);
    }

    #[test]
    fn test_tokenviz_empty() {
        assert_eq!(to_tokenviz_str(&[]), "");
    }
}
