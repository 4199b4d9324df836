//! Token-attached errors
//!
//! The lexer never fails on malformed input. Each irregularity it recognizes is recorded on the
//! offending token as a [`TokenError`]; consumers decide how to present it.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    /// A closer with no compatible opener, or an opener still open at end of input.
    UnmatchedBracket,
    /// A newline inside a tag name, block tag, kaeriten or okurigana region.
    DisallowedLineBreak,
    /// A character outside every recognized class.
    IllegalCharacter(char),
}

impl ErrorKind {
    /// Stable machine-readable code, used by diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnmatchedBracket => "unmatched-bracket",
            ErrorKind::DisallowedLineBreak => "disallowed-line-break",
            ErrorKind::IllegalCharacter(_) => "illegal-character",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenError {
    pub kind: ErrorKind,
    pub message: String,
}

impl TokenError {
    pub fn new(kind: ErrorKind, messages: &Messages) -> Self {
        Self {
            kind,
            message: messages.render(&kind),
        }
    }
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Human-readable texts for each error kind.
///
/// `illegal_character` may contain a `{ch}` placeholder for the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub unmatched_bracket: String,
    pub disallowed_line_break: String,
    pub illegal_character: String,
}

impl Messages {
    pub fn render(&self, kind: &ErrorKind) -> String {
        match kind {
            ErrorKind::UnmatchedBracket => self.unmatched_bracket.clone(),
            ErrorKind::DisallowedLineBreak => self.disallowed_line_break.clone(),
            ErrorKind::IllegalCharacter(ch) => {
                self.illegal_character.replace("{ch}", &ch.to_string())
            }
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            unmatched_bracket: "対応する括弧がありません．".to_string(),
            disallowed_line_break: "ここに改行を含めることはできません。".to_string(),
            illegal_character: "不正な文字：{ch}".to_string(),
        }
    }
}
