//! Token types
//!
//!     The closed set of token types the lexer produces. Names serialize in SCREAMING_SNAKE_CASE
//!     (`TEXT_SEGMENT`, `KAERI_START`, `LB`), which is also how they print and how consumers key
//!     their display class tables.
//!
//!     Bracket-class tokens belong to exactly one [`BracketKind`] and sit on one [`Side`]. The
//!     opener/closer compatibility table is simply "same kind": a closer only matches an opener of
//!     its own kind, and `BLOCK_CLOSING_START` is a block opener like `BLOCK_START`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    InlineStart,
    InlineName,
    InlineSep,
    Colon,
    InlineEnd,
    FuriganaStart,
    FuriganaEnd,
    FuriganaSep,
    Furigana,
    KaeriStart,
    KaeriEnd,
    Kaeriten,
    OkuriganaStart,
    OkuriganaEnd,
    Okurigana,
    AnnoStart,
    AnnoEnd,
    Annotation,
    BlockStart,
    BlockName,
    BlockClosingStart,
    BlockEnd,
    TextSegment,
    Lb,
    Unknown,
}

/// Which family of delimiters a bracket-class token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BracketKind {
    Inline,
    Furigana,
    Kaeriten,
    Okurigana,
    Annotation,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Open,
    Close,
}

impl TokenType {
    pub const ALL: [TokenType; 25] = [
        TokenType::InlineStart,
        TokenType::InlineName,
        TokenType::InlineSep,
        TokenType::Colon,
        TokenType::InlineEnd,
        TokenType::FuriganaStart,
        TokenType::FuriganaEnd,
        TokenType::FuriganaSep,
        TokenType::Furigana,
        TokenType::KaeriStart,
        TokenType::KaeriEnd,
        TokenType::Kaeriten,
        TokenType::OkuriganaStart,
        TokenType::OkuriganaEnd,
        TokenType::Okurigana,
        TokenType::AnnoStart,
        TokenType::AnnoEnd,
        TokenType::Annotation,
        TokenType::BlockStart,
        TokenType::BlockName,
        TokenType::BlockClosingStart,
        TokenType::BlockEnd,
        TokenType::TextSegment,
        TokenType::Lb,
        TokenType::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::InlineStart => "INLINE_START",
            TokenType::InlineName => "INLINE_NAME",
            TokenType::InlineSep => "INLINE_SEP",
            TokenType::Colon => "COLON",
            TokenType::InlineEnd => "INLINE_END",
            TokenType::FuriganaStart => "FURIGANA_START",
            TokenType::FuriganaEnd => "FURIGANA_END",
            TokenType::FuriganaSep => "FURIGANA_SEP",
            TokenType::Furigana => "FURIGANA",
            TokenType::KaeriStart => "KAERI_START",
            TokenType::KaeriEnd => "KAERI_END",
            TokenType::Kaeriten => "KAERITEN",
            TokenType::OkuriganaStart => "OKURIGANA_START",
            TokenType::OkuriganaEnd => "OKURIGANA_END",
            TokenType::Okurigana => "OKURIGANA",
            TokenType::AnnoStart => "ANNO_START",
            TokenType::AnnoEnd => "ANNO_END",
            TokenType::Annotation => "ANNOTATION",
            TokenType::BlockStart => "BLOCK_START",
            TokenType::BlockName => "BLOCK_NAME",
            TokenType::BlockClosingStart => "BLOCK_CLOSING_START",
            TokenType::BlockEnd => "BLOCK_END",
            TokenType::TextSegment => "TEXT_SEGMENT",
            TokenType::Lb => "LB",
            TokenType::Unknown => "UNKNOWN",
        }
    }

    /// The bracket family and side of a bracket-class token, `None` for everything else.
    pub fn bracket(self) -> Option<(BracketKind, Side)> {
        use BracketKind::*;
        use Side::*;
        match self {
            TokenType::InlineStart => Some((Inline, Open)),
            TokenType::InlineEnd => Some((Inline, Close)),
            TokenType::FuriganaStart => Some((Furigana, Open)),
            TokenType::FuriganaEnd => Some((Furigana, Close)),
            TokenType::KaeriStart => Some((Kaeriten, Open)),
            TokenType::KaeriEnd => Some((Kaeriten, Close)),
            TokenType::OkuriganaStart => Some((Okurigana, Open)),
            TokenType::OkuriganaEnd => Some((Okurigana, Close)),
            TokenType::AnnoStart => Some((Annotation, Open)),
            TokenType::AnnoEnd => Some((Annotation, Close)),
            TokenType::BlockStart | TokenType::BlockClosingStart => Some((Block, Open)),
            TokenType::BlockEnd => Some((Block, Close)),
            _ => None,
        }
    }

    pub fn is_bracket(self) -> bool {
        self.bracket().is_some()
    }

    pub fn is_opener(self) -> bool {
        matches!(self.bracket(), Some((_, Side::Open)))
    }

    pub fn is_closer(self) -> bool {
        matches!(self.bracket(), Some((_, Side::Close)))
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the SCREAMING_SNAKE_CASE name, case-insensitively (`text_segment` works too).
impl FromStr for TokenType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown token type '{}'", s))
    }
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BracketKind::Inline => "inline",
            BracketKind::Furigana => "furigana",
            BracketKind::Kaeriten => "kaeriten",
            BracketKind::Okurigana => "okurigana",
            BracketKind::Annotation => "annotation",
            BracketKind::Block => "block",
        };
        f.write_str(name)
    }
}
