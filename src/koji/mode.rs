//! Modes
//!
//!     A mode bundles what a consumer needs to work with one markup dialect: a way to construct a
//!     lexer for a source string and a table mapping token types to display class names. koji is
//!     the only dialect today; [`Mode::koji`] is its built-in descriptor and [`Mode::from_config`]
//!     builds the same thing from (possibly user-edited) configuration.
//!
//!     Class names are validated as CSS identifiers since they end up on rendered characters.

use crate::koji::config::KojiConfig;
use crate::koji::lexing::Lexer;
use crate::koji::token::{Messages, TokenType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[_a-zA-Z][_a-zA-Z0-9-]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    UnknownTokenType(String),
    InvalidClassName { token: TokenType, class: String },
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::UnknownTokenType(key) => {
                write!(f, "Unknown token type '{}' in class map", key)
            }
            ModeError::InvalidClassName { token, class } => {
                write!(f, "Invalid class name '{}' for {}", class, token)
            }
        }
    }
}

impl std::error::Error for ModeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub name: String,
    classes: HashMap<TokenType, String>,
    messages: Messages,
}

impl Mode {
    /// The built-in koji mode.
    pub fn koji() -> Self {
        use TokenType::*;
        let table = [
            (InlineStart, "inline"),
            (InlineName, "inline-name"),
            (InlineSep, "inline"),
            (Colon, "inline"),
            (InlineEnd, "inline"),
            (FuriganaStart, "furigana"),
            (FuriganaEnd, "furigana"),
            (FuriganaSep, "furigana"),
            (Furigana, "furigana"),
            (KaeriStart, "kaeri"),
            (KaeriEnd, "kaeri"),
            (Kaeriten, "kaeri"),
            (OkuriganaStart, "okuri"),
            (OkuriganaEnd, "okuri"),
            (Okurigana, "okuri"),
            (AnnoStart, "annotation"),
            (AnnoEnd, "annotation"),
            (Annotation, "annotation"),
            (BlockStart, "block"),
            (BlockName, "block-name"),
            (BlockClosingStart, "block"),
            (BlockEnd, "block"),
        ];
        Self {
            name: "koji".to_string(),
            classes: table
                .iter()
                .map(|(kind, class)| (*kind, class.to_string()))
                .collect(),
            messages: Messages::default(),
        }
    }

    pub fn from_config(config: &KojiConfig) -> Result<Self, ModeError> {
        let mut classes = HashMap::new();
        for (key, class) in &config.mode.classes {
            let kind: TokenType = key
                .parse()
                .map_err(|_| ModeError::UnknownTokenType(key.clone()))?;
            if class.is_empty() {
                continue;
            }
            if !CLASS_NAME.is_match(class) {
                return Err(ModeError::InvalidClassName {
                    token: kind,
                    class: class.clone(),
                });
            }
            classes.insert(kind, class.clone());
        }
        tracing::debug!(mode = %config.mode.name, classes = classes.len(), "built mode from config");
        Ok(Self {
            name: config.mode.name.clone(),
            classes,
            messages: config.messages.clone(),
        })
    }

    /// Display class for a token type, `None` when the type is not highlighted.
    pub fn class_of(&self, kind: TokenType) -> Option<&str> {
        self.classes.get(&kind).map(String::as_str)
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// A fresh lexer over `source` using this mode's messages.
    pub fn lexer<'src>(&self, source: &'src str) -> Lexer<'src> {
        Lexer::with_messages(source, self.messages.clone())
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::koji()
    }
}
