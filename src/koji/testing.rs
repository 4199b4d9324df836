//! Testing utilities for token stream assertions
//!
//! Shared by the unit tests and the integration tests under `tests/`.
//!
//! ## Fluent assertions
//!
//! Checking a token stream one field at a time gets long quickly. [`assert_tokens`] lexes a
//! source and returns an assertion builder that checks the whole stream, or a single token, in
//! one chain:
//!
//! ```rust-example
//! assert_tokens("橋本（はしもと）")
//!     .kinds(&[TextSegment, FuriganaStart, Furigana, FuriganaEnd])
//!     .paired(1, 3)
//!     .no_errors()
//!     .token(2, |t| {
//!         t.value("はしもと").range(3..7);
//!     });
//! ```
//!
//! Failure messages carry the source and the token index, so a failing table-driven test says
//! which row and which token went wrong.
//!
//! ## Samples
//!
//! [`SAMPLES`] holds small, verified koji documents covering every construct. Property tests use
//! them as seeds and scenario tests iterate over them.

use crate::koji::lexing::tokenize;
use crate::koji::token::{ErrorKind, Token};
use std::ops::Range;

pub use crate::koji::token::TokenType;

/// Verified koji snippets, one per construct, plus a mixed document.
pub const SAMPLES: &[(&str, &str)] = &[
    ("plain", "十月二日晴"),
    ("inline", "あああああ《人物：ほげ》あああ"),
    ("inline-fields", "《ふりがな：橋本｜ゆうた》"),
    ("block", "［表紙］\n本文\n［／表紙］\n"),
    ("furigana", "橋本（はしもと）雄太（ゆうた）"),
    ("furigana-sep", "十月二日｜人定（にんてい）"),
    ("kanbun", "天下〔ニ〕有〔ラバ〕一人〔ノ〕知己｛一｝"),
    ("annotation", "本文【注記】本文"),
    (
        "mixed",
        "［日記］\n十月二日｜人定（にんてい）《人名：橋本｜はしもと》来【欄外】\n天下〔ニ〕有｛二｝\n［／日記］",
    ),
];

/// Look up a sample by name.
pub fn sample(name: &str) -> &'static str {
    SAMPLES
        .iter()
        .find(|(sample_name, _)| *sample_name == name)
        .map(|(_, source)| *source)
        .unwrap_or_else(|| panic!("no sample named '{}'", name))
}

pub fn kinds(tokens: &[Token]) -> Vec<TokenType> {
    tokens.iter().map(|token| token.kind).collect()
}

pub fn lex_kinds(source: &str) -> Vec<TokenType> {
    kinds(&tokenize(source))
}

/// Lex `source` and start a fluent assertion over the result.
pub fn assert_tokens(source: &str) -> TokenStreamAssertion {
    TokenStreamAssertion {
        tokens: tokenize(source),
        context: format!("{:?}", source),
    }
}

pub struct TokenStreamAssertion {
    tokens: Vec<Token>,
    context: String,
}

impl TokenStreamAssertion {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.tokens.len(),
            expected,
            "{}: Expected {} tokens, found {}",
            self.context,
            expected,
            self.tokens.len()
        );
        self
    }

    pub fn kinds(self, expected: &[TokenType]) -> Self {
        assert_eq!(
            kinds(&self.tokens),
            expected,
            "{}: token types differ",
            self.context
        );
        self
    }

    /// Tokens `a` and `b` are linked to each other.
    pub fn paired(self, a: usize, b: usize) -> Self {
        self.token(a, |t| {
            t.paired_with(b);
        })
        .token(b, |t| {
            t.paired_with(a);
        })
    }

    /// Exactly the tokens at `indices` are errors.
    pub fn errors_at(self, indices: &[usize]) -> Self {
        let actual: Vec<usize> = self
            .tokens
            .iter()
            .filter(|token| token.is_error())
            .map(|token| token.index)
            .collect();
        assert_eq!(actual, indices, "{}: error tokens differ", self.context);
        self
    }

    pub fn no_errors(self) -> Self {
        self.errors_at(&[])
    }

    pub fn token<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(TokenAssertion<'_>),
    {
        let token = self.tokens.get(index).unwrap_or_else(|| {
            panic!(
                "{}: Token index {} out of bounds (stream has {} tokens)",
                self.context,
                index,
                self.tokens.len()
            )
        });
        assertion(TokenAssertion {
            token,
            context: format!("{}:tokens[{}]", self.context, index),
        });
        self
    }
}

pub struct TokenAssertion<'a> {
    token: &'a Token,
    context: String,
}

impl<'a> TokenAssertion<'a> {
    pub fn kind(&self, expected: TokenType) -> &Self {
        assert_eq!(self.token.kind, expected, "{}: wrong type", self.context);
        self
    }

    pub fn value(&self, expected: &str) -> &Self {
        assert_eq!(self.token.value, expected, "{}: wrong value", self.context);
        self
    }

    pub fn range(&self, expected: Range<usize>) -> &Self {
        assert_eq!(self.token.range(), expected, "{}: wrong range", self.context);
        self
    }

    pub fn paired_with(&self, expected: usize) -> &Self {
        assert_eq!(
            self.token.pair_index,
            Some(expected),
            "{}: wrong pair",
            self.context
        );
        self
    }

    pub fn unpaired(&self) -> &Self {
        assert_eq!(self.token.pair_index, None, "{}: unexpected pair", self.context);
        self
    }

    pub fn error(&self, expected: ErrorKind) -> &Self {
        assert_eq!(
            self.token.error.as_ref().map(|e| e.kind),
            Some(expected),
            "{}: wrong error",
            self.context
        );
        self
    }

    pub fn no_error(&self) -> &Self {
        assert!(
            self.token.error.is_none(),
            "{}: unexpected error {:?}",
            self.context,
            self.token.error
        );
        self
    }
}
