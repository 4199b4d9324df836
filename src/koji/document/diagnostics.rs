//! Diagnostics
//!
//!     Error tokens rendered for tooling: each one becomes a [`Diagnostic`] with both character
//!     offsets and line:column positions, a severity and a stable code naming the error kind.

use crate::koji::range::{Position, SourceLocation};
use crate::koji::token::Token;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub start: usize,
    pub end: usize,
    pub start_position: Position,
    pub end_position: Position,
    pub severity: Severity,
    pub message: String,
    /// `unmatched-bracket`, `disallowed-line-break` or `illegal-character`.
    pub code: String,
}

/// One diagnostic per error token, in token order.
pub fn collect(tokens: &[Token], locator: &SourceLocation) -> Vec<Diagnostic> {
    tokens
        .iter()
        .filter_map(|token| {
            let error = token.error.as_ref()?;
            let location = locator.span_to_location(&token.range());
            Some(Diagnostic {
                start: token.start,
                end: token.end,
                start_position: location.start,
                end_position: location.end,
                severity: Severity::Error,
                message: error.message.clone(),
                code: error.kind.code().to_string(),
            })
        })
        .collect()
}
