//! Position and location tracking for source text
//!
//! Tokens carry half-open character-offset ranges. Tooling (the CLI, diagnostics) wants
//! line:column positions instead; this module converts between the two.
//!
//! ## Types
//!
//! - [`Position`] - A line:column position in source text (both 0-based)
//! - [`Location`] - A character span together with its start/end positions
//! - [`SourceLocation`] - Utility for converting character offsets to positions
//!
//! Offsets here are always character offsets, matching token `start`/`end`. Conversion is an
//! O(log n) binary search over the offsets where each line starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range as CharRange;

/// Represents a position in source text (line and column)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A character span with its line:column endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub span: CharRange<usize>,
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(span: CharRange<usize>, start: Position, end: Position) -> Self {
        Self { span, start, end }
    }

    /// Check if a character offset falls inside the half-open span
    pub fn contains(&self, offset: usize) -> bool {
        self.span.contains(&offset)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Provides fast conversion from character offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Character offsets where each line starts
    line_starts: Vec<usize>,
    /// Source length in characters
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        let mut len = 0;

        for (offset, ch) in source.chars().enumerate() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
            len = offset + 1;
        }

        Self { line_starts, len }
    }

    /// Convert a character offset to a line/column position.
    ///
    /// Offsets past the end are clamped to the end of the source.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        Position::new(line, offset - self.line_starts[line])
    }

    /// Convert a character span to a location
    pub fn span_to_location(&self, span: &CharRange<usize>) -> Location {
        Location::new(
            span.clone(),
            self.offset_to_position(span.start),
            self.offset_to_position(span.end),
        )
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get the character offset for the start of a line
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}
