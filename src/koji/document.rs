//! Document model
//!
//!     The consumer side of the lexer. A [`Document`] holds a source string, re-lexes it on every
//!     change and derives from the token stream what an editor view needs: one [`Character`] per
//!     source character with its display classes, the list of error ranges, and lookups from a
//!     character offset to the token covering it.
//!
//! Classes
//!
//!     On update every character gets the display class of the token covering it (from the
//!     mode's class map; types without a class add nothing) plus the error class when that token
//!     is an error. Newlines and ideographic spaces get their own presentation classes before
//!     any token class. Classes are a set per character: adding one twice is a no-op.
//!
//! Selection
//!
//!     The document tracks a selection `[start, end)`; a caret is an empty selection. There is
//!     none until one is set. Changing it re-applies the `selected` class, and with a caret,
//!     outlines the bracket pair next to the caret and focuses an adjacent inline tag name.
//!     Updating the source keeps the selection clamped and its `selected` class, but drops the
//!     outline and focus until the selection changes again.
//!
//!     - character.rs    The per-character record
//!     - diagnostics.rs  Error tokens as positioned diagnostics

pub mod character;
pub mod diagnostics;

pub use character::Character;
pub use diagnostics::{Diagnostic, Severity};

use crate::koji::config::DocumentConfig;
use crate::koji::mode::Mode;
use crate::koji::range::SourceLocation;
use crate::koji::token::{Token, TokenType};
use serde::Serialize;
use std::ops::Range;

pub const SELECTED_CLASS: &str = "selected";
pub const OUTLINE_CLASS: &str = "outline";
pub const FOCUS_CLASS: &str = "focus";

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// An error range reported by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub start: usize,
    pub end: usize,
    pub message: String,
}

impl ErrorRecord {
    pub fn covers(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    mode: Mode,
    config: DocumentConfig,
    /// `None` until the first update, so that an initial empty source still counts as a change.
    source: Option<String>,
    chars: Vec<Character>,
    tokens: Vec<Token>,
    errors: Vec<ErrorRecord>,
    locator: SourceLocation,
    selection: Option<Range<usize>>,
}

impl Document {
    pub fn new(mode: Mode) -> Self {
        Self::with_config(mode, DocumentConfig::default())
    }

    pub fn with_config(mode: Mode, config: DocumentConfig) -> Self {
        Self {
            mode,
            config,
            source: None,
            chars: Vec::new(),
            tokens: Vec::new(),
            errors: Vec::new(),
            locator: SourceLocation::new(""),
            selection: None,
        }
    }

    /// Replace the source and rebuild everything derived from it. Returns `false` (and does
    /// nothing) when the source is unchanged.
    pub fn update_source(&mut self, source: &str) -> bool {
        if self.source.as_deref() == Some(source) {
            return false;
        }

        self.chars = self.build_chars(source);
        self.tokens = self.mode.lexer(source).tokenize_all();
        self.errors = self
            .tokens
            .iter()
            .filter_map(|token| {
                token.error_message().map(|message| ErrorRecord {
                    start: token.start,
                    end: token.end,
                    message: message.to_string(),
                })
            })
            .collect();
        self.locator = SourceLocation::new(source);
        self.source = Some(source.to_string());
        self.apply_syntax_classes();

        let len = self.chars.len();
        self.selection = self
            .selection
            .take()
            .map(|selection| selection.start.min(len)..selection.end.min(len));
        self.apply_selected_class();

        tracing::debug!(
            chars = self.chars.len(),
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "document updated"
        );
        true
    }

    fn build_chars(&self, source: &str) -> Vec<Character> {
        let mut line = 0;
        source
            .chars()
            .enumerate()
            .map(|(index, ch)| {
                let mut character = Character::new(index, line, ch);
                if ch == '\n' {
                    line += 1;
                    character.add_class(&self.config.line_break_class);
                }
                if ch == IDEOGRAPHIC_SPACE {
                    if self.config.visualize_fullwidth_space {
                        character.display = self.config.fullwidth_space_glyph.clone();
                    }
                    character.add_class(&self.config.fullwidth_space_class);
                }
                character
            })
            .collect()
    }

    fn apply_syntax_classes(&mut self) {
        for token in &self.tokens {
            let class = self.mode.class_of(token.kind);
            for character in &mut self.chars[token.start..token.end] {
                if let Some(class) = class {
                    character.add_class(class);
                }
                if token.is_error() {
                    character.add_class(&self.config.error_class);
                }
            }
        }
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn chars(&self) -> &[Character] {
        &self.chars
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The token whose range covers character `index`.
    pub fn token_at(&self, index: usize) -> Option<&Token> {
        self.token_index_at(index).map(|i| &self.tokens[i])
    }

    pub fn token_index_at(&self, index: usize) -> Option<usize> {
        // Tokens are contiguous and sorted by start; find the last one starting at or before index.
        let after = self.tokens.partition_point(|token| token.start <= index);
        let candidate = after.checked_sub(1)?;
        self.tokens[candidate].covers(index).then_some(candidate)
    }

    /// The partner of a paired token.
    pub fn pair_of(&self, token_index: usize) -> Option<&Token> {
        let pair = self.tokens.get(token_index)?.pair_index?;
        self.tokens.get(pair)
    }

    /// The last error whose range covers `index`.
    pub fn error_at(&self, index: usize) -> Option<&ErrorRecord> {
        self.errors.iter().rev().find(|error| error.covers(index))
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        diagnostics::collect(&self.tokens, &self.locator)
    }

    /// Characters grouped by line. There is always at least one line, and each newline stays at
    /// the end of the line it terminates.
    pub fn lines(&self) -> Vec<&[Character]> {
        let mut lines = Vec::new();
        let mut start = 0;
        for (i, character) in self.chars.iter().enumerate() {
            if character.ch == '\n' {
                lines.push(&self.chars[start..=i]);
                start = i + 1;
            }
        }
        lines.push(&self.chars[start..]);
        lines
    }

    /// Line of the character after the caret, or of the one before it at end of input.
    pub fn current_line(&self) -> usize {
        let caret = self.caret().unwrap_or(0);
        self.chars
            .get(caret)
            .or_else(|| caret.checked_sub(1).and_then(|i| self.chars.get(i)))
            .map_or(0, |character| character.line)
    }

    /// The current selection, `None` until one has been set.
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    pub fn has_selection(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.start != selection.end)
    }

    fn caret(&self) -> Option<usize> {
        self.selection
            .as_ref()
            .filter(|selection| selection.start == selection.end)
            .map(|selection| selection.start)
    }

    /// The token under the caret; `None` while a range is selected or before any selection.
    pub fn current_token(&self) -> Option<&Token> {
        self.token_at(self.caret()?)
    }

    /// Set the selection. Positions are clamped to the document and ordered. Returns `false` when
    /// the selection did not change.
    pub fn set_selection(&mut self, start: usize, end: usize) -> bool {
        let len = self.chars.len();
        let (start, end) = (start.min(len), end.min(len));
        let selection = start.min(end)..start.max(end);
        if self.selection.as_ref() == Some(&selection) {
            return false;
        }
        self.selection = Some(selection);
        self.refresh_selection();
        true
    }

    pub fn set_caret(&mut self, position: usize) -> bool {
        self.set_selection(position, position)
    }

    pub fn clear_selection(&mut self) {
        self.remove_class(SELECTED_CLASS, 0..self.chars.len());
    }

    fn refresh_selection(&mut self) {
        self.apply_selected_class();
        self.highlight_pair();
        self.highlight_token();
    }

    fn apply_selected_class(&mut self) {
        self.clear_selection();
        if let Some(selection) = self.selection.clone() {
            self.add_class(SELECTED_CLASS, selection);
        }
    }

    /// The token right after the caret if it matches, else the one right before it.
    fn token_near_caret<F>(&self, accept: F) -> Option<usize>
    where
        F: Fn(&Token) -> bool,
    {
        let caret = self.caret()?;
        let next = self.token_index_at(caret);
        let prev = caret.checked_sub(1).and_then(|i| self.token_index_at(i));
        [next, prev]
            .into_iter()
            .flatten()
            .find(|&i| accept(&self.tokens[i]))
    }

    /// Outline the bracket pair at the caret. Returns the ranges of the token and its partner.
    pub fn highlight_pair(&mut self) -> Option<(Range<usize>, Range<usize>)> {
        self.remove_class(OUTLINE_CLASS, 0..self.chars.len());
        let target = self.token_near_caret(Token::is_paired)?;
        let token = &self.tokens[target];
        let pair = self.pair_of(target)?;
        let ranges = (token.range(), pair.range());
        self.add_class(OUTLINE_CLASS, ranges.0.clone());
        self.add_class(OUTLINE_CLASS, ranges.1.clone());
        Some(ranges)
    }

    /// Focus the inline tag name at the caret. Returns its range.
    pub fn highlight_token(&mut self) -> Option<Range<usize>> {
        self.remove_class(FOCUS_CLASS, 0..self.chars.len());
        let target = self.token_near_caret(|token| token.kind == TokenType::InlineName)?;
        let range = self.tokens[target].range();
        self.add_class(FOCUS_CLASS, range.clone());
        Some(range)
    }

    /// Add `class` to every character in `range`; indices past the end are ignored.
    pub fn add_class(&mut self, class: &str, range: Range<usize>) {
        for character in self.chars_in_mut(range) {
            character.add_class(class);
        }
    }

    pub fn remove_class(&mut self, class: &str, range: Range<usize>) {
        for character in self.chars_in_mut(range) {
            character.remove_class(class);
        }
    }

    /// Strip every class from the characters in `range`.
    pub fn remove_all_classes(&mut self, range: Range<usize>) {
        for character in self.chars_in_mut(range) {
            character.clear_classes();
        }
    }

    pub fn reset_classes(&mut self) {
        for character in &mut self.chars {
            character.clear_classes();
        }
    }

    fn chars_in_mut(&mut self, range: Range<usize>) -> &mut [Character] {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        &mut self.chars[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(source: &str) -> Document {
        let mut doc = Document::new(Mode::koji());
        doc.update_source(source);
        doc
    }

    #[test]
    fn test_update_source_detects_changes() {
        let mut doc = Document::new(Mode::koji());
        assert!(doc.update_source(""));
        assert!(!doc.update_source(""));
        assert!(doc.update_source("橋本"));
        assert!(!doc.update_source("橋本"));
        assert_eq!(doc.source(), "橋本");
    }

    #[test]
    fn test_characters_and_lines() {
        let doc = document("あ\nい");
        let chars = doc.chars();
        assert_eq!(chars.len(), 3);
        assert_eq!(chars[1].line, 0);
        assert_eq!(chars[2].line, 1);
        assert!(chars[1].has_class("lb"));

        let lines = doc.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 2);
        assert_eq!(lines[1].len(), 1);
    }

    #[test]
    fn test_lines_of_empty_and_trailing_newline() {
        assert_eq!(document("").lines().len(), 1);
        let doc = document("あ\n");
        let lines = doc.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_fullwidth_space() {
        let doc = document("あ\u{3000}い");
        assert_eq!(doc.chars()[1].display, "□");
        assert!(doc.chars()[1].has_class("zenkaku-space"));

        let config = DocumentConfig {
            visualize_fullwidth_space: false,
            ..DocumentConfig::default()
        };
        let mut doc = Document::with_config(Mode::koji(), config);
        doc.update_source("あ\u{3000}い");
        assert_eq!(doc.chars()[1].display, "\u{3000}");
        assert!(doc.chars()[1].has_class("zenkaku-space"));
    }

    #[test]
    fn test_syntax_classes() {
        let doc = document("橋本（はしもと）");
        assert!(doc.chars()[0].classes.is_empty());
        assert_eq!(doc.chars()[2].classes, vec!["furigana"]);
        assert_eq!(doc.chars()[4].classes, vec!["furigana"]);
    }

    #[test]
    fn test_error_records_and_classes() {
        let doc = document("橋本（はし【もと）】");
        let starts: Vec<usize> = doc.errors().iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![2, 5, 8, 9]);
        assert!(doc.chars()[2].has_class("error"));
        assert!(!doc.chars()[3].has_class("error"));
        assert_eq!(
            doc.error_at(8).map(|e| e.message.as_str()),
            Some("対応する括弧がありません．")
        );
        assert!(doc.error_at(0).is_none());
        assert!(doc.has_errors());
    }

    #[test]
    fn test_token_lookup() {
        let doc = document("橋本（はしもと）");
        assert_eq!(doc.token_at(0).map(|t| t.kind), Some(TokenType::TextSegment));
        assert_eq!(doc.token_at(1).map(|t| t.kind), Some(TokenType::TextSegment));
        assert_eq!(doc.token_at(2).map(|t| t.kind), Some(TokenType::FuriganaStart));
        assert_eq!(doc.token_index_at(6), Some(2));
        assert_eq!(doc.token_index_at(7), Some(3));
        assert_eq!(doc.token_at(8), None);
        assert_eq!(doc.pair_of(1).map(|t| t.index), Some(3));
        assert_eq!(doc.pair_of(0), None);
    }

    #[test]
    fn test_selection_class() {
        let mut doc = document("橋本雄太");
        assert!(doc.set_selection(1, 3));
        assert!(!doc.set_selection(1, 3));
        assert!(doc.has_selection());
        let selected: Vec<bool> = doc.chars().iter().map(|c| c.has_class(SELECTED_CLASS)).collect();
        assert_eq!(selected, vec![false, true, true, false]);

        doc.set_caret(2);
        assert!(doc.chars().iter().all(|c| !c.has_class(SELECTED_CLASS)));
    }

    #[test]
    fn test_selection_is_clamped_and_ordered() {
        let mut doc = document("橋本");
        doc.set_selection(10, 1);
        assert_eq!(doc.selection(), Some(1..2));
    }

    #[test]
    fn test_highlight_pair_at_caret() {
        let mut doc = document("橋本（はしもと）");
        doc.set_caret(2);
        assert!(doc.chars()[2].has_class(OUTLINE_CLASS));
        assert!(doc.chars()[7].has_class(OUTLINE_CLASS));
        assert_eq!(doc.highlight_pair(), Some((2..3, 7..8)));

        // Right after the closer: the previous token is used.
        doc.set_caret(8);
        assert_eq!(doc.highlight_pair(), Some((7..8, 2..3)));

        doc.set_caret(4);
        assert_eq!(doc.highlight_pair(), None);
        assert!(doc.chars().iter().all(|c| !c.has_class(OUTLINE_CLASS)));
    }

    #[test]
    fn test_highlight_pair_ignores_ranges() {
        let mut doc = document("（あ）");
        doc.set_selection(0, 2);
        assert_eq!(doc.highlight_pair(), None);
        assert!(doc.current_token().is_none());
    }

    #[test]
    fn test_highlight_token_on_inline_name() {
        let mut doc = document("《人名：橋本》");
        doc.set_caret(3);
        assert_eq!(doc.highlight_token(), Some(1..3));
        assert!(doc.chars()[1].has_class(FOCUS_CLASS));
        assert!(doc.chars()[2].has_class(FOCUS_CLASS));

        doc.set_caret(5);
        assert_eq!(doc.highlight_token(), None);
        assert!(doc.chars().iter().all(|c| !c.has_class(FOCUS_CLASS)));
    }

    #[test]
    fn test_current_line() {
        let mut doc = document("あ\nい");
        assert_eq!(doc.current_line(), 0);
        doc.set_caret(2);
        assert_eq!(doc.current_line(), 1);
        doc.set_caret(3);
        assert_eq!(doc.current_line(), 1);
        assert_eq!(document("").current_line(), 0);
    }

    #[test]
    fn test_class_manipulation_ignores_out_of_range() {
        let mut doc = document("橋本");
        doc.add_class("mark", 1..10);
        assert!(!doc.chars()[0].has_class("mark"));
        assert!(doc.chars()[1].has_class("mark"));
        doc.remove_class("mark", 0..10);
        assert!(!doc.chars()[1].has_class("mark"));
        doc.add_class("mark", 5..9);
        assert!(doc.chars().iter().all(|c| !c.has_class("mark")));
    }

    #[test]
    fn test_reset_classes() {
        let mut doc = document("（あ）\n");
        doc.remove_all_classes(0..1);
        assert!(doc.chars()[0].classes.is_empty());
        assert!(!doc.chars()[1].classes.is_empty());
        doc.reset_classes();
        assert!(doc.chars().iter().all(|c| c.classes.is_empty()));
    }

    #[test]
    fn test_selection_survives_update() {
        let mut doc = document("橋本雄太");
        doc.set_selection(1, 4);
        doc.update_source("橋本");
        assert_eq!(doc.selection(), Some(1..2));
        assert!(doc.chars()[1].has_class(SELECTED_CLASS));
    }

    #[test]
    fn test_fresh_document_has_no_highlights() {
        let doc = document("［表紙］");
        assert_eq!(doc.selection(), None);
        assert!(doc.current_token().is_none());
        for character in doc.chars() {
            assert!(!character.has_class(OUTLINE_CLASS), "outline at {}", character.index);
            assert!(!character.has_class(FOCUS_CLASS), "focus at {}", character.index);
            assert!(!character.has_class(SELECTED_CLASS), "selected at {}", character.index);
        }
        assert_eq!(doc.chars()[0].classes, vec!["block"]);

        let mut doc = document("《人名：あ》");
        assert!(doc.chars().iter().all(|c| !c.has_class(OUTLINE_CLASS)));
        assert!(doc.set_caret(0));
        assert!(doc.chars()[0].has_class(OUTLINE_CLASS));
    }

    #[test]
    fn test_update_drops_highlights() {
        let mut doc = document("《人名：あ》");
        doc.set_caret(1);
        assert!(doc.chars()[0].has_class(OUTLINE_CLASS));
        assert!(doc.chars()[1].has_class(FOCUS_CLASS));

        doc.update_source("《人名：い》");
        assert_eq!(doc.selection(), Some(1..1));
        assert!(doc
            .chars()
            .iter()
            .all(|c| !c.has_class(OUTLINE_CLASS) && !c.has_class(FOCUS_CLASS)));
    }
}
