//! Context flags
//!
//!     Which semantic region the cursor is in. These are independent booleans, not a state
//!     machine: malformed input can leave several set at once (a block tag left open around an
//!     annotation, for instance), and the lexer keeps going with whatever combination results.
//!     Together they select the type of a letter run, the type of a separator and whether a
//!     newline is allowed.

use crate::koji::token::{BracketKind, TokenType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextFlags {
    /// After an inline opener, before its colon: reading the tag name.
    pub inline_name_pending: bool,
    /// After the colon of an inline tag: reading its fields.
    pub inline_body: bool,
    pub block_tag: bool,
    pub furigana_body: bool,
    pub kaeriten_body: bool,
    pub okurigana_body: bool,
    pub annotation_body: bool,
}

impl ContextFlags {
    /// Token type for a run of letters, by priority of the active region.
    pub fn segment_type(&self) -> TokenType {
        if self.inline_name_pending {
            TokenType::InlineName
        } else if self.block_tag {
            TokenType::BlockName
        } else if self.furigana_body {
            TokenType::Furigana
        } else if self.kaeriten_body {
            TokenType::Kaeriten
        } else if self.okurigana_body {
            TokenType::Okurigana
        } else if self.annotation_body {
            TokenType::Annotation
        } else {
            TokenType::TextSegment
        }
    }

    pub fn separator_type(&self) -> TokenType {
        if self.inline_body {
            TokenType::InlineSep
        } else {
            TokenType::FuriganaSep
        }
    }

    /// Line breaks are fine in plain text, inline bodies, furigana and annotations, but not in a
    /// tag name or a reading-mark region.
    pub fn forbids_line_break(&self) -> bool {
        self.inline_name_pending || self.block_tag || self.kaeriten_body || self.okurigana_body
    }

    /// Colon transition: from reading the tag name to reading its body.
    pub fn enter_inline_body(&mut self) {
        if self.inline_name_pending {
            self.inline_name_pending = false;
            self.inline_body = true;
        }
    }

    pub fn leave_inline(&mut self) {
        self.inline_name_pending = false;
        self.inline_body = false;
    }

    /// Set the body flag owned by a paired bracket kind. Inline and block tags have their own
    /// transitions and are ignored here.
    pub fn set_body(&mut self, kind: BracketKind, value: bool) {
        match kind {
            BracketKind::Furigana => self.furigana_body = value,
            BracketKind::Kaeriten => self.kaeriten_body = value,
            BracketKind::Okurigana => self.okurigana_body = value,
            BracketKind::Annotation => self.annotation_body = value,
            BracketKind::Inline | BracketKind::Block => {}
        }
    }
}
