//! Bracket stack
//!
//!     One stack shared by every bracket kind, since furigana, kaeriten, okurigana, annotations,
//!     inline tags and block tags nest freely. Entries refer to tokens by their index in the
//!     lexer's token arena, so pair links are plain integers.
//!
//!     Each entry records its kind and side explicitly. A closer matches only when the top entry
//!     is an opener of the same kind; that is the whole compatibility table.
//!
//!     Closers can end up on the stack too: an unmatched furigana/kaeriten/okurigana/annotation
//!     closer is pushed rather than dropped. A pushed closer never matches anything and is never
//!     popped, so any later closer that finds it on top fails as well, and the openers beneath
//!     it can no longer be closed.
//!     Unmatched inline and block closers are not pushed.

use crate::koji::token::{BracketKind, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackEntry {
    pub kind: BracketKind,
    pub side: Side,
    /// Index of the token in the token arena.
    pub token: usize,
}

impl StackEntry {
    pub fn opener(kind: BracketKind, token: usize) -> Self {
        Self {
            kind,
            side: Side::Open,
            token,
        }
    }

    pub fn closer(kind: BracketKind, token: usize) -> Self {
        Self {
            kind,
            side: Side::Close,
            token,
        }
    }

    pub fn accepts(&self, closer: BracketKind) -> bool {
        self.side == Side::Open && self.kind == closer
    }
}

#[derive(Debug, Clone, Default)]
pub struct BracketStack {
    entries: Vec<StackEntry>,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: StackEntry) {
        self.entries.push(entry);
    }

    /// Pop the top entry if it is an opener compatible with a closer of `kind`, returning the
    /// opener's token index. Leaves the stack untouched otherwise.
    pub fn close(&mut self, kind: BracketKind) -> Option<usize> {
        match self.entries.last() {
            Some(top) if top.accepts(kind) => self.entries.pop().map(|entry| entry.token),
            _ => None,
        }
    }

    pub fn top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// Residual entries, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &StackEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
