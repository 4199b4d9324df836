//! The koji lexer
//!
//!     A pull-based, hand-written lexer over an [`InputStream`]. Each call classifies the next
//!     character and dispatches on its class; the context flags decide what a letter run or a
//!     separator becomes, and the shared bracket stack links openers to closers.
//!
//! Token Arena
//!
//!     Every token produced is stored in `tokens`, and its index there is its sequence index.
//!     Pair links and stack entries are indices into this arena. Pulling a token returns a
//!     snapshot: an opener handed out by [`Lexer::next_token`] does not yet know its pair, because
//!     the closer has not been lexed. [`Lexer::tokens`] and [`Lexer::tokenize_all`] always reflect
//!     the latest links.
//!
//! Finalization
//!
//!     When the input is exhausted, [`Lexer::tokenize_all`] marks every token still resident on
//!     the bracket stack as an unmatched bracket. This reads the residual stack only; the token
//!     sequence is not rescanned.

use super::brackets::{BracketStack, StackEntry};
use super::common::LexError;
use super::state::ContextFlags;
use crate::koji::input::InputStream;
use crate::koji::token::glyph::{self, CharClass};
use crate::koji::token::{BracketKind, ErrorKind, Messages, Side, Token, TokenError, TokenType};

/// What a dispatch step recognized, before it becomes a token.
struct Lexeme {
    kind: TokenType,
    pair: Option<usize>,
    error: Option<ErrorKind>,
}

impl Lexeme {
    fn plain(kind: TokenType) -> Self {
        Self {
            kind,
            pair: None,
            error: None,
        }
    }

    fn paired(kind: TokenType, pair: usize) -> Self {
        Self {
            kind,
            pair: Some(pair),
            error: None,
        }
    }

    fn error(kind: TokenType, error: ErrorKind) -> Self {
        Self {
            kind,
            pair: None,
            error: Some(error),
        }
    }

    /// A closer either pairs with the opener it popped or is unmatched.
    fn closing(kind: TokenType, opener: Option<usize>) -> Self {
        match opener {
            Some(pair) => Self::paired(kind, pair),
            None => Self::error(kind, ErrorKind::UnmatchedBracket),
        }
    }
}

#[derive(Debug)]
pub struct Lexer<'src> {
    input: InputStream<'src>,
    tokens: Vec<Token>,
    stack: BracketStack,
    flags: ContextFlags,
    /// Arena index of a peeked but not yet consumed token.
    lookahead: Option<usize>,
    /// Number of tokens handed out through `next_token`.
    consumed: usize,
    messages: Messages,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_messages(source, Messages::default())
    }

    pub fn with_messages(source: &'src str, messages: Messages) -> Self {
        Self {
            input: InputStream::new(source),
            tokens: Vec::new(),
            stack: BracketStack::new(),
            flags: ContextFlags::default(),
            lookahead: None,
            consumed: 0,
            messages,
        }
    }

    /// The next token without consuming it. Computed lazily and cached until consumed.
    pub fn peek_token(&mut self) -> Option<&Token> {
        if self.lookahead.is_none() {
            self.lookahead = self.read_next();
        }
        self.lookahead.map(|index| &self.tokens[index])
    }

    /// Consume and return the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.advance().map(|index| self.tokens[index].clone())
    }

    /// Like [`next_token`](Self::next_token), but treats end of input as a caller error.
    pub fn expect_token(&mut self) -> Result<Token, LexError> {
        self.next_token()
            .ok_or_else(|| LexError::UnexpectedEnd(self.input.fail("unexpected end of input")))
    }

    /// True once every token has been produced and consumed.
    pub fn at_end(&mut self) -> bool {
        self.peek_token().is_none()
    }

    /// Drain the stream, flag unclosed brackets and return every token not already handed out
    /// by [`next_token`](Self::next_token). On a fresh lexer that is the whole sequence.
    pub fn tokenize_all(mut self) -> Vec<Token> {
        let first = self.consumed;
        while self.advance().is_some() {}
        self.finalize();
        let mut tokens = self.tokens;
        tokens.split_off(first)
    }

    /// Every token produced so far, with up-to-date pair links.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn advance(&mut self) -> Option<usize> {
        let index = match self.lookahead.take() {
            Some(index) => index,
            None => self.read_next()?,
        };
        self.consumed = index + 1;
        Some(index)
    }

    fn finalize(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        tracing::debug!(residue = self.stack.len(), "marking unclosed brackets");
        let error = TokenError::new(ErrorKind::UnmatchedBracket, &self.messages);
        for entry in self.stack.iter() {
            self.tokens[entry.token].mark_error(error.clone());
        }
    }

    /// Recognize one lexical unit and store it in the arena, returning its index.
    fn read_next(&mut self) -> Option<usize> {
        let ch = self.input.peek()?;
        let index = self.tokens.len();
        let start = self.input.position();
        let byte_start = self.input.byte_offset();

        let lexeme = match glyph::classify(ch) {
            CharClass::InlineOpen => self.read_inline_start(index),
            CharClass::InlineClose => self.read_inline_end(),
            CharClass::BlockOpen => self.read_block_start(index),
            CharClass::BlockClose => self.read_block_end(),
            CharClass::Separator => self.read_separator(),
            CharClass::Letter => self.read_text_segment(),
            CharClass::Bracket => self.read_bracket(ch, index),
            CharClass::Colon => self.read_colon(),
            CharClass::Newline => self.read_line_break(),
            CharClass::Unrecognized => self.read_unknown(ch),
        };

        let value = self.input.slice(byte_start, self.input.byte_offset());
        let mut token = Token::new(lexeme.kind, value, start..self.input.position(), index);

        if let Some(pair) = lexeme.pair {
            token.pair_index = Some(pair);
            self.tokens[pair].pair_index = Some(index);
        }
        if let Some(error) = lexeme.error {
            tracing::debug!(
                index,
                kind = %token.kind,
                start = token.start,
                end = token.end,
                error = %error,
                "error token"
            );
            token.mark_error(TokenError::new(error, &self.messages));
        }
        tracing::trace!(index, kind = %token.kind, start = token.start, end = token.end, "token");

        self.tokens.push(token);
        Some(index)
    }

    fn read_inline_start(&mut self, index: usize) -> Lexeme {
        self.input.next();
        self.flags.inline_name_pending = true;
        self.stack.push(StackEntry::opener(BracketKind::Inline, index));
        Lexeme::plain(TokenType::InlineStart)
    }

    fn read_inline_end(&mut self) -> Lexeme {
        self.input.next();
        self.flags.leave_inline();
        Lexeme::closing(TokenType::InlineEnd, self.stack.close(BracketKind::Inline))
    }

    fn read_block_start(&mut self, index: usize) -> Lexeme {
        self.input.next();
        self.flags.block_tag = true;
        let kind = if self.input.peek() == Some(glyph::CLOSING_MARKER) {
            self.input.next();
            TokenType::BlockClosingStart
        } else {
            TokenType::BlockStart
        };
        self.stack.push(StackEntry::opener(BracketKind::Block, index));
        Lexeme::plain(kind)
    }

    fn read_block_end(&mut self) -> Lexeme {
        self.input.next();
        self.flags.block_tag = false;
        Lexeme::closing(TokenType::BlockEnd, self.stack.close(BracketKind::Block))
    }

    fn read_separator(&mut self) -> Lexeme {
        self.input.next();
        Lexeme::plain(self.flags.separator_type())
    }

    fn read_text_segment(&mut self) -> Lexeme {
        self.input.read_while(glyph::is_letter);
        Lexeme::plain(self.flags.segment_type())
    }

    fn read_bracket(&mut self, ch: char, index: usize) -> Lexeme {
        self.input.next();
        let kind = match glyph::bracket_type(ch) {
            Some(kind) => kind,
            None => return self.unrecognized(ch),
        };
        let (bracket, side) = match kind.bracket() {
            Some(found) => found,
            None => return self.unrecognized(ch),
        };

        match side {
            Side::Open => {
                self.stack.push(StackEntry::opener(bracket, index));
                self.flags.set_body(bracket, true);
                Lexeme::plain(kind)
            }
            Side::Close => {
                let opener = self.stack.close(bracket);
                if opener.is_none() {
                    self.stack.push(StackEntry::closer(bracket, index));
                }
                self.flags.set_body(bracket, false);
                Lexeme::closing(kind, opener)
            }
        }
    }

    fn read_colon(&mut self) -> Lexeme {
        self.input.next();
        self.flags.enter_inline_body();
        Lexeme::plain(TokenType::Colon)
    }

    fn read_line_break(&mut self) -> Lexeme {
        self.input.next();
        if self.flags.forbids_line_break() {
            Lexeme::error(TokenType::Lb, ErrorKind::DisallowedLineBreak)
        } else {
            Lexeme::plain(TokenType::Lb)
        }
    }

    fn read_unknown(&mut self, ch: char) -> Lexeme {
        self.input.next();
        self.unrecognized(ch)
    }

    fn unrecognized(&self, ch: char) -> Lexeme {
        Lexeme::error(TokenType::Unknown, ErrorKind::IllegalCharacter(ch))
    }
}

/// Pulls tokens one by one. Iteration does not run the end-of-input finalization; use
/// [`Lexer::tokenize_all`] when unclosed openers must be flagged.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
