//! # koji
//!
//! A lexer for the koji transcription markup, the inline/block syntax used to transcribe
//! historical Japanese documents (furigana, kaeriten, okurigana, editorial annotations,
//! inline tags such as person or place names, and block tags wrapping structural units).
//!
//! The lexer turns source text into a flat, indexed token stream. Bracket-like tokens carry
//! mutual pair links, and malformed input never aborts lexing: every irregularity becomes an
//! ordinary token with its error fields populated. Consumers (see [document](koji::document))
//! derive per-character display classes and error ranges from that stream.
//!
//! File Layout
//!
//! src/koji
//!   ├── input       Character cursor with line/column tracking
//!   ├── range       Character offsets to line/column positions
//!   ├── token       Token model, token types and glyph classification
//!   ├── lexing      The stateful lexer and its bracket stack
//!   ├── mode        Lexer constructor + display class map
//!   ├── config      Layered configuration
//!   ├── document    Consumer of the token stream
//!   ├── formats     Token stream output formats
//!   └── testing     Fluent token assertions and verified samples

pub mod koji;
