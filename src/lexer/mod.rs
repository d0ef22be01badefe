//! Lexical analysis
//!
//! Turns source text into a complete token stream, whitespace and comments
//! included, plus every lexical error found along the way. Lexing never
//! aborts: malformed units are reported and skipped, and scanning resumes in
//! the start state.
//!
//! ```text
//! source ──> Cursor ──> DFA (ladder / literals / operators) ──> Token
//!                               │                                 │
//!                               └──> LexError      delimiter check┘
//! ```

pub mod cursor;
pub mod delimiters;
mod dfa;
pub mod errors;
pub mod interner;
pub mod keywords;
mod literals;
pub mod token;

pub use dfa::Lexer;
pub use errors::{LexError, LexErrorKind};
pub use token::{
    ScanState, SourceLocation, Token, TokenKind, TokenRecord, TokenRecordError, TraceStep,
};

use crate::config::LexerConfig;

/// Lex `source` with the given limits.
pub fn tokenize(source: &str, config: &LexerConfig) -> (Vec<Token>, Vec<LexError>) {
    Lexer::new(source, config).tokenize()
}
