//! Syntax analysis
//!
//! Confirms or rejects a token stream against the grammar. No tree is built:
//! the result is either no errors (accepted) or exactly one [`SyntaxError`].
//!
//! - [`grammar`]: productions as data (`Nonterminal` → alternatives)
//! - [`predict`]: FIRST / FOLLOW / predict sets computed from the grammar
//! - [`tracker`]: bracket and expression-end context for diagnostics
//! - `parse`: the backtracking engine
//!
//! # Parser Implementation
//!
//! Table-driven recursive descent. Alternatives are selected by predict set;
//! when several apply, each is tried behind a checkpoint and rolled back on
//! failure. Identifier tokens are matched by kind only, whatever their
//! interned class.

pub mod errors;
pub mod grammar;
mod parse;
pub mod predict;
pub mod token_set;
pub mod tracker;

pub use errors::SyntaxError;
pub use grammar::{Nonterminal, Symbol};
pub use parse::Parser;
pub use predict::{Conflict, PredictTable};
pub use token_set::TokenSet;

use crate::lexer::Token;

/// Parse a token stream. Trivia tokens are ignored, so the lexer's output
/// can be passed as is.
pub fn parse(tokens: &[Token]) -> Vec<SyntaxError> {
    Parser::new(tokens).parse()
}
