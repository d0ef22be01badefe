//! Syntax error type

use crate::lexer::{SourceLocation, TokenKind};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The single diagnostic produced by a failed parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "line {}, column {}: {}",
    .start.line,
    .start.column,
    render_message(.found, .lexeme, .expected, .trailing)
)]
pub struct SyntaxError {
    /// Kind of the offending token (`Eof` at end of input)
    pub found: TokenKind,
    /// Its source text; empty at end of input
    pub lexeme: String,
    /// Tokens that would have been accepted, in declaration order
    pub expected: Vec<TokenKind>,
    /// A complete program was followed by more input
    pub trailing: bool,
    pub start: SourceLocation,
    pub end: SourceLocation,
}

fn render_message(
    found: &TokenKind,
    lexeme: &str,
    expected: &[TokenKind],
    trailing: &bool,
) -> String {
    let found = if *found == TokenKind::Eof { "EOF" } else { lexeme };
    let expected = expected
        .iter()
        .map(|kind| format!("'{}'", kind.tag()))
        .collect::<Vec<_>>()
        .join(", ");
    let what = if *trailing {
        "unexpected trailing token"
    } else {
        "unexpected token"
    };
    format!("{what} '{found}'; expected one of [{expected}]")
}

impl SyntaxError {
    pub fn message(&self) -> String {
        render_message(&self.found, &self.lexeme, &self.expected, &self.trailing)
    }

    pub fn line(&self) -> usize {
        self.start.line
    }

    pub fn column(&self) -> usize {
        self.start.column
    }
}

impl Serialize for SyntaxError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let expected: Vec<&str> = self.expected.iter().map(|kind| kind.tag()).collect();
        let mut state = serializer.serialize_struct("SyntaxError", 8)?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("line", &self.start.line)?;
        state.serialize_field("col", &self.start.column)?;
        state.serialize_field("start_line", &self.start.line)?;
        state.serialize_field("start_col", &self.start.column)?;
        state.serialize_field("end_line", &self.end.line)?;
        state.serialize_field("end_col", &self.end.column)?;
        state.serialize_field("expected", &expected)?;
        state.end()
    }
}
