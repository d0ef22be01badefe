//! Lexical error types
//!
//! Lexing never stops on an error. Each [`LexError`] records where the problem
//! is, which scanned unit it belongs to and, when that unit was dropped rather
//! than emitted as a token, the exact text that was skipped.

use super::token::{SourceLocation, TokenKind};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// What went wrong while scanning
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unknown character '{}'", .0.escape_default())]
    UnknownCharacter(char),

    #[error("identifier exceeds {max} characters")]
    IdentifierTooLong { max: usize },

    #[error("integer literal exceeds {max} digits")]
    IntegerTooLong { max: usize },

    #[error("integer part of glass literal exceeds {max} digits")]
    FloatIntegerTooLong { max: usize },

    #[error("fractional part of glass literal exceeds {max} digits")]
    FloatFractionTooLong { max: usize },

    #[error("identifier cannot start with a digit")]
    DigitLedIdentifier,

    #[error("invalid glass literal: multiple '.'")]
    MultipleDots,

    #[error("unknown escape sequence '\\{}'", .0.escape_default())]
    InvalidEscape(char),

    #[error("non-printable character '{}' in literal", .0.escape_default())]
    NonPrintable(char),

    #[error("unterminated wall literal")]
    UnterminatedString,

    #[error("unterminated brick literal")]
    UnterminatedChar,

    #[error("empty brick literal")]
    EmptyChar,

    #[error("brick literal holds more than one character")]
    CharTooLong,

    #[error("unterminated multi-line comment")]
    UnterminatedBlockComment,

    #[error("single '&' must be '&&' or precede an identifier")]
    LoneAmpersand,

    #[error("single '|' must be '||'")]
    LonePipe,

    #[error("invalid delimiter after '{after}' (got {})", describe_next(.found))]
    InvalidDelimiter {
        after: TokenKind,
        found: Option<char>,
    },
}

fn describe_next(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("'{}'", ch.escape_default()),
        None => "end of input".to_string(),
    }
}

/// A recorded lexical error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {}, column {}: {kind}", .location.line, .location.column)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Point where the problem was detected
    pub location: SourceLocation,
    /// Start of the scanned unit this error belongs to
    pub start: SourceLocation,
    /// Position just past the end of that unit
    pub end: SourceLocation,
    /// Offending character, if there is one
    pub character: Option<char>,
    /// Source text consumed without producing a token. Empty when the unit
    /// was emitted anyway or when another error already owns the text.
    pub skipped: String,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: SourceLocation, character: Option<char>) -> Self {
        Self {
            kind,
            location,
            start: location,
            end: location,
            character,
            skipped: String::new(),
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }

    /// Whether the unit this error belongs to was dropped from the stream.
    pub fn dropped_unit(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl Serialize for LexError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("LexError", 9)?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("line", &self.location.line)?;
        state.serialize_field("col", &self.location.column)?;
        state.serialize_field("character", &self.character)?;
        state.serialize_field("skipped", &self.skipped)?;
        state.serialize_field("start_line", &self.start.line)?;
        state.serialize_field("start_col", &self.start.column)?;
        state.serialize_field("end_line", &self.end.line)?;
        state.serialize_field("end_col", &self.end.column)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let loc = SourceLocation::new(3, 7);
        let err = LexError::new(LexErrorKind::UnknownCharacter('@'), loc, Some('@'));
        assert_eq!(err.to_string(), "line 3, column 7: unknown character '@'");

        let err = LexError::new(
            LexErrorKind::InvalidDelimiter {
                after: TokenKind::Do,
                found: Some(';'),
            },
            loc,
            Some(';'),
        );
        assert_eq!(err.message(), "invalid delimiter after 'do' (got ';')");

        let kind = LexErrorKind::InvalidEscape('q');
        assert_eq!(kind.to_string(), "unknown escape sequence '\\q'");
        let kind = LexErrorKind::NonPrintable('\u{7}');
        assert_eq!(kind.to_string(), "non-printable character '\\u{7}' in literal");
    }

    #[test]
    fn test_serialized_shape() {
        let mut err = LexError::new(
            LexErrorKind::DigitLedIdentifier,
            SourceLocation::new(1, 2),
            Some('x'),
        );
        err.start = SourceLocation::new(1, 1);
        err.end = SourceLocation::new(1, 3);
        err.skipped = "1x".to_string();

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["message"], "identifier cannot start with a digit");
        assert_eq!(value["line"], 1);
        assert_eq!(value["col"], 2);
        assert_eq!(value["character"], "x");
        assert_eq!(value["skipped"], "1x");
        assert_eq!(value["start_col"], 1);
        assert_eq!(value["end_col"], 3);
        assert!(err.dropped_unit());
    }
}
