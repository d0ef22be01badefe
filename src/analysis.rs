//! Lex, then parse
//!
//! Parsing only runs on a clean token stream. When the lexer reports
//! anything, the lexical errors are the whole answer.

use crate::config::LexerConfig;
use crate::lexer::{self, LexError, Token};
use crate::parser::{self, SyntaxError};
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub lex_errors: Vec<LexError>,
    pub syntax_errors: Vec<SyntaxError>,
    /// Whether the parser ran at all
    pub parsed: bool,
}

impl Analysis {
    pub fn accepted(&self) -> bool {
        self.parsed && self.lex_errors.is_empty() && self.syntax_errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.lex_errors.len() + self.syntax_errors.len()
    }
}

#[instrument(skip_all, fields(chars = source.chars().count()))]
pub fn analyze(source: &str, config: &LexerConfig) -> Analysis {
    let (tokens, lex_errors) = lexer::tokenize(source, config);
    if !lex_errors.is_empty() {
        debug!(count = lex_errors.len(), "lexical errors, parser skipped");
        return Analysis {
            tokens,
            lex_errors,
            syntax_errors: Vec::new(),
            parsed: false,
        };
    }

    let syntax_errors = parser::parse(&tokens);
    Analysis {
        tokens,
        lex_errors,
        syntax_errors,
        parsed: true,
    }
}
