//! Predictive backtracking parser
//!
//! Each nonterminal tries, in order, every alternative whose predict set
//! contains the lookahead. An alternative that fails is rolled back to its
//! checkpoint and the next one is tried; the first one to succeed wins.
//! Failures travel up as `Err(Failure)` so that the whole call tree stops on
//! the first unrecoverable mismatch.
//!
//! The reported error is the failure that got furthest into the token
//! stream: among the alternatives of one nonterminal, and at the top level
//! between the final failure and the furthest one seen during backtracking.

use super::errors::SyntaxError;
use super::grammar::{Nonterminal, Symbol};
use super::predict::PredictTable;
use super::token_set::TokenSet;
use super::tracker::Tracker;
use crate::lexer::{SourceLocation, Token, TokenKind};
use tracing::{debug, instrument, trace};

/// A failed match and the token index it happened at.
#[derive(Debug, Clone)]
struct Failure {
    index: usize,
    error: SyntaxError,
}

type Step = Result<(), Failure>;

/// Saved state for rolling back a failed alternative.
#[derive(Debug, Clone)]
struct Checkpoint {
    position: usize,
    tracker: Tracker,
}

/// A nonterminal being parsed and the alternatives it has left.
#[derive(Debug)]
struct Frame {
    nt: Nonterminal,
    start: usize,
    next: usize,
    best: Option<Failure>,
}

/// A frame waiting on its tail nonterminal.
#[derive(Debug)]
struct Suspended {
    frame: Frame,
    alternative: usize,
    checkpoint: Checkpoint,
}

enum Progress {
    Matched,
    Tail {
        nt: Nonterminal,
        alternative: usize,
        checkpoint: Checkpoint,
    },
    Failed(Failure),
}

pub struct Parser<'t> {
    tokens: Vec<&'t Token>,
    eof_location: SourceLocation,
    position: usize,
    table: &'static PredictTable,
    tracker: Tracker,
    furthest: Option<Failure>,
}

impl<'t> Parser<'t> {
    /// Whitespace, comments and the lexer's `EOF` token are dropped here.
    pub fn new(tokens: &'t [Token]) -> Self {
        let eof_location = tokens
            .iter()
            .find(|token| token.is_eof())
            .map(|token| token.location)
            .or_else(|| {
                tokens.last().map(|token| {
                    SourceLocation::new(
                        token.location.line,
                        token.location.column + token.lexeme.chars().count(),
                    )
                })
            })
            .unwrap_or(SourceLocation::new(1, 1));

        Self {
            tokens: tokens
                .iter()
                .filter(|token| !token.kind.is_trivia() && !token.is_eof())
                .collect(),
            eof_location,
            position: 0,
            table: PredictTable::standard(),
            tracker: Tracker::new(),
            furthest: None,
        }
    }

    /// Parse the whole stream. Returns no errors when the program is
    /// accepted, otherwise exactly one.
    #[instrument(skip_all, fields(tokens = self.tokens.len()))]
    pub fn parse(mut self) -> Vec<SyntaxError> {
        let failure = match self.parse_nonterminal(Nonterminal::START) {
            Ok(()) if self.position >= self.tokens.len() => {
                debug!("program accepted");
                return Vec::new();
            }
            Ok(()) => self.failure(TokenSet::single(TokenKind::Eof), true),
            Err(failure) => failure,
        };

        let reported = match self.furthest.take() {
            Some(furthest) if furthest.index > failure.index => furthest,
            _ => failure,
        };
        debug!(index = reported.index, error = %reported.error, "syntax error");
        vec![reported.error]
    }

    fn lookahead(&self) -> TokenKind {
        self.tokens
            .get(self.position)
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Parse `nt`. An alternative that ends in a nonterminal continues with
    /// it in a loop instead of a nested call, so list rules (`<func_body>`,
    /// `<exp_op>` → `<init_value>`, ...) run in constant stack depth. The
    /// suspended frames keep their remaining alternatives: when a tail
    /// fails, the frame below it resumes with its next alternative, as a
    /// returning call would.
    fn parse_nonterminal(&mut self, nt: Nonterminal) -> Step {
        let mut suspended: Vec<Suspended> = Vec::new();
        let mut frame = self.enter(nt);

        loop {
            match self.advance(&mut frame) {
                Progress::Matched => {
                    self.leave(frame.nt);
                    for below in suspended.iter().rev() {
                        self.leave(below.frame.nt);
                    }
                    return Ok(());
                }
                Progress::Tail {
                    nt,
                    alternative,
                    checkpoint,
                } => {
                    let next = self.enter(nt);
                    suspended.push(Suspended {
                        frame: std::mem::replace(&mut frame, next),
                        alternative,
                        checkpoint,
                    });
                }
                Progress::Failed(failure) => {
                    self.leave(frame.nt);
                    let Some(below) = suspended.pop() else {
                        return Err(failure);
                    };
                    frame = below.frame;
                    self.reject(&mut frame, below.alternative, below.checkpoint, failure);
                }
            }
        }
    }

    fn enter(&mut self, nt: Nonterminal) -> Frame {
        if nt.is_expression() {
            self.tracker.enter_expression();
        }
        Frame {
            nt,
            start: self.position,
            next: 0,
            best: None,
        }
    }

    fn leave(&mut self, nt: Nonterminal) {
        if nt.is_expression() {
            self.tracker.leave_expression();
        }
    }

    /// Try the remaining predicted alternatives of `frame` until one matches,
    /// one reaches its tail nonterminal, or all have failed.
    fn advance(&mut self, frame: &mut Frame) -> Progress {
        let lookahead = self.lookahead();
        let alternatives = frame.nt.alternatives();

        while let Some(alternative) = alternatives.get(frame.next) {
            let index = frame.next;
            frame.next += 1;
            if !self.table.predict(frame.nt, index).contains(lookahead) {
                continue;
            }
            let checkpoint = self.checkpoint();
            let (body, tail) = match alternative.split_last() {
                Some((Symbol::N(tail), body)) => (body, Some(*tail)),
                _ => (*alternative, None),
            };
            match (self.parse_sequence(body), tail) {
                (Ok(()), Some(nt)) => {
                    return Progress::Tail {
                        nt,
                        alternative: index,
                        checkpoint,
                    }
                }
                (Ok(()), None) => return Progress::Matched,
                (Err(failure), _) => self.reject(frame, index, checkpoint, failure),
            }
        }

        match frame.best.take() {
            Some(failure) => Progress::Failed(failure),
            None => {
                let expected = self.table.expected(frame.nt);
                let pruned = self.tracker.prune(expected);
                let expected = if pruned.is_empty() { expected } else { pruned };
                Progress::Failed(self.failure(expected, false))
            }
        }
    }

    /// Roll back a failed alternative of `frame`, keeping its failure if it
    /// got further than the others.
    fn reject(
        &mut self,
        frame: &mut Frame,
        alternative: usize,
        checkpoint: Checkpoint,
        failure: Failure,
    ) {
        trace!(
            nonterminal = frame.nt.name(),
            alternative,
            failed_at = failure.index,
            "rolling back"
        );
        self.note_furthest(&failure);
        let further = frame
            .best
            .as_ref()
            .map_or(true, |best| failure.index > best.index);
        if failure.index > frame.start && further {
            frame.best = Some(failure);
        }
        self.restore(checkpoint);
    }

    fn parse_sequence(&mut self, symbols: &[Symbol]) -> Step {
        for symbol in symbols {
            match *symbol {
                Symbol::T(kind) => self.expect(kind)?,
                Symbol::N(nt) => self.parse_nonterminal(nt)?,
                Symbol::Expr(nt, ends) => {
                    self.tracker.push_ends(ends);
                    let result = self.parse_nonterminal(nt);
                    self.tracker.pop_ends();
                    result?;
                }
            }
        }
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Step {
        if self.lookahead() == kind {
            self.tracker.matched(kind);
            self.position += 1;
            Ok(())
        } else {
            Err(self.failure(TokenSet::single(kind), false))
        }
    }

    /// Build a failure at the current position.
    fn failure(&self, expected: TokenSet, trailing: bool) -> Failure {
        let (found, lexeme, start) = match self.tokens.get(self.position) {
            Some(token) => (token.kind, token.lexeme.clone(), token.location),
            None => (TokenKind::Eof, String::new(), self.eof_location),
        };
        let width = lexeme.chars().count().max(1);
        Failure {
            index: self.position,
            error: SyntaxError {
                found,
                lexeme,
                expected: expected.iter().collect(),
                trailing,
                start,
                end: SourceLocation::new(start.line, start.column + width),
            },
        }
    }

    fn note_furthest(&mut self, failure: &Failure) {
        let further = self
            .furthest
            .as_ref()
            .map_or(true, |furthest| failure.index > furthest.index);
        if further {
            self.furthest = Some(failure.clone());
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            tracker: self.tracker.clone(),
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.tracker = checkpoint.tracker;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;
    use crate::lexer::tokenize;

    fn parse_source(source: &str) -> Vec<SyntaxError> {
        let (tokens, errors) = tokenize(source, &LexerConfig::default());
        assert!(errors.is_empty(), "lex errors: {errors:?}");
        Parser::new(&tokens).parse()
    }

    #[test]
    fn test_minimal_program() {
        assert!(parse_source("blueprint() {}").is_empty());
    }

    #[test]
    fn test_main_type_backtracks_over_function() {
        // `tile` first looks like a function return type
        assert!(parse_source("tile blueprint() {}").is_empty());
    }

    #[test]
    fn test_function_list_backtracks_into_typed_entry() {
        // The second `tile` starts a function frame that has to give way to
        // the entry point's return type
        assert!(parse_source("tile add() { home 1; } tile blueprint() {}").is_empty());
        assert!(parse_source("field a() {} field b() {} field blueprint() {}").is_empty());
    }

    #[test]
    fn test_long_lists_keep_the_furthest_error() {
        let body = "x = y + 1;\n".repeat(5_000);
        let errors = parse_source(&format!("blueprint() {{\n{body}x = y + ;\n}}"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].found, TokenKind::Semicolon);
        assert_eq!(errors[0].start, SourceLocation::new(5_002, 9));
    }

    #[test]
    fn test_missing_semicolon_points_at_brace() {
        let errors = parse_source("blueprint() {\n    tile x = 1\n}");
        assert_eq!(errors.len(), 1);
        let err = &errors[0];
        assert_eq!(err.found, TokenKind::RBrace);
        assert_eq!(err.start, SourceLocation::new(3, 1));
        assert!(err.expected.contains(&TokenKind::Semicolon));
        assert!(err.expected.contains(&TokenKind::Comma));
        assert!(!err.expected.contains(&TokenKind::RParen));
    }

    #[test]
    fn test_trailing_token() {
        let errors = parse_source("blueprint() {} x");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].trailing);
        assert_eq!(
            errors[0].message(),
            "unexpected trailing token 'x'; expected one of ['EOF']"
        );
    }

    #[test]
    fn test_unexpected_eof() {
        let errors = parse_source("blueprint() {");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].found, TokenKind::Eof);
        assert!(errors[0].message().starts_with("unexpected token 'EOF'"));
        assert_eq!(errors[0].start, SourceLocation::new(1, 14));
        assert_eq!(errors[0].end, SourceLocation::new(1, 15));
    }

    #[test]
    fn test_empty_input() {
        let errors = Parser::new(&[]).parse();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].found, TokenKind::Eof);
        assert!(errors[0].expected.contains(&TokenKind::Blueprint));
        assert!(errors[0].expected.contains(&TokenKind::Roof));
    }

    #[test]
    fn test_condition_expects_closing_paren() {
        let errors = parse_source("blueprint() { if (x { } }");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].found, TokenKind::LBrace);
        assert!(errors[0].expected.contains(&TokenKind::RParen));
        assert!(!errors[0].expected.contains(&TokenKind::Semicolon));
    }
}
