//! Lexical DFA engine
//!
//! The engine scans one *unit* at a time from the start state. A unit either
//! becomes a token or is dropped; a dropped unit always has at least one
//! error recorded for it, and the first such error carries the dropped text
//! in [`LexError::skipped`]. Every emitted token is then checked against the
//! delimiter table using the next unread character.
//!
//! Literal sub-machines (numbers, strings, chars) live in `literals.rs`.

use super::cursor::Cursor;
use super::delimiters::{follows, is_ident_continue, is_ident_start};
use super::errors::{LexError, LexErrorKind};
use super::interner::Interner;
use super::keywords::KeywordLadder;
use super::token::{ScanState, SourceLocation, Token, TokenKind, TraceStep};
use crate::config::LexerConfig;
use tracing::{debug, instrument, trace};

/// Operators and punctuation, longest spellings first. `/` is handled by the
/// slash sub-machine and `&`/`|` fall back to their own rules.
const OPERATORS: [(&str, TokenKind); 30] = [
    ("+=", TokenKind::PlusAssign),
    ("-=", TokenKind::MinusAssign),
    ("*=", TokenKind::StarAssign),
    ("%=", TokenKind::PercentAssign),
    ("++", TokenKind::Increment),
    ("--", TokenKind::Decrement),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::NotEq),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("%", TokenKind::Percent),
    ("=", TokenKind::Assign),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("!", TokenKind::Bang),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
];

/// Outcome of scanning one unit that is kept as a token.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Scanned {
    pub kind: TokenKind,
    pub decoded: Option<String>,
    pub flagged: bool,
}

impl Scanned {
    pub fn token(kind: TokenKind) -> Self {
        Self {
            kind,
            decoded: None,
            flagged: false,
        }
    }
}

/// Single-pass lexer. Build one per source text.
#[derive(Debug)]
pub struct Lexer {
    pub(super) cursor: Cursor,
    pub(super) config: LexerConfig,
    ladder: &'static KeywordLadder,
    interner: Interner,
    tokens: Vec<Token>,
    pub(super) errors: Vec<LexError>,
    trace: Vec<TraceStep>,
    pub(super) unit_start: usize,
    pub(super) unit_location: SourceLocation,
}

impl Lexer {
    pub fn new(source: &str, config: &LexerConfig) -> Self {
        Self {
            cursor: Cursor::new(source),
            config: config.clone(),
            ladder: KeywordLadder::standard(),
            interner: Interner::new(),
            tokens: Vec::new(),
            errors: Vec::new(),
            trace: Vec::new(),
            unit_start: 0,
            unit_location: SourceLocation::new(1, 1),
        }
    }

    /// Scan the whole source. The token list always ends with an `EOF`
    /// token whose lexeme is empty.
    #[instrument(skip_all, fields(chars = self.cursor.len()))]
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        while !self.cursor.is_at_end() {
            self.unit_start = self.cursor.position();
            self.unit_location = self.cursor.location();
            self.trace.clear();
            let mark = self.errors.len();

            let scanned = self.scan_unit();
            let end = self.cursor.location();
            for err in &mut self.errors[mark..] {
                err.start = self.unit_location;
                err.end = end;
            }

            match scanned {
                Some(scanned) => self.emit(scanned),
                None => self.drop_unit(mark),
            }
        }

        let eof = Token::new(TokenKind::Eof, "", self.cursor.location());
        self.tokens.push(eof);
        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "lexing finished"
        );
        (self.tokens, self.errors)
    }

    fn scan_unit(&mut self) -> Option<Scanned> {
        let ch = self.cursor.peek()?;
        match ch {
            ' ' => self.single(ScanState::Whitespace, "space", TokenKind::Space),
            '\t' => self.single(ScanState::Whitespace, "tab", TokenKind::Tab),
            '\n' => self.single(ScanState::Whitespace, "newline", TokenKind::Newline),
            c if c.is_ascii_lowercase() => self.scan_word(),
            c if is_ident_start(c) => self.scan_identifier(),
            c if c.is_ascii_digit() => self.scan_number(),
            '-' if self.cursor.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number()
            }
            '"' => self.scan_string(),
            '\'' => self.scan_char(),
            '/' => self.scan_slash(),
            _ => self.scan_operator(),
        }
    }

    /// Consume one character, recording it in the trace when enabled.
    pub(super) fn step(&mut self, state: ScanState, label: &'static str) -> Option<char> {
        let ch = self.cursor.advance()?;
        if self.config.record_trace {
            self.trace.push(TraceStep { state, label, ch });
        }
        Some(ch)
    }

    pub(super) fn error(
        &mut self,
        kind: LexErrorKind,
        location: SourceLocation,
        character: Option<char>,
    ) {
        debug!(%location, error = %kind, "lex error");
        self.errors.push(LexError::new(kind, location, character));
    }

    /// Record an error `offset` characters into the current unit. Only used
    /// for units that cannot span lines.
    pub(super) fn error_at_offset(&mut self, kind: LexErrorKind, offset: usize) {
        let location = SourceLocation::new(
            self.unit_location.line,
            self.unit_location.column + offset,
        );
        let character = self.cursor.char_at(self.unit_start + offset);
        self.error(kind, location, character);
    }

    /// Keep an over-long unit as a flagged token or drop it, per config.
    pub(super) fn keep_or_drop(&self, kind: TokenKind, overflowed: bool) -> Option<Scanned> {
        if !overflowed {
            return Some(Scanned::token(kind));
        }
        if self.config.emit_token_on_length_error {
            Some(Scanned {
                kind,
                decoded: None,
                flagged: true,
            })
        } else {
            None
        }
    }

    fn single(&mut self, state: ScanState, label: &'static str, kind: TokenKind) -> Option<Scanned> {
        self.step(state, label);
        Some(Scanned::token(kind))
    }

    /// Lowercase word: climb the keyword ladder, then fall back to an
    /// identifier if the word continues past the last matching rung or
    /// stops on a rung that is not a keyword.
    fn scan_word(&mut self) -> Option<Scanned> {
        let mut rung = self.ladder.root();
        while let Some(ch) = self.cursor.peek() {
            match self.ladder.step(rung, ch) {
                Some(next) => {
                    self.step(ScanState::Ladder, "ladder");
                    rung = next;
                }
                None => break,
            }
        }

        let continues = self.cursor.peek().is_some_and(is_ident_continue);
        match self.ladder.keyword_at(rung) {
            Some(keyword) if !continues => Some(Scanned::token(keyword)),
            _ => self.scan_identifier(),
        }
    }

    /// Finish an identifier from wherever the unit currently stands.
    pub(super) fn scan_identifier(&mut self) -> Option<Scanned> {
        while self.cursor.peek().is_some_and(is_ident_continue) {
            self.step(ScanState::Identifier, "ident");
        }

        let max = self.config.ident_max_len;
        let len = self.cursor.position() - self.unit_start;
        let overflowed = len > max;
        if overflowed {
            self.error_at_offset(LexErrorKind::IdentifierTooLong { max }, max);
        }
        self.keep_or_drop(TokenKind::Identifier, overflowed)
    }

    fn scan_slash(&mut self) -> Option<Scanned> {
        self.step(ScanState::Slash, "slash");
        match self.cursor.peek() {
            Some('/') => {
                self.step(ScanState::LineComment, "slash");
                while let Some(ch) = self.step(ScanState::LineComment, "body") {
                    if ch == '\n' {
                        break;
                    }
                }
                Some(Scanned::token(TokenKind::LineComment))
            }
            Some('*') => {
                self.step(ScanState::BlockComment, "star");
                loop {
                    match self.cursor.peek() {
                        None => {
                            let at = self.cursor.location();
                            self.error(LexErrorKind::UnterminatedBlockComment, at, None);
                            return Some(Scanned::token(TokenKind::BlockComment));
                        }
                        Some('*') if self.cursor.peek_ahead(1) == Some('/') => {
                            self.step(ScanState::BlockCommentStar, "star");
                            self.step(ScanState::BlockCommentStar, "close");
                            return Some(Scanned::token(TokenKind::BlockComment));
                        }
                        Some(_) => {
                            self.step(ScanState::BlockComment, "body");
                        }
                    }
                }
            }
            Some('=') => {
                self.step(ScanState::Operator, "assign");
                Some(Scanned::token(TokenKind::SlashAssign))
            }
            _ => Some(Scanned::token(TokenKind::Slash)),
        }
    }

    fn scan_operator(&mut self) -> Option<Scanned> {
        let first = self.cursor.peek()?;
        let second = self.cursor.peek_ahead(1);

        let matched = OPERATORS.iter().find(|(spelling, _)| {
            let mut chars = spelling.chars();
            chars.next() == Some(first) && chars.next().map_or(true, |c| Some(c) == second)
        });
        if let Some(&(spelling, kind)) = matched {
            for _ in spelling.chars() {
                self.step(ScanState::Operator, "op");
            }
            return Some(Scanned::token(kind));
        }

        if first == '&' && second.is_some_and(is_ident_start) {
            self.step(ScanState::Operator, "address");
            return Some(Scanned::token(TokenKind::Ampersand));
        }

        let at = self.cursor.location();
        self.step(ScanState::Recover, "skip");
        match first {
            '&' => {
                self.error(LexErrorKind::LoneAmpersand, at, Some(first));
                None
            }
            '|' => {
                self.error(LexErrorKind::LonePipe, at, Some(first));
                None
            }
            _ => {
                self.error(LexErrorKind::UnknownCharacter(first), at, Some(first));
                None
            }
        }
    }

    fn emit(&mut self, scanned: Scanned) {
        let lexeme = self.cursor.slice(self.unit_start, self.cursor.position());
        let mut token = Token::new(scanned.kind, lexeme, self.unit_location);
        token.decoded = scanned.decoded;
        token.flagged = scanned.flagged;
        if token.kind == TokenKind::Identifier {
            token.ident_class = Some(self.interner.intern(&token.lexeme));
        }
        if self.config.record_trace {
            token.trace = std::mem::take(&mut self.trace);
        }
        trace!(kind = %token.tag(), lexeme = ?token.lexeme, at = %token.location, "token");

        let next = self.cursor.peek();
        if !follows(token.kind, next) {
            let at = self.cursor.location();
            self.error(
                LexErrorKind::InvalidDelimiter {
                    after: token.kind,
                    found: next,
                },
                at,
                next,
            );
            if let Some(err) = self.errors.last_mut() {
                err.start = token.location;
                err.end = at;
            }
        }

        self.tokens.push(token);
    }

    /// Attach the dropped text to the first error recorded for this unit.
    fn drop_unit(&mut self, mark: usize) {
        let skipped = self.cursor.slice(self.unit_start, self.cursor.position());
        match self.errors.get_mut(mark) {
            Some(err) => err.skipped = skipped,
            None => debug!(?skipped, "dropped unit without an error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> (Vec<Token>, Vec<LexError>) {
        Lexer::new(source, &LexerConfig::default()).tokenize()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).0.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_keyword_versus_identifier() {
        assert_eq!(
            kinds("if iffy IF"),
            vec![
                TokenKind::If,
                TokenKind::Space,
                TokenKind::Identifier,
                TokenKind::Space,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_ladder_mismatch_midword() {
        let (tokens, errors) = lex("blueprx");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].lexeme, "blueprx");
    }

    #[test]
    fn test_operators_longest_match() {
        assert_eq!(
            kinds("a+=b++"),
            vec![
                TokenKind::Identifier,
                TokenKind::PlusAssign,
                TokenKind::Identifier,
                TokenKind::Increment,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_slash_family() {
        let (tokens, errors) = lex("a /= b / c // note\n/* x */ ");
        assert!(errors.is_empty(), "{errors:?}");
        let comment = tokens
            .iter()
            .find(|t| t.kind == TokenKind::LineComment)
            .unwrap();
        assert_eq!(comment.lexeme, "// note\n");
        assert!(tokens.iter().any(|t| t.kind == TokenKind::SlashAssign));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Slash));
        assert!(tokens.iter().any(|t| t.kind == TokenKind::BlockComment));
    }

    #[test]
    fn test_unterminated_block_comment_still_emitted() {
        let (tokens, errors) = lex("/* open");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::UnterminatedBlockComment);
        assert!(errors[0].skipped.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::BlockComment);
        assert_eq!(tokens[0].lexeme, "/* open");
    }

    #[test]
    fn test_ampersand_and_pipe() {
        let (tokens, errors) = lex("&x");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Ampersand);

        let (_, errors) = lex("a & b");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::LoneAmpersand);
        assert_eq!(errors[0].skipped, "&");

        let (_, errors) = lex("a | b");
        assert_eq!(errors[0].kind, LexErrorKind::LonePipe);
    }

    #[test]
    fn test_unknown_character_recovers() {
        let (tokens, errors) = lex("a@b");
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            errors[0].kind,
            LexErrorKind::InvalidDelimiter {
                after: TokenKind::Identifier,
                found: Some('@')
            }
        ));
        assert_eq!(errors[1].kind, LexErrorKind::UnknownCharacter('@'));
        assert_eq!(errors[1].skipped, "@");
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_identifier_cap() {
        let source = "abcdefghijklmnopq";
        let (tokens, errors) = lex(source);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::IdentifierTooLong { max: 15 });
        assert_eq!(errors[0].location, SourceLocation::new(1, 16));
        assert_eq!(errors[0].character, Some('p'));
        assert_eq!(errors[0].skipped, source);
        assert_eq!(tokens.len(), 1);

        let config = LexerConfig {
            emit_token_on_length_error: true,
            ..LexerConfig::default()
        };
        let (tokens, errors) = Lexer::new(source, &config).tokenize();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].skipped.is_empty());
        assert!(tokens[0].flagged);
        assert_eq!(tokens[0].lexeme, source);
    }

    #[test]
    fn test_keywords_ignore_identifier_cap() {
        let config = LexerConfig {
            ident_max_len: 3,
            ..LexerConfig::default()
        };
        let (tokens, errors) = Lexer::new("blueprint", &config).tokenize();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Blueprint);
    }

    #[test]
    fn test_trace_recorded_per_token() {
        let config = LexerConfig {
            record_trace: true,
            ..LexerConfig::default()
        };
        let (tokens, _) = Lexer::new("do {", &config).tokenize();
        assert_eq!(tokens[0].trace.len(), 2);
        assert_eq!(tokens[0].trace[0].state, ScanState::Ladder);
        assert_eq!(tokens[1].trace.len(), 1);
        assert_eq!(tokens[1].trace[0].ch, ' ');
        assert!(tokens[3].trace.is_empty());

        let (tokens, _) = lex("do {");
        assert!(tokens[0].trace.is_empty());
    }

    #[test]
    fn test_carriage_return_is_unknown() {
        let (_, errors) = lex("a\r\n");
        assert!(errors
            .iter()
            .any(|e| e.kind == LexErrorKind::UnknownCharacter('\r')));
    }
}
