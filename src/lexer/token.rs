//! Token definitions shared by the lexer and the parser
//!
//! A [`Token`] keeps the exact source slice it was built from, so the token
//! stream (trivia included) can be concatenated back into the source text.
//! [`TokenRecord`] is the flat external shape used for JSON exchange.

use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// 1-based line/column position in the source text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Terminal categories of the language.
///
/// The declaration order is significant: it is the bit index used by
/// [`crate::parser::TokenSet`] and therefore the order in which expected
/// tokens are listed in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    // Keywords
    Tile,
    Glass,
    Brick,
    Wall,
    Beam,
    Field,
    House,
    Roof,
    Cement,
    If,
    Else,
    For,
    While,
    Do,
    Crack,
    Mend,
    Room,
    Door,
    Ground,
    Blueprint,
    Home,
    View,
    Write,
    Solid,
    Fragile,

    // Identifiers and literals
    Identifier,
    TileLiteral,
    GlassLiteral,
    BrickLiteral,
    WallLiteral,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Assignment
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    Increment,
    Decrement,

    // Comparison and logic
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Ampersand,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    Comma,
    Dot,

    // Trivia
    Space,
    Tab,
    Newline,
    LineComment,
    BlockComment,

    Eof,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 69] = [
        TokenKind::Tile,
        TokenKind::Glass,
        TokenKind::Brick,
        TokenKind::Wall,
        TokenKind::Beam,
        TokenKind::Field,
        TokenKind::House,
        TokenKind::Roof,
        TokenKind::Cement,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::While,
        TokenKind::Do,
        TokenKind::Crack,
        TokenKind::Mend,
        TokenKind::Room,
        TokenKind::Door,
        TokenKind::Ground,
        TokenKind::Blueprint,
        TokenKind::Home,
        TokenKind::View,
        TokenKind::Write,
        TokenKind::Solid,
        TokenKind::Fragile,
        TokenKind::Identifier,
        TokenKind::TileLiteral,
        TokenKind::GlassLiteral,
        TokenKind::BrickLiteral,
        TokenKind::WallLiteral,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Percent,
        TokenKind::Assign,
        TokenKind::PlusAssign,
        TokenKind::MinusAssign,
        TokenKind::StarAssign,
        TokenKind::SlashAssign,
        TokenKind::PercentAssign,
        TokenKind::Increment,
        TokenKind::Decrement,
        TokenKind::EqEq,
        TokenKind::NotEq,
        TokenKind::Lt,
        TokenKind::Le,
        TokenKind::Gt,
        TokenKind::Ge,
        TokenKind::AndAnd,
        TokenKind::OrOr,
        TokenKind::Bang,
        TokenKind::Ampersand,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::LBracket,
        TokenKind::RBracket,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::Space,
        TokenKind::Tab,
        TokenKind::Newline,
        TokenKind::LineComment,
        TokenKind::BlockComment,
        TokenKind::Eof,
    ];

    /// External kind string. Identifiers report the generic `id`; use
    /// [`Token::tag`] to get the interned `idN` form.
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Tile => "tile",
            TokenKind::Glass => "glass",
            TokenKind::Brick => "brick",
            TokenKind::Wall => "wall",
            TokenKind::Beam => "beam",
            TokenKind::Field => "field",
            TokenKind::House => "house",
            TokenKind::Roof => "roof",
            TokenKind::Cement => "cement",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Crack => "crack",
            TokenKind::Mend => "mend",
            TokenKind::Room => "room",
            TokenKind::Door => "door",
            TokenKind::Ground => "ground",
            TokenKind::Blueprint => "blueprint",
            TokenKind::Home => "home",
            TokenKind::View => "view",
            TokenKind::Write => "write",
            TokenKind::Solid => "solid",
            TokenKind::Fragile => "fragile",
            TokenKind::Identifier => "id",
            TokenKind::TileLiteral => "tile_lit",
            TokenKind::GlassLiteral => "glass_lit",
            TokenKind::BrickLiteral => "brick_lit",
            TokenKind::WallLiteral => "wall_lit",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Assign => "=",
            TokenKind::PlusAssign => "+=",
            TokenKind::MinusAssign => "-=",
            TokenKind::StarAssign => "*=",
            TokenKind::SlashAssign => "/=",
            TokenKind::PercentAssign => "%=",
            TokenKind::Increment => "++",
            TokenKind::Decrement => "--",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Bang => "!",
            TokenKind::Ampersand => "&",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Space => "space",
            TokenKind::Tab => "tab",
            TokenKind::Newline => "newline",
            TokenKind::LineComment => "Single-Line Comment",
            TokenKind::BlockComment => "Multi-Line Comment",
            TokenKind::Eof => "EOF",
        }
    }

    /// Inverse of [`TokenKind::tag`]. Any tag starting with `id` (`id`,
    /// `id1`, `id27`, ...) maps to [`TokenKind::Identifier`].
    pub fn from_tag(tag: &str) -> Option<TokenKind> {
        if let Some(suffix) = tag.strip_prefix("id") {
            if suffix.chars().all(|c| c.is_ascii_digit()) {
                return Some(TokenKind::Identifier);
            }
        }
        TokenKind::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    pub fn is_keyword(self) -> bool {
        self <= TokenKind::Fragile
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::TileLiteral
                | TokenKind::GlassLiteral
                | TokenKind::BrickLiteral
                | TokenKind::WallLiteral
                | TokenKind::Solid
                | TokenKind::Fragile
        )
    }

    /// Whitespace and comments; dropped before parsing.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Space
                | TokenKind::Tab
                | TokenKind::Newline
                | TokenKind::LineComment
                | TokenKind::BlockComment
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Semantic states of the lexical DFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScanState {
    Ladder,
    Identifier,
    Int,
    FloatFrac,
    String,
    StringEscape,
    Char,
    CharEscape,
    Slash,
    LineComment,
    BlockComment,
    BlockCommentStar,
    Operator,
    Whitespace,
    Recover,
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One consumed character, recorded when tracing is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    pub state: ScanState,
    pub label: &'static str,
    pub ch: char,
}

/// A lexed token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the token.
    pub lexeme: String,
    /// Decoded value of brick/wall literals; `None` means "same as lexeme".
    pub decoded: Option<String>,
    pub location: SourceLocation,
    /// Interned identifier class (1-based), identifiers only.
    pub ident_class: Option<u32>,
    /// Kept despite a length error.
    pub flagged: bool,
    pub trace: Vec<TraceStep>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            decoded: None,
            location,
            ident_class: None,
            flagged: false,
            trace: Vec::new(),
        }
    }

    /// External kind string, with `idN` for interned identifiers.
    pub fn tag(&self) -> Cow<'static, str> {
        match (self.kind, self.ident_class) {
            (TokenKind::Identifier, Some(class)) => Cow::Owned(format!("id{}", class)),
            (kind, _) => Cow::Borrowed(kind.tag()),
        }
    }

    /// Literal value with escapes resolved, or the lexeme.
    pub fn value(&self) -> &str {
        self.decoded.as_deref().unwrap_or(&self.lexeme)
    }

    /// Width in characters, at least 1 so that EOF still gets a caret.
    pub fn width(&self) -> usize {
        self.lexeme.chars().count().max(1)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TokenRecord::from(self).serialize(serializer)
    }
}

/// Flat token shape exchanged with other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub kind: String,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub flagged: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty", skip_deserializing)]
    pub trace: Vec<TraceStep>,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        TokenRecord {
            kind: token.tag().into_owned(),
            lexeme: token.lexeme.clone(),
            line: token.location.line,
            column: token.location.column,
            value: token.decoded.clone(),
            flagged: token.flagged,
            trace: token.trace.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenRecordError {
    #[error("unknown token kind '{kind}' at {line}:{column}")]
    UnknownKind {
        kind: String,
        line: usize,
        column: usize,
    },
}

impl TryFrom<TokenRecord> for Token {
    type Error = TokenRecordError;

    fn try_from(record: TokenRecord) -> Result<Self, Self::Error> {
        let kind = TokenKind::from_tag(&record.kind).ok_or_else(|| {
            TokenRecordError::UnknownKind {
                kind: record.kind.clone(),
                line: record.line,
                column: record.column,
            }
        })?;
        let ident_class = match kind {
            TokenKind::Identifier => record
                .kind
                .strip_prefix("id")
                .and_then(|digits| digits.parse().ok()),
            _ => None,
        };
        Ok(Token {
            kind,
            lexeme: record.lexeme,
            decoded: record.value,
            location: SourceLocation::new(record.line, record.column),
            ident_class,
            flagged: record.flagged,
            trace: Vec::new(),
        })
    }
}
