//! Delimiter predicate table
//!
//! Each token kind names the set of characters that may legally follow it.
//! The lexer checks the next unread character after emitting a token and
//! records an "invalid delimiter" error when the predicate rejects it. End of
//! input is accepted by every predicate.

use super::token::TokenKind;

const OPERATOR_CHARS: &str = "+-*/%<>=!&|";

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n')
}

fn is_operator(ch: char) -> bool {
    OPERATOR_CHARS.contains(ch)
}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Named follower predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Type keywords and `:`
    Whitespace,
    /// Keywords that open a parenthesised header
    CallOpen,
    /// `crack`, `mend`
    StatementEnd,
    /// `do`, `else`
    BlockOpen,
    /// `solid`, `fragile`
    BoolLiteral,
    /// `ground`
    CaseColon,
    Assign,
    Comparison,
    Plus,
    IncDec,
    ArithAssign,
    Minus,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Semicolon,
    Identifier,
    TileLiteral,
    GlassLiteral,
    /// Brick and wall literals
    TextLiteral,
    /// `.` and address-of `&`
    IdentStart,
    /// Space, tab and newline tokens
    Trivia,
    /// After `*/`
    CommentEnd,
}

impl Delimiter {
    /// Predicate for a token kind; `None` when nothing needs checking.
    pub fn for_kind(kind: TokenKind) -> Option<Delimiter> {
        use TokenKind as K;

        let delimiter = match kind {
            K::Tile
            | K::Glass
            | K::Brick
            | K::Wall
            | K::Beam
            | K::Field
            | K::House
            | K::Roof
            | K::Cement
            | K::Home
            | K::Door
            | K::Colon => Delimiter::Whitespace,
            K::Blueprint | K::For | K::If | K::Room | K::View | K::While | K::Write => {
                Delimiter::CallOpen
            }
            K::Crack | K::Mend => Delimiter::StatementEnd,
            K::Do | K::Else => Delimiter::BlockOpen,
            K::Solid | K::Fragile => Delimiter::BoolLiteral,
            K::Ground => Delimiter::CaseColon,
            K::Assign => Delimiter::Assign,
            K::EqEq | K::NotEq | K::Lt | K::Le | K::Gt | K::Ge | K::AndAnd | K::OrOr | K::Bang => {
                Delimiter::Comparison
            }
            K::Plus => Delimiter::Plus,
            K::Increment | K::Decrement => Delimiter::IncDec,
            K::PlusAssign
            | K::MinusAssign
            | K::StarAssign
            | K::SlashAssign
            | K::PercentAssign
            | K::Star
            | K::Slash
            | K::Percent => Delimiter::ArithAssign,
            K::Minus => Delimiter::Minus,
            K::LBrace => Delimiter::OpenBrace,
            K::RBrace => Delimiter::CloseBrace,
            K::LParen => Delimiter::OpenParen,
            K::RParen => Delimiter::CloseParen,
            K::LBracket => Delimiter::OpenBracket,
            K::RBracket => Delimiter::CloseBracket,
            K::Comma => Delimiter::Comma,
            K::Semicolon => Delimiter::Semicolon,
            K::Identifier => Delimiter::Identifier,
            K::TileLiteral => Delimiter::TileLiteral,
            K::GlassLiteral => Delimiter::GlassLiteral,
            K::BrickLiteral | K::WallLiteral => Delimiter::TextLiteral,
            K::Dot | K::Ampersand => Delimiter::IdentStart,
            K::Space | K::Tab | K::Newline => Delimiter::Trivia,
            K::BlockComment => Delimiter::CommentEnd,
            K::LineComment | K::Eof => return None,
        };
        Some(delimiter)
    }

    /// Whether `next` may follow a token guarded by this predicate.
    pub fn accepts(self, next: Option<char>) -> bool {
        let Some(ch) = next else {
            return true;
        };
        let ws = is_whitespace(ch);
        let alnum = is_ident_continue(ch);
        let alpha = is_ident_start(ch);
        let op = is_operator(ch);

        match self {
            Delimiter::Whitespace | Delimiter::CommentEnd => ws,
            Delimiter::CallOpen => ws || ch == '(',
            Delimiter::StatementEnd => ws || ch == ';',
            Delimiter::BlockOpen => ws || ch == '{',
            Delimiter::BoolLiteral => ws || op || "})]:;,".contains(ch),
            Delimiter::CaseColon => ws || ch == ':',
            Delimiter::Assign => ws || alnum || "+-!{('\"".contains(ch),
            Delimiter::Comparison => ws || alnum || "+-!('\"".contains(ch),
            Delimiter::Plus => ws || alnum || "-!('\"".contains(ch),
            Delimiter::IncDec => ws || alpha || ")],;".contains(ch),
            Delimiter::ArithAssign => ws || alnum || "+-!'(".contains(ch),
            Delimiter::Minus => ws || alpha || "+!('".contains(ch),
            Delimiter::OpenBrace => ws || alnum || "-{}'\"".contains(ch),
            Delimiter::CloseBrace => ws || alpha || "};,".contains(ch),
            Delimiter::OpenParen => ws || alnum || "-+!()'\"".contains(ch),
            Delimiter::CloseParen => ws || op || "{)];,:".contains(ch),
            Delimiter::OpenBracket => ws || alnum || "+-!(]'\"".contains(ch),
            Delimiter::CloseBracket => ws || op || ")[];,".contains(ch),
            Delimiter::Comma => ws || alnum || "-&'\"{(!".contains(ch),
            Delimiter::Semicolon => ws || alnum || "+-;)}(!".contains(ch),
            Delimiter::Identifier => ws || op || "()[].,;".contains(ch),
            Delimiter::TileLiteral => ws || op || ")]},:;".contains(ch),
            Delimiter::GlassLiteral => ws || op || ")]},;".contains(ch),
            Delimiter::TextLiteral => ws || "+><=!&|)]},:;".contains(ch),
            Delimiter::IdentStart => alpha,
            Delimiter::Trivia => ws || (' '..='~').contains(&ch),
        }
    }
}

/// Convenience wrapper: does `next` legally follow a token of `kind`?
pub fn follows(kind: TokenKind, next: Option<char>) -> bool {
    Delimiter::for_kind(kind).map_or(true, |delimiter| delimiter.accepts(next))
}
