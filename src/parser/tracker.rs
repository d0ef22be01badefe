//! Delimiter and expression-end tracking
//!
//! Used only to trim the expected-token list of a diagnostic. Inside an
//! expression, opened brackets are stacked so that only the matching closer
//! is suggested; otherwise the innermost expression context decides which
//! closers make sense (`;` in a `for` condition, `)` after an `if` condition).

use super::token_set::TokenSet;
use crate::lexer::TokenKind;

const CLOSERS: TokenSet = TokenSet::of(&[
    TokenKind::RParen,
    TokenKind::RBracket,
    TokenKind::RBrace,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::Colon,
]);

fn closer_for(open: TokenKind) -> Option<TokenKind> {
    match open {
        TokenKind::LParen => Some(TokenKind::RParen),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracker {
    depth: usize,
    delimiters: Vec<TokenKind>,
    ends: Vec<TokenSet>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_expression(&mut self) {
        self.depth += 1;
    }

    pub fn leave_expression(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.delimiters.clear();
        }
    }

    pub fn push_ends(&mut self, ends: TokenSet) {
        self.ends.push(ends);
    }

    pub fn pop_ends(&mut self) {
        self.ends.pop();
    }

    /// Record a consumed terminal.
    pub fn matched(&mut self, kind: TokenKind) {
        if self.depth == 0 {
            return;
        }
        if let Some(closer) = closer_for(kind) {
            self.delimiters.push(closer);
        } else if self.delimiters.last() == Some(&kind) {
            self.delimiters.pop();
        }
    }

    /// Drop closers that cannot be right here.
    pub fn prune(&self, expected: TokenSet) -> TokenSet {
        let allowed = match (self.delimiters.last(), self.ends.last()) {
            (Some(&closer), _) => TokenSet::single(closer),
            (None, Some(&ends)) => ends,
            (None, None) => return expected,
        };
        expected.difference(CLOSERS.difference(allowed))
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind as K;

    fn closers() -> TokenSet {
        TokenSet::of(&[K::RParen, K::RBracket, K::Semicolon, K::Comma, K::Plus])
    }

    #[test]
    fn test_no_context_keeps_everything() {
        let tracker = Tracker::new();
        assert_eq!(tracker.prune(closers()), closers());
    }

    #[test]
    fn test_ends_context() {
        let mut tracker = Tracker::new();
        tracker.push_ends(TokenSet::single(K::Semicolon));
        assert_eq!(
            tracker.prune(closers()),
            TokenSet::of(&[K::Semicolon, K::Plus])
        );
        tracker.pop_ends();
        assert_eq!(tracker.prune(closers()), closers());
    }

    #[test]
    fn test_open_bracket_wins_over_ends() {
        let mut tracker = Tracker::new();
        tracker.push_ends(TokenSet::single(K::Semicolon));
        tracker.enter_expression();
        tracker.matched(K::LBracket);
        assert_eq!(
            tracker.prune(closers()),
            TokenSet::of(&[K::RBracket, K::Plus])
        );
        tracker.matched(K::RBracket);
        assert_eq!(
            tracker.prune(closers()),
            TokenSet::of(&[K::Semicolon, K::Plus])
        );
    }

    #[test]
    fn test_brackets_ignored_outside_expressions() {
        let mut tracker = Tracker::new();
        tracker.matched(K::LParen);
        assert_eq!(tracker.prune(closers()), closers());
    }

    #[test]
    fn test_leaving_outermost_expression_clears() {
        let mut tracker = Tracker::new();
        tracker.enter_expression();
        tracker.enter_expression();
        tracker.matched(K::LParen);
        tracker.leave_expression();
        assert_eq!(tracker.depth(), 1);
        assert_eq!(tracker.prune(closers()), TokenSet::of(&[K::RParen, K::Plus]));
        tracker.leave_expression();
        assert_eq!(tracker.prune(closers()), closers());
    }
}
