//! Fixed-size set of terminal kinds
//!
//! One bit per [`TokenKind`], indexed by declaration order, so iterating a
//! set yields kinds in the order diagnostics list them.

use crate::lexer::TokenKind;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    pub const fn single(kind: TokenKind) -> Self {
        TokenSet(1 << kind as u32)
    }

    pub const fn of(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            bits |= 1 << kinds[i] as u32;
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & (1 << kind as u32) != 0
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    pub const fn intersection(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 & other.0)
    }

    pub const fn difference(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 & !other.0)
    }

    pub fn insert(&mut self, kind: TokenKind) {
        self.0 |= 1 << kind as u32;
    }

    /// Add every member of `other`; returns whether anything was new.
    pub fn extend(&mut self, other: TokenSet) -> bool {
        let before = self.0;
        self.0 |= other.0;
        self.0 != before
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<TokenKind> for TokenSet {
    fn from_iter<I: IntoIterator<Item = TokenKind>>(iter: I) -> Self {
        let mut set = TokenSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(TokenKind::tag)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_fits() {
        assert!(TokenKind::ALL.len() <= 128);
        let all: TokenSet = TokenKind::ALL.into_iter().collect();
        assert_eq!(all.len(), TokenKind::ALL.len());
        assert!(all.contains(TokenKind::Eof));
    }

    #[test]
    fn test_set_operations() {
        let a = TokenSet::of(&[TokenKind::Semicolon, TokenKind::Comma]);
        let b = TokenSet::single(TokenKind::Comma);
        assert!(a.contains(TokenKind::Comma));
        assert!(!b.contains(TokenKind::Semicolon));
        assert_eq!(a.intersection(b), b);
        assert_eq!(a.difference(b), TokenSet::single(TokenKind::Semicolon));
        assert_eq!(b.union(a), a);

        let mut c = TokenSet::EMPTY;
        assert!(c.is_empty());
        assert!(c.extend(b));
        assert!(!c.extend(b));
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let set = TokenSet::of(&[TokenKind::Eof, TokenKind::Tile, TokenKind::RParen]);
        let kinds: Vec<_> = set.iter().collect();
        assert_eq!(kinds, vec![TokenKind::Tile, TokenKind::RParen, TokenKind::Eof]);
    }
}
