//! FIRST / FOLLOW / predict sets
//!
//! Computed once from the grammar data by fixed-point iteration:
//!
//! - FIRST(A) and nullable(A) over all alternatives of A
//! - FOLLOW(`<program>`) = { EOF }; for every `A -> α B β`,
//!   FOLLOW(B) ⊇ FIRST(β), and FOLLOW(B) ⊇ FOLLOW(A) when β is nullable
//! - predict(A -> α) = FIRST(α), plus FOLLOW(A) when α is nullable

use super::grammar::{Nonterminal, Symbol};
use super::token_set::TokenSet;
use crate::lexer::TokenKind;
use std::sync::OnceLock;

/// Two alternatives of one nonterminal that share lookahead tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub nonterminal: Nonterminal,
    pub first: usize,
    pub second: usize,
    pub overlap: TokenSet,
}

#[derive(Debug, Clone)]
pub struct PredictTable {
    first: Vec<TokenSet>,
    nullable: Vec<bool>,
    follow: Vec<TokenSet>,
    predict: Vec<Vec<TokenSet>>,
}

impl PredictTable {
    pub fn build() -> Self {
        let count = Nonterminal::ALL.len();
        let mut table = PredictTable {
            first: vec![TokenSet::EMPTY; count],
            nullable: vec![false; count],
            follow: vec![TokenSet::EMPTY; count],
            predict: Vec::with_capacity(count),
        };
        table.compute_first();
        table.compute_follow();

        for &nt in Nonterminal::ALL {
            let sets = nt
                .alternatives()
                .iter()
                .map(|alternative| {
                    let (first, nullable) = table.first_of(alternative);
                    if nullable {
                        first.union(table.follow[nt.index()])
                    } else {
                        first
                    }
                })
                .collect();
            table.predict.push(sets);
        }
        table
    }

    /// Shared table for the language grammar, built on first use.
    pub fn standard() -> &'static PredictTable {
        static TABLE: OnceLock<PredictTable> = OnceLock::new();
        TABLE.get_or_init(PredictTable::build)
    }

    fn compute_first(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for &nt in Nonterminal::ALL {
                for alternative in nt.alternatives() {
                    let (first, nullable) = self.first_of(alternative);
                    changed |= self.first[nt.index()].extend(first);
                    if nullable && !self.nullable[nt.index()] {
                        self.nullable[nt.index()] = true;
                        changed = true;
                    }
                }
            }
        }
    }

    fn compute_follow(&mut self) {
        self.follow[Nonterminal::START.index()].insert(TokenKind::Eof);

        let mut changed = true;
        while changed {
            changed = false;
            for &nt in Nonterminal::ALL {
                for alternative in nt.alternatives() {
                    for (i, symbol) in alternative.iter().enumerate() {
                        let inner = match *symbol {
                            Symbol::T(_) => continue,
                            Symbol::N(inner) | Symbol::Expr(inner, _) => inner,
                        };
                        let (rest, rest_nullable) = self.first_of(&alternative[i + 1..]);
                        changed |= self.follow[inner.index()].extend(rest);
                        if rest_nullable {
                            let outer = self.follow[nt.index()];
                            changed |= self.follow[inner.index()].extend(outer);
                        }
                    }
                }
            }
        }
    }

    /// FIRST of a symbol sequence and whether the whole sequence can be empty.
    fn first_of(&self, symbols: &[Symbol]) -> (TokenSet, bool) {
        let mut set = TokenSet::EMPTY;
        for symbol in symbols {
            match *symbol {
                Symbol::T(kind) => {
                    set.insert(kind);
                    return (set, false);
                }
                Symbol::N(nt) | Symbol::Expr(nt, _) => {
                    set.extend(self.first[nt.index()]);
                    if !self.nullable[nt.index()] {
                        return (set, false);
                    }
                }
            }
        }
        (set, true)
    }

    pub fn first(&self, nt: Nonterminal) -> TokenSet {
        self.first[nt.index()]
    }

    pub fn follow(&self, nt: Nonterminal) -> TokenSet {
        self.follow[nt.index()]
    }

    pub fn is_nullable(&self, nt: Nonterminal) -> bool {
        self.nullable[nt.index()]
    }

    /// Lookahead set selecting alternative `alternative` of `nt`.
    pub fn predict(&self, nt: Nonterminal, alternative: usize) -> TokenSet {
        self.predict[nt.index()]
            .get(alternative)
            .copied()
            .unwrap_or(TokenSet::EMPTY)
    }

    /// Union of the predict sets of every alternative of `nt`.
    pub fn expected(&self, nt: Nonterminal) -> TokenSet {
        self.predict[nt.index()]
            .iter()
            .fold(TokenSet::EMPTY, |acc, set| acc.union(*set))
    }

    /// Pairs of alternatives whose predict sets overlap. These are the
    /// places where the parser relies on backtracking.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for &nt in Nonterminal::ALL {
            let sets = &self.predict[nt.index()];
            for first in 0..sets.len() {
                for second in first + 1..sets.len() {
                    let overlap = sets[first].intersection(sets[second]);
                    if !overlap.is_empty() {
                        conflicts.push(Conflict {
                            nonterminal: nt,
                            first,
                            second,
                            overlap,
                        });
                    }
                }
            }
        }
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind as K;

    #[test]
    fn test_data_type_first() {
        let table = PredictTable::standard();
        let first = table.first(Nonterminal::DataType);
        assert_eq!(
            first,
            TokenSet::of(&[K::Tile, K::Glass, K::Brick, K::Wall, K::Beam])
        );
        assert!(!table.is_nullable(Nonterminal::DataType));
    }

    #[test]
    fn test_program_follow_is_eof() {
        let table = PredictTable::standard();
        assert_eq!(table.follow(Nonterminal::Program), TokenSet::single(K::Eof));
    }

    #[test]
    fn test_empty_alternative_predicted_by_follow() {
        let table = PredictTable::standard();
        // <global> -> λ is chosen by whatever may start a function or main
        let lambda = table.predict(Nonterminal::Global, 1);
        assert!(lambda.contains(K::Blueprint));
        assert!(lambda.contains(K::Field));
        assert!(lambda.contains(K::Tile));
        assert!(!lambda.contains(K::Roof));
        assert_eq!(table.predict(Nonterminal::Global, 0), TokenSet::single(K::Roof));
    }

    #[test]
    fn test_func_body_follow() {
        let table = PredictTable::standard();
        assert!(table.is_nullable(Nonterminal::FuncBody));
        assert_eq!(table.follow(Nonterminal::FuncBody), TokenSet::single(K::RBrace));
    }

    #[test]
    fn test_function_conflict_is_reported() {
        // `tile` may start another function or be the main return type
        let conflicts = PredictTable::standard().conflicts();
        let function = conflicts
            .iter()
            .find(|c| c.nonterminal == Nonterminal::Function)
            .unwrap();
        assert!(function.overlap.contains(K::Tile));
        assert!(function.overlap.contains(K::Field));
        assert!(!function.overlap.contains(K::Wall));
    }

    #[test]
    fn test_expected_unions_alternatives() {
        let table = PredictTable::standard();
        let expected = table.expected(Nonterminal::AssignOp);
        assert_eq!(expected.len(), 6);
        assert!(expected.contains(K::PercentAssign));
        assert_eq!(table.predict(Nonterminal::AssignOp, 99), TokenSet::EMPTY);
    }
}
