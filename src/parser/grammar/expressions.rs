//! Expressions
//!
//! Operators chain flat, left to right: `a + b * c` is a value followed by a
//! run of (operator, value) pairs. There is no precedence.

use super::ends;
use super::Symbol::{Expr, N, T};
use super::{Alternatives, Nonterminal as Nt};
use crate::lexer::TokenKind as K;

pub(super) fn rules(nt: Nt) -> Option<Alternatives> {
    let alternatives: Alternatives = match nt {
        Nt::Value => &[
            &[T(K::TileLiteral)],
            &[T(K::GlassLiteral)],
            &[T(K::BrickLiteral)],
            &[T(K::WallLiteral)],
            &[T(K::Solid)],
            &[T(K::Fragile)],
        ],

        Nt::InitValue => &[
            &[N(Nt::ValueExp), N(Nt::ExpOp)],
            &[N(Nt::PrefixOp), N(Nt::IdVal), N(Nt::ExpOp)],
        ],
        Nt::ValueExp => &[
            &[N(Nt::ValueType)],
            &[N(Nt::Group)],
            &[T(K::Minus), N(Nt::NegativeType)],
        ],
        Nt::ValueType => &[&[T(K::Identifier), N(Nt::IdType)], &[N(Nt::Value)]],
        Nt::IdType => &[&[N(Nt::IdType2)], &[]],
        Nt::IdType2 => &[&[N(Nt::ArrStruct), N(Nt::PostfixOp)], &[N(Nt::FuncCall)]],
        Nt::ArrStruct => &[&[N(Nt::ArrayIndex)], &[N(Nt::StructId)], &[]],
        Nt::ArrayIndex => &[
            &[
                T(K::LBracket),
                Expr(Nt::InitValue, ends::BRACKET),
                T(K::RBracket),
                N(Nt::ArrayIndex2),
            ],
            &[],
        ],
        Nt::ArrayIndex2 => &[
            &[
                T(K::LBracket),
                Expr(Nt::InitValue, ends::BRACKET),
                T(K::RBracket),
            ],
            &[],
        ],
        Nt::StructId => &[&[T(K::Dot), T(K::Identifier), N(Nt::ArrayIndex)], &[]],

        // Calls
        Nt::FuncCall => &[&[T(K::LParen), N(Nt::FuncArgu), T(K::RParen)], &[]],
        Nt::FuncArgu => &[
            &[Expr(Nt::InitValue, ends::ARGUMENT), N(Nt::FuncMultCall)],
            &[],
        ],
        Nt::FuncMultCall => &[
            &[
                T(K::Comma),
                Expr(Nt::InitValue, ends::ARGUMENT),
                N(Nt::FuncMultCall),
            ],
            &[],
        ],

        Nt::PostfixOp => &[&[N(Nt::UnaryOp)], &[]],
        Nt::UnaryOp => &[&[T(K::Increment)], &[T(K::Decrement)]],
        Nt::Group => &[&[
            T(K::LParen),
            Expr(Nt::InitValue, ends::PAREN),
            T(K::RParen),
        ]],
        Nt::NegativeType => &[&[N(Nt::ValueType)], &[N(Nt::Group)]],
        Nt::ExpOp => &[&[N(Nt::Operator), N(Nt::InitValue)], &[]],
        Nt::PrefixOp => &[&[T(K::Bang)], &[N(Nt::UnaryOp)]],
        Nt::IdVal => &[&[T(K::Identifier), N(Nt::IdType3)]],
        Nt::IdType3 => &[&[N(Nt::ArrayIndex)], &[N(Nt::StructId)], &[]],
        Nt::Operator => &[
            &[T(K::Plus)],
            &[T(K::Minus)],
            &[T(K::Star)],
            &[T(K::Slash)],
            &[T(K::Percent)],
            &[T(K::Lt)],
            &[T(K::Le)],
            &[T(K::Gt)],
            &[T(K::Ge)],
            &[T(K::EqEq)],
            &[T(K::NotEq)],
            &[T(K::AndAnd)],
            &[T(K::OrOr)],
        ],

        _ => return None,
    };
    Some(alternatives)
}
