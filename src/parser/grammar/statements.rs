//! Statements: I/O, assignment, branching, loops, jumps

use super::ends;
use super::Symbol::{Expr, N, T};
use super::{Alternatives, Nonterminal as Nt};
use crate::lexer::TokenKind as K;

pub(super) fn rules(nt: Nt) -> Option<Alternatives> {
    let alternatives: Alternatives = match nt {
        Nt::Statement => &[
            &[N(Nt::IoStatement)],
            &[N(Nt::AssignStatement)],
            &[N(Nt::IfStatement)],
            &[N(Nt::SwitchStatement)],
            &[N(Nt::ForStatement)],
            &[N(Nt::WhileStatement)],
            &[N(Nt::DoWhileStatement)],
            &[N(Nt::BreakStatement)],
            &[N(Nt::ContinueStatement)],
            &[N(Nt::ReturnStatement)],
        ],

        // write("fmt", &a, b);  view("fmt", expr, ...);
        Nt::IoStatement => &[
            &[
                T(K::Write),
                T(K::LParen),
                T(K::WallLiteral),
                T(K::Comma),
                N(Nt::WriteArgu),
                T(K::RParen),
                T(K::Semicolon),
            ],
            &[
                T(K::View),
                T(K::LParen),
                T(K::WallLiteral),
                N(Nt::ViewArgu),
                T(K::RParen),
                T(K::Semicolon),
            ],
        ],
        Nt::WriteArgu => &[
            &[T(K::Ampersand), N(Nt::IdVal), N(Nt::MultWriteArgu)],
            &[N(Nt::IdVal), N(Nt::MultWriteArgu)],
        ],
        Nt::MultWriteArgu => &[&[T(K::Comma), N(Nt::WriteArgu)], &[]],
        Nt::ViewArgu => &[
            &[
                T(K::Comma),
                Expr(Nt::InitValue, ends::ARGUMENT),
                N(Nt::MultViewArgu),
            ],
            &[],
        ],
        Nt::MultViewArgu => &[&[N(Nt::ViewArgu)], &[]],

        // Assignment, calls and increments used as statements
        Nt::AssignStatement => &[
            &[N(Nt::UnaryOp), T(K::Identifier), T(K::Semicolon)],
            &[T(K::Identifier), N(Nt::IdType4), T(K::Semicolon)],
        ],
        Nt::IdType4 => &[
            &[T(K::LParen), N(Nt::FuncArgu), T(K::RParen)],
            &[N(Nt::UnaryOp)],
            &[
                N(Nt::IdType3),
                N(Nt::AssignOp),
                Expr(Nt::InitValue, ends::STATEMENT),
            ],
        ],
        Nt::AssignOp => &[
            &[T(K::Assign)],
            &[T(K::PlusAssign)],
            &[T(K::MinusAssign)],
            &[T(K::StarAssign)],
            &[T(K::SlashAssign)],
            &[T(K::PercentAssign)],
        ],

        Nt::IfStatement => &[&[
            T(K::If),
            T(K::LParen),
            Expr(Nt::InitValue, ends::PAREN),
            T(K::RParen),
            T(K::LBrace),
            N(Nt::FuncBody),
            T(K::RBrace),
            N(Nt::ElseStatement),
        ]],
        Nt::ElseStatement => &[&[T(K::Else), N(Nt::ElseStatement2)], &[]],
        Nt::ElseStatement2 => &[
            &[N(Nt::IfStatement)],
            &[T(K::LBrace), N(Nt::FuncBody), T(K::RBrace)],
        ],

        // room (x) { door 1: ... ground: ... }
        Nt::SwitchStatement => &[&[
            T(K::Room),
            T(K::LParen),
            Expr(Nt::InitValue, ends::PAREN),
            T(K::RParen),
            T(K::LBrace),
            N(Nt::SwitchBody),
            T(K::RBrace),
        ]],
        Nt::SwitchBody => &[
            &[
                T(K::Door),
                N(Nt::CaseExp),
                T(K::Colon),
                N(Nt::CaseBody),
                N(Nt::SwitchBody),
            ],
            &[T(K::Ground), T(K::Colon), N(Nt::CaseBody)],
        ],
        Nt::CaseExp => &[&[N(Nt::CaseType), N(Nt::CaseOp)]],
        Nt::CaseType => &[
            &[N(Nt::CaseVal)],
            &[N(Nt::CaseGroup)],
            &[T(K::Minus), N(Nt::CaseNegative)],
        ],
        Nt::CaseVal => &[
            &[T(K::TileLiteral)],
            &[T(K::BrickLiteral)],
            &[T(K::Solid)],
            &[T(K::Fragile)],
        ],
        Nt::CaseGroup => &[&[T(K::LParen), N(Nt::CaseExp), T(K::RParen)]],
        Nt::CaseNegative => &[&[N(Nt::CaseVal)], &[N(Nt::CaseGroup)]],
        Nt::CaseOp => &[&[N(Nt::Operator), N(Nt::CaseExp)], &[]],
        Nt::CaseBody => &[
            &[N(Nt::Statement), N(Nt::MultSmt)],
            &[T(K::LBrace), N(Nt::FuncBody), T(K::RBrace)],
            &[],
        ],
        Nt::MultSmt => &[&[N(Nt::Statement), N(Nt::MultSmt)], &[]],

        // Loops
        Nt::ForStatement => &[&[
            T(K::For),
            T(K::LParen),
            N(Nt::ForDec),
            T(K::Semicolon),
            Expr(Nt::ForExp, ends::STATEMENT),
            T(K::Semicolon),
            Expr(Nt::ForExp, ends::PAREN),
            T(K::RParen),
            T(K::LBrace),
            N(Nt::FuncBody),
            T(K::RBrace),
        ]],
        Nt::ForDec => &[
            &[N(Nt::DataType), T(K::Identifier), N(Nt::Initializer)],
            &[T(K::Identifier), N(Nt::Initializer)],
            &[],
        ],
        Nt::ForExp => &[&[N(Nt::InitValue)], &[]],
        Nt::WhileStatement => &[&[
            T(K::While),
            T(K::LParen),
            Expr(Nt::InitValue, ends::PAREN),
            T(K::RParen),
            T(K::LBrace),
            N(Nt::FuncBody),
            T(K::RBrace),
        ]],
        Nt::DoWhileStatement => &[&[
            T(K::Do),
            T(K::LBrace),
            N(Nt::FuncBody),
            T(K::RBrace),
            T(K::While),
            T(K::LParen),
            Expr(Nt::InitValue, ends::PAREN),
            T(K::RParen),
            T(K::Semicolon),
        ]],

        // Jumps
        Nt::BreakStatement => &[&[T(K::Crack), T(K::Semicolon)]],
        Nt::ContinueStatement => &[&[T(K::Mend), T(K::Semicolon)]],
        Nt::ReturnStatement => &[&[
            T(K::Home),
            Expr(Nt::InitValue, ends::STATEMENT),
            T(K::Semicolon),
        ]],

        _ => return None,
    };
    Some(alternatives)
}
