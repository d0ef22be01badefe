//! Program shape, global and local declarations, records, functions

use super::ends;
use super::Symbol::{Expr, N, T};
use super::{Alternatives, Nonterminal as Nt};
use crate::lexer::TokenKind as K;

pub(super) fn rules(nt: Nt) -> Option<Alternatives> {
    let alternatives: Alternatives = match nt {
        Nt::Program => &[&[
            N(Nt::Global),
            N(Nt::Function),
            N(Nt::MainType),
            T(K::Blueprint),
            T(K::LParen),
            T(K::RParen),
            T(K::LBrace),
            N(Nt::FuncBody),
            T(K::RBrace),
        ]],

        // Globals: `roof` prefixed, one per statement
        Nt::Global => &[
            &[T(K::Roof), N(Nt::GlobalDec), T(K::Semicolon), N(Nt::Global)],
            &[],
        ],
        Nt::GlobalDec => &[
            &[N(Nt::GlobalVar)],
            &[N(Nt::Structure)],
            &[N(Nt::GlobalConst)],
        ],
        Nt::GlobalVar => &[&[N(Nt::DataType), T(K::Identifier), N(Nt::GlobalEnd)]],
        Nt::DataType => &[
            &[T(K::Tile)],
            &[T(K::Glass)],
            &[T(K::Brick)],
            &[T(K::Wall)],
            &[T(K::Beam)],
        ],
        Nt::GlobalEnd => &[&[N(Nt::GlobalInit), N(Nt::GlobalMult)], &[N(Nt::ArrayDec)]],
        Nt::GlobalInit => &[&[T(K::Assign), N(Nt::Value)], &[]],
        Nt::GlobalMult => &[
            &[T(K::Comma), T(K::Identifier), N(Nt::GlobalInit), N(Nt::GlobalMult)],
            &[],
        ],

        // Arrays
        Nt::ArrayDec => &[&[T(K::LBracket), N(Nt::ArrSize)]],
        Nt::ArrSize => &[
            &[T(K::RBracket), N(Nt::OneDEnd)],
            &[T(K::TileLiteral), T(K::RBracket), N(Nt::OneDEnd2)],
        ],
        Nt::OneDEnd => &[
            &[
                T(K::LBracket),
                T(K::TileLiteral),
                T(K::RBracket),
                T(K::Assign),
                T(K::LBrace),
                T(K::LBrace),
                N(Nt::Elements),
                T(K::RBrace),
                N(Nt::MultElem2),
                T(K::RBrace),
            ],
            &[T(K::Assign), T(K::LBrace), N(Nt::Elements), T(K::RBrace)],
        ],
        Nt::OneDEnd2 => &[
            &[T(K::LBracket), T(K::TileLiteral), T(K::RBracket), N(Nt::TwoDEnd)],
            &[T(K::Assign), T(K::LBrace), N(Nt::Elements), T(K::RBrace)],
            &[],
        ],
        Nt::TwoDEnd => &[
            &[
                T(K::Assign),
                T(K::LBrace),
                T(K::LBrace),
                N(Nt::Elements),
                T(K::RBrace),
                N(Nt::MultElem2),
                T(K::RBrace),
            ],
            &[],
        ],
        Nt::Elements => &[&[N(Nt::Value), N(Nt::MultElem)]],
        Nt::MultElem => &[&[T(K::Comma), N(Nt::Value), N(Nt::MultElem)], &[]],
        Nt::MultElem2 => &[
            &[
                T(K::Comma),
                T(K::LBrace),
                N(Nt::Elements),
                T(K::RBrace),
                N(Nt::MultElem2),
            ],
            &[],
        ],

        // Records (`house`)
        Nt::Structure => &[&[T(K::House), T(K::Identifier), N(Nt::StructType)]],
        Nt::StructType => &[&[N(Nt::StructDec)], &[N(Nt::StructVar)]],
        Nt::StructDec => &[&[
            T(K::LBrace),
            N(Nt::StructMembers),
            T(K::RBrace),
            N(Nt::StructIdEnd),
        ]],
        Nt::StructMembers => &[&[
            N(Nt::DataTypeDec),
            N(Nt::Array),
            T(K::Semicolon),
            N(Nt::MultMembers),
        ]],
        Nt::DataTypeDec => &[&[N(Nt::DataType), T(K::Identifier)]],
        Nt::Array => &[
            &[T(K::LBracket), T(K::TileLiteral), T(K::RBracket), N(Nt::Array2)],
            &[],
        ],
        Nt::Array2 => &[&[T(K::LBracket), T(K::TileLiteral), T(K::RBracket)], &[]],
        Nt::MultMembers => &[
            &[
                N(Nt::DataTypeDec),
                N(Nt::Array),
                T(K::Semicolon),
                N(Nt::MultMembers),
            ],
            &[],
        ],
        Nt::StructIdEnd => &[
            &[T(K::Identifier), N(Nt::StructInit), N(Nt::MultStructId)],
            &[],
        ],
        Nt::StructInit => &[
            &[T(K::Assign), T(K::LBrace), N(Nt::StructElem), T(K::RBrace)],
            &[],
        ],
        Nt::StructElem => &[
            &[N(Nt::Value), N(Nt::MultStructElem)],
            &[
                T(K::LBrace),
                N(Nt::StructArrElem),
                T(K::RBrace),
                N(Nt::MultStructElem),
            ],
        ],
        Nt::StructArrElem => &[
            &[N(Nt::Elements)],
            &[
                T(K::LBrace),
                N(Nt::Elements),
                T(K::RBrace),
                N(Nt::MultElem2),
            ],
        ],
        Nt::MultStructElem => &[&[T(K::Comma), N(Nt::StructElem)], &[]],
        Nt::MultStructId => &[
            &[
                T(K::Comma),
                T(K::Identifier),
                N(Nt::StructInit),
                N(Nt::MultStructId),
            ],
            &[],
        ],
        Nt::StructVar => &[&[T(K::Identifier), N(Nt::StructInit), N(Nt::MultStructId)]],

        // Global constants (`roof cement ...`)
        Nt::GlobalConst => &[&[T(K::Cement), N(Nt::GlobalConstType)]],
        Nt::GlobalConstType => &[
            &[N(Nt::DataType), T(K::Identifier), N(Nt::GlobalConstEnd)],
            &[
                T(K::House),
                T(K::Identifier),
                T(K::Identifier),
                T(K::Assign),
                T(K::LBrace),
                N(Nt::StructElem),
                T(K::RBrace),
                N(Nt::GlobalConstStruct),
            ],
        ],
        Nt::GlobalConstEnd => &[
            &[T(K::Assign), N(Nt::Value), N(Nt::GlobalMultConst)],
            &[
                T(K::LBracket),
                T(K::TileLiteral),
                T(K::RBracket),
                N(Nt::GlobalConstEnd2),
            ],
        ],
        Nt::GlobalConstEnd2 => &[
            &[T(K::Assign), T(K::LBrace), N(Nt::Elements), T(K::RBrace)],
            &[
                T(K::LBracket),
                T(K::TileLiteral),
                T(K::RBracket),
                T(K::Assign),
                T(K::LBrace),
                T(K::LBrace),
                N(Nt::Elements),
                T(K::RBrace),
                N(Nt::MultElem2),
                T(K::RBrace),
            ],
        ],
        Nt::GlobalMultConst => &[
            &[
                T(K::Comma),
                T(K::Identifier),
                T(K::Assign),
                N(Nt::Value),
                N(Nt::GlobalMultConst),
            ],
            &[],
        ],
        Nt::GlobalConstStruct => &[
            &[
                T(K::Comma),
                T(K::Identifier),
                T(K::Assign),
                T(K::LBrace),
                N(Nt::StructElem),
                T(K::RBrace),
                N(Nt::GlobalConstStruct),
            ],
            &[],
        ],

        // Functions. A program holds any number of them before `blueprint`.
        Nt::Function => &[
            &[
                N(Nt::ReturnType),
                T(K::Identifier),
                T(K::LParen),
                N(Nt::ParamList),
                T(K::RParen),
                T(K::LBrace),
                N(Nt::FuncBody),
                T(K::RBrace),
                N(Nt::Function),
            ],
            &[],
        ],
        Nt::ReturnType => &[&[N(Nt::DataType)], &[T(K::Field)]],
        Nt::ParamList => &[&[N(Nt::DataTypeDec), N(Nt::MultParam)], &[]],
        Nt::MultParam => &[
            &[T(K::Comma), N(Nt::DataTypeDec), N(Nt::MultParam)],
            &[],
        ],
        Nt::MainType => &[
            &[T(K::Tile)],
            &[T(K::Glass)],
            &[T(K::Brick)],
            &[T(K::Beam)],
            &[T(K::Field)],
            &[],
        ],
        Nt::FuncBody => &[
            &[N(Nt::Local), N(Nt::FuncBody)],
            &[N(Nt::Statement), N(Nt::FuncBody)],
            &[],
        ],

        // Locals
        Nt::Local => &[&[N(Nt::Declaration), T(K::Semicolon)]],
        Nt::Declaration => &[
            &[N(Nt::Variable)],
            &[N(Nt::Structure)],
            &[N(Nt::Constant)],
        ],
        Nt::Variable => &[&[N(Nt::DataType), T(K::Identifier), N(Nt::VarEnd)]],
        Nt::VarEnd => &[&[N(Nt::Initializer), N(Nt::MultVar)], &[N(Nt::ArrayDec)]],
        Nt::Initializer => &[
            &[T(K::Assign), Expr(Nt::InitValue, ends::VALUE)],
            &[],
        ],
        Nt::MultVar => &[
            &[
                T(K::Comma),
                T(K::Identifier),
                N(Nt::Initializer),
                N(Nt::MultVar),
            ],
            &[],
        ],
        Nt::Constant => &[&[T(K::Cement), N(Nt::ConstType)]],
        Nt::ConstType => &[
            &[N(Nt::DataType), T(K::Identifier), N(Nt::ConstEnd)],
            &[
                T(K::House),
                T(K::Identifier),
                T(K::Identifier),
                T(K::Assign),
                T(K::LBrace),
                N(Nt::StructElem),
                T(K::RBrace),
                N(Nt::MultConstStruct),
            ],
        ],
        Nt::ConstEnd => &[
            &[
                T(K::Assign),
                Expr(Nt::InitValue, ends::VALUE),
                N(Nt::MultConst),
            ],
            &[
                T(K::LBracket),
                T(K::TileLiteral),
                T(K::RBracket),
                N(Nt::ConstEnd2),
            ],
        ],
        Nt::ConstEnd2 => &[
            &[T(K::Assign), T(K::LBrace), N(Nt::Elements), T(K::RBrace)],
            &[
                T(K::LBracket),
                T(K::TileLiteral),
                T(K::RBracket),
                T(K::Assign),
                T(K::LBrace),
                T(K::LBrace),
                N(Nt::Elements),
                T(K::RBrace),
                N(Nt::MultElem2),
                T(K::RBrace),
            ],
        ],
        Nt::MultConst => &[
            &[
                T(K::Comma),
                T(K::Identifier),
                T(K::Assign),
                Expr(Nt::InitValue, ends::VALUE),
                N(Nt::MultConst),
            ],
            &[],
        ],
        Nt::MultConstStruct => &[
            &[
                T(K::Comma),
                T(K::Identifier),
                T(K::Assign),
                T(K::LBrace),
                N(Nt::StructElem),
                T(K::RBrace),
                N(Nt::MultConstStruct),
            ],
            &[],
        ],

        _ => return None,
    };
    Some(alternatives)
}
