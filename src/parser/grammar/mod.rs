//! The grammar, as data
//!
//! Every nonterminal maps to an ordered list of alternatives, and every
//! alternative to a sequence of [`Symbol`]s. An empty sequence is the empty
//! (λ) alternative. The parser tries alternatives in the order given here.
//!
//! Productions are split by area:
//! - `declarations.rs`: program shape, globals, records, constants, functions
//! - `statements.rs`: statements and case arms
//! - `expressions.rs`: values, operators, calls, indexing

mod declarations;
mod expressions;
mod statements;

use super::token_set::TokenSet;
use crate::lexer::TokenKind;
use std::fmt;

/// One grammar symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// A terminal, matched by kind.
    T(TokenKind),
    /// A nonterminal.
    N(Nonterminal),
    /// A nonterminal parsed as an expression whose valid terminators are
    /// the given closers. Only affects diagnostics.
    Expr(Nonterminal, TokenSet),
}

macro_rules! nonterminals {
    ($($variant:ident => $name:literal,)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Nonterminal {
            $($variant,)*
        }

        impl Nonterminal {
            pub const ALL: &'static [Nonterminal] = &[$(Nonterminal::$variant,)*];

            /// Name in angle brackets, as printed by `blueprint grammar`.
            pub fn name(self) -> &'static str {
                match self {
                    $(Nonterminal::$variant => $name,)*
                }
            }
        }
    };
}

nonterminals! {
    Program => "<program>",
    Global => "<global>",
    GlobalDec => "<global_dec>",
    GlobalVar => "<global_var>",
    DataType => "<data_type>",
    GlobalEnd => "<global_end>",
    GlobalInit => "<global_init>",
    GlobalMult => "<global_mult>",
    Value => "<value>",
    ArrayDec => "<array_dec>",
    ArrSize => "<arr_size>",
    OneDEnd => "<one_d_end>",
    OneDEnd2 => "<one_d_end2>",
    TwoDEnd => "<two_d_end>",
    Elements => "<elements>",
    MultElem => "<mult_elem>",
    MultElem2 => "<mult_elem2>",
    Structure => "<structure>",
    StructType => "<struct_type>",
    StructDec => "<struct_dec>",
    StructMembers => "<struct_members>",
    DataTypeDec => "<data_type_dec>",
    Array => "<array>",
    Array2 => "<array2>",
    MultMembers => "<mult_members>",
    StructIdEnd => "<struct_id_end>",
    StructInit => "<struct_init>",
    StructElem => "<struct_elem>",
    StructArrElem => "<struct_arr_elem>",
    MultStructElem => "<mult_struct_elem>",
    MultStructId => "<mult_struct_id>",
    StructVar => "<struct_var>",
    GlobalConst => "<global_const>",
    GlobalConstType => "<global_const_type>",
    GlobalConstEnd => "<global_const_end>",
    GlobalConstEnd2 => "<global_const_end2>",
    GlobalMultConst => "<global_mult_const>",
    GlobalConstStruct => "<global_const_struct>",
    Function => "<function>",
    ReturnType => "<return_type>",
    ParamList => "<param_list>",
    MultParam => "<mult_param>",
    MainType => "<main_type>",
    FuncBody => "<func_body>",
    Local => "<local>",
    Declaration => "<declaration>",
    Variable => "<variable>",
    VarEnd => "<var_end>",
    Initializer => "<initializer>",
    MultVar => "<mult_var>",
    Constant => "<constant>",
    ConstType => "<const_type>",
    ConstEnd => "<const_end>",
    ConstEnd2 => "<const_end2>",
    MultConst => "<mult_const>",
    MultConstStruct => "<mult_const_struct>",
    InitValue => "<init_value>",
    ValueExp => "<value_exp>",
    ValueType => "<value_type>",
    IdType => "<id_type>",
    IdType2 => "<id_type2>",
    ArrStruct => "<arr_struct>",
    ArrayIndex => "<array_index>",
    ArrayIndex2 => "<array_index2>",
    StructId => "<struct_id>",
    FuncCall => "<func_call>",
    FuncArgu => "<func_argu>",
    FuncMultCall => "<func_mult_call>",
    PostfixOp => "<postfix_op>",
    UnaryOp => "<unary_op>",
    Group => "<group>",
    NegativeType => "<negative_type>",
    ExpOp => "<exp_op>",
    PrefixOp => "<prefix_op>",
    IdVal => "<id_val>",
    IdType3 => "<id_type3>",
    Operator => "<operator>",
    Statement => "<statement>",
    IoStatement => "<io_statement>",
    WriteArgu => "<write_argu>",
    MultWriteArgu => "<mult_write_argu>",
    ViewArgu => "<view_argu>",
    MultViewArgu => "<mult_view_argu>",
    AssignStatement => "<assign_statement>",
    IdType4 => "<id_type4>",
    AssignOp => "<assign_op>",
    IfStatement => "<if_statement>",
    ElseStatement => "<else_statement>",
    ElseStatement2 => "<else_statement2>",
    SwitchStatement => "<switch_statement>",
    SwitchBody => "<switch_body>",
    CaseExp => "<case_exp>",
    CaseType => "<case_type>",
    CaseVal => "<case_val>",
    CaseGroup => "<case_group>",
    CaseNegative => "<case_negative>",
    CaseOp => "<case_op>",
    CaseBody => "<case_body>",
    MultSmt => "<mult_smt>",
    ForStatement => "<for_statement>",
    ForDec => "<for_dec>",
    ForExp => "<for_exp>",
    WhileStatement => "<while_statement>",
    DoWhileStatement => "<dowhile_statement>",
    BreakStatement => "<break_statement>",
    ContinueStatement => "<continue_statement>",
    ReturnStatement => "<return_statement>",
}

pub type Alternatives = &'static [&'static [Symbol]];

impl Nonterminal {
    pub const START: Nonterminal = Nonterminal::Program;

    /// Ordered alternatives of this nonterminal.
    pub fn alternatives(self) -> Alternatives {
        declarations::rules(self)
            .or_else(|| statements::rules(self))
            .or_else(|| expressions::rules(self))
            .unwrap_or(&[])
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether entering this nonterminal starts an expression.
    pub fn is_expression(self) -> bool {
        self == Nonterminal::InitValue
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expression terminator sets pushed by the grammar.
pub(crate) mod ends {
    use super::TokenSet;
    use crate::lexer::TokenKind;

    pub const VALUE: TokenSet = TokenSet::of(&[TokenKind::Semicolon, TokenKind::Comma]);
    pub const PAREN: TokenSet = TokenSet::single(TokenKind::RParen);
    pub const BRACKET: TokenSet = TokenSet::single(TokenKind::RBracket);
    pub const ARGUMENT: TokenSet = TokenSet::of(&[TokenKind::Comma, TokenKind::RParen]);
    pub const STATEMENT: TokenSet = TokenSet::single(TokenKind::Semicolon);
}

/// Render one production line per alternative, `λ` for empty ones.
pub fn format_production(nt: Nonterminal, alternative: &[Symbol]) -> String {
    let mut line = format!("{} ->", nt.name());
    if alternative.is_empty() {
        line.push_str(" λ");
    }
    for symbol in alternative {
        match symbol {
            Symbol::T(kind) => line.push_str(&format!(" '{}'", kind.tag())),
            Symbol::N(inner) | Symbol::Expr(inner, _) => {
                line.push(' ');
                line.push_str(inner.name());
            }
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_nonterminal_has_rules() {
        for nt in Nonterminal::ALL {
            assert!(!nt.alternatives().is_empty(), "{nt} has no alternatives");
        }
    }

    #[test]
    fn test_index_matches_table_position() {
        for (i, nt) in Nonterminal::ALL.iter().enumerate() {
            assert_eq!(nt.index(), i);
        }
    }

    #[test]
    fn test_at_most_one_empty_alternative() {
        for nt in Nonterminal::ALL {
            let empty = nt.alternatives().iter().filter(|alt| alt.is_empty()).count();
            assert!(empty <= 1, "{nt} has {empty} empty alternatives");
        }
    }

    #[test]
    fn test_format_production() {
        let alternatives = Nonterminal::BreakStatement.alternatives();
        assert_eq!(
            format_production(Nonterminal::BreakStatement, alternatives[0]),
            "<break_statement> -> 'crack' ';'"
        );
        assert_eq!(format_production(Nonterminal::Global, &[]), "<global> -> λ");
    }
}
