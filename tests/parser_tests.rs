// Parser acceptance and diagnostics over whole programs

use blueprint::config::LexerConfig;
use blueprint::lexer::{tokenize, SourceLocation, Token, TokenKind, TokenRecord};
use blueprint::parser::{parse, Nonterminal, PredictTable, SyntaxError};

fn parse_source(source: &str) -> Vec<SyntaxError> {
    let (tokens, errors) = tokenize(source, &LexerConfig::default());
    assert!(errors.is_empty(), "lex errors: {errors:?}");
    parse(&tokens)
}

fn assert_accepted(source: &str) {
    let errors = parse_source(source);
    assert!(errors.is_empty(), "rejected: {}", errors[0]);
}

#[test]
fn test_minimal_program() {
    assert_accepted("blueprint() {}");
}

#[test]
fn test_globals() {
    assert_accepted(
        r#"
        roof tile count = 0, total;
        roof wall name = "site";
        roof tile m[2][2] = {{1, 2}, {3, 4}};
        roof cement glass PI = 3.14, E = 2.71;
        roof cement house P origin = {1, 2};
        roof house Point {
            tile x;
            tile y;
        } a, b;
        blueprint() {}
    "#,
    );
}

#[test]
fn test_several_functions_and_empty_bodies() {
    assert_accepted(
        r#"
        tile one() {
            home 1;
        }
        field two(tile a, brick b) {}
        beam three() {
            home solid;
        }
        blueprint() {}
    "#,
    );
}

#[test]
fn test_typed_entry_point() {
    assert_accepted("tile blueprint() { home 0; }");
    assert_accepted("field blueprint() {}");
}

#[test]
fn test_case_arms_hold_many_statements() {
    assert_accepted(
        r#"
        blueprint() {
            room (x) {
                door 1:
                    x = 1;
                    x = 2;
                    crack;
                door -2:
                    {
                        x = 3;
                    }
                ground:
            }
        }
    "#,
    );
}

#[test]
fn test_flat_expressions() {
    assert_accepted(
        r#"
        blueprint() {
            x = a + b * c - (d / 2) % e;
            x = !done;
            x = -(a) + add(1, y[2]) + p.q;
            --x;
            x++;
            m[1][2] += 4;
            p.q = 1;
            report(x, "done");
        }
    "#,
    );
}

#[test]
fn test_control_flow() {
    assert_accepted(
        r#"
        blueprint() {
            for (tile i = 0; i < 10; i++) {
                if (i == 3) {
                    mend;
                } else if (i > 8 || done) {
                    crack;
                } else {
                    view("%d", i);
                }
            }
            for ( ; ; ) {}
            while (x) {}
            do {
                write("%d", &x, y);
            } while (x != 0);
        }
    "#,
    );
}

#[test]
fn test_single_error_for_two_mistakes() {
    let errors = parse_source(
        r#"blueprint() {
    tile x = ;
    tile y = 2
}"#,
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line(), 2);
    assert_eq!(errors[0].found, TokenKind::Semicolon);
}

#[test]
fn test_error_message_and_span() {
    let errors = parse_source("blueprint() { crack }");
    assert_eq!(errors.len(), 1);
    let err = &errors[0];
    assert_eq!(err.message(), "unexpected token '}'; expected one of [';']");
    assert_eq!(err.start, SourceLocation::new(1, 21));
    assert_eq!(err.end, SourceLocation::new(1, 22));
}

#[test]
fn test_span_width_follows_lexeme() {
    let errors = parse_source("blueprint() { crack counter }");
    assert_eq!(errors[0].lexeme, "counter");
    assert_eq!(errors[0].end.column - errors[0].start.column, 7);
}

#[test]
fn test_expected_tokens_in_declaration_order() {
    let errors = parse(&[]);
    assert_eq!(
        errors[0].expected,
        vec![
            TokenKind::Tile,
            TokenKind::Glass,
            TokenKind::Brick,
            TokenKind::Wall,
            TokenKind::Beam,
            TokenKind::Field,
            TokenKind::Roof,
            TokenKind::Blueprint,
        ]
    );
}

#[test]
fn test_open_bracket_expects_its_closer() {
    let errors = parse_source("blueprint() { x = a[1; }");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].found, TokenKind::Semicolon);
    assert!(errors[0].expected.contains(&TokenKind::RBracket));
    assert!(!errors[0].expected.contains(&TokenKind::RParen));
}

#[test]
fn test_trailing_input() {
    let errors = parse_source("blueprint() {}\nblueprint() {}");
    assert_eq!(errors.len(), 1);
    assert!(errors[0].trailing);
    assert_eq!(errors[0].expected, vec![TokenKind::Eof]);
    assert_eq!(errors[0].line(), 2);
}

#[test]
fn test_trivia_does_not_matter() {
    let source = "blueprint() {\n  // note\n  tile x = 1\n}";
    let (tokens, _) = tokenize(source, &LexerConfig::default());
    let stripped: Vec<Token> = tokens
        .iter()
        .filter(|t| !t.kind.is_trivia() && !t.is_eof())
        .cloned()
        .collect();
    let with_trivia = parse(&tokens);
    let without = parse(&stripped);
    assert_eq!(with_trivia.len(), 1);
    assert_eq!(with_trivia[0].found, without[0].found);
    assert_eq!(with_trivia[0].start, without[0].start);
}

#[test]
fn test_parse_external_token_stream() {
    let json = r#"[
        {"kind": "blueprint", "lexeme": "blueprint", "line": 1, "column": 1},
        {"kind": "(", "lexeme": "(", "line": 1, "column": 10},
        {"kind": ")", "lexeme": ")", "line": 1, "column": 11},
        {"kind": "{", "lexeme": "{", "line": 1, "column": 13},
        {"kind": "id4", "lexeme": "x", "line": 2, "column": 5},
        {"kind": "++", "lexeme": "++", "line": 2, "column": 6},
        {"kind": ";", "lexeme": ";", "line": 2, "column": 8},
        {"kind": "}", "lexeme": "}", "line": 3, "column": 1}
    ]"#;
    let records: Vec<TokenRecord> = serde_json::from_str(json).unwrap();
    let tokens: Vec<Token> = records
        .into_iter()
        .map(Token::try_from)
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(parse(&tokens).is_empty());

    // Missing `}` is reported just past the last token
    let errors = parse(&tokens[..tokens.len() - 1]);
    assert_eq!(errors[0].found, TokenKind::Eof);
    assert_eq!(errors[0].start, SourceLocation::new(2, 9));
}

#[test]
fn test_conflicts_are_reported() {
    let conflicts = PredictTable::standard().conflicts();
    assert!(!conflicts.is_empty());
    assert!(conflicts
        .iter()
        .any(|c| c.nonterminal == Nonterminal::Function));
    for conflict in &conflicts {
        assert!(conflict.first < conflict.second);
        assert!(!conflict.overlap.is_empty());
    }
}

#[test]
fn test_long_statement_list() {
    let source = format!("blueprint() {{\n{}}}", "x = 1;\n".repeat(20_000));
    assert_accepted(&source);
}

#[test]
fn test_long_flat_expression() {
    let terms = vec!["a"; 5_000].join(" + ");
    assert_accepted(&format!("blueprint() {{\n    x = {terms};\n}}"));
}

#[test]
fn test_error_after_long_statement_list() {
    let source = format!("blueprint() {{\n{}    x = 1\n}}", "x = 1;\n".repeat(20_000));
    let errors = parse_source(&source);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].found, TokenKind::RBrace);
    assert_eq!(errors[0].line(), 20_003);
}

#[test]
fn test_many_globals_and_functions() {
    let globals = "roof tile g = 1, h, i = 2;\n".repeat(3_000);
    let functions = "field f() {}\n".repeat(3_000);
    let elements = vec!["1"; 3_000].join(", ");
    assert_accepted(&format!(
        "{globals}roof tile m[1] = {{{elements}}};\n{functions}blueprint() {{}}"
    ));
}
