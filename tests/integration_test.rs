// End-to-end tests: source file -> analysis -> diagnostics

use blueprint::analysis::analyze;
use blueprint::config::{ConfigError, LexerConfig};
use blueprint::lexer::TokenKind;
use blueprint::report::{render_lex_error, render_syntax_error};
use std::fs;
use std::path::Path;

fn showcase() -> String {
    let path = Path::new("demos/showcase.bp");
    fs::read_to_string(path).expect("Failed to read demo program")
}

#[test]
fn test_showcase_is_accepted() {
    let source = showcase();
    let analysis = analyze(&source, &LexerConfig::default());
    assert!(analysis.lex_errors.is_empty(), "{:?}", analysis.lex_errors);
    assert!(
        analysis.syntax_errors.is_empty(),
        "{}",
        analysis.syntax_errors[0]
    );
    assert!(analysis.accepted());
}

#[test]
fn test_showcase_covers_the_language() {
    let source = showcase();
    let analysis = analyze(&source, &LexerConfig::default());
    for kind in [
        TokenKind::Roof,
        TokenKind::Cement,
        TokenKind::House,
        TokenKind::Field,
        TokenKind::For,
        TokenKind::While,
        TokenKind::Do,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Room,
        TokenKind::Door,
        TokenKind::Ground,
        TokenKind::Crack,
        TokenKind::Mend,
        TokenKind::Home,
        TokenKind::View,
        TokenKind::Write,
        TokenKind::Ampersand,
        TokenKind::GlassLiteral,
        TokenKind::BrickLiteral,
        TokenKind::LineComment,
        TokenKind::BlockComment,
    ] {
        assert!(
            analysis.tokens.iter().any(|t| t.kind == kind),
            "showcase has no {kind}"
        );
    }
}

#[test]
fn test_showcase_round_trips() {
    let source = showcase();
    let analysis = analyze(&source, &LexerConfig::default());
    let rebuilt: String = analysis.tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn test_lex_errors_short_circuit_parsing() {
    let source = showcase().replacen("tile add", "tile 9add", 1);
    let analysis = analyze(&source, &LexerConfig::default());
    assert!(!analysis.parsed);
    assert_eq!(analysis.lex_errors.len(), 1);
    assert!(analysis.syntax_errors.is_empty());

    let text = render_lex_error("showcase.bp", &source, &analysis.lex_errors[0]);
    assert!(text.contains("identifier cannot start with a digit"));
    assert!(text.contains("showcase.bp:13:7"));
}

#[test]
fn test_broken_showcase_reports_one_error() {
    let source = showcase()
        .replacen("home a + b;", "home a + b", 1)
        .replacen("crack;", "crack", 1);
    let analysis = analyze(&source, &LexerConfig::default());
    assert!(analysis.parsed);
    assert_eq!(analysis.syntax_errors.len(), 1);

    let err = &analysis.syntax_errors[0];
    assert_eq!(err.line(), 15);
    assert_eq!(err.found, TokenKind::RBrace);

    let text = render_syntax_error("showcase.bp", &source, err);
    assert!(text.contains("unexpected token '}'"));
    assert!(text.contains("showcase.bp:15:1"));
}

#[test]
fn test_analysis_json_shape() {
    let analysis = analyze("blueprint() { do; }", &LexerConfig::default());
    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(value["parsed"], false);
    assert_eq!(value["lex_errors"][0]["line"], 1);
    assert_eq!(value["lex_errors"][0]["col"], 17);
    assert_eq!(value["lex_errors"][0]["start_col"], 15);
    assert_eq!(value["tokens"][0]["kind"], "blueprint");
    assert!(value["syntax_errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_config_file() {
    let path = std::env::temp_dir().join(format!("blueprint-config-{}.json", std::process::id()));
    fs::write(&path, r#"{ "ident_max_len": 3, "emit_token_on_length_error": true }"#).unwrap();
    let config = LexerConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(config.ident_max_len, 3);

    let analysis = analyze("tile abcd;", &config);
    assert_eq!(analysis.lex_errors.len(), 1);
    assert!(analysis.tokens.iter().any(|t| t.flagged));
}

#[test]
fn test_config_errors() {
    assert!(matches!(
        LexerConfig::from_json(r#"{ "int_max_digits": 0 }"#),
        Err(ConfigError::ZeroLimit {
            field: "int_max_digits"
        })
    ));
    assert!(matches!(
        LexerConfig::from_json(r#"{ "case_sensitive": false }"#),
        Err(ConfigError::Json(_))
    ));
    assert!(matches!(
        LexerConfig::load(Path::new("demos/no-such-config.json")),
        Err(ConfigError::Io { .. })
    ));
}
