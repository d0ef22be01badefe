//! Human-readable diagnostics
//!
//! Lexical and syntax errors are turned into codespan-reporting diagnostics
//! over a single source file and rendered with source snippets.

use crate::lexer::{LexError, SourceLocation};
use crate::parser::SyntaxError;
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::termcolor::{Buffer, WriteColor};
use codespan_reporting::term::{self, Config};
use std::ops::Range;

/// Byte offset of a 1-based line/column position. Positions past the end of
/// a line or of the source clamp to the nearest valid offset.
pub fn byte_offset(source: &str, location: SourceLocation) -> usize {
    let mut line = 1;
    let mut column = 1;
    for (offset, ch) in source.char_indices() {
        if line == location.line && column == location.column {
            return offset;
        }
        if ch == '\n' {
            if line == location.line {
                return offset;
            }
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    source.len()
}

fn byte_range(source: &str, start: SourceLocation, end: SourceLocation) -> Range<usize> {
    let start = byte_offset(source, start);
    let end = byte_offset(source, end).max(start);
    start..end
}

/// At least one character wide, so end-of-input still gets a caret.
fn point_range(source: &str, at: SourceLocation) -> Range<usize> {
    let start = byte_offset(source, at);
    let width = source[start..].chars().next().map_or(0, char::len_utf8);
    start..start + width
}

pub fn lex_diagnostic(source: &str, error: &LexError) -> Diagnostic<()> {
    let mut labels = vec![Label::primary((), point_range(source, error.location))];
    if error.start != error.end {
        labels.push(
            Label::secondary((), byte_range(source, error.start, error.end))
                .with_message("in this unit"),
        );
    }

    let mut diagnostic = Diagnostic::error()
        .with_message(error.message())
        .with_labels(labels);
    if error.dropped_unit() {
        diagnostic = diagnostic.with_notes(vec![format!(
            "skipped {:?}",
            error.skipped
        )]);
    }
    diagnostic
}

pub fn syntax_diagnostic(source: &str, error: &SyntaxError) -> Diagnostic<()> {
    let range = byte_range(source, error.start, error.end);
    let range = if range.is_empty() {
        point_range(source, error.start)
    } else {
        range
    };
    let expected = error
        .expected
        .iter()
        .map(|kind| kind.tag())
        .collect::<Vec<_>>()
        .join(" ");

    Diagnostic::error()
        .with_message(error.message())
        .with_labels(vec![Label::primary((), range)])
        .with_notes(vec![format!("expected: {expected}")])
}

/// Write every diagnostic to `writer`.
pub fn emit<W: WriteColor>(
    writer: &mut W,
    name: &str,
    source: &str,
    diagnostics: &[Diagnostic<()>],
) -> Result<(), codespan_reporting::files::Error> {
    let file = SimpleFile::new(name, source);
    let config = Config::default();
    for diagnostic in diagnostics {
        term::emit(writer, &config, &file, diagnostic)?;
    }
    Ok(())
}

fn render(name: &str, source: &str, diagnostic: Diagnostic<()>) -> String {
    let mut buffer = Buffer::no_color();
    match emit(&mut buffer, name, source, &[diagnostic]) {
        Ok(()) => String::from_utf8_lossy(buffer.as_slice()).into_owned(),
        Err(err) => format!("error: failed to render diagnostic: {err}\n"),
    }
}

/// Plain-text rendering with the source snippet and an underline.
pub fn render_lex_error(name: &str, source: &str, error: &LexError) -> String {
    render(name, source, lex_diagnostic(source, error))
}

pub fn render_syntax_error(name: &str, source: &str, error: &SyntaxError) -> String {
    render(name, source, syntax_diagnostic(source, error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    #[test]
    fn test_byte_offset() {
        let source = "ab\ncé\nx";
        assert_eq!(byte_offset(source, SourceLocation::new(1, 1)), 0);
        assert_eq!(byte_offset(source, SourceLocation::new(2, 2)), 4);
        assert_eq!(byte_offset(source, SourceLocation::new(3, 1)), 7);
        // past the end of line 1 clamps to its newline
        assert_eq!(byte_offset(source, SourceLocation::new(1, 9)), 2);
        assert_eq!(byte_offset(source, SourceLocation::new(9, 1)), source.len());
    }

    #[test]
    fn test_render_lex_error() {
        let source = "tile 1x;";
        let (_, errors) = tokenize(source, &LexerConfig::default());
        let text = render_lex_error("demo.bp", source, &errors[0]);
        assert!(text.contains("identifier cannot start with a digit"));
        assert!(text.contains("demo.bp:1:7"));
        assert!(text.contains("skipped \"1x\""));
    }

    #[test]
    fn test_render_syntax_error_at_eof() {
        let source = "blueprint() {";
        let (tokens, _) = tokenize(source, &LexerConfig::default());
        let errors = parse(&tokens);
        let text = render_syntax_error("demo.bp", source, &errors[0]);
        assert!(text.contains("unexpected token 'EOF'"));
        assert!(text.contains("demo.bp:1:14"));
    }
}
