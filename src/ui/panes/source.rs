//! Source pane rendering
//!
//! The source is coloured from the lexer's own tokens rather than a separate
//! highlighter, so what is shown is exactly how the text was classified.
//! Characters no token covers (units the lexer skipped) keep the plain
//! foreground colour.
//!
//! # Features
//!
//! - Token-kind colouring, with called names picked out
//! - The selected token drawn on the highlight background
//! - Every diagnostic span underlined in the error colour
//! - Line numbering, with lines carrying a diagnostic marked

use crate::lexer::{SourceLocation, Token, TokenKind};
use crate::ui::app::Finding;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Line to bring into view on the next render
    pub follow: Option<usize>,
}

type Cell = (char, Style);

fn display_char(ch: char) -> char {
    match ch {
        '\t' => ' ',
        ch if ch.is_control() => '·',
        ch => ch,
    }
}

/// Apply `style` to every cell from `start` up to, not including, `end`.
/// Positions past the end of a line continue on the next one.
fn patch_span(cells: &mut [Vec<Cell>], start: SourceLocation, end: SourceLocation, style: Style) {
    let (mut line, mut column) = (start.line, start.column);
    while (line, column) < (end.line, end.column) {
        let Some(row) = cells.get_mut(line.wrapping_sub(1)) else {
            break;
        };
        match row.get_mut(column.wrapping_sub(1)) {
            Some(cell) => {
                cell.1 = cell.1.patch(style);
                column += 1;
            }
            None => {
                line += 1;
                column = 1;
            }
        }
    }
}

/// Apply `style` to the characters of one token.
fn patch_token(cells: &mut [Vec<Cell>], token: &Token, style: Style) {
    let (mut line, mut column) = (token.location.line, token.location.column);
    for ch in token.lexeme.chars() {
        if ch == '\n' {
            line += 1;
            column = 1;
            continue;
        }
        if let Some(cell) = cells
            .get_mut(line.wrapping_sub(1))
            .and_then(|row| row.get_mut(column.wrapping_sub(1)))
        {
            cell.1 = cell.1.patch(style);
        }
        column += 1;
    }
}

fn paint(
    source: &str,
    tokens: &[Token],
    selected: Option<usize>,
    findings: &[Finding],
) -> Vec<Vec<Cell>> {
    let base = Style::default().fg(DEFAULT_THEME.fg);
    let mut cells: Vec<Vec<Cell>> = source
        .split('\n')
        .map(|line| line.chars().map(|ch| (display_char(ch), base)).collect())
        .collect();

    for (index, token) in tokens.iter().enumerate() {
        let is_call = token.kind == TokenKind::Identifier
            && tokens[index + 1..]
                .iter()
                .find(|next| !next.kind.is_trivia())
                .is_some_and(|next| next.kind == TokenKind::LParen);
        patch_token(&mut cells, token, DEFAULT_THEME.token(token.kind, is_call));
    }

    if let Some(token) = selected.and_then(|index| tokens.get(index)) {
        patch_token(
            &mut cells,
            token,
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .add_modifier(Modifier::BOLD),
        );
    }

    let underline = Style::default()
        .fg(DEFAULT_THEME.error)
        .add_modifier(Modifier::UNDERLINED);
    for finding in findings {
        patch_span(&mut cells, finding.start, finding.end, underline);
    }

    cells
}

/// Merge runs of equally styled cells into spans.
fn to_spans(row: &[Cell]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut current = Style::default();
    for &(ch, style) in row {
        if style != current && !text.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut text), current));
        }
        current = style;
        text.push(ch);
    }
    if !text.is_empty() {
        spans.push(Span::styled(text, current));
    }
    spans
}

/// Render the source pane
#[allow(clippy::too_many_arguments)]
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source_code: &str,
    tokens: &[Token],
    selected: Option<usize>,
    findings: &[Finding],
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border(is_focused));

    let cells = paint(source_code, tokens, selected, findings);
    let total_lines = cells.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Bring the followed line into view, then clamp
    if let Some(line) = scroll_state.follow.take() {
        let line_idx = line.saturating_sub(1);
        if line_idx < scroll_state.offset {
            scroll_state.offset = line_idx;
        } else if line_idx >= scroll_state.offset + visible_height {
            scroll_state.offset = line_idx + 1 - visible_height;
        }
    }
    scroll_state.offset = scroll_state
        .offset
        .min(total_lines.saturating_sub(visible_height));

    let selected_line = selected
        .and_then(|index| tokens.get(index))
        .map(|token| token.location.line);

    let visible_lines: Vec<Line> = cells
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, row)| {
            let line_num = idx + 1;
            let has_finding = findings
                .iter()
                .any(|finding| (finding.start.line..=finding.end.line).contains(&line_num));

            let num_style = if has_finding {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if selected_line == Some(line_num) {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(to_spans(row));
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LexerConfig;
    use crate::lexer::tokenize;

    #[test]
    fn test_paint_covers_every_line() {
        let source = "blueprint() {\n    tile x;\n}";
        let (tokens, _) = tokenize(source, &LexerConfig::default());
        let cells = paint(source, &tokens, None, &[]);
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[1].len(), 11);
        // `tile` is a material keyword
        assert_eq!(cells[1][4].1.fg, Some(DEFAULT_THEME.type_name));
    }

    #[test]
    fn test_selected_token_is_highlighted() {
        let source = "tile x;";
        let (tokens, _) = tokenize(source, &LexerConfig::default());
        let index = tokens.iter().position(|t| t.lexeme == "x");
        let cells = paint(source, &tokens, index, &[]);
        assert_eq!(cells[0][5].1.bg, Some(DEFAULT_THEME.current_line_bg));
        assert_eq!(cells[0][0].1.bg, None);
    }

    #[test]
    fn test_finding_underlines_across_lines() {
        let mut cells: Vec<Vec<Cell>> = vec![
            "ab".chars().map(|c| (c, Style::default())).collect(),
            "cd".chars().map(|c| (c, Style::default())).collect(),
        ];
        let style = Style::default().add_modifier(Modifier::UNDERLINED);
        patch_span(
            &mut cells,
            SourceLocation::new(1, 2),
            SourceLocation::new(2, 2),
            style,
        );
        let underlined: Vec<bool> = cells
            .iter()
            .flatten()
            .map(|cell| cell.1.add_modifier.contains(Modifier::UNDERLINED))
            .collect();
        assert_eq!(underlined, vec![false, true, true, false]);
    }

    #[test]
    fn test_to_spans_merges_runs() {
        let plain = Style::default();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let row = vec![('a', plain), ('b', plain), ('c', bold)];
        let spans = to_spans(&row);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "ab");
        assert_eq!(spans[1].content, "c");
    }
}
