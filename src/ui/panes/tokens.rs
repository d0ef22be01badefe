//! Token table rendering

use crate::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Lexeme as shown in a one-line cell.
pub fn escape_lexeme(lexeme: &str) -> String {
    lexeme.escape_debug().to_string()
}

/// Keep `selected` inside the window starting at `offset`.
pub fn scroll_to(offset: &mut usize, selected: usize, visible_height: usize) {
    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + visible_height {
        *offset = selected + 1 - visible_height;
    }
}

/// Render the token table. `rows` are indices into `tokens`; `selected` is
/// a position in `rows`.
#[allow(clippy::too_many_arguments)]
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    rows: &[usize],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", rows.len()))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border(is_focused));

    if rows.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    scroll_to(scroll_offset, selected, visible_height);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .filter_map(|(row, &index)| {
            let token = tokens.get(index)?;
            let mut spans = vec![
                Span::styled(
                    format!("{:>4}:{:<3} ", token.location.line, token.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    format!("{:<10} ", token.tag()),
                    DEFAULT_THEME.token(token.kind, false),
                ),
                Span::styled(
                    escape_lexeme(&token.lexeme),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ];
            if let Some(value) = &token.decoded {
                spans.push(Span::styled(
                    format!("  = {}", escape_lexeme(value)),
                    Style::default().fg(DEFAULT_THEME.string),
                ));
            }
            if token.flagged {
                spans.push(Span::styled(
                    "  (too long)",
                    Style::default().fg(DEFAULT_THEME.error),
                ));
            }

            let mut item = ListItem::new(Line::from(spans));
            if row == selected {
                item = item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                );
            }
            Some(item)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_lexeme() {
        assert_eq!(escape_lexeme("\n"), "\\n");
        assert_eq!(escape_lexeme("\"a\\tb\""), "\\\"a\\\\tb\\\"");
        assert_eq!(escape_lexeme("tile"), "tile");
    }

    #[test]
    fn test_scroll_to_keeps_selection_visible() {
        let mut offset = 0;
        scroll_to(&mut offset, 3, 5);
        assert_eq!(offset, 0);
        scroll_to(&mut offset, 7, 5);
        assert_eq!(offset, 3);
        scroll_to(&mut offset, 1, 5);
        assert_eq!(offset, 1);
    }
}
