//! DFA trace pane rendering
//!
//! Shows the state walk that produced the selected token: one row per
//! consumed character with the state it was read in.

use crate::lexer::{ScanState, Token};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

fn state_style(state: ScanState) -> Style {
    match state {
        ScanState::Ladder => Style::default().fg(DEFAULT_THEME.keyword),
        ScanState::Recover => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
        ScanState::String
        | ScanState::StringEscape
        | ScanState::Char
        | ScanState::CharEscape => Style::default().fg(DEFAULT_THEME.string),
        ScanState::Int | ScanState::FloatFrac => Style::default().fg(DEFAULT_THEME.number),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the trace of `token`
pub fn render_trace_pane(
    frame: &mut Frame,
    area: Rect,
    token: Option<&Token>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = match token {
        Some(token) => format!(" DFA Trace: {} ", token.tag()),
        None => " DFA Trace ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border(is_focused));

    let steps = token.map(|token| token.trace.as_slice()).unwrap_or_default();
    if steps.is_empty() {
        let text = match token {
            Some(token) if token.is_eof() => "(end of input)",
            Some(_) => "(trace not recorded)",
            None => "(no token selected)",
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    let max_scroll = steps.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let items: Vec<ListItem> = steps
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, step)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>3} ", idx + 1),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<16} ", step.state.to_string()), state_style(step.state)),
                Span::styled(
                    format!("{:<8} ", format!("'{}'", step.ch.escape_debug())),
                    Style::default().fg(DEFAULT_THEME.secondary),
                ),
                Span::styled(step.label, Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
