//! Diagnostics list rendering

use crate::ui::app::{Finding, FindingOrigin};
use crate::ui::panes::tokens::scroll_to;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the diagnostics pane. `parsed` tells apart "accepted" from
/// "parser skipped" when the list is empty.
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    findings: &[Finding],
    parsed: bool,
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Diagnostics ({}) ", findings.len()))
        .borders(Borders::ALL)
        .border_style(DEFAULT_THEME.border(is_focused));

    if findings.is_empty() {
        let (text, colour) = if parsed {
            ("Program accepted.", DEFAULT_THEME.success)
        } else {
            ("(no diagnostics)", DEFAULT_THEME.comment)
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(colour))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    scroll_to(scroll_offset, selected, visible_height);

    let items: Vec<ListItem> = findings
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, finding)| {
            let origin = match finding.origin {
                FindingOrigin::Lexical => "lex",
                FindingOrigin::Syntax => "syntax",
            };
            let mut item = ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<7}", origin),
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{:>4}:{:<3} ", finding.location.line, finding.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    finding.message.clone(),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
            ]));
            if idx == selected {
                item = item.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
            }
            item
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
