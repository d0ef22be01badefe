//! Main TUI application state and logic

use crate::analysis::Analysis;
use crate::lexer::{LexError, SourceLocation, Token, TokenKind};
use crate::parser::SyntaxError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Rows moved by PgUp/PgDn
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Trace,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> tokens -> trace -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Tokens => FocusedPane::Source,
            FocusedPane::Trace => FocusedPane::Tokens,
            FocusedPane::Diagnostics => FocusedPane::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingOrigin {
    Lexical,
    Syntax,
}

/// A diagnostic as the viewer shows it, lexical or syntactic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub origin: FindingOrigin,
    pub message: String,
    /// Where the caret goes
    pub location: SourceLocation,
    /// Underlined span, end exclusive
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl From<&LexError> for Finding {
    fn from(error: &LexError) -> Self {
        let (start, end) = if error.start == error.end {
            let at = error.location;
            (at, SourceLocation::new(at.line, at.column + 1))
        } else {
            (error.start, error.end)
        };
        Finding {
            origin: FindingOrigin::Lexical,
            message: error.message(),
            location: error.location,
            start,
            end,
        }
    }
}

impl From<&SyntaxError> for Finding {
    fn from(error: &SyntaxError) -> Self {
        Finding {
            origin: FindingOrigin::Syntax,
            message: error.message(),
            location: error.start,
            start: error.start,
            end: error.end,
        }
    }
}

/// Row of the token covering `at`, or else the first one after it.
pub fn row_at(tokens: &[Token], rows: &[usize], at: SourceLocation) -> Option<usize> {
    let position = |row: &usize| tokens.get(*row).map(|token| token.location);
    rows.iter()
        .position(|row| {
            tokens.get(*row).is_some_and(|token| {
                token.location.line == at.line
                    && (token.location.column..token.location.column + token.width())
                        .contains(&at.column)
            })
        })
        .or_else(|| rows.iter().position(|row| position(row) >= Some(at)))
        .or_else(|| rows.len().checked_sub(1))
}

/// The main application state
pub struct App {
    pub analysis: Analysis,

    /// The source text that was analyzed
    pub source_code: String,

    /// Shown in the source pane title
    pub file_name: String,

    /// Flattened lexical and syntax errors
    pub findings: Vec<Finding>,

    /// Indices of the tokens listed in the token table (no whitespace)
    pub rows: Vec<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Selected row in the token table
    pub selected_row: usize,

    /// Selected entry in the diagnostics pane
    pub selected_finding: usize,

    /// Per-pane scroll offsets
    pub source_scroll: super::panes::SourceScrollState,
    pub tokens_scroll: usize,
    pub trace_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over a finished analysis of `source_code`
    pub fn new(analysis: Analysis, source_code: String, file_name: String) -> Self {
        let findings = analysis
            .lex_errors
            .iter()
            .map(Finding::from)
            .chain(analysis.syntax_errors.iter().map(Finding::from))
            .collect();
        let rows = analysis
            .tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| {
                !matches!(
                    token.kind,
                    TokenKind::Space | TokenKind::Tab | TokenKind::Newline
                )
            })
            .map(|(index, _)| index)
            .collect();
        let status_message = if analysis.accepted() {
            String::from("Program accepted")
        } else if analysis.parsed {
            String::from("Syntax error")
        } else {
            String::from("Lexical errors, parser skipped")
        };

        let mut app = App {
            analysis,
            source_code,
            file_name,
            findings,
            rows,
            focused_pane: FocusedPane::Tokens,
            selected_row: 0,
            selected_finding: 0,
            source_scroll: Default::default(),
            tokens_scroll: 0,
            trace_scroll: 0,
            diagnostics_scroll: 0,
            should_quit: false,
            status_message,
        };
        // Open on the first problem, if any
        if let Some(first) = app.findings.first().map(|finding| finding.location) {
            if let Some(row) = row_at(&app.analysis.tokens, &app.rows, first) {
                app.select_row(row);
            }
        }
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// The token behind the selected row
    pub fn selected_token(&self) -> Option<&Token> {
        self.rows
            .get(self.selected_row)
            .and_then(|&index| self.analysis.tokens.get(index))
    }

    fn select_row(&mut self, row: usize) {
        let last = self.rows.len().saturating_sub(1);
        self.selected_row = row.min(last);
        self.trace_scroll = 0;
        self.source_scroll.follow = self.selected_token().map(|token| token.location.line);
        if let Some(token) = self.selected_token() {
            self.status_message = format!(
                "{} '{}' at {}",
                token.tag(),
                super::panes::tokens::escape_lexeme(&token.lexeme),
                token.location
            );
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: Tokens (top) | Trace (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let selected_index = self.rows.get(self.selected_row).copied();

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.file_name,
            &self.source_code,
            &self.analysis.tokens,
            selected_index,
            &self.findings,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.findings,
            self.analysis.parsed,
            self.selected_finding,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            right_rows[0],
            &self.analysis.tokens,
            &self.rows,
            self.selected_row,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        let selected_token = selected_index.and_then(|index| self.analysis.tokens.get(index));
        super::panes::render_trace_pane(
            frame,
            right_rows[1],
            selected_token,
            self.focused_pane == FocusedPane::Trace,
            &mut self.trace_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.analysis.error_count(),
            self.analysis.accepted(),
        );
    }

    /// Move the focused pane's selection or scroll position by `delta` rows
    fn move_by(&mut self, delta: isize) {
        let shift = |value: usize| value.saturating_add_signed(delta);
        match self.focused_pane {
            FocusedPane::Source => {
                self.source_scroll.offset = shift(self.source_scroll.offset);
            }
            FocusedPane::Tokens => {
                self.select_row(shift(self.selected_row));
            }
            FocusedPane::Trace => {
                self.trace_scroll = shift(self.trace_scroll);
            }
            FocusedPane::Diagnostics => {
                let last = self.findings.len().saturating_sub(1);
                self.selected_finding = shift(self.selected_finding).min(last);
            }
        }
    }

    /// Select the token at the chosen diagnostic
    fn go_to_finding(&mut self) {
        let Some(at) = self
            .findings
            .get(self.selected_finding)
            .map(|finding| finding.location)
        else {
            self.status_message = "No diagnostic selected".to_string();
            return;
        };
        match row_at(&self.analysis.tokens, &self.rows, at) {
            Some(row) => {
                self.select_row(row);
                self.focused_pane = FocusedPane::Tokens;
            }
            None => {
                self.source_scroll.follow = Some(at.line);
                self.status_message = format!("No token at {}", at);
            }
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE as isize)),
            KeyCode::PageDown => self.move_by(PAGE as isize),
            KeyCode::Home if self.focused_pane == FocusedPane::Tokens => self.select_row(0),
            KeyCode::End if self.focused_pane == FocusedPane::Tokens => {
                self.select_row(usize::MAX)
            }
            KeyCode::Enter if self.focused_pane == FocusedPane::Diagnostics => {
                self.go_to_finding();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::LexerConfig;
    use crossterm::event::KeyModifiers;

    fn app(source: &str) -> App {
        let config = LexerConfig {
            record_trace: true,
            ..LexerConfig::default()
        };
        App::new(
            analyze(source, &config),
            source.to_string(),
            "test.bp".to_string(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        let mut pane = FocusedPane::Source;
        for _ in 0..4 {
            pane = pane.next();
        }
        assert_eq!(pane, FocusedPane::Source);
        assert_eq!(FocusedPane::Source.prev(), FocusedPane::Diagnostics);
        assert_eq!(FocusedPane::Source.next().prev(), FocusedPane::Source);
    }

    #[test]
    fn test_rows_skip_whitespace() {
        let app = app("blueprint() {\n}");
        let kinds: Vec<TokenKind> = app
            .rows
            .iter()
            .map(|&index| app.analysis.tokens[index].kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Blueprint,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
        assert_eq!(app.status_message, "Program accepted");
    }

    #[test]
    fn test_down_moves_token_selection() {
        let mut app = app("blueprint() {}");
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        press(&mut app, KeyCode::Down);
        assert_eq!(
            app.selected_token().map(|token| token.kind),
            Some(TokenKind::LParen)
        );
        press(&mut app, KeyCode::PageDown);
        assert!(app.selected_token().is_some_and(|token| token.is_eof()));
        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected_row, 0);
    }

    #[test]
    fn test_opens_on_first_finding() {
        let app = app("blueprint() {\n    tile x = 1\n}");
        assert_eq!(app.findings.len(), 1);
        assert_eq!(app.findings[0].origin, FindingOrigin::Syntax);
        assert_eq!(
            app.selected_token().map(|token| token.kind),
            Some(TokenKind::RBrace)
        );
    }

    #[test]
    fn test_enter_on_diagnostic_selects_token() {
        let mut app = app("tile 1x;\nblueprint() {}");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Diagnostics);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);
        // `1x` was dropped, so the next token after it is chosen
        assert_eq!(
            app.selected_token().map(|token| token.kind),
            Some(TokenKind::Semicolon)
        );
    }

    #[test]
    fn test_quit() {
        let mut app = app("blueprint() {}");
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
