use crate::lexer::TokenKind;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub function: Color,
    pub type_name: Color, // Cyan for the material keywords
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(166, 227, 161),         // Green for wall/brick literals
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for the selection
    function: Color::Rgb(249, 226, 175),       // Yellow for called names
    type_name: Color::Rgb(148, 226, 213),      // Cyan/teal
};

impl Theme {
    pub fn border(&self, is_focused: bool) -> Style {
        if is_focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.border_normal)
        }
    }

    /// Colour of a token in the source pane. `is_call` marks an identifier
    /// directly followed by `(`.
    pub fn token(&self, kind: TokenKind, is_call: bool) -> Style {
        match kind {
            TokenKind::Tile
            | TokenKind::Glass
            | TokenKind::Brick
            | TokenKind::Wall
            | TokenKind::Beam
            | TokenKind::Field
            | TokenKind::House => Style::default().fg(self.type_name),
            TokenKind::Solid | TokenKind::Fragile => Style::default().fg(self.number),
            kind if kind.is_keyword() => Style::default()
                .fg(self.keyword)
                .add_modifier(Modifier::BOLD),
            TokenKind::TileLiteral | TokenKind::GlassLiteral => Style::default().fg(self.number),
            TokenKind::BrickLiteral | TokenKind::WallLiteral => Style::default().fg(self.string),
            TokenKind::LineComment | TokenKind::BlockComment => {
                Style::default().fg(self.comment)
            }
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket => Style::default().fg(self.primary),
            TokenKind::Identifier if is_call => Style::default().fg(self.function),
            _ => Style::default().fg(self.fg),
        }
    }
}
