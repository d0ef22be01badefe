//! Literal sub-machines: tile/glass numbers, wall strings and brick chars

use super::delimiters::{is_ident_continue, is_ident_start};
use super::dfa::{Lexer, Scanned};
use super::errors::LexErrorKind;
use super::token::{ScanState, TokenKind};

/// Value of `\x`, or `None` for an unknown escape.
fn decode_escape(ch: char) -> Option<char> {
    match ch {
        'n' => Some('\n'),
        't' => Some('\t'),
        '\\' => Some('\\'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '0' => Some('\0'),
        _ => None,
    }
}

fn is_printable(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

impl Lexer {
    fn consume_digits(&mut self, state: ScanState) -> usize {
        let mut count = 0;
        while self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.step(state, "digit");
            count += 1;
        }
        count
    }

    /// `-`? digits (`.` digits)?
    ///
    /// A letter straight after the digits makes the whole unit a
    /// digit-led identifier, and a second `.` in a glass literal swallows the
    /// remaining run of digits and dots. Both are dropped.
    pub(super) fn scan_number(&mut self) -> Option<Scanned> {
        let mut sign = 0;
        if self.cursor.peek() == Some('-') {
            self.step(ScanState::Int, "sign");
            sign = 1;
        }
        let int_digits = self.consume_digits(ScanState::Int);

        let mut frac_digits = None;
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.step(ScanState::FloatFrac, "dot");
            frac_digits = Some(self.consume_digits(ScanState::FloatFrac));

            if self.cursor.peek() == Some('.') {
                let at = self.cursor.location();
                self.error(LexErrorKind::MultipleDots, at, Some('.'));
                while self
                    .cursor
                    .peek()
                    .is_some_and(|c| c.is_ascii_digit() || c == '.')
                {
                    self.step(ScanState::Recover, "dots");
                }
                return None;
            }
        }

        if let Some(ch) = self.cursor.peek().filter(|&c| is_ident_start(c)) {
            let at = self.cursor.location();
            self.error(LexErrorKind::DigitLedIdentifier, at, Some(ch));
            while self.cursor.peek().is_some_and(is_ident_continue) {
                self.step(ScanState::Recover, "tail");
            }
            return None;
        }

        let mut overflowed = false;
        let kind = match frac_digits {
            None => {
                let max = self.config.int_max_digits;
                if int_digits > max {
                    self.error_at_offset(LexErrorKind::IntegerTooLong { max }, sign + max);
                    overflowed = true;
                }
                TokenKind::TileLiteral
            }
            Some(frac) => {
                let max = self.config.float_int_max_digits;
                if int_digits > max {
                    self.error_at_offset(LexErrorKind::FloatIntegerTooLong { max }, sign + max);
                    overflowed = true;
                }
                let max = self.config.float_frac_max_digits;
                if frac > max {
                    let offset = sign + int_digits + 1 + max;
                    self.error_at_offset(LexErrorKind::FloatFractionTooLong { max }, offset);
                    overflowed = true;
                }
                TokenKind::GlassLiteral
            }
        };
        self.keep_or_drop(kind, overflowed)
    }

    /// Wall literal. Escapes are decoded into the token value while the
    /// lexeme keeps the quoted source text.
    pub(super) fn scan_string(&mut self) -> Option<Scanned> {
        self.step(ScanState::String, "open");
        let mut value = String::new();

        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    let at = self.cursor.location();
                    let found = self.cursor.peek();
                    self.error(LexErrorKind::UnterminatedString, at, found);
                    return None;
                }
                Some('"') => {
                    self.step(ScanState::String, "close");
                    break;
                }
                Some('\\') => {
                    self.step(ScanState::String, "backslash");
                    if let Some(decoded) = self.scan_escape(ScanState::StringEscape) {
                        value.push(decoded);
                    }
                }
                Some(ch) => {
                    self.check_printable(ch);
                    self.step(ScanState::String, "char");
                    value.push(ch);
                }
            }
        }

        Some(Scanned {
            kind: TokenKind::WallLiteral,
            decoded: Some(value),
            flagged: false,
        })
    }

    /// Brick literal: exactly one decoded character between single quotes.
    pub(super) fn scan_char(&mut self) -> Option<Scanned> {
        self.step(ScanState::Char, "open");

        let value = match self.cursor.peek() {
            None | Some('\n') => {
                let at = self.cursor.location();
                let found = self.cursor.peek();
                self.error(LexErrorKind::UnterminatedChar, at, found);
                return None;
            }
            Some('\'') => {
                let at = self.cursor.location();
                self.step(ScanState::Char, "close");
                self.error(LexErrorKind::EmptyChar, at, Some('\''));
                return None;
            }
            Some('\\') => {
                self.step(ScanState::Char, "backslash");
                match self.scan_escape(ScanState::CharEscape) {
                    Some(decoded) => decoded,
                    None => {
                        let at = self.cursor.location();
                        let found = self.cursor.peek();
                        self.error(LexErrorKind::UnterminatedChar, at, found);
                        return None;
                    }
                }
            }
            Some(ch) => {
                self.check_printable(ch);
                self.step(ScanState::Char, "char");
                ch
            }
        };

        if self.cursor.peek() == Some('\'') {
            self.step(ScanState::Char, "close");
            return Some(Scanned {
                kind: TokenKind::BrickLiteral,
                decoded: Some(value.to_string()),
                flagged: false,
            });
        }
        self.recover_char();
        None
    }

    /// Character after a backslash. Unknown escapes are reported and yield
    /// the escaped character itself; `None` means the line or source ended.
    fn scan_escape(&mut self, state: ScanState) -> Option<char> {
        let ch = self.cursor.peek().filter(|&c| c != '\n')?;
        let at = self.cursor.location();
        self.step(state, "escape");
        match decode_escape(ch) {
            Some(decoded) => Some(decoded),
            None => {
                self.error(LexErrorKind::InvalidEscape(ch), at, Some(ch));
                Some(ch)
            }
        }
    }

    fn check_printable(&mut self, ch: char) {
        if !is_printable(ch) {
            let at = self.cursor.location();
            self.error(LexErrorKind::NonPrintable(ch), at, Some(ch));
        }
    }

    /// A brick literal that did not close after one character. Skip to the
    /// next quote on the same line if there is one.
    fn recover_char(&mut self) {
        let at = self.cursor.location();
        let found = self.cursor.peek();

        let mut offset = 0;
        let closes = loop {
            match self.cursor.peek_ahead(offset) {
                Some('\'') => break true,
                None | Some('\n') => break false,
                Some(_) => offset += 1,
            }
        };

        if closes {
            for _ in 0..=offset {
                self.step(ScanState::Recover, "skip");
            }
            self.error(LexErrorKind::CharTooLong, at, found);
        } else {
            for _ in 0..offset {
                self.step(ScanState::Recover, "skip");
            }
            self.error(LexErrorKind::UnterminatedChar, at, found);
        }
    }
}
