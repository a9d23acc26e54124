//! Tokenizer for path data, following the SVG 1.1 path grammar
//! (<https://www.w3.org/TR/SVG11/paths.html#PathDataBNF>).
//!
//! The grammar is not context free at the character level: `-1` is a single
//! number for most operands, but arc radii are non-negative and arc flags are
//! a single `0` or `1` (so `10` is two flags). The caller selects a
//! [`NumberMode`] for each token it asks for.

use log::trace;

use super::command::CommandType;
use super::decimal::Decimal;

/// Half-open byte range into the source path data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberMode {
    /// Optionally signed number with optional exponent
    Generic,
    /// As `Generic` without a leading sign (arc radii)
    NonNegative,
    /// Single `0` or `1` character (arc flags)
    Flag,
}

impl NumberMode {
    const COUNT: usize = 3;

    const fn index(self) -> usize {
        match self {
            NumberMode::Generic => 0,
            NumberMode::NonNegative => 1,
            NumberMode::Flag => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Eof(Span),
    Unknown(Span),
    Comma(Span),
    Whitespace(Span),
    Flag(Span, bool),
    Number(Span, Decimal),
    /// Lexically valid number which cannot be represented
    BadNumber(Span),
    Command(Span, CommandType, bool),
}

impl Token {
    pub fn span(&self) -> Span {
        match self {
            Token::Eof(span)
            | Token::Unknown(span)
            | Token::Comma(span)
            | Token::Whitespace(span)
            | Token::Flag(span, _)
            | Token::Number(span, _)
            | Token::BadNumber(span)
            | Token::Command(span, _, _) => *span,
        }
    }

    pub fn start(&self) -> usize {
        self.span().start
    }

    pub fn end(&self) -> usize {
        self.span().end
    }
}

// SVG whitespace; form-feed is only present in SVG 2.
fn is_wsp(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | 0x0c | b'\r' | b'\n')
}

fn is_sign(b: u8) -> bool {
    b == b'+' || b == b'-'
}

pub struct PathLexer<'a> {
    path: &'a str,
    pos: usize,
    peeked: [Option<Token>; NumberMode::COUNT],
}

impl<'a> PathLexer<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            pos: 0,
            peeked: Default::default(),
        }
    }

    /// Current position; the start of the next token to be read.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Return the next token in the given mode without consuming it.
    pub fn peek(&mut self, mode: NumberMode) -> Token {
        let start = self.pos;
        let token = self.next_token(mode);
        self.peeked[mode.index()] = Some(token.clone());
        self.pos = start;
        token
    }

    /// Consume and return the next token in the given mode.
    ///
    /// Any peeked tokens are discarded, whichever mode they were peeked in.
    pub fn read(&mut self, mode: NumberMode) -> Token {
        let token = self.next_token(mode);
        self.peeked = Default::default();
        trace!("path token: {token:?}");
        token
    }

    fn current(&self) -> Option<u8> {
        self.path.as_bytes().get(self.pos).copied()
    }

    fn next_token(&mut self, mode: NumberMode) -> Token {
        let Some(c) = self.current() else {
            return Token::Eof(Span::new(self.pos, self.pos));
        };
        if let Some(token) = &self.peeked[mode.index()] {
            self.pos = token.end();
            return token.clone();
        }
        match mode {
            _ if is_wsp(c) => self.read_whitespace(),
            _ if c == b',' => self.read_comma(),
            NumberMode::Generic if c.is_ascii_digit() || c == b'.' || is_sign(c) => {
                self.read_number()
            }
            NumberMode::NonNegative if c.is_ascii_digit() || c == b'.' => self.read_number(),
            NumberMode::Flag if c == b'0' || c == b'1' => self.read_flag(),
            _ => self.read_command(),
        }
    }

    fn read_whitespace(&mut self) -> Token {
        let start = self.pos;
        while self.current().is_some_and(is_wsp) {
            self.pos += 1;
        }
        Token::Whitespace(Span::new(start, self.pos))
    }

    fn read_comma(&mut self) -> Token {
        let start = self.pos;
        self.pos += 1;
        Token::Comma(Span::new(start, self.pos))
    }

    fn read_flag(&mut self) -> Token {
        let start = self.pos;
        let value = self.current() == Some(b'1');
        self.pos += 1;
        Token::Flag(Span::new(start, self.pos), value)
    }

    fn read_command(&mut self) -> Token {
        let start = self.pos;
        // Unknown characters may be multi-byte; always step a whole char so
        // spans remain valid `str` boundaries.
        let c = self.path[start..].chars().next().unwrap_or_default();
        self.pos += c.len_utf8().max(1);
        let span = Span::new(start, self.pos);
        match CommandType::from_letter(c) {
            Some((cmd, relative)) => Token::Command(span, cmd, relative),
            None => Token::Unknown(span),
        }
    }

    fn skip_digits(&mut self) -> bool {
        let start = self.pos;
        while self.current().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;
        if self.current().is_some_and(is_sign) {
            self.pos += 1;
        }

        let has_integer = self.skip_digits();
        let has_point = self.current() == Some(b'.');
        if has_point {
            self.pos += 1;
        }
        let has_fraction = self.skip_digits();

        if !has_integer && !(has_point && has_fraction) {
            return Token::Unknown(Span::new(start, self.pos));
        }

        if matches!(self.current(), Some(b'e' | b'E')) {
            let checkpoint = self.pos;
            self.pos += 1;
            if self.current().is_some_and(is_sign) {
                self.pos += 1;
            }
            // 'e' without exponent digits isn't part of this number
            if !self.skip_digits() {
                self.pos = checkpoint;
            }
        }

        let span = Span::new(start, self.pos);
        match self.path[start..self.pos].parse::<Decimal>() {
            Ok(value) => Token::Number(span, value),
            Err(_) => Token::BadNumber(span),
        }
    }
}
