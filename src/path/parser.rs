//! Parses path data into commands, keeping each command's source span.
//!
//! Grammar per SVG 1.1 (<https://www.w3.org/TR/SVG11/paths.html>): command
//! letters may be omitted when a command repeats, separators between
//! operands are optional, and a comma may not directly follow a command
//! letter.

use log::trace;

use super::command::{CommandType, Info, PathCommand};
use super::decimal::Decimal;
use super::lexer::{NumberMode, PathLexer, Span, Token};
use crate::errors::PathError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LastCommand {
    kind: CommandType,
    relative: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParserState {
    Parsing(Option<LastCommand>),
    Failed(PathError),
}

impl ParserState {
    fn next(self, result: &Result<PathCommand, PathError>) -> Self {
        match (self, result) {
            (ParserState::Failed(err), _) => ParserState::Failed(err),
            (_, Ok(cmd)) => ParserState::Parsing(Some(LastCommand {
                kind: cmd.kind(),
                relative: cmd.is_relative(),
            })),
            // running out of data isn't a failure; reading again gives Eof again
            (state, Err(PathError::Eof)) => state,
            (_, Err(err)) => ParserState::Failed(*err),
        }
    }
}

pub struct PathParser<'a> {
    lexer: PathLexer<'a>,
    state: ParserState,
}

impl<'a> PathParser<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            lexer: PathLexer::new(path),
            state: ParserState::Parsing(None),
        }
    }

    /// Position in the source following the last consumed token.
    pub fn pos(&self) -> usize {
        self.lexer.pos()
    }

    /// Read the next command.
    ///
    /// Once an error other than `Eof` is returned, every later call returns
    /// the same error.
    pub fn read(&mut self) -> Result<PathCommand, PathError> {
        let last = match self.state {
            ParserState::Failed(err) => return Err(err),
            ParserState::Parsing(last) => last,
        };
        let result = self.parse_command(last);
        self.state = self.state.next(&result);
        match &result {
            Ok(cmd) => trace!("path command: {cmd:?}"),
            Err(err) => trace!("path parse stopped at {}: {err:?}", self.pos()),
        }
        result
    }

    fn parse_command(&mut self, last: Option<LastCommand>) -> Result<PathCommand, PathError> {
        let token = self.skip_space(NumberMode::Generic, false);

        let (kind, start, relative, subsequent) = match token {
            Token::Eof(_) => return Err(PathError::Eof),
            Token::Command(span, CommandType::Close, relative) => {
                self.lexer.read(NumberMode::Generic);
                return Ok(PathCommand::Close(Info {
                    span,
                    relative,
                    subsequent: false,
                }));
            }
            Token::Command(span, kind, relative) => {
                self.lexer.read(NumberMode::Generic);
                if let Token::Comma(_) = self.skip_space(NumberMode::Generic, false) {
                    return Err(PathError::MissingArgs);
                }
                (kind, span.start, relative, false)
            }
            _ => {
                // closepath takes no arguments, so never repeats
                let last = match last {
                    Some(last) if last.kind != CommandType::Close => last,
                    _ => return Err(PathError::MissingCommand),
                };
                let token = self.skip_space(NumberMode::Generic, true);
                (last.kind.repeated(), token.start(), last.relative, true)
            }
        };

        let cmd = match kind {
            CommandType::Close => PathCommand::Close(self.info(start, relative, subsequent)),
            CommandType::HorizontalLine => {
                let [x] = self.read_numbers::<1>(NumberMode::Generic)?;
                PathCommand::HorizontalLine {
                    info: self.info(start, relative, subsequent),
                    x,
                }
            }
            CommandType::VerticalLine => {
                let [y] = self.read_numbers::<1>(NumberMode::Generic)?;
                PathCommand::VerticalLine {
                    info: self.info(start, relative, subsequent),
                    y,
                }
            }
            CommandType::Move => {
                let [x, y] = self.read_numbers::<2>(NumberMode::Generic)?;
                PathCommand::Move {
                    info: self.info(start, relative, subsequent),
                    x,
                    y,
                }
            }
            CommandType::Line => {
                let [x, y] = self.read_numbers::<2>(NumberMode::Generic)?;
                PathCommand::Line {
                    info: self.info(start, relative, subsequent),
                    x,
                    y,
                }
            }
            CommandType::SmoothQuadraticCurve => {
                let [x, y] = self.read_numbers::<2>(NumberMode::Generic)?;
                PathCommand::SmoothQuadraticCurve {
                    info: self.info(start, relative, subsequent),
                    x,
                    y,
                }
            }
            CommandType::QuadraticCurve => {
                let [x1, y1, x, y] = self.read_numbers::<4>(NumberMode::Generic)?;
                PathCommand::QuadraticCurve {
                    info: self.info(start, relative, subsequent),
                    x1,
                    y1,
                    x,
                    y,
                }
            }
            CommandType::SmoothCurve => {
                let [x2, y2, x, y] = self.read_numbers::<4>(NumberMode::Generic)?;
                PathCommand::SmoothCurve {
                    info: self.info(start, relative, subsequent),
                    x2,
                    y2,
                    x,
                    y,
                }
            }
            CommandType::Curve => {
                let [x1, y1, x2, y2, x, y] = self.read_numbers::<6>(NumberMode::Generic)?;
                PathCommand::Curve {
                    info: self.info(start, relative, subsequent),
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                }
            }
            CommandType::Arc => {
                let [rx, ry] = self.read_numbers::<2>(NumberMode::NonNegative)?;
                let [rotation] = self.read_numbers::<1>(NumberMode::Generic)?;
                let large_arc = self.read_flag()?;
                let sweep = self.read_flag()?;
                let [x, y] = self.read_numbers::<2>(NumberMode::Generic)?;
                PathCommand::Arc {
                    info: self.info(start, relative, subsequent),
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                }
            }
        };
        Ok(cmd)
    }

    /// Command info spanning from `start` to the current position.
    fn info(&self, start: usize, relative: bool, subsequent: bool) -> Info {
        Info {
            span: Span::new(start, self.lexer.pos()),
            relative,
            subsequent,
        }
    }

    fn read_numbers<const N: usize>(
        &mut self,
        mode: NumberMode,
    ) -> Result<[Decimal; N], PathError> {
        let mut values: [Decimal; N] = std::array::from_fn(|_| Decimal::default());
        for value in values.iter_mut() {
            match self.skip_space(mode, true) {
                Token::Number(_, number) => {
                    self.lexer.read(mode);
                    *value = number;
                }
                Token::BadNumber(_) => return Err(PathError::BadNumber),
                _ => return Err(PathError::MissingArgs),
            }
        }
        Ok(values)
    }

    fn read_flag(&mut self) -> Result<bool, PathError> {
        match self.skip_space(NumberMode::Flag, true) {
            Token::Flag(_, flag) => {
                self.lexer.read(NumberMode::Flag);
                Ok(flag)
            }
            _ => Err(PathError::MissingArgs),
        }
    }

    /// Skip optional whitespace, a single optional comma, and more optional
    /// whitespace; returns the following token without consuming it.
    fn skip_space(&mut self, mode: NumberMode, allow_comma: bool) -> Token {
        if let Token::Whitespace(_) = self.lexer.peek(mode) {
            self.lexer.read(mode);
        }
        if allow_comma {
            if let Token::Comma(_) = self.lexer.peek(mode) {
                self.lexer.read(mode);
            }
        }
        if let Token::Whitespace(_) = self.lexer.peek(mode) {
            self.lexer.read(mode);
        }
        self.lexer.peek(mode)
    }
}

/// Iterator over the commands of a path; see [`parse_path`](super::parse_path).
///
/// Ends at the end of input, or after yielding the first error.
pub struct PathCommands<'a> {
    parser: PathParser<'a>,
    done: bool,
}

impl<'a> PathCommands<'a> {
    pub(super) fn new(path: &'a str) -> Self {
        Self {
            parser: PathParser::new(path),
            done: false,
        }
    }
}

impl Iterator for PathCommands<'_> {
    type Item = Result<PathCommand, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parser.read() {
            Ok(cmd) => Some(Ok(cmd)),
            Err(PathError::Eof) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for PathCommands<'_> {}
