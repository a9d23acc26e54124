//! Finds points where path data can be cut into independent subpaths.
//!
//! Possible split points are after a closepath (`Z`/`z`) or before a moveto
//! (`M`/`m`). The pen position is replayed across the whole path so that
//! anything following a split point which relied on the previous pen
//! position - a relative moveto, or a command directly after a closepath -
//! can be given an equivalent absolute `M` prefix.

use log::trace;

use super::command::PathCommand;
use super::decimal::Decimal;
use super::parser::PathParser;
use crate::errors::PathError;

/// A cut in the source path data.
///
/// `skip_start..skip_end` is omitted from the output, and `prefix` starts
/// the fragment following the cut.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Split {
    pub skip_start: usize,
    pub skip_end: usize,
    pub prefix: String,
}

impl Split {
    pub fn new(skip_start: usize, skip_end: usize, prefix: impl Into<String>) -> Self {
        Self {
            skip_start,
            skip_end,
            prefix: prefix.into(),
        }
    }
}

/// Absolute pen state after a command.
#[derive(Clone, Debug)]
struct PainterState {
    command: PathCommand,
    start_x: Decimal,
    start_y: Decimal,
    x: Decimal,
    y: Decimal,
}

impl PainterState {
    fn apply(&self, command: PathCommand) -> Self {
        if let PathCommand::Close(_) = command {
            return Self {
                command,
                start_x: self.start_x.clone(),
                start_y: self.start_y.clone(),
                x: self.start_x.clone(),
                y: self.start_y.clone(),
            };
        }

        let relative = command.is_relative();
        let x = match command.offset_x() {
            Some(dx) if relative => &self.x + dx,
            Some(x) => x.clone(),
            None => self.x.clone(),
        };
        let y = match command.offset_y() {
            Some(dy) if relative => &self.y + dy,
            Some(y) => y.clone(),
            None => self.y.clone(),
        };

        if let PathCommand::Move { .. } = command {
            Self {
                command,
                start_x: x.clone(),
                start_y: y.clone(),
                x,
                y,
            }
        } else {
            Self {
                command,
                start_x: self.start_x.clone(),
                start_y: self.start_y.clone(),
                x,
                y,
            }
        }
    }
}

/// The two most recent painter states.
#[derive(Clone, Debug)]
struct Window {
    previous: Option<PainterState>,
    last: PainterState,
}

impl Window {
    /// Check for a split point ending at `last`. `next` is the following
    /// command, if any; it is needed to see whether a relative moveto has
    /// implicit lineto arguments.
    fn split(&self, next: Option<&PainterState>) -> Option<Split> {
        let previous = self.previous.as_ref()?;
        let last = &self.last;

        if let PathCommand::Move { .. } = last.command {
            let split = if !last.command.is_relative() {
                Split::new(previous.command.end(), last.command.start(), "")
            } else if let Some(next) = next.filter(|n| n.command.is_subsequent()) {
                // Operands following the moveto are relative linetos; keep
                // them relative behind an explicit 'l'.
                Split::new(
                    previous.command.end(),
                    next.command.start(),
                    move_prefix(&last.start_x, &last.start_y, "l"),
                )
            } else {
                Split::new(
                    previous.command.end(),
                    last.command.end(),
                    move_prefix(&last.start_x, &last.start_y, ""),
                )
            };
            return Some(split);
        }

        if let PathCommand::Close(_) = previous.command {
            return Some(Split::new(
                previous.command.end(),
                last.command.start(),
                move_prefix(&previous.start_x, &previous.start_y, ""),
            ));
        }

        None
    }
}

/// Absolute moveto text; the comma is omitted when the sign of `y`
/// already separates the values.
fn move_prefix(x: &Decimal, y: &Decimal, suffix: &str) -> String {
    if y.is_negative() {
        format!("M{x}{y}{suffix}")
    } else {
        format!("M{x},{y}{suffix}")
    }
}

#[derive(Clone, Debug)]
enum SplitterState {
    Init,
    Parsing(Window),
    End(PathError),
}

pub struct PathSplitter<'a> {
    parser: PathParser<'a>,
    state: SplitterState,
}

impl<'a> PathSplitter<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            parser: PathParser::new(path),
            state: SplitterState::Init,
        }
    }

    /// Find the next split point.
    ///
    /// Returns `Err(PathError::Eof)` once the path is exhausted; this and any
    /// other error are repeated on every later call.
    pub fn next_split(&mut self) -> Result<Split, PathError> {
        loop {
            let state = std::mem::replace(&mut self.state, SplitterState::Init);
            let (state, split) = match state {
                SplitterState::Init => (self.start(), None),
                SplitterState::Parsing(window) => self.advance(window),
                SplitterState::End(err) => (SplitterState::End(err), None),
            };
            self.state = state;

            if let Some(split) = split {
                trace!("path split: {split:?}");
                return Ok(split);
            }
            if let SplitterState::End(err) = self.state {
                return Err(err);
            }
        }
    }

    fn start(&mut self) -> SplitterState {
        let command = match self.parser.read() {
            Ok(command) => command,
            Err(err) => return SplitterState::End(err),
        };
        let PathCommand::Move { x, y, .. } = &command else {
            return SplitterState::End(PathError::BadStart);
        };
        // An initial relative moveto is relative to the origin, i.e. absolute
        let (x, y) = (x.clone(), y.clone());
        SplitterState::Parsing(Window {
            previous: None,
            last: PainterState {
                command,
                start_x: x.clone(),
                start_y: y.clone(),
                x,
                y,
            },
        })
    }

    fn advance(&mut self, window: Window) -> (SplitterState, Option<Split>) {
        let command = match self.parser.read() {
            Ok(command) => command,
            // The last command read may still end a split point
            Err(err) => return (SplitterState::End(err), window.split(None)),
        };
        let current = window.last.apply(command);
        let split = window.split(Some(&current));
        let window = Window {
            previous: Some(window.last),
            last: current,
        };
        (SplitterState::Parsing(window), split)
    }
}

/// Iterator over the split points of a path; see [`split_path`](super::split_path).
///
/// Ends at the end of input, or after yielding the first error.
pub struct Splits<'a> {
    splitter: PathSplitter<'a>,
    done: bool,
}

impl<'a> Splits<'a> {
    pub(super) fn new(path: &'a str) -> Self {
        Self {
            splitter: PathSplitter::new(path),
            done: false,
        }
    }
}

impl Iterator for Splits<'_> {
    type Item = Result<Split, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.splitter.next_split() {
            Ok(split) => Some(Ok(split)),
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

impl std::iter::FusedIterator for Splits<'_> {}
