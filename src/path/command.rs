use std::fmt;

use super::decimal::Decimal;
use super::lexer::Span;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandType {
    Move,
    Close,
    Line,
    HorizontalLine,
    VerticalLine,
    Curve,
    SmoothCurve,
    QuadraticCurve,
    SmoothQuadraticCurve,
    Arc,
}

impl CommandType {
    /// Command type for a path command letter, and whether it is relative
    /// (lower case). Returns `None` for anything that isn't a command.
    pub fn from_letter(c: char) -> Option<(Self, bool)> {
        let cmd = match c.to_ascii_uppercase() {
            'M' => Self::Move,
            'Z' => Self::Close,
            'L' => Self::Line,
            'H' => Self::HorizontalLine,
            'V' => Self::VerticalLine,
            'C' => Self::Curve,
            'S' => Self::SmoothCurve,
            'Q' => Self::QuadraticCurve,
            'T' => Self::SmoothQuadraticCurve,
            'A' => Self::Arc,
            _ => return None,
        };
        Some((cmd, c.is_ascii_lowercase()))
    }

    pub fn letter(&self, relative: bool) -> char {
        let c = match self {
            Self::Move => 'M',
            Self::Close => 'Z',
            Self::Line => 'L',
            Self::HorizontalLine => 'H',
            Self::VerticalLine => 'V',
            Self::Curve => 'C',
            Self::SmoothCurve => 'S',
            Self::QuadraticCurve => 'Q',
            Self::SmoothQuadraticCurve => 'T',
            Self::Arc => 'A',
        };
        if relative {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }

    /// The command used when operands follow this one without a new letter.
    ///
    /// Extra coordinate pairs after a moveto are treated as lineto commands.
    pub fn repeated(&self) -> Self {
        match self {
            Self::Move => Self::Line,
            other => *other,
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter(false))
    }
}

/// Metadata shared by every command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Info {
    /// Source range, from the command letter (or first operand of an
    /// implicit repeat) to the end of the last operand.
    pub span: Span,
    pub relative: bool,
    /// Command letter was omitted; this repeats the previous command.
    pub subsequent: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathCommand {
    Close(Info),
    HorizontalLine {
        info: Info,
        x: Decimal,
    },
    VerticalLine {
        info: Info,
        y: Decimal,
    },
    Move {
        info: Info,
        x: Decimal,
        y: Decimal,
    },
    Line {
        info: Info,
        x: Decimal,
        y: Decimal,
    },
    SmoothQuadraticCurve {
        info: Info,
        x: Decimal,
        y: Decimal,
    },
    QuadraticCurve {
        info: Info,
        x1: Decimal,
        y1: Decimal,
        x: Decimal,
        y: Decimal,
    },
    SmoothCurve {
        info: Info,
        x2: Decimal,
        y2: Decimal,
        x: Decimal,
        y: Decimal,
    },
    Curve {
        info: Info,
        x1: Decimal,
        y1: Decimal,
        x2: Decimal,
        y2: Decimal,
        x: Decimal,
        y: Decimal,
    },
    Arc {
        info: Info,
        rx: Decimal,
        ry: Decimal,
        rotation: Decimal,
        large_arc: bool,
        sweep: bool,
        x: Decimal,
        y: Decimal,
    },
}

impl PathCommand {
    pub fn info(&self) -> &Info {
        match self {
            Self::Close(info)
            | Self::HorizontalLine { info, .. }
            | Self::VerticalLine { info, .. }
            | Self::Move { info, .. }
            | Self::Line { info, .. }
            | Self::SmoothQuadraticCurve { info, .. }
            | Self::QuadraticCurve { info, .. }
            | Self::SmoothCurve { info, .. }
            | Self::Curve { info, .. }
            | Self::Arc { info, .. } => info,
        }
    }

    pub fn kind(&self) -> CommandType {
        match self {
            Self::Close(_) => CommandType::Close,
            Self::HorizontalLine { .. } => CommandType::HorizontalLine,
            Self::VerticalLine { .. } => CommandType::VerticalLine,
            Self::Move { .. } => CommandType::Move,
            Self::Line { .. } => CommandType::Line,
            Self::SmoothQuadraticCurve { .. } => CommandType::SmoothQuadraticCurve,
            Self::QuadraticCurve { .. } => CommandType::QuadraticCurve,
            Self::SmoothCurve { .. } => CommandType::SmoothCurve,
            Self::Curve { .. } => CommandType::Curve,
            Self::Arc { .. } => CommandType::Arc,
        }
    }

    pub fn span(&self) -> Span {
        self.info().span
    }

    pub fn start(&self) -> usize {
        self.info().span.start
    }

    pub fn end(&self) -> usize {
        self.info().span.end
    }

    pub fn is_relative(&self) -> bool {
        self.info().relative
    }

    pub fn is_subsequent(&self) -> bool {
        self.info().subsequent
    }

    /// Horizontal end-point displacement, for commands which have one.
    pub fn offset_x(&self) -> Option<&Decimal> {
        match self {
            Self::Close(_) | Self::VerticalLine { .. } => None,
            Self::HorizontalLine { x, .. }
            | Self::Move { x, .. }
            | Self::Line { x, .. }
            | Self::SmoothQuadraticCurve { x, .. }
            | Self::QuadraticCurve { x, .. }
            | Self::SmoothCurve { x, .. }
            | Self::Curve { x, .. }
            | Self::Arc { x, .. } => Some(x),
        }
    }

    /// Vertical end-point displacement, for commands which have one.
    pub fn offset_y(&self) -> Option<&Decimal> {
        match self {
            Self::Close(_) | Self::HorizontalLine { .. } => None,
            Self::VerticalLine { y, .. }
            | Self::Move { y, .. }
            | Self::Line { y, .. }
            | Self::SmoothQuadraticCurve { y, .. }
            | Self::QuadraticCurve { y, .. }
            | Self::SmoothCurve { y, .. }
            | Self::Curve { y, .. }
            | Self::Arc { y, .. } => Some(y),
        }
    }
}
