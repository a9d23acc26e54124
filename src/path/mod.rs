//! Path data handling: tokenizing, parsing and locating subpath boundaries.
//!
//! Path data follows the SVG path grammar, which is shared by Android
//! vector drawables' `android:pathData` attribute. Positions reported
//! throughout are byte offsets into the original string, with exclusive
//! end positions.

mod command;
mod decimal;
mod fragment;
mod lexer;
mod parser;
mod splitter;

pub use command::{CommandType, Info, PathCommand};
pub use decimal::{Decimal, DecimalError, MAX_SCALE};
pub use fragment::FragmentAssembler;
pub use lexer::{NumberMode, PathLexer, Span, Token};
pub use parser::{PathCommands, PathParser};
pub use splitter::{PathSplitter, Split, Splits};

use crate::errors::PathError;

/// Iterate the commands of a path data string.
///
/// The iterator ends at the end of input, or after yielding the first error.
pub fn parse_path(path: &str) -> PathCommands<'_> {
    PathCommands::new(path)
}

/// Iterate the points at which a path data string may be split into
/// independent subpaths.
pub fn split_path(path: &str) -> Splits<'_> {
    Splits::new(path)
}

/// Rewrite a single element, given its text either side of the path data
/// value, as one element per subpath.
///
/// Returns `Ok(None)` if the path has no split points. Any parse error
/// discards the partially built output.
pub fn rewrite_fragment(
    prefix: &str,
    path_data: &str,
    suffix: &str,
) -> Result<Option<String>, PathError> {
    let mut assembler = FragmentAssembler::new(prefix, path_data, suffix);
    for split in split_path(path_data) {
        assembler.push(&split?);
    }
    Ok(assembler.finish().map(|(output, _)| output))
}
