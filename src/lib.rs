//! ## pathsplit - split compound paths into one path per subpath
//!
//! A single SVG `<path>` or Android vector drawable `<path>` element often
//! holds many disconnected shapes in its path data. `pathsplit` rewrites such
//! elements as one sibling element per subpath, keeping every other attribute
//! and all of the surrounding document text exactly as written.
//!
//! `pathsplit` is normally run as a command line tool, but the processing is
//! available as a library for other front-ends.
//!
//! A `SplitConfig` selects which elements and attributes are considered; the
//! appropriate `split_*` function is then called with the document text.
//! Lower level access to the path data lexer, parser and splitter is provided
//! by the [`path`] module.
//!
//! ## Example
//!
//! ```
//! let cfg = pathsplit::SplitConfig::default();
//!
//! let input = r#"<path d="M0,0h5v5zM10,0h5v5z"/>"#;
//! let report = pathsplit::split_str(input, &cfg).unwrap();
//!
//! assert_eq!(
//!     report.output.as_deref(),
//!     Some("<path d=\"M0,0h5v5z\"/>\n<path d=\"M10,0h5v5z\"/>")
//! );
//! ```

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

#[cfg(feature = "cli")]
pub mod cli;
pub mod document;
pub mod errors;
pub mod path;

pub use document::{split_document, Progress, SkipReason, SplitReport, TagReport, TagStatus};
pub use errors::{Error, PathError, Result};

// Allow users of this as a library to easily retrieve the version of pathsplit being used
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings to configure processing of a single document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitConfig {
    /// Names of elements which may be split
    pub elements: Vec<String>,
    /// Names of attributes holding path data; the first present is used
    pub attributes: Vec<String>,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            elements: vec!["path".to_owned()],
            attributes: vec!["android:pathData".to_owned(), "d".to_owned()],
        }
    }
}

/// Reads from the `reader` stream, processes the document, and writes to `writer`.
///
/// The entire stream is read before anything is written. If no element was
/// split the input is written unchanged.
pub fn split_stream(
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    config: &SplitConfig,
) -> Result<SplitReport> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    let report = split_str(&input, config)?;
    writer.write_all(report.output.as_deref().unwrap_or(&input).as_bytes())?;
    writer.flush()?;
    Ok(report)
}

/// Split elements of `input`, returning the rewritten document and a
/// per-element report.
pub fn split_str<T: AsRef<str>>(input: T, config: &SplitConfig) -> Result<SplitReport> {
    split_document(input.as_ref(), config, |_| ControlFlow::Continue(()))
}

/// Split elements of `input` using default `SplitConfig` settings.
pub fn split_str_default<T: AsRef<str>>(input: T) -> Result<SplitReport> {
    split_str(input, &SplitConfig::default())
}

/// Split `input` provided as a string, returning the resulting document.
///
/// The input is returned unchanged if nothing was split.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn split_string(input: String) -> core::result::Result<String, String> {
    match split_str_default(&input) {
        Ok(report) => Ok(report.output.unwrap_or(input)),
        Err(e) => Err(e.to_string()),
    }
}
