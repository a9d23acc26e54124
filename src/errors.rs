use std::fmt;
use std::string::FromUtf8Error;

// type alias for Result for use across the library
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of parsing or splitting a single path data string.
///
/// `Eof` is the normal end of input rather than a failure; every other
/// variant aborts processing of that path data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathError {
    Eof,
    /// Path data does not begin with a moveto command
    BadStart,
    /// Number is well-formed but cannot be represented
    BadNumber,
    /// Required command argument is absent or malformed
    MissingArgs,
    /// Arguments found where a command letter is required
    MissingCommand,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Eof => write!(f, "end of path data"),
            PathError::BadStart => write!(f, "path data must start with a moveto command"),
            PathError::BadNumber => write!(f, "number out of range"),
            PathError::MissingArgs => write!(f, "missing or invalid command arguments"),
            PathError::MissingCommand => write!(f, "missing command letter"),
        }
    }
}

impl std::error::Error for PathError {}

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Input isn't a well-formed document
    Document(String),
    /// Path data of the element at the given line failed to parse
    Path(usize, PathError),
    Cli(String),
    Parse(String),
    /// Processing stopped by the progress observer
    Cancelled,
    Other(Box<dyn std::error::Error>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(source) => write!(f, "IO error: {source}"),
            Error::Document(reason) => write!(f, "Document error: {reason}"),
            Error::Path(line, err) => write!(f, "Path data error on line {line}: {err}"),
            Error::Cli(reason) => write!(f, "{reason}"),
            Error::Parse(reason) => write!(f, "Parse error: {reason}"),
            Error::Cancelled => write!(f, "Cancelled"),
            Error::Other(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(source) => Some(source),
            Error::Path(_, err) => Some(err),
            Error::Other(e) => Some(&**e),
            _ => None,
        }
    }
}

impl Error {
    pub fn from_err<T>(err: T) -> Error
    where
        T: std::error::Error + 'static,
    {
        Error::Other(Box::new(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<FromUtf8Error> for Error {
    fn from(err: FromUtf8Error) -> Error {
        Error::Parse(format!("utf8: {err}"))
    }
}

impl From<(usize, PathError)> for Error {
    fn from((line, err): (usize, PathError)) -> Error {
        Error::Path(line, err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Error {
        Error::Document(err.to_string())
    }
}
