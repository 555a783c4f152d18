//! Error types for chanlog.
//!
//! The log operations themselves are total and report absence through
//! `Option`. Errors only arise at the edges: decoding event streams, reading
//! files and running CLI commands.

use thiserror::Error;

/// Result type alias for chanlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input records or arguments.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors decoding event streams and typed arguments.
#[derive(Error, Debug)]
pub enum InputError {
    /// A line of the event stream is not a valid record.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Decoder message.
        reason: String,
    },

    /// A post carried an empty identity.
    #[error("post has an empty id")]
    MissingPostId,

    /// A post timestamp is out of range.
    #[error("timestamp out of range: {value}")]
    InvalidTimestamp {
        /// The offending epoch-millisecond value.
        value: i64,
    },

    /// A time argument is neither epoch milliseconds nor RFC 3339.
    #[error("invalid time: {input}")]
    InvalidTime {
        /// The text that failed to parse.
        input: String,
    },

    /// A filter pattern failed to compile.
    #[error("regex error: {0}")]
    Regex(String),
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The requested post is not in the log.
    #[error("post not found: {id}")]
    PostNotFound {
        /// Identity that was looked up.
        id: String,
    },

    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<regex::Error> for InputError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::Input(err.into())
    }
}
