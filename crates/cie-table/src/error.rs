//! Table error types.

use thiserror::Error;

/// Result type for table operations.
pub type CieResult<T> = Result<T, CieError>;

/// Errors that can occur while building, writing, or reading a table.
#[derive(Debug, Error)]
pub enum CieError {
    /// Invalid input size.
    #[error("invalid table size: {0}")]
    InvalidSize(String),

    /// Invalid output range.
    #[error("invalid output range: {0}")]
    InvalidRange(String),

    /// Scale factor is not a positive finite number.
    #[error("invalid scale factor: {0}")]
    InvalidScale(f64),

    /// Header style cannot be rendered.
    #[error("invalid header style: {0}")]
    InvalidStyle(String),

    /// Preset name not recognized.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// Parse error when reading a generated header.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number, 0 when not tied to a line
        line: usize,
        /// What went wrong
        message: String,
    },

    /// The header declares a different array length than it contains.
    #[error("array declares {declared} entries but holds {found}")]
    LengthMismatch {
        /// Length from the declaration
        declared: usize,
        /// Number of parsed values
        found: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file error.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),
}
