//! Error types for the data-loader crate.
//!
//! Only failures of the file boundary live here. Row-level problems
//! (bad numbers, missing cells) are not errors at this layer: the loader
//! hands them through as raw text and the sanitizer decides what to drop.

use thiserror::Error;

/// Errors that can occur while reading a catalog file
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The file has no header record, so no column can be resolved
    #[error("No header record found in {file}")]
    EmptyHeader { file: String },

    /// A single record could not be parsed
    ///
    /// Data records with this problem are skipped with a warning; it is
    /// only returned when the header record itself is malformed.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
