//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading panel data.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A cell could not be parsed as a number or date
    #[error("Parse error at row {row}: {message}")]
    Parse {
        /// 1-based data row where parsing failed
        row: usize,
        /// What went wrong
        message: String,
    },

    /// Rows of one file disagree on column count
    #[error("Ragged input at row {row}: expected {expected} columns, got {actual}")]
    Ragged {
        /// 1-based data row with the wrong width
        row: usize,
        /// Column count of the first row
        expected: usize,
        /// Column count of the offending row
        actual: usize,
    },

    /// Loaded matrices violate the row-alignment contract
    #[error("Alignment error: {0}")]
    Alignment(String),

    /// A file held no data rows
    #[error("Empty input: {0}")]
    Empty(String),
}
