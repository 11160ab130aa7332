//! Error types for calendar-time estimation.

use thiserror::Error;

/// Result type for calendar-time estimation.
pub type Result<T> = std::result::Result<T, CalendarError>;

/// Errors that can occur during calendar-time estimation.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Input matrices disagree on a shared dimension.
    #[error("Dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which input failed the check
        context: &'static str,
        /// Expected extent of the dimension
        expected: usize,
        /// Actual extent of the dimension
        actual: usize,
    },

    /// An indicator group has no members, so its portfolio is undefined.
    #[error("Group {group} has no members; cannot form its portfolio")]
    EmptyGroup {
        /// Index of the empty design column
        group: usize,
    },

    /// Too few observations for the requested estimation.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// The regressor cross-product matrix cannot be inverted.
    #[error("Singular regressor matrix: {0}")]
    Singular(String),

    /// A cross-equation contrast has zero (or negative) estimated variance.
    #[error("Degenerate contrast: estimated variance {variance:e}")]
    DegenerateContrast {
        /// The estimated variance of the contrast
        variance: f64,
    },
}
