//! Error types for panel estimation.

use thiserror::Error;

/// Result type for panel estimation.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur during panel estimation.
#[derive(Debug, Error)]
pub enum PanelError {
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

    /// A required input has no rows or no columns.
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    /// The normal-equations matrix cannot be inverted.
    ///
    /// Typical causes are an indicator group with zero members or perfectly
    /// collinear factor columns. No ridge term or pseudo-inverse is applied;
    /// the estimation is aborted so the modeling error stays visible.
    #[error("Singular normal equations: {0}")]
    SingularNormalEquations(String),

    /// A linear contrast has zero (or negative) estimated variance.
    #[error("Degenerate contrast: R'Cov R = {variance:e}, cannot form a t-statistic")]
    DegenerateContrast {
        /// The estimated variance of the contrast
        variance: f64,
    },
}
