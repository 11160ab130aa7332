//! Estimation result tables.
//!
//! Plain-number report structures with `Display` implementations that render
//! fixed-width text tables. The estimation crates convert their fits into
//! these rows; nothing here depends on matrix types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One coefficient with both covariance treatments side by side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateRow {
    /// Coefficient label, e.g. `alpha[growth]` or `beta[value]`
    pub name: String,

    /// Point estimate
    pub estimate: f64,

    /// Naive (i.i.d.) standard error
    pub se_ls: f64,

    /// t-statistic under the naive covariance
    pub t_ls: f64,

    /// Driscoll-Kraay standard error
    pub se_dk: f64,

    /// t-statistic under the Driscoll-Kraay covariance
    pub t_dk: f64,
}

/// Full coefficient table for one panel fit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelReport {
    /// Report heading
    pub title: String,

    /// One row per interacted coefficient
    pub rows: Vec<EstimateRow>,
}

impl fmt::Display for PanelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "{:<20} {:>12} {:>12} {:>9} {:>12} {:>9}",
            "coefficient", "estimate", "se(LS)", "t(LS)", "se(DK)", "t(DK)"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<20} {:>12.6} {:>12.6} {:>9.3} {:>12.6} {:>9.3}",
                row.name, row.estimate, row.se_ls, row.t_ls, row.se_dk, row.t_dk
            )?;
        }
        Ok(())
    }
}

/// One hypothesis-test line in a study comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestLine {
    /// Estimator/covariance label, e.g. `panel LS` or `calendar SURE`
    pub method: String,

    /// Point estimate of the contrast
    pub estimate: f64,

    /// Standard error under this method
    pub std_error: f64,

    /// t-statistic under this method
    pub t_stat: f64,
}

/// Side-by-side comparison of the alpha-difference tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudyReport {
    /// Report heading
    pub title: String,

    /// Alpha difference per period
    pub alpha_diff: f64,

    /// Alpha difference scaled to annual terms
    pub alpha_diff_annualized: f64,

    /// One line per estimator/covariance combination
    pub tests: Vec<TestLine>,
}

impl fmt::Display for StudyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(
            f,
            "alpha difference: {:.6} per period ({:.4} annualized)",
            self.alpha_diff, self.alpha_diff_annualized
        )?;
        writeln!(
            f,
            "{:<16} {:>12} {:>12} {:>9}",
            "method", "estimate", "std error", "t-stat"
        )?;
        for line in &self.tests {
            writeln!(
                f,
                "{:<16} {:>12.6} {:>12.6} {:>9.3}",
                line.method, line.estimate, line.std_error, line.t_stat
            )?;
        }
        Ok(())
    }
}
