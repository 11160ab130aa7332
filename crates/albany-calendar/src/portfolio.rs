//! Group portfolio construction from a return panel.
//!
//! Each column of the cross-sectional design is treated as a weight vector
//! over units; the portfolio return for period t is the weighted average of
//! that period's cross-section. With 0/1 indicator columns this is the
//! equal-weighted portfolio of each group's members.

use crate::error::{CalendarError, Result};
use ndarray::{Array1, Array2};

/// Collapse a return panel into per-group portfolio return series.
///
/// # Arguments
/// * `y` - Return panel (T x N)
/// * `z` - Cross-sectional design matrix (N x G), column g holds the weights
///   of group g's members
///
/// # Returns
/// * Portfolio return matrix (T x G), column g =
///   `Y·z_g / Σ_i z[i,g]`
///
/// # Errors
/// Fails when row counts disagree or when a design column sums to zero: an
/// empty group has no portfolio, unlike the panel estimator where it merely
/// surfaces later as a singular design.
pub fn group_portfolios(y: &Array2<f64>, z: &Array2<f64>) -> Result<Array2<f64>> {
    let (_, n_units) = y.dim();
    let (z_rows, n_groups) = z.dim();

    if z_rows != n_units {
        return Err(CalendarError::DimensionMismatch {
            context: "design matrix rows",
            expected: n_units,
            actual: z_rows,
        });
    }
    if n_groups == 0 {
        return Err(CalendarError::DimensionMismatch {
            context: "design matrix columns",
            expected: 1,
            actual: 0,
        });
    }

    let mut portfolios = y.dot(z);
    for g in 0..n_groups {
        let weight_sum = z.column(g).sum();
        if weight_sum == 0.0 {
            return Err(CalendarError::EmptyGroup { group: g });
        }
        portfolios.column_mut(g).mapv_inplace(|v| v / weight_sum);
    }

    Ok(portfolios)
}

/// Difference of two portfolio return series (long minus short).
///
/// # Arguments
/// * `portfolios` - Portfolio return matrix (T x G)
/// * `long` - Column held long
/// * `short` - Column held short
pub fn long_short_series(
    portfolios: &Array2<f64>,
    long: usize,
    short: usize,
) -> Result<Array1<f64>> {
    let n_groups = portfolios.ncols();
    let worst = long.max(short);
    if worst >= n_groups {
        return Err(CalendarError::DimensionMismatch {
            context: "portfolio column index",
            expected: n_groups,
            actual: worst,
        });
    }

    Ok(&portfolios.column(long) - &portfolios.column(short))
}
