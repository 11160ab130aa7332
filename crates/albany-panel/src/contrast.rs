//! Linear contrast tests on fitted coefficients.
//!
//! A contrast is a 1×K row vector `r` applied to the coefficient vector, e.g.
//! "alpha of group 1 minus alpha of group 2". The t-statistic divides the
//! point estimate by the standard error implied by a chosen covariance
//! matrix; running the same contrast against the naive and the
//! Driscoll-Kraay covariance yields two t-statistics for one estimate.

use crate::error::{PanelError, Result};
use ndarray::{Array1, Array2};

/// Result of one linear contrast test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastTest {
    /// Point estimate `r'θ`
    pub estimate: f64,
    /// Standard error `sqrt(r'Cov r)`
    pub std_error: f64,
    /// t-statistic `estimate / std_error`
    pub t_stat: f64,
}

/// Test the linear contrast `r'θ = 0` under a given covariance matrix.
///
/// # Arguments
/// * `theta` - Estimated coefficient vector (K)
/// * `cov` - Covariance matrix of `theta` (K x K)
/// * `r` - Contrast vector (K)
///
/// # Errors
/// Fails on shape mismatches, and with [`PanelError::DegenerateContrast`]
/// when `r'Cov r` is not strictly positive: a zero estimated variance marks a
/// vacuous or unidentified contrast, and dividing by it would manufacture an
/// arbitrarily large t-statistic.
pub fn contrast_test(
    theta: &Array1<f64>,
    cov: &Array2<f64>,
    r: &Array1<f64>,
) -> Result<ContrastTest> {
    let k = theta.len();
    if r.len() != k {
        return Err(PanelError::DimensionMismatch {
            context: "contrast vector length",
            expected: k,
            actual: r.len(),
        });
    }
    if cov.dim() != (k, k) {
        return Err(PanelError::DimensionMismatch {
            context: "covariance matrix order",
            expected: k,
            actual: cov.nrows().max(cov.ncols()),
        });
    }

    let estimate = r.dot(theta);
    let variance = r.dot(&cov.dot(r));
    if variance <= 0.0 {
        return Err(PanelError::DegenerateContrast { variance });
    }

    let std_error = variance.sqrt();
    Ok(ContrastTest {
        estimate,
        std_error,
        t_stat: estimate / std_error,
    })
}

/// Build the contrast selecting one group's alpha minus another's.
///
/// Assumes the constant sits in factor column 0, so the alpha of group `g`
/// lives at coefficient index `g * k_x` under the interaction ordering
/// (design column slowest, factor column fastest).
///
/// # Arguments
/// * `k_x` - Number of common factors
/// * `k_z` - Number of cross-sectional design columns
/// * `group_long` - Group whose alpha enters with +1
/// * `group_short` - Group whose alpha enters with -1
pub fn group_alpha_contrast(
    k_x: usize,
    k_z: usize,
    group_long: usize,
    group_short: usize,
) -> Result<Array1<f64>> {
    let worst = group_long.max(group_short);
    if worst >= k_z {
        return Err(PanelError::DimensionMismatch {
            context: "group index",
            expected: k_z,
            actual: worst,
        });
    }
    if k_x == 0 {
        return Err(PanelError::EmptyInput("factor matrix"));
    }

    let mut r = Array1::<f64>::zeros(k_x * k_z);
    r[group_long * k_x] += 1.0;
    r[group_short * k_x] -= 1.0;
    Ok(r)
}
