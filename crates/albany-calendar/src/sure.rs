//! Multivariate OLS with a SURE residual covariance.
//!
//! Each portfolio return series is regressed on the same common factors, so
//! the coefficient estimates are plain equation-by-equation OLS. The
//! Seemingly-Unrelated-Regressions structure enters through the joint
//! covariance of the coefficients,
//!
//! ```text
//! B       = (X'X)⁻¹ X'Y            (Kx x G, one column per equation)
//! E       = Y − X·B                 Σ = E'E / T
//! Cov(vec B) = Σ ⊗ (X'X)⁻¹
//! ```
//!
//! kept here in factored form. Cross-equation contrasts (the alpha of one
//! group minus another's) draw their variance from both the equations'
//! residual covariance and the shared regressor geometry.

use crate::error::{CalendarError, Result};
use albany_panel::ContrastTest;
use albany_panel::linalg;
use ndarray::{Array1, Array2};

/// Jointly fitted portfolio regressions with SURE covariance pieces.
#[derive(Debug, Clone)]
pub struct SureFit {
    /// Coefficient matrix B (Kx x G), column g is equation g's coefficients
    pub coefficients: Array2<f64>,
    /// Residual covariance Σ = E'E/T (G x G)
    pub residual_cov: Array2<f64>,
    /// Inverse regressor cross-product (X'X)⁻¹ (Kx x Kx)
    pub xtx_inv: Array2<f64>,
    /// Residual matrix E (T x G)
    pub residuals: Array2<f64>,
    /// Number of time periods the fit used
    pub n_periods: usize,
}

impl SureFit {
    /// Standard errors for one equation's coefficients.
    ///
    /// # Arguments
    /// * `equation` - Equation (portfolio) index
    pub fn coef_std_errors(&self, equation: usize) -> Result<Array1<f64>> {
        let n_equations = self.coefficients.ncols();
        if equation >= n_equations {
            return Err(CalendarError::DimensionMismatch {
                context: "equation index",
                expected: n_equations,
                actual: equation,
            });
        }

        let sigma = self.residual_cov[[equation, equation]];
        Ok(self.xtx_inv.diag().mapv(|v| (sigma * v).sqrt()))
    }

    /// Test a coefficient difference across two equations.
    ///
    /// For coefficient row `row`, computes `B[row, long] − B[row, short]`
    /// with variance `(Σ_ll + Σ_ss − 2Σ_ls) · [(X'X)⁻¹]_rr` from the SURE
    /// covariance.
    ///
    /// # Errors
    /// Fails on out-of-range indices, and with
    /// [`CalendarError::DegenerateContrast`] when the estimated variance is
    /// not strictly positive.
    pub fn coef_contrast(&self, row: usize, long: usize, short: usize) -> Result<ContrastTest> {
        let (n_coefs, n_equations) = self.coefficients.dim();
        if row >= n_coefs {
            return Err(CalendarError::DimensionMismatch {
                context: "coefficient row",
                expected: n_coefs,
                actual: row,
            });
        }
        let worst = long.max(short);
        if worst >= n_equations {
            return Err(CalendarError::DimensionMismatch {
                context: "equation index",
                expected: n_equations,
                actual: worst,
            });
        }

        let estimate = self.coefficients[[row, long]] - self.coefficients[[row, short]];
        let sigma = self.residual_cov[[long, long]] + self.residual_cov[[short, short]]
            - 2.0 * self.residual_cov[[long, short]];
        let variance = sigma * self.xtx_inv[[row, row]];
        if variance <= 0.0 {
            return Err(CalendarError::DegenerateContrast { variance });
        }

        let std_error = variance.sqrt();
        Ok(ContrastTest {
            estimate,
            std_error,
            t_stat: estimate / std_error,
        })
    }
}

/// Fit every portfolio return series on the common factors.
///
/// # Arguments
/// * `returns` - Portfolio return matrix (T x G)
/// * `x` - Common factor matrix (T x Kx), constant in column 0 for alphas
///
/// # Errors
/// Fails when row counts disagree, when T ≤ Kx, or when `X'X` is singular.
pub fn fit_sure(returns: &Array2<f64>, x: &Array2<f64>) -> Result<SureFit> {
    let (n_periods, _) = returns.dim();
    let (x_rows, n_factors) = x.dim();

    if x_rows != n_periods {
        return Err(CalendarError::DimensionMismatch {
            context: "factor matrix rows",
            expected: n_periods,
            actual: x_rows,
        });
    }
    if n_periods <= n_factors {
        return Err(CalendarError::InsufficientData {
            required: n_factors + 1,
            actual: n_periods,
        });
    }

    let xtx = x.t().dot(x);
    let xtx_inv = linalg::invert(&xtx).map_err(|e| CalendarError::Singular(e.to_string()))?;
    let coefficients = xtx_inv.dot(&x.t().dot(returns));

    let residuals = returns - &x.dot(&coefficients);
    let residual_cov = residuals.t().dot(&residuals) / n_periods as f64;

    Ok(SureFit {
        coefficients,
        residual_cov,
        xtx_inv,
        residuals,
        n_periods,
    })
}
