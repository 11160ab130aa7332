//! Panel alpha estimator with Driscoll-Kraay covariance.
//!
//! Fits the interacted factor model over a fully observed T×N return panel:
//!
//! ```text
//! y(t,i) = (z(i) ⊗ x(t))' θ + e(t,i)
//!
//! Sxx   = Σ_t X_t'X_t / (T·N)        X_t = interaction_matrix(Z, x(t))
//! Sxy   = Σ_t X_t'y_t / (T·N)        θ   = Sxx⁻¹ Sxy
//! h_t   = X_t'e_t / N                 e_t = y_t − X_t θ
//! Shat  = Σ_t h_t h_t' / T²
//! s²    = Σ_t e_t'e_t / (N²·T²)
//! CovDK = Sxx⁻¹ · Shat · Sxx⁻¹'
//! CovLS = Sxx⁻¹ · s²
//! ```
//!
//! Two strictly sequential passes: the OLS pass accumulates the scaled normal
//! equations and solves for `θ`; the covariance pass rebuilds `X_t` per period
//! and accumulates the moment-condition outer products. Both covariance
//! matrices share the one `Sxx` inverse used to estimate `θ`, keeping the
//! sandwich consistent. Sums are scaled by `1/(T·N)` inside the loop, in that
//! order, for reproducible rounding on large panels.
//!
//! `Shat` uses only the contemporaneous (lag-0) moment term: the estimator is
//! robust to cross-sectional correlation of residuals within a period but
//! applies no kernel-weighted lag sum for serial correlation. That truncation
//! is intentional; the full Bartlett machinery lives in the calendar-time
//! helpers, not here.
//!
//! # References
//! - Driscoll, J. C., & Kraay, A. C. (1998). "Consistent Covariance Matrix
//!   Estimation with Spatially Dependent Panel Data."
//!   Review of Economics and Statistics, 80(4), 549-560.

use crate::contrast::{ContrastTest, contrast_test};
use crate::error::{PanelError, Result};
use crate::interaction::interaction_matrix;
use crate::linalg;
use ndarray::{Array1, Array2, ArrayView1};

/// Dimensions of one estimation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelDims {
    /// Number of time periods T
    pub n_periods: usize,
    /// Number of cross-sectional units N
    pub n_units: usize,
    /// Number of common factors Kx
    pub n_factors: usize,
    /// Number of cross-sectional design columns Kz
    pub n_groups: usize,
}

impl PanelDims {
    /// Number of interacted coefficients K = Kx·Kz.
    pub const fn n_coefficients(&self) -> usize {
        self.n_factors * self.n_groups
    }
}

/// Fitted panel model: coefficients plus both covariance estimates.
#[derive(Debug, Clone)]
pub struct PanelFit {
    /// Interacted coefficient vector θ (K)
    pub theta: Array1<f64>,
    /// Driscoll-Kraay covariance of θ (K x K)
    pub cov_dk: Array2<f64>,
    /// Naive i.i.d. covariance of θ (K x K)
    pub cov_ls: Array2<f64>,
    /// Driscoll-Kraay standard errors, sqrt of the CovDK diagonal (K)
    pub se_dk: Array1<f64>,
    /// Naive standard errors, sqrt of the CovLS diagonal (K)
    pub se_ls: Array1<f64>,
    /// Dimensions the model was fitted on
    pub dims: PanelDims,
}

impl PanelFit {
    /// Test one linear contrast of θ against both covariance estimates.
    ///
    /// The point estimate is computed once, so the naive and Driscoll-Kraay
    /// t-statistics share an identical numerator and differ only in the
    /// covariance matrix.
    ///
    /// # Returns
    /// * `(naive, driscoll_kraay)` contrast tests
    pub fn contrast_pair(&self, r: &Array1<f64>) -> Result<(ContrastTest, ContrastTest)> {
        let naive = contrast_test(&self.theta, &self.cov_ls, r)?;
        let robust = contrast_test(&self.theta, &self.cov_dk, r)?;
        Ok((naive, robust))
    }
}

/// Scaled normal-equation sums for the OLS pass.
#[derive(Debug)]
struct NormalEquations {
    sxx: Array2<f64>,
    sxy: Array1<f64>,
}

impl NormalEquations {
    fn new(k: usize) -> Self {
        Self {
            sxx: Array2::zeros((k, k)),
            sxy: Array1::zeros(k),
        }
    }

    /// Absorb one period: `Sxx += X_t'X_t·scale`, `Sxy += X_t'y_t·scale`.
    fn absorb(mut self, effective: &Array2<f64>, y_t: ArrayView1<'_, f64>, scale: f64) -> Self {
        self.sxx.scaled_add(scale, &effective.t().dot(effective));
        self.sxy.scaled_add(scale, &effective.t().dot(&y_t));
        self
    }
}

/// Moment-condition sums for the covariance pass.
#[derive(Debug)]
struct MomentSums {
    omega: Array2<f64>,
    sq_residuals: f64,
}

impl MomentSums {
    fn new(k: usize) -> Self {
        Self {
            omega: Array2::zeros((k, k)),
            sq_residuals: 0.0,
        }
    }

    /// Absorb one period: residual, moment condition, outer product.
    fn absorb(
        mut self,
        effective: &Array2<f64>,
        y_t: ArrayView1<'_, f64>,
        theta: &Array1<f64>,
        n_units: usize,
    ) -> Self {
        let n = n_units as f64;
        let residuals = &y_t.to_owned() - &effective.dot(theta);
        let moment = effective.t().dot(&residuals) / n;

        let k = moment.len();
        for i in 0..k {
            for j in 0..k {
                self.omega[[i, j]] += moment[i] * moment[j];
            }
        }
        self.sq_residuals += residuals.dot(&residuals) / (n * n);
        self
    }
}

/// Fit the interacted panel model and both covariance estimates.
///
/// # Arguments
/// * `y` - Return panel (T x N), fully observed
/// * `x` - Common factor matrix (T x Kx); put a constant in column 0 for the
///   interacted intercepts to be group alphas
/// * `z` - Cross-sectional design matrix (N x Kz), time-invariant
///
/// # Errors
/// Fails fast on dimension mismatches before any accumulation, and with
/// [`PanelError::SingularNormalEquations`] when the effective design is not
/// full rank (empty indicator group, collinear factors). A singular OLS pass
/// aborts the covariance pass; there is no fallback.
pub fn fit_panel(y: &Array2<f64>, x: &Array2<f64>, z: &Array2<f64>) -> Result<PanelFit> {
    let dims = check_dims(y, x, z)?;
    let (n_periods, n_units) = (dims.n_periods, dims.n_units);
    let k = dims.n_coefficients();
    let scale = 1.0 / (n_periods as f64 * n_units as f64);

    // OLS pass
    let normal = (0..n_periods).fold(NormalEquations::new(k), |acc, t| {
        let effective = interaction_matrix(z.view(), x.row(t));
        acc.absorb(&effective, y.row(t), scale)
    });
    let theta = linalg::solve(&normal.sxx, &normal.sxy)?;
    let sxx_inv = linalg::invert(&normal.sxx)?;

    // Covariance pass, recomputing the effective regressors per period
    let moments = (0..n_periods).fold(MomentSums::new(k), |acc, t| {
        let effective = interaction_matrix(z.view(), x.row(t));
        acc.absorb(&effective, y.row(t), &theta, n_units)
    });

    let t_sq = (n_periods as f64).powi(2);
    let shat = &moments.omega / t_sq;
    let s2 = moments.sq_residuals / t_sq;

    let cov_dk = sxx_inv.dot(&shat).dot(&sxx_inv.t());
    let cov_ls = &sxx_inv * s2;
    let se_dk = cov_dk.diag().mapv(f64::sqrt);
    let se_ls = cov_ls.diag().mapv(f64::sqrt);

    Ok(PanelFit {
        theta,
        cov_dk,
        cov_ls,
        se_dk,
        se_ls,
        dims,
    })
}

/// Validate input shapes before any accumulation begins.
fn check_dims(y: &Array2<f64>, x: &Array2<f64>, z: &Array2<f64>) -> Result<PanelDims> {
    let (n_periods, n_units) = y.dim();
    let (x_rows, n_factors) = x.dim();
    let (z_rows, n_groups) = z.dim();

    if n_periods == 0 || n_units == 0 {
        return Err(PanelError::EmptyInput("return panel"));
    }
    if n_factors == 0 {
        return Err(PanelError::EmptyInput("factor matrix"));
    }
    if n_groups == 0 {
        return Err(PanelError::EmptyInput("cross-sectional design"));
    }
    if x_rows != n_periods {
        return Err(PanelError::DimensionMismatch {
            context: "factor matrix rows",
            expected: n_periods,
            actual: x_rows,
        });
    }
    if z_rows != n_units {
        return Err(PanelError::DimensionMismatch {
            context: "cross-sectional design rows",
            expected: n_units,
            actual: z_rows,
        });
    }

    Ok(PanelDims {
        n_periods,
        n_units,
        n_factors,
        n_groups,
    })
}
