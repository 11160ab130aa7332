//! Newey-West (Bartlett kernel) long-run variances and HAC regression
//! standard errors.
//!
//! For a single-equation regression the coefficient covariance is the
//! sandwich
//!
//! ```text
//! Cov(b) = (X'X)⁻¹ · T·S · (X'X)⁻¹
//! S      = Γ_0 + Σ_{l=1}^{L} w_l (Γ_l + Γ_l')
//! Γ_l    = (1/T) Σ_{t=l+1}^{T} g_t g_{t-l}'        g_t = x_t e_t
//! w_l    = 1 − l/(L+1)                              (Bartlett weights)
//! L      = ceil(4·(T/100)^(2/9)) unless fixed       (Newey-West rule)
//! ```
//!
//! robust to heteroskedasticity and serial correlation of the regression
//! scores. This lag-weighted machinery applies to the calendar-time
//! (portfolio-level) series only; the panel estimator keeps its deliberate
//! lag-0 truncation.
//!
//! # References
//! - Newey, W. K., & West, K. D. (1987). "A Simple, Positive Semi-Definite,
//!   Heteroskedasticity and Autocorrelation Consistent Covariance Matrix."
//!   Econometrica, 55(3), 703-708.

use crate::error::{CalendarError, Result};
use albany_panel::linalg;
use ndarray::{Array1, Array2};

/// Newey-West estimator configuration.
#[derive(Debug, Clone)]
pub struct NeweyWestConfig {
    /// Number of lags for the HAC adjustment (None = automatic selection
    /// via `ceil(4*(T/100)^(2/9))`)
    pub lags: Option<usize>,

    /// Minimum number of observations required (default: 30)
    pub min_observations: usize,
}

impl Default for NeweyWestConfig {
    fn default() -> Self {
        Self {
            lags: None,
            min_observations: 30,
        }
    }
}

impl NeweyWestConfig {
    /// Lag length for a series of `n_periods` observations, clamped so at
    /// least one cross-product survives at the deepest lag.
    fn effective_lags(&self, n_periods: usize) -> usize {
        let lags = self.lags.unwrap_or_else(|| {
            let t = n_periods as f64;
            (4.0 * (t / 100.0).powf(2.0 / 9.0)).ceil() as usize
        });
        lags.min(n_periods.saturating_sub(1))
    }
}

/// Bartlett kernel weight for a given lag.
///
/// `w_l = 1 - l/(L+1)` for `l ≤ L`, zero beyond.
pub fn bartlett_weight(lag: usize, max_lag: usize) -> f64 {
    if lag == 0 {
        1.0
    } else if lag <= max_lag {
        1.0 - (lag as f64) / (max_lag as f64 + 1.0)
    } else {
        0.0
    }
}

/// Single-equation OLS with Newey-West standard errors.
#[derive(Debug, Clone)]
pub struct HacOls {
    /// OLS coefficients (Kx)
    pub coefficients: Array1<f64>,
    /// Newey-West standard errors (Kx)
    pub std_errors: Array1<f64>,
    /// t-statistics, coefficient over HAC standard error (Kx)
    pub t_stats: Array1<f64>,
    /// HAC coefficient covariance (Kx x Kx)
    pub cov: Array2<f64>,
    /// Regression residuals (T)
    pub residuals: Array1<f64>,
    /// Lag length actually used
    pub lags: usize,
}

/// Regress a single series on the common factors with HAC standard errors.
///
/// # Arguments
/// * `y` - Dependent series (T), e.g. a long-short portfolio return
/// * `x` - Regressor matrix (T x Kx)
/// * `config` - Lag selection and minimum-observation settings
///
/// # Errors
/// Fails when row counts disagree, when fewer than
/// `config.min_observations` (or Kx + 1) observations are available, or when
/// `X'X` is singular. A coefficient whose estimated variance is not strictly
/// positive (a regression with identically zero residuals) surfaces as
/// [`CalendarError::DegenerateContrast`] instead of a NaN t-statistic.
pub fn hac_ols(y: &Array1<f64>, x: &Array2<f64>, config: &NeweyWestConfig) -> Result<HacOls> {
    let n_periods = y.len();
    let (x_rows, n_factors) = x.dim();

    if x_rows != n_periods {
        return Err(CalendarError::DimensionMismatch {
            context: "regressor matrix rows",
            expected: n_periods,
            actual: x_rows,
        });
    }
    let required = config.min_observations.max(n_factors + 1);
    if n_periods < required {
        return Err(CalendarError::InsufficientData {
            required,
            actual: n_periods,
        });
    }

    let xtx = x.t().dot(x);
    let xtx_inv = linalg::invert(&xtx).map_err(|e| CalendarError::Singular(e.to_string()))?;
    let coefficients = xtx_inv.dot(&x.t().dot(y));
    let residuals = y - &x.dot(&coefficients);

    // Regression scores g_t = x_t * e_t
    let mut scores = x.clone();
    for (t, mut row) in scores.rows_mut().into_iter().enumerate() {
        row.mapv_inplace(|v| v * residuals[t]);
    }

    let max_lag = config.effective_lags(n_periods);
    let mut s = score_autocovariance(&scores, 0);
    for lag in 1..=max_lag {
        let weight = bartlett_weight(lag, max_lag);
        let gamma = score_autocovariance(&scores, lag);
        // w_l * (Γ_l + Γ_l') keeps S symmetric
        for i in 0..n_factors {
            for j in 0..n_factors {
                s[[i, j]] += weight * (gamma[[i, j]] + gamma[[j, i]]);
            }
        }
    }

    let cov = xtx_inv.dot(&(&s * n_periods as f64)).dot(&xtx_inv);
    for &variance in cov.diag().iter() {
        if variance <= 0.0 {
            return Err(CalendarError::DegenerateContrast { variance });
        }
    }
    let std_errors = cov.diag().mapv(f64::sqrt);
    let t_stats = &coefficients / &std_errors;

    Ok(HacOls {
        coefficients,
        std_errors,
        t_stats,
        cov,
        residuals,
        lags: max_lag,
    })
}

/// Long-run variance of a single series under the Bartlett kernel.
///
/// `ω = γ_0 + 2·Σ_{l=1}^{L} w_l γ_l` over demeaned autocovariances
/// `γ_l = (1/T) Σ_t u_t u_{t-l}`. The standard error of the series mean is
/// `sqrt(ω / T)`.
///
/// # Errors
/// Fails when fewer than `config.min_observations` points are available.
pub fn long_run_variance(series: &Array1<f64>, config: &NeweyWestConfig) -> Result<f64> {
    let n_periods = series.len();
    if n_periods < config.min_observations {
        return Err(CalendarError::InsufficientData {
            required: config.min_observations,
            actual: n_periods,
        });
    }

    let mean = series.sum() / n_periods as f64;
    let demeaned = series.mapv(|v| v - mean);

    let max_lag = config.effective_lags(n_periods);
    let mut omega = 0.0;
    for lag in 0..=max_lag {
        let mut gamma = 0.0;
        for t in lag..n_periods {
            gamma += demeaned[t] * demeaned[t - lag];
        }
        gamma /= n_periods as f64;

        if lag == 0 {
            omega += gamma;
        } else {
            omega += 2.0 * bartlett_weight(lag, max_lag) * gamma;
        }
    }

    Ok(omega)
}

/// Lagged score autocovariance `Γ_l = (1/T) Σ_t g_t g_{t-l}'`, normalized by
/// T regardless of the lag.
fn score_autocovariance(scores: &Array2<f64>, lag: usize) -> Array2<f64> {
    let (n_periods, n_factors) = scores.dim();
    let mut gamma = Array2::<f64>::zeros((n_factors, n_factors));

    for t in lag..n_periods {
        for i in 0..n_factors {
            for j in 0..n_factors {
                gamma[[i, j]] += scores[[t, i]] * scores[[t - lag, j]];
            }
        }
    }

    gamma / n_periods as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_bartlett_weight() {
        let max_lag = 4;

        assert_relative_eq!(bartlett_weight(0, max_lag), 1.0);
        assert_relative_eq!(bartlett_weight(1, max_lag), 0.8);
        assert_relative_eq!(bartlett_weight(2, max_lag), 0.6);
        assert_relative_eq!(bartlett_weight(3, max_lag), 0.4);
        assert_relative_eq!(bartlett_weight(4, max_lag), 0.2);
        assert_relative_eq!(bartlett_weight(5, max_lag), 0.0);
    }

    #[test]
    fn test_automatic_lag_rule() {
        let config = NeweyWestConfig::default();

        // ceil(4 * (T/100)^(2/9)) at T = 100, 500, 1000
        assert_eq!(config.effective_lags(100), 4);
        assert_eq!(config.effective_lags(500), 6);
        assert_eq!(config.effective_lags(1000), 7);
    }

    #[test]
    fn test_manual_lags_and_clamping() {
        let config = NeweyWestConfig {
            lags: Some(100),
            min_observations: 5,
        };
        // Clamped to T - 1
        assert_eq!(config.effective_lags(10), 9);

        let config = NeweyWestConfig {
            lags: Some(3),
            min_observations: 5,
        };
        assert_eq!(config.effective_lags(1000), 3);
    }

    #[test]
    fn test_hac_ols_recovers_coefficients() {
        let n = 60;
        let mut x = Array2::<f64>::ones((n, 2));
        for t in 0..n {
            x[[t, 1]] = ((t * 3 + 1) % 7) as f64 / 7.0 - 0.5;
        }
        let b = array![0.5, -1.5];
        let mut y = x.dot(&b);
        for (t, v) in y.iter_mut().enumerate() {
            // Residuals well below the coefficient tolerance, but nonzero
            *v += 1e-12 * ((t % 3) as f64 - 1.0);
        }

        let config = NeweyWestConfig {
            lags: Some(2),
            min_observations: 10,
        };
        let fit = hac_ols(&y, &x, &config).unwrap();

        assert_relative_eq!(fit.coefficients[0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(fit.coefficients[1], -1.5, epsilon = 1e-10);
        assert_eq!(fit.lags, 2);
    }

    #[test]
    fn test_hac_se_grows_with_positive_autocorrelation() {
        let mut rng = StdRng::seed_from_u64(5);
        let n = 400;
        let x = Array2::<f64>::ones((n, 1));

        // AR(1) residuals with strong positive persistence
        let mut y = Array1::<f64>::zeros(n);
        let mut u = 0.0;
        for t in 0..n {
            u = 0.8 * u + rng.gen_range(-0.5..0.5);
            y[t] = 0.01 + u;
        }

        let lag0 = hac_ols(
            &y,
            &x,
            &NeweyWestConfig {
                lags: Some(0),
                min_observations: 10,
            },
        )
        .unwrap();
        let lagged = hac_ols(
            &y,
            &x,
            &NeweyWestConfig {
                lags: Some(10),
                min_observations: 10,
            },
        )
        .unwrap();

        assert!(lagged.std_errors[0] > 1.5 * lag0.std_errors[0]);
    }

    #[test]
    fn test_long_run_variance_lag0_is_sample_variance() {
        let series = array![1.0, -1.0, 2.0, 0.0, -2.0, 1.0, -1.0, 0.5, -0.5, 0.0];
        let config = NeweyWestConfig {
            lags: Some(0),
            min_observations: 5,
        };

        let omega = long_run_variance(&series, &config).unwrap();

        let mean = series.sum() / series.len() as f64;
        let gamma0 = series.mapv(|v| (v - mean).powi(2)).sum() / series.len() as f64;
        assert_relative_eq!(omega, gamma0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_residual_variance_is_degenerate() {
        // A zero dependent series fits exactly: all residuals and scores are
        // identically zero, so every coefficient variance is zero
        let n = 50;
        let mut x = Array2::<f64>::ones((n, 2));
        for t in 0..n {
            x[[t, 1]] = ((t * 3 + 1) % 7) as f64 / 7.0 - 0.5;
        }
        let y = Array1::<f64>::zeros(n);

        let config = NeweyWestConfig {
            lags: Some(2),
            min_observations: 10,
        };
        let err = hac_ols(&y, &x, &config).unwrap_err();
        assert!(matches!(err, CalendarError::DegenerateContrast { .. }));
    }

    #[test]
    fn test_insufficient_observations() {
        let series = array![1.0, 2.0];
        let config = NeweyWestConfig::default();
        assert!(matches!(
            long_run_variance(&series, &config),
            Err(CalendarError::InsufficientData { .. })
        ));

        let y = Array1::<f64>::zeros(3);
        let x = Array2::<f64>::ones((3, 1));
        assert!(hac_ols(&y, &x, &NeweyWestConfig::default()).is_err());
    }
}
