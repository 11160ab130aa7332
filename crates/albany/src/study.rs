//! The alpha study driver.
//!
//! Runs the panel estimator and the calendar-time estimators on one aligned
//! data set and collects four tests of the same group-alpha difference:
//!
//! - panel contrast under the naive i.i.d. covariance,
//! - panel contrast under the Driscoll-Kraay covariance,
//! - calendar-time portfolio contrast under the SURE covariance,
//! - long-short portfolio alpha with Newey-West standard errors.
//!
//! The panel point estimate is shared between its two tests by construction;
//! the calendar-time estimates agree with it whenever the design is a 0/1
//! group indicator (each group's panel coefficients collapse to the
//! portfolio regression of that group's mean return).

use albany_calendar::{
    CalendarError, NeweyWestConfig, SureFit, fit_sure, group_portfolios, hac_ols,
    long_short_series,
};
use albany_data::PanelData;
use albany_output::{EstimateRow, PanelReport, StudyReport, TestLine};
use albany_panel::{ContrastTest, PanelError, PanelFit, fit_panel, group_alpha_contrast};
use thiserror::Error;

/// Errors from running a study.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Panel estimation failed
    #[error("Panel estimation failed: {0}")]
    Panel(#[from] PanelError),

    /// Calendar-time estimation failed
    #[error("Calendar-time estimation failed: {0}")]
    Calendar(#[from] CalendarError),
}

/// Result type for study operations.
pub type Result<T> = std::result::Result<T, StudyError>;

/// Study configuration.
#[derive(Debug, Clone)]
pub struct StudyConfig {
    /// Design column of the group held long in the contrast (default: 0)
    pub group_long: usize,

    /// Design column of the group held short (default: 1)
    pub group_short: usize,

    /// Periods per year for annualizing the alpha difference (default: 252)
    pub annualization: f64,

    /// Newey-West lag override for the long-short regression
    /// (None = automatic selection)
    pub newey_west_lags: Option<usize>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            group_long: 0,
            group_short: 1,
            annualization: 252.0,
            newey_west_lags: None,
        }
    }
}

/// Everything one study run produces.
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    /// The fitted panel model
    pub panel: PanelFit,

    /// The fitted calendar-time portfolio system
    pub sure: SureFit,

    /// Panel contrast under the naive covariance
    pub panel_ls: ContrastTest,

    /// Panel contrast under the Driscoll-Kraay covariance
    pub panel_dk: ContrastTest,

    /// Portfolio contrast under the SURE covariance
    pub calendar_sure: ContrastTest,

    /// Long-short portfolio alpha with Newey-West standard errors
    pub calendar_nw: ContrastTest,

    /// Alpha difference per period (panel point estimate)
    pub alpha_diff: f64,

    /// Alpha difference scaled by the configured annualization factor
    pub alpha_diff_annualized: f64,
}

/// Run the full two-estimator study on aligned panel data.
///
/// # Arguments
/// * `data` - Aligned returns, factors and group design; factor column 0
///   must be the constant for the contrasts to compare alphas
/// * `config` - Which groups to compare and how to annualize
///
/// # Errors
/// Propagates panel failures (dimension mismatch, singular design) and
/// calendar-time failures (empty group, too few periods). The panel stage
/// runs first; a caller wanting its partial results can match on
/// [`StudyError::Calendar`].
pub fn run_alpha_study(data: &PanelData, config: &StudyConfig) -> Result<StudyOutcome> {
    let panel = fit_panel(&data.returns, &data.factors, &data.groups)?;

    let k_x = panel.dims.n_factors;
    let k_z = panel.dims.n_groups;
    let r = group_alpha_contrast(k_x, k_z, config.group_long, config.group_short)?;
    let (panel_ls, panel_dk) = panel.contrast_pair(&r)?;

    let portfolios = group_portfolios(&data.returns, &data.groups)?;
    let sure = fit_sure(&portfolios, &data.factors)?;
    let calendar_sure = sure.coef_contrast(0, config.group_long, config.group_short)?;

    let long_short = long_short_series(&portfolios, config.group_long, config.group_short)?;
    let nw_config = NeweyWestConfig {
        lags: config.newey_west_lags,
        min_observations: k_x + 1,
    };
    let hac = hac_ols(&long_short, &data.factors, &nw_config)?;
    let calendar_nw = ContrastTest {
        estimate: hac.coefficients[0],
        std_error: hac.std_errors[0],
        t_stat: hac.t_stats[0],
    };

    let alpha_diff = panel_ls.estimate;
    Ok(StudyOutcome {
        panel,
        sure,
        panel_ls,
        panel_dk,
        calendar_sure,
        calendar_nw,
        alpha_diff,
        alpha_diff_annualized: alpha_diff * config.annualization,
    })
}

impl StudyOutcome {
    /// Coefficient table for the panel fit.
    ///
    /// Labels follow the interaction ordering: `alpha[g?]` for the constant
    /// (factor column 0) and `beta?[g?]` for the remaining factors.
    pub fn panel_report(&self, title: &str) -> PanelReport {
        let k_x = self.panel.dims.n_factors;
        let rows = self
            .panel
            .theta
            .iter()
            .enumerate()
            .map(|(idx, &estimate)| {
                let group = idx / k_x;
                let factor = idx % k_x;
                let name = if factor == 0 {
                    format!("alpha[g{group}]")
                } else {
                    format!("beta{factor}[g{group}]")
                };
                EstimateRow {
                    name,
                    estimate,
                    se_ls: self.panel.se_ls[idx],
                    t_ls: estimate / self.panel.se_ls[idx],
                    se_dk: self.panel.se_dk[idx],
                    t_dk: estimate / self.panel.se_dk[idx],
                }
            })
            .collect();

        PanelReport {
            title: title.to_string(),
            rows,
        }
    }

    /// Side-by-side table of the four alpha-difference tests.
    pub fn study_report(&self, title: &str) -> StudyReport {
        let line = |method: &str, test: &ContrastTest| TestLine {
            method: method.to_string(),
            estimate: test.estimate,
            std_error: test.std_error,
            t_stat: test.t_stat,
        };

        StudyReport {
            title: title.to_string(),
            alpha_diff: self.alpha_diff,
            alpha_diff_annualized: self.alpha_diff_annualized,
            tests: vec![
                line("panel LS", &self.panel_ls),
                line("panel DK", &self.panel_dk),
                line("calendar SURE", &self.calendar_sure),
                line("calendar NW", &self.calendar_nw),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::TwoGroupScenario;
    use approx::assert_relative_eq;

    #[test]
    fn test_study_runs_on_synthetic_panel() {
        let data = TwoGroupScenario {
            n_periods: 300,
            n_units: 10,
            ..Default::default()
        }
        .generate()
        .unwrap();

        let outcome = run_alpha_study(&data, &StudyConfig::default()).unwrap();

        // One numerator, two panel t-statistics
        assert_eq!(outcome.panel_ls.estimate, outcome.panel_dk.estimate);
        assert_relative_eq!(
            outcome.alpha_diff_annualized,
            outcome.alpha_diff * 252.0,
            epsilon = 1e-12
        );

        // With 0/1 indicators the panel estimate collapses to the portfolio
        // regression, so the calendar point estimate matches
        assert_relative_eq!(
            outcome.calendar_sure.estimate,
            outcome.panel_ls.estimate,
            epsilon = 1e-8
        );
        assert_relative_eq!(
            outcome.calendar_nw.estimate,
            outcome.panel_ls.estimate,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_panel_report_labels() {
        let data = TwoGroupScenario {
            n_periods: 120,
            n_units: 8,
            ..Default::default()
        }
        .generate()
        .unwrap();

        let outcome = run_alpha_study(&data, &StudyConfig::default()).unwrap();
        let report = outcome.panel_report("test");

        // Kx = 2, Kz = 2
        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0].name, "alpha[g0]");
        assert_eq!(report.rows[1].name, "beta1[g0]");
        assert_eq!(report.rows[2].name, "alpha[g1]");
    }

    #[test]
    fn test_study_report_has_four_tests() {
        let data = TwoGroupScenario::default().generate().unwrap();
        let outcome = run_alpha_study(&data, &StudyConfig::default()).unwrap();
        let report = outcome.study_report("comparison");

        assert_eq!(report.tests.len(), 4);
        assert_eq!(report.tests[1].method, "panel DK");
    }
}
