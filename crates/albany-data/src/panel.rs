//! Aligned panel inputs for estimation.
//!
//! The estimators assume row alignment: returns and factors share the same
//! time ordering, returns and the cross-sectional design share the same unit
//! ordering. [`PanelData::validate`] enforces that contract once, up front,
//! so downstream dimension errors can only come from misuse, not from
//! loading.

use crate::error::{DataError, Result};
use crate::loader::{read_dated_matrix, read_matrix};
use chrono::NaiveDate;
use ndarray::Array2;
use std::path::Path;

/// The three aligned estimation inputs.
#[derive(Debug, Clone)]
pub struct PanelData {
    /// Return panel Y (T x N)
    pub returns: Array2<f64>,
    /// Common factor matrix X (T x Kx)
    pub factors: Array2<f64>,
    /// Cross-sectional design Z (N x Kz)
    pub groups: Array2<f64>,
    /// Period labels shared by returns and factors, when loaded from dated
    /// files
    pub dates: Option<Vec<NaiveDate>>,
}

impl PanelData {
    /// Bundle pre-built matrices, validating alignment.
    pub fn new(
        returns: Array2<f64>,
        factors: Array2<f64>,
        groups: Array2<f64>,
    ) -> Result<Self> {
        let data = Self {
            returns,
            factors,
            groups,
            dates: None,
        };
        data.validate()?;
        Ok(data)
    }

    /// Number of time periods T.
    pub fn n_periods(&self) -> usize {
        self.returns.nrows()
    }

    /// Number of cross-sectional units N.
    pub fn n_units(&self) -> usize {
        self.returns.ncols()
    }

    /// Check the row-alignment contract.
    ///
    /// # Errors
    /// Fails when returns and factors disagree on T, when returns and the
    /// design disagree on N, when any input is empty, or when a date vector
    /// is present with the wrong length.
    pub fn validate(&self) -> Result<()> {
        let (n_periods, n_units) = self.returns.dim();
        if n_periods == 0 || n_units == 0 {
            return Err(DataError::Empty("return panel".to_string()));
        }
        if self.factors.ncols() == 0 {
            return Err(DataError::Empty("factor matrix".to_string()));
        }
        if self.groups.ncols() == 0 {
            return Err(DataError::Empty("group design".to_string()));
        }

        if self.factors.nrows() != n_periods {
            return Err(DataError::Alignment(format!(
                "returns cover {} periods but factors cover {}",
                n_periods,
                self.factors.nrows()
            )));
        }
        if self.groups.nrows() != n_units {
            return Err(DataError::Alignment(format!(
                "returns cover {} units but group design covers {}",
                n_units,
                self.groups.nrows()
            )));
        }
        if let Some(dates) = &self.dates {
            if dates.len() != n_periods {
                return Err(DataError::Alignment(format!(
                    "{} date labels for {} periods",
                    dates.len(),
                    n_periods
                )));
            }
        }

        Ok(())
    }
}

/// Load the three inputs from plain numeric CSV files.
///
/// # Arguments
/// * `returns_path` - T x N return panel
/// * `factors_path` - T x Kx factor matrix
/// * `groups_path` - N x Kz cross-sectional design
/// * `has_headers` - Whether each file carries a header record
pub fn load_panel<P: AsRef<Path>>(
    returns_path: P,
    factors_path: P,
    groups_path: P,
    has_headers: bool,
) -> Result<PanelData> {
    PanelData::new(
        read_matrix(returns_path, has_headers)?,
        read_matrix(factors_path, has_headers)?,
        read_matrix(groups_path, has_headers)?,
    )
}

/// Load the inputs with dated returns and factors.
///
/// Returns and factors must carry identical date columns in identical order;
/// the first mismatch is reported. The group design stays undated.
pub fn load_dated_panel<P: AsRef<Path>>(
    returns_path: P,
    factors_path: P,
    groups_path: P,
    has_headers: bool,
) -> Result<PanelData> {
    let (return_dates, returns) = read_dated_matrix(returns_path, has_headers)?;
    let (factor_dates, factors) = read_dated_matrix(factors_path, has_headers)?;
    let groups = read_matrix(groups_path, has_headers)?;

    if return_dates.len() != factor_dates.len() {
        return Err(DataError::Alignment(format!(
            "returns cover {} dates but factors cover {}",
            return_dates.len(),
            factor_dates.len()
        )));
    }
    for (idx, (a, b)) in return_dates.iter().zip(factor_dates.iter()).enumerate() {
        if a != b {
            return Err(DataError::Alignment(format!(
                "date mismatch at row {}: returns {a}, factors {b}",
                idx + 1
            )));
        }
    }

    let mut data = PanelData::new(returns, factors, groups)?;
    data.dates = Some(return_dates);
    data.validate()?;
    Ok(data)
}
