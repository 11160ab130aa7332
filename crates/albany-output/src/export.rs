//! CSV and JSON export for report structures.

use crate::report::{PanelReport, StudyReport};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in serialized output")]
    Utf8,
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn csv_into_string(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|_| ExportError::Utf8)
}

impl Exporter for PanelReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for row in &self.rows {
                    wtr.serialize(row)?;
                }
                csv_into_string(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for StudyReport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for line in &self.tests {
                    wtr.serialize(line)?;
                }
                csv_into_string(wtr)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{EstimateRow, TestLine};

    fn sample_report() -> PanelReport {
        PanelReport {
            title: "fit".to_string(),
            rows: vec![EstimateRow {
                name: "alpha[g0]".to_string(),
                estimate: 0.01,
                se_ls: 0.001,
                t_ls: 10.0,
                se_dk: 0.002,
                t_dk: 5.0,
            }],
        }
    }

    #[test]
    fn test_panel_report_csv() {
        let csv = sample_report().export_to_string(ExportFormat::Csv).unwrap();

        assert!(csv.starts_with("name,estimate,se_ls,t_ls,se_dk,t_dk"));
        assert!(csv.contains("alpha[g0],0.01,0.001,10.0,0.002,5.0"));
    }

    #[test]
    fn test_panel_report_json_round_trip() {
        let report = sample_report();
        let json = report.export_to_string(ExportFormat::Json).unwrap();
        let parsed: PanelReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_study_report_csv_lists_tests() {
        let report = StudyReport {
            title: "study".to_string(),
            alpha_diff: -0.01,
            alpha_diff_annualized: -2.52,
            tests: vec![
                TestLine {
                    method: "panel LS".to_string(),
                    estimate: -0.01,
                    std_error: 0.0005,
                    t_stat: -20.0,
                },
                TestLine {
                    method: "panel DK".to_string(),
                    estimate: -0.01,
                    std_error: 0.004,
                    t_stat: -2.5,
                },
            ],
        };

        let csv = report.export_to_string(ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("panel DK"));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
