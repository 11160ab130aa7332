//! CSV readers for numeric matrices.
//!
//! Inputs are delimited text with one matrix row per record. The dated
//! variant expects an ISO (`YYYY-MM-DD`) date in the first column; everything
//! else must parse as `f64`. Ragged rows and unparseable cells are rejected
//! with their row number, never skipped.

use crate::error::{DataError, Result};
use chrono::NaiveDate;
use ndarray::Array2;
use std::io::Read;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read a numeric CSV file into a matrix.
///
/// # Arguments
/// * `path` - File to read
/// * `has_headers` - Whether to skip a header record
pub fn read_matrix<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<Array2<f64>> {
    let reader = open(path.as_ref(), has_headers)?;
    parse_matrix(reader, 0).map(|(_, matrix)| matrix)
}

/// Read a dated numeric CSV file into date labels plus a matrix.
///
/// The first column holds `YYYY-MM-DD` dates; remaining columns are numeric.
///
/// # Arguments
/// * `path` - File to read
/// * `has_headers` - Whether to skip a header record
pub fn read_dated_matrix<P: AsRef<Path>>(
    path: P,
    has_headers: bool,
) -> Result<(Vec<NaiveDate>, Array2<f64>)> {
    let reader = open(path.as_ref(), has_headers)?;
    let (dates, matrix) = parse_matrix(reader, 1)?;
    Ok((dates, matrix))
}

fn open(path: &Path, has_headers: bool) -> Result<csv::Reader<std::fs::File>> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?)
}

/// Parse records into (date labels, matrix), treating the first
/// `label_columns` fields of each record as dates.
fn parse_matrix<R: Read>(
    mut reader: csv::Reader<R>,
    label_columns: usize,
) -> Result<(Vec<NaiveDate>, Array2<f64>)> {
    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut n_cols = None;
    let mut n_rows = 0;

    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let record = record?;

        if record.len() <= label_columns {
            return Err(DataError::Parse {
                row,
                message: format!("record has only {} fields", record.len()),
            });
        }

        let width = record.len() - label_columns;
        let expected = *n_cols.get_or_insert(width);
        if width != expected {
            return Err(DataError::Ragged {
                row,
                expected,
                actual: width,
            });
        }

        if label_columns > 0 {
            let field = &record[0];
            let date = NaiveDate::parse_from_str(field, DATE_FORMAT).map_err(|e| {
                DataError::Parse {
                    row,
                    message: format!("bad date {field:?}: {e}"),
                }
            })?;
            dates.push(date);
        }

        for field in record.iter().skip(label_columns) {
            let value: f64 = field.parse().map_err(|_| DataError::Parse {
                row,
                message: format!("bad number {field:?}"),
            })?;
            values.push(value);
        }
        n_rows += 1;
    }

    let n_cols = n_cols.ok_or_else(|| DataError::Empty("no data rows".to_string()))?;
    let matrix = Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| DataError::Alignment(e.to_string()))?;
    Ok((dates, matrix))
}
