//! CSV writers for the report tables.

use std::collections::HashSet;
use std::path::Path;

use crate::analysis::{CategoryTable, CorrelationMatrix, DatasetSummary, Histogram, MissingTable};
use crate::error::ReportError;
use crate::types::DataSet;

pub(crate) const TOP_CATEGORIES_DIR: &str = "top_categories";
pub(crate) const MISSING_MATRIX_FILE: &str = "missing_matrix.csv";

/// Column name reduced to characters that are safe in a file name.
fn file_stem(column: &str) -> String {
    let stem: String = column
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "column".to_string()
    } else {
        stem
    }
}

/// Hands out file stems that are unique within one output directory.
///
/// Clashing stems get a `_2`, `_3`, ... suffix. Stems are compared case-insensitively so the
/// files stay distinct on case-insensitive file systems.
#[derive(Debug, Default)]
pub(crate) struct StemAllocator {
    used: HashSet<String>,
}

impl StemAllocator {
    pub(crate) fn stem_for(&mut self, column: &str) -> String {
        let base = file_stem(column);
        let mut stem = base.clone();
        let mut n = 2;
        while !self.used.insert(stem.to_lowercase()) {
            stem = format!("{base}_{n}");
            n += 1;
        }
        stem
    }
}

pub(crate) fn write_summary(path: &Path, summary: &DatasetSummary) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in summary.to_rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_missing(path: &Path, missing: &MissingTable) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    for entry in missing.entries() {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Undefined coefficients are written as empty cells.
pub(crate) fn write_correlation(
    path: &Path,
    correlation: &CorrelationMatrix,
) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec![String::new()];
    header.extend(correlation.columns.iter().cloned());
    wtr.write_record(&header)?;
    for (name, row) in correlation.columns.iter().zip(&correlation.values) {
        let mut record = vec![name.clone()];
        record.extend(row.iter().map(|v| v.map(|r| r.to_string()).unwrap_or_default()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// One row per table row: the row index, then `1` for each missing cell and `0` otherwise.
pub(crate) fn write_missing_matrix(path: &Path, dataset: &DataSet) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header = vec!["row".to_string()];
    header.extend(dataset.schema.field_names().map(str::to_owned));
    wtr.write_record(&header)?;
    for (idx, row) in dataset.rows.iter().enumerate() {
        let mut record = vec![idx.to_string()];
        record.extend(row.iter().map(|v| u8::from(v.is_null()).to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_categories(path: &Path, table: &CategoryTable) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["value", "count"])?;
    for c in &table.values {
        wtr.write_record([c.value.as_str(), c.count.to_string().as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

pub(crate) fn write_histogram(path: &Path, hist: &Histogram) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["lower", "upper", "count"])?;
    for b in &hist.bins {
        wtr.write_record([b.lower.to_string(), b.upper.to_string(), b.count.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}
