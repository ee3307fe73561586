//! Column profiling: per-column type, missing, cardinality, and numeric statistics.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::LoadResult;
use crate::types::{DataSet, DataType, Value};

/// Number of distinct example values kept per column.
const EXAMPLE_VALUES: usize = 3;

/// Analysis-level classification of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every non-missing value is a number.
    Numeric,
    /// String-valued column.
    Categorical,
    /// Anything else (booleans).
    Other,
}

/// Descriptive statistics for a numeric column, over finite non-missing values only.
///
/// Infinite values count as present (they are not missing) but are left out of these statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
}

/// Profile of a single column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Analysis classification.
    pub kind: ColumnKind,
    /// Native type of the column.
    pub data_type: DataType,
    /// Number of non-missing values.
    pub non_null: usize,
    /// Number of missing values.
    pub missing_count: usize,
    /// `missing_count / n_rows` (0 for an empty table).
    pub missing_share: f64,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// Up to three distinct non-missing values, in order of first occurrence.
    pub example_values: Vec<String>,
    /// Present for numeric columns with at least one finite value.
    pub numeric: Option<NumericStats>,
}

/// Dataset-level profile: shape plus one [`ColumnSummary`] per column, in table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub n_rows: usize,
    pub n_cols: usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Look up a column summary by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Flatten into one printable record per column.
    pub fn to_rows(&self) -> Vec<SummaryRow> {
        self.columns
            .iter()
            .map(|c| SummaryRow {
                name: c.name.clone(),
                dtype: c.data_type.to_string(),
                kind: c.kind,
                non_null: c.non_null,
                missing: c.missing_count,
                missing_share: c.missing_share,
                unique: c.unique_count,
                example_values: c.example_values.join("; "),
                min: c.numeric.map(|n| n.min),
                max: c.numeric.map(|n| n.max),
                mean: c.numeric.map(|n| n.mean),
                std: c.numeric.and_then(|n| n.std),
            })
            .collect()
    }
}

/// One flattened row of a [`DatasetSummary`], suitable for tables and CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub dtype: String,
    pub kind: ColumnKind,
    pub non_null: usize,
    pub missing: usize,
    pub missing_share: f64,
    pub unique: usize,
    pub example_values: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

/// Profile every column of `dataset`.
///
/// Fails only when the dataset is malformed (a row length differs from the schema).
///
/// ```rust
/// use eda_report::analysis::{ColumnKind, summarize_dataset};
/// use eda_report::types::{DataSet, DataType, Field, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(vec![Field::new("age", DataType::Int64)]),
///     vec![vec![Value::Int64(10)], vec![Value::Null], vec![Value::Int64(30)]],
/// );
/// let summary = summarize_dataset(&ds).unwrap();
/// assert_eq!(summary.n_rows, 3);
/// assert_eq!(summary.columns[0].kind, ColumnKind::Numeric);
/// assert_eq!(summary.columns[0].numeric.unwrap().mean, 20.0);
/// ```
pub fn summarize_dataset(dataset: &DataSet) -> LoadResult<DatasetSummary> {
    dataset.validate()?;

    let n_rows = dataset.row_count();
    let columns: Vec<ColumnSummary> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let values: Vec<&Value> = dataset.column(idx).collect();
            profile_column(&field.name, field.data_type, &values)
        })
        .collect();

    debug!(n_rows, n_cols = columns.len(), "profiled dataset");
    Ok(DatasetSummary {
        n_rows,
        n_cols: dataset.column_count(),
        columns,
    })
}

fn profile_column(name: &str, data_type: DataType, values: &[&Value]) -> ColumnSummary {
    let n_rows = values.len();
    let present: Vec<&Value> = values.iter().copied().filter(|v| !v.is_null()).collect();
    let missing_count = n_rows - present.len();

    let mut distinct = HashSet::new();
    let mut example_values = Vec::new();
    for v in &present {
        if let Some(key) = v.key() {
            if distinct.insert(key) && example_values.len() < EXAMPLE_VALUES {
                example_values.push(v.to_string());
            }
        }
    }

    let kind = classify(data_type, present.iter().copied());
    let numeric = match kind {
        ColumnKind::Numeric => {
            let xs: Vec<f64> = present.iter().filter_map(|v| v.as_finite_f64()).collect();
            numeric_stats(&xs)
        }
        _ => None,
    };

    ColumnSummary {
        name: name.to_owned(),
        kind,
        data_type,
        non_null: present.len(),
        missing_count,
        missing_share: if n_rows > 0 {
            missing_count as f64 / n_rows as f64
        } else {
            0.0
        },
        unique_count: distinct.len(),
        example_values,
        numeric,
    }
}

/// Classification of column `idx`, shared by every analysis that picks numeric or categorical
/// columns.
pub(crate) fn column_kind(dataset: &DataSet, idx: usize) -> ColumnKind {
    let data_type = dataset.schema.fields[idx].data_type;
    classify(data_type, dataset.column(idx).filter(|v| !v.is_null()))
}

fn classify<'a>(data_type: DataType, mut present: impl Iterator<Item = &'a Value>) -> ColumnKind {
    match data_type {
        t if t.is_numeric() && present.all(|v| v.as_f64().is_some()) => ColumnKind::Numeric,
        DataType::Bool => ColumnKind::Other,
        _ => ColumnKind::Categorical,
    }
}

fn numeric_stats(xs: &[f64]) -> Option<NumericStats> {
    if xs.is_empty() {
        return None;
    }
    let n = xs.len() as f64;
    let mean = xs.iter().sum::<f64>() / n;
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let std = (xs.len() > 1).then(|| {
        let ss: f64 = xs.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt()
    });
    Some(NumericStats {
        min,
        max,
        mean,
        std,
    })
}
