//! Data-quality heuristics and the composite quality score.
//!
//! The evaluator works from a [`DatasetSummary`] and a [`MissingTable`]. Two heuristics need to
//! look at individual values (constant columns and duplicated IDs); they run only when the raw
//! [`DataSet`] is supplied through [`QualityOptions::dataset`] and report nothing otherwise.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::types::DataSet;

use super::missing::MissingTable;
use super::profile::DatasetSummary;

/// Limits and penalty weights for [`compute_quality_flags`].
///
/// Every triggered condition subtracts its penalty from a starting score of 1.0; the result is
/// floored at 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityThresholds {
    /// `too_few_rows` when the dataset has fewer rows than this. Default: 10.
    pub min_rows: usize,
    /// `too_many_columns` when the dataset has more columns than this. Default: 50.
    pub max_columns: usize,
    /// `too_many_missing` when some column's missing share exceeds this. Default: 0.5.
    pub max_missing_share: f64,
    /// Default: 0.2.
    pub too_few_rows_penalty: f64,
    /// Default: 0.1.
    pub too_many_columns_penalty: f64,
    /// Default: 0.3.
    pub too_many_missing_penalty: f64,
    /// Applied once per constant column. Default: 0.1.
    pub constant_column_penalty: f64,
    /// Applied once per ID column with duplicates. Default: 0.15.
    pub id_duplicates_penalty: f64,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_rows: 10,
            max_columns: 50,
            max_missing_share: 0.5,
            too_few_rows_penalty: 0.2,
            too_many_columns_penalty: 0.1,
            too_many_missing_penalty: 0.3,
            constant_column_penalty: 0.1,
            id_duplicates_penalty: 0.15,
        }
    }
}

/// Inputs for [`compute_quality_flags`] beyond the summary tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityOptions<'a> {
    pub thresholds: QualityThresholds,
    /// Raw table; enables constant-column and ID-duplicate detection.
    pub dataset: Option<&'a DataSet>,
}

impl<'a> QualityOptions<'a> {
    /// Default thresholds with the raw table attached.
    pub fn with_dataset(dataset: &'a DataSet) -> Self {
        Self {
            thresholds: QualityThresholds::default(),
            dataset: Some(dataset),
        }
    }
}

/// Duplicate count for an ID-like column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdDuplicates {
    pub column: String,
    /// Non-missing values minus distinct non-missing values.
    pub duplicates: usize,
}

/// Result of the quality heuristics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityFlags {
    pub quality_score: f64,
    pub too_few_rows: bool,
    pub too_many_columns: bool,
    pub too_many_missing: bool,
    pub max_missing_share: f64,
    pub has_constant_columns: bool,
    pub constant_columns_list: Vec<String>,
    pub constant_columns_count: usize,
    pub has_suspicious_id_duplicates: bool,
    pub id_columns_with_duplicates: Vec<IdDuplicates>,
}

/// Whether a column name looks like it holds identifiers: `id` or `*_id`, any case.
pub fn is_id_like(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower == "id" || lower.ends_with("_id")
}

/// Evaluate the quality heuristics.
///
/// ```rust
/// use eda_report::analysis::{
///     QualityOptions, compute_quality_flags, missing_table, summarize_dataset,
/// };
/// use eda_report::types::{DataSet, DataType, Field, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(vec![Field::new("user_id", DataType::Int64)]),
///     [1, 2, 2, 3, 4].iter().map(|v| vec![Value::Int64(*v)]).collect(),
/// );
/// let summary = summarize_dataset(&ds).unwrap();
/// let missing = missing_table(&ds);
/// let flags = compute_quality_flags(&summary, &missing, &QualityOptions::with_dataset(&ds));
/// assert!(flags.has_suspicious_id_duplicates);
/// assert_eq!(flags.id_columns_with_duplicates[0].duplicates, 1);
/// ```
pub fn compute_quality_flags(
    summary: &DatasetSummary,
    missing: &MissingTable,
    options: &QualityOptions<'_>,
) -> QualityFlags {
    let t = &options.thresholds;

    let too_few_rows = summary.n_rows < t.min_rows;
    let too_many_columns = summary.n_cols > t.max_columns;
    let max_missing_share = missing.max_share();
    let too_many_missing = max_missing_share > t.max_missing_share;

    let (constant_columns_list, id_columns_with_duplicates) = match options.dataset {
        Some(dataset) => (constant_columns(dataset), id_duplicates(dataset)),
        None => {
            debug!("raw table not supplied; skipping value-level quality checks");
            (Vec::new(), Vec::new())
        }
    };

    let mut penalty = 0.0;
    if too_few_rows {
        penalty += t.too_few_rows_penalty;
    }
    if too_many_columns {
        penalty += t.too_many_columns_penalty;
    }
    if too_many_missing {
        penalty += t.too_many_missing_penalty;
    }
    penalty += t.constant_column_penalty * constant_columns_list.len() as f64;
    penalty += t.id_duplicates_penalty * id_columns_with_duplicates.len() as f64;
    let quality_score = (1.0 - penalty).clamp(0.0, 1.0);

    QualityFlags {
        quality_score,
        too_few_rows,
        too_many_columns,
        too_many_missing,
        max_missing_share,
        has_constant_columns: !constant_columns_list.is_empty(),
        constant_columns_count: constant_columns_list.len(),
        constant_columns_list,
        has_suspicious_id_duplicates: !id_columns_with_duplicates.is_empty(),
        id_columns_with_duplicates,
    }
}

/// Columns with at least one value and at most one distinct value.
fn constant_columns(dataset: &DataSet) -> Vec<String> {
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| {
            let (present, distinct) = value_counts(dataset, *idx);
            present >= 1 && distinct <= 1
        })
        .map(|(_, f)| f.name.clone())
        .collect()
}

fn id_duplicates(dataset: &DataSet) -> Vec<IdDuplicates> {
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| is_id_like(&f.name))
        .filter_map(|(idx, f)| {
            let (present, distinct) = value_counts(dataset, idx);
            let duplicates = present - distinct;
            (duplicates > 0).then(|| IdDuplicates {
                column: f.name.clone(),
                duplicates,
            })
        })
        .collect()
}

/// `(non-missing count, distinct non-missing count)` for column `idx`.
fn value_counts(dataset: &DataSet, idx: usize) -> (usize, usize) {
    let mut present = 0;
    let mut distinct = HashSet::new();
    for key in dataset.column(idx).filter_map(|v| v.key()) {
        present += 1;
        distinct.insert(key);
    }
    (present, distinct.len())
}
