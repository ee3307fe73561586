//! Pairwise Pearson correlation across numeric columns.

use serde::Serialize;
use tracing::debug;

use crate::types::{DataSet, Value};

use super::profile::{ColumnKind, column_kind};

/// Square correlation matrix over numeric column names.
///
/// Cells are `None` where the coefficient is undefined (fewer than two complete observations,
/// or zero variance in either column).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// `true` when fewer than two numeric columns were available.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient for the pair `(a, b)`.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Compute the Pearson correlation for every pair of numeric columns.
///
/// Each pair uses only the rows where both values are present and finite (pairwise-complete).
/// Columns are the ones the profiler classifies as [`ColumnKind::Numeric`].
///
/// ```rust
/// use eda_report::analysis::correlation_matrix;
/// use eda_report::types::{DataSet, DataType, Field, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(vec![
///         Field::new("x", DataType::Int64),
///         Field::new("y", DataType::Int64),
///     ]),
///     vec![
///         vec![Value::Int64(1), Value::Int64(2)],
///         vec![Value::Int64(2), Value::Int64(4)],
///         vec![Value::Int64(3), Value::Int64(6)],
///     ],
/// );
/// let corr = correlation_matrix(&ds);
/// assert!((corr.get("x", "y").unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn correlation_matrix(dataset: &DataSet) -> CorrelationMatrix {
    let numeric: Vec<(String, Vec<Option<f64>>)> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| column_kind(dataset, *idx) == ColumnKind::Numeric)
        .map(|(idx, f)| {
            let xs: Vec<Option<f64>> = dataset.column(idx).map(Value::as_finite_f64).collect();
            (f.name.clone(), xs)
        })
        .collect();

    if numeric.len() < 2 {
        debug!(
            numeric_columns = numeric.len(),
            "not enough numeric columns for correlation"
        );
        return CorrelationMatrix::default();
    }

    let n = numeric.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        let has_value = numeric[i].1.iter().any(Option::is_some);
        values[i][i] = has_value.then_some(1.0);
        for j in (i + 1)..n {
            let r = pearson(&numeric[i].1, &numeric[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: numeric.into_iter().map(|(name, _)| name).collect(),
        values,
    }
}

/// Pearson coefficient over rows where both `xs` and `ys` are present.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    // Sums overflow for values near f64::MAX; the coefficient is undefined then.
    if sxx == 0.0 || syy == 0.0 || !(sxx.is_finite() && syy.is_finite() && sxy.is_finite()) {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::correlation_matrix;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn row(age: Value, height: f64, city: Value, drop: i64) -> Vec<Value> {
        vec![age, Value::Float64(height), city, Value::Int64(drop)]
    }

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("age", DataType::Int64),
            Field::new("height", DataType::Float64),
            Field::new("city", DataType::Utf8),
            Field::new("drop", DataType::Int64),
        ]);
        let rows = vec![
            row(Value::Int64(10), 140.0, Value::Utf8("A".into()), 4),
            row(Value::Int64(20), 150.0, Value::Utf8("B".into()), 3),
            row(Value::Int64(30), 160.0, Value::Utf8("A".into()), 2),
            row(Value::Null, 170.0, Value::Null, 1),
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let corr = correlation_matrix(&sample_dataset());
        assert_eq!(corr.columns, vec!["age", "height", "drop"]);
        for a in &corr.columns {
            assert_eq!(corr.get(a, a), Some(1.0));
            for b in &corr.columns {
                assert_eq!(corr.get(a, b), corr.get(b, a));
            }
        }
    }

    #[test]
    fn uses_pairwise_complete_rows() {
        let corr = correlation_matrix(&sample_dataset());
        assert!(approx(corr.get("age", "height").unwrap(), 1.0));
        assert!(approx(corr.get("age", "drop").unwrap(), -1.0));
        assert!(approx(corr.get("height", "drop").unwrap(), -1.0));
        assert_eq!(corr.get("age", "city"), None);
    }

    #[test]
    fn fewer_than_two_numeric_columns_is_empty() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]);
        let ds = DataSet::new(
            schema,
            vec![vec![Value::Int64(1), Value::Utf8("a".into())]],
        );
        assert!(correlation_matrix(&ds).is_empty());
    }

    #[test]
    fn undefined_cells_for_sparse_or_constant_columns() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Int64),
            Field::new("constant", DataType::Int64),
            Field::new("sparse", DataType::Float64),
            Field::new("empty", DataType::Float64),
        ]);
        let rows = vec![
            vec![Value::Int64(1), Value::Int64(5), Value::Float64(1.0), Value::Null],
            vec![Value::Int64(2), Value::Int64(5), Value::Null, Value::Null],
            vec![Value::Int64(3), Value::Int64(5), Value::Null, Value::Null],
        ];
        let corr = correlation_matrix(&DataSet::new(schema, rows));

        assert_eq!(corr.get("x", "constant"), None);
        assert_eq!(corr.get("x", "sparse"), None);
        assert_eq!(corr.get("constant", "constant"), Some(1.0));
        assert_eq!(corr.get("sparse", "sparse"), Some(1.0));
        assert_eq!(corr.get("empty", "empty"), None);
    }

    #[test]
    fn infinite_values_are_skipped() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Float64),
            Field::new("y", DataType::Int64),
        ]);
        let rows = vec![
            vec![Value::Float64(1.0), Value::Int64(2)],
            vec![Value::Float64(f64::INFINITY), Value::Int64(3)],
            vec![Value::Float64(3.0), Value::Int64(5)],
        ];
        let corr = correlation_matrix(&DataSet::new(schema, rows));

        // Only rows 0 and 2 are complete and finite.
        assert!(approx(corr.get("x", "y").unwrap(), 1.0));
        for a in &corr.columns {
            for b in &corr.columns {
                if let Some(r) = corr.get(a, b) {
                    assert!((-1.0..=1.0).contains(&r));
                }
            }
        }
    }

    #[test]
    fn huge_values_never_yield_nan() {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Float64),
            Field::new("y", DataType::Float64),
        ]);
        let rows = vec![
            vec![Value::Float64(-1e300), Value::Float64(1.0)],
            vec![Value::Float64(1e300), Value::Float64(2.0)],
        ];
        let corr = correlation_matrix(&DataSet::new(schema, rows));
        assert_eq!(corr.get("x", "y"), None);
    }

    #[test]
    fn mixed_value_column_is_not_numeric() {
        let schema = Schema::new(vec![
            Field::new("a", DataType::Int64),
            Field::new("b", DataType::Int64),
            Field::new("mixed", DataType::Int64),
        ]);
        let rows = vec![
            vec![Value::Int64(1), Value::Int64(2), Value::Int64(1)],
            vec![Value::Int64(2), Value::Int64(4), Value::Utf8("n/a".into())],
        ];
        let corr = correlation_matrix(&DataSet::new(schema, rows));
        assert_eq!(corr.columns, vec!["a", "b"]);
    }
}
