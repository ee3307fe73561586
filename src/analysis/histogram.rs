//! Equal-width histograms for numeric columns.

use serde::Serialize;

use crate::types::DataSet;

use super::profile::{ColumnKind, column_kind};

/// One histogram bin; `[lower, upper)`, except the last bin which also includes `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Binned value counts of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

/// Build histograms for the first `max_columns` numeric columns, in table order.
///
/// Infinite values are not binned. A column whose finite values are all equal gets a single bin;
/// a column without finite values gets none.
pub fn histograms(dataset: &DataSet, max_columns: usize, bins: usize) -> Vec<Histogram> {
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| column_kind(dataset, *idx) == ColumnKind::Numeric)
        .take(max_columns)
        .map(|(idx, field)| {
            let xs: Vec<f64> = dataset.column(idx).filter_map(|v| v.as_finite_f64()).collect();
            Histogram {
                column: field.name.clone(),
                bins: bin_values(&xs, bins),
            }
        })
        .collect()
}

fn bin_values(xs: &[f64], bins: usize) -> Vec<HistogramBin> {
    if xs.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max || !(max - min).is_finite() {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: xs.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();
    for x in xs {
        let slot = (((x - min) / width) as usize).min(bins - 1);
        out[slot].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::histograms;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn sample_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("x", DataType::Float64),
            Field::new("label", DataType::Utf8),
            Field::new("flat", DataType::Int64),
            Field::new("empty", DataType::Float64),
        ]);
        let rows = (0..=10)
            .map(|i| {
                vec![
                    Value::Float64(f64::from(i)),
                    Value::Utf8(format!("r{i}")),
                    Value::Int64(3),
                    Value::Null,
                ]
            })
            .collect();
        DataSet::new(schema, rows)
    }

    #[test]
    fn counts_every_value_once() {
        let hists = histograms(&sample_dataset(), 6, 5);
        let x = &hists[0];
        assert_eq!(x.column, "x");
        assert_eq!(x.bins.len(), 5);
        assert_eq!(x.bins.iter().map(|b| b.count).sum::<usize>(), 11);
        assert_eq!(x.bins[0].lower, 0.0);
        assert_eq!(x.bins[4].upper, 10.0);
        // The maximum lands in the last bin.
        assert_eq!(x.bins[4].count, 3);
    }

    #[test]
    fn flat_and_empty_columns() {
        let hists = histograms(&sample_dataset(), 6, 5);
        let names: Vec<&str> = hists.iter().map(|h| h.column.as_str()).collect();
        assert_eq!(names, vec!["x", "flat", "empty"]);
        assert_eq!(hists[1].bins.len(), 1);
        assert_eq!(hists[1].bins[0].count, 11);
        assert!(hists[2].bins.is_empty());
    }

    #[test]
    fn respects_max_columns() {
        let hists = histograms(&sample_dataset(), 1, 5);
        assert_eq!(hists.len(), 1);
    }

    #[test]
    fn infinite_values_are_not_binned() {
        let schema = Schema::new(vec![Field::new("x", DataType::Float64)]);
        let rows = [0.0, f64::INFINITY, 4.0, f64::NEG_INFINITY]
            .into_iter()
            .map(|v| vec![Value::Float64(v)])
            .collect();
        let hists = histograms(&DataSet::new(schema, rows), 6, 2);

        let bins = &hists[0].bins;
        assert_eq!((bins[0].lower, bins[1].upper), (0.0, 4.0));
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
    }
}
