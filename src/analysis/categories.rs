//! Value-frequency tables for non-numeric columns.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::DataSet;

use super::profile::{ColumnKind, column_kind};

/// One value and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// The most frequent values of one column, count-descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    pub column: String,
    pub values: Vec<CategoryCount>,
}

/// Frequency tables for the selected columns, in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopCategories {
    tables: Vec<CategoryTable>,
}

impl TopCategories {
    pub fn tables(&self) -> &[CategoryTable] {
        &self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Value counts for `column`, if it was selected.
    pub fn get(&self, column: &str) -> Option<&[CategoryCount]> {
        self.tables
            .iter()
            .find(|t| t.column == column)
            .map(|t| t.values.as_slice())
    }
}

/// Count values of up to `max_columns` non-numeric columns, keeping the `top_k` most frequent.
///
/// Columns are taken in table order, not by cardinality. Missing cells are not counted; a
/// column with no values yields an empty table. Equal counts keep first-occurrence order.
///
/// ```rust
/// use eda_report::analysis::top_categories;
/// use eda_report::types::{DataSet, DataType, Field, Schema, Value};
///
/// let ds = DataSet::new(
///     Schema::new(vec![Field::new("city", DataType::Utf8)]),
///     vec![
///         vec![Value::Utf8("A".into())],
///         vec![Value::Utf8("B".into())],
///         vec![Value::Utf8("A".into())],
///         vec![Value::Null],
///     ],
/// );
/// let top = top_categories(&ds, 5, 2);
/// let city = top.get("city").unwrap();
/// assert_eq!(city[0].value, "A");
/// assert_eq!(city[0].count, 2);
/// ```
pub fn top_categories(dataset: &DataSet, max_columns: usize, top_k: usize) -> TopCategories {
    let tables = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(idx, _)| column_kind(dataset, *idx) != ColumnKind::Numeric)
        .take(max_columns)
        .map(|(idx, field)| {
            let mut slots: HashMap<_, usize> = HashMap::new();
            let mut counts: Vec<CategoryCount> = Vec::new();
            for v in dataset.column(idx) {
                let Some(key) = v.key() else { continue };
                let slot = *slots.entry(key).or_insert_with(|| {
                    counts.push(CategoryCount {
                        value: v.to_string(),
                        count: 0,
                    });
                    counts.len() - 1
                });
                counts[slot].count += 1;
            }
            // Stable sort keeps first-occurrence order among ties.
            counts.sort_by(|a, b| b.count.cmp(&a.count));
            counts.truncate(top_k);

            CategoryTable {
                column: field.name.clone(),
                values: counts,
            }
        })
        .collect();

    TopCategories { tables }
}
