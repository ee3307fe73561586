//! Missing-value shares per column.

use serde::Serialize;

use crate::types::DataSet;

/// Missing-value statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub missing_count: usize,
    /// `missing_count / n_rows`, in `[0, 1]`.
    pub missing_share: f64,
}

/// One [`MissingEntry`] per column, sorted by `missing_share` descending.
///
/// Columns with equal shares keep table order. Empty when the table has no rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MissingTable {
    entries: Vec<MissingEntry>,
}

impl MissingTable {
    /// Entries in presentation order.
    pub fn entries(&self) -> &[MissingEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up the entry for `column`.
    pub fn get(&self, column: &str) -> Option<&MissingEntry> {
        self.entries.iter().find(|e| e.column == column)
    }

    /// Largest per-column share, or 0.0 for an empty table.
    pub fn max_share(&self) -> f64 {
        // Entries are sorted, so the first one carries the maximum.
        self.entries.first().map_or(0.0, |e| e.missing_share)
    }

    /// Entries whose share is strictly greater than `threshold`.
    pub fn above(&self, threshold: f64) -> impl Iterator<Item = &MissingEntry> + '_ {
        self.entries
            .iter()
            .take_while(move |e| e.missing_share > threshold)
    }
}

/// Count missing cells per column of `dataset`.
pub fn missing_table(dataset: &DataSet) -> MissingTable {
    let n_rows = dataset.row_count();
    if n_rows == 0 {
        return MissingTable::default();
    }

    let mut entries: Vec<MissingEntry> = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let missing_count = dataset.column(idx).filter(|v| v.is_null()).count();
            MissingEntry {
                column: field.name.clone(),
                missing_count,
                missing_share: missing_count as f64 / n_rows as f64,
            }
        })
        .collect();
    // Stable sort keeps table order among ties.
    entries.sort_by(|a, b| b.missing_share.total_cmp(&a.missing_share));

    MissingTable { entries }
}
