//! Statistical reductions over an in-memory [`crate::types::DataSet`].
//!
//! Every function here is a pure, single-pass reduction over a loaded table. They never fail
//! on empty tables, all-missing columns, or tables without numeric/categorical columns; such
//! inputs produce empty or undefined results instead. The one exception is
//! [`summarize_dataset()`], which rejects a malformed table.
//!
//! - [`summarize_dataset()`]: per-column profile ([`DatasetSummary`])
//! - [`missing_table()`]: missing-value shares ([`MissingTable`])
//! - [`correlation_matrix()`]: pairwise-complete Pearson ([`CorrelationMatrix`])
//! - [`top_categories()`]: value-frequency tables ([`TopCategories`])
//! - [`histograms()`]: equal-width bins for numeric columns
//! - [`compute_quality_flags()`]: data-quality heuristics ([`QualityFlags`])
//!
//! ## Example
//!
//! ```rust
//! use eda_report::analysis::{
//!     QualityOptions, compute_quality_flags, correlation_matrix, missing_table, summarize_dataset,
//!     top_categories,
//! };
//! use eda_report::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("age", DataType::Int64),
//!     Field::new("height", DataType::Int64),
//!     Field::new("city", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(10), Value::Int64(140), Value::Utf8("A".into())],
//!         vec![Value::Int64(20), Value::Int64(150), Value::Utf8("B".into())],
//!         vec![Value::Int64(30), Value::Int64(160), Value::Utf8("A".into())],
//!         vec![Value::Null, Value::Int64(170), Value::Null],
//!     ],
//! );
//!
//! let summary = summarize_dataset(&ds).unwrap();
//! let missing = missing_table(&ds);
//! assert_eq!(missing.get("age").unwrap().missing_count, 1);
//!
//! let corr = correlation_matrix(&ds);
//! assert!(corr.get("age", "height").is_some());
//!
//! let top = top_categories(&ds, 5, 2);
//! assert_eq!(top.get("city").unwrap().len(), 2);
//!
//! let flags = compute_quality_flags(&summary, &missing, &QualityOptions::with_dataset(&ds));
//! assert!(flags.too_few_rows);
//! ```

pub mod categories;
pub mod correlation;
pub mod histogram;
pub mod missing;
pub mod profile;
pub mod quality;

pub use categories::{CategoryCount, CategoryTable, TopCategories, top_categories};
pub use correlation::{CorrelationMatrix, correlation_matrix};
pub use histogram::{Histogram, HistogramBin, histograms};
pub use missing::{MissingEntry, MissingTable, missing_table};
pub use profile::{
    ColumnKind, ColumnSummary, DatasetSummary, NumericStats, SummaryRow, summarize_dataset,
};
pub use quality::{
    IdDuplicates, QualityFlags, QualityOptions, QualityThresholds, compute_quality_flags,
    is_id_like,
};
