//! `eda-report` computes exploratory-data-analysis statistics over a delimited text file and
//! writes them out as a Markdown report plus CSV tables.
//!
//! The pipeline is linear: load a table once, run a set of independent reductions over it, and
//! hand the results to the report writer.
//!
//! ```text
//! load_from_path ─► summarize_dataset ─┬─► missing_table ──────┐
//!                                      ├─► correlation_matrix  │
//!                                      ├─► top_categories      ├─► compute_quality_flags
//!                                      └─► histograms ─────────┘            │
//!                                                                           ▼
//!                                                                    generate_report
//! ```
//!
//! ## Loading
//!
//! [`ingestion::load_from_path`] reads a file with a configurable separator and text encoding,
//! maps missing markers (`""`, `NA`, `null`, ...) to [`types::Value::Null`], and infers a native
//! type per column ([`types::DataType::Int64`], [`types::DataType::Float64`],
//! [`types::DataType::Bool`], or [`types::DataType::Utf8`]).
//!
//! ```no_run
//! use eda_report::ingestion::{LoadOptions, load_from_path};
//!
//! # fn main() -> Result<(), eda_report::LoadError> {
//! let ds = load_from_path("data.csv", &LoadOptions::default())?;
//! println!("rows={} columns={}", ds.row_count(), ds.column_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Analysis
//!
//! ```rust
//! use eda_report::analysis::{
//!     QualityOptions, compute_quality_flags, missing_table, summarize_dataset, top_categories,
//! };
//! use eda_report::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("age", DataType::Int64),
//!     Field::new("city", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(10), Value::Utf8("A".into())],
//!         vec![Value::Int64(20), Value::Utf8("B".into())],
//!         vec![Value::Int64(30), Value::Utf8("A".into())],
//!         vec![Value::Null, Value::Null],
//!     ],
//! );
//!
//! let summary = summarize_dataset(&ds).unwrap();
//! assert_eq!((summary.n_rows, summary.n_cols), (4, 2));
//!
//! let missing = missing_table(&ds);
//! assert_eq!(missing.get("age").unwrap().missing_count, 1);
//!
//! let city = top_categories(&ds, 5, 2);
//! let city = city.get("city").unwrap();
//! assert_eq!((city[0].value.as_str(), city[0].count), ("A", 2));
//! assert_eq!((city[1].value.as_str(), city[1].count), ("B", 1));
//!
//! // Without the raw table the value-level checks are skipped.
//! let flags = compute_quality_flags(&summary, &missing, &QualityOptions::default());
//! assert!(!flags.has_constant_columns);
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: delimited-text loading and load observers
//! - [`types`]: schema + in-memory dataset types
//! - [`analysis`]: profiling, missing values, correlation, categories, histograms, quality
//! - [`report`]: Markdown/CSV/JSON artifact writer and console overview
//! - [`logging`]: `tracing` subscriber setup
//! - [`error`]: error types

pub mod analysis;
pub mod error;
pub mod ingestion;
pub mod logging;
pub mod report;
pub mod types;

pub use error::{ConfigError, LoadError, LoadResult, ReportError};
