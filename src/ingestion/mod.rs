//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - decodes the file with the requested text encoding
//! - splits it on the requested separator and infers a native type per column
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The reader-based loader lives in [`csv`].

pub mod csv;
pub mod observability;
pub mod unified;

pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};
pub use unified::{DEFAULT_MISSING_MARKERS, LoadOptions, load_from_path, parse_separator};
