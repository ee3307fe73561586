use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned when a table cannot be loaded.
///
/// Also returned by [`crate::analysis::summarize_dataset`] for datasets whose rows do not match
/// their schema.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path does not exist.
    #[error("file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// Underlying I/O error (e.g. permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text parsing error (e.g. a record with the wrong number of fields).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The encoding label is not recognised.
    #[error("unknown text encoding '{label}'")]
    UnknownEncoding { label: String },

    /// The input bytes are not valid in the requested encoding.
    #[error("input is not valid {encoding} text")]
    Decode { encoding: String },

    /// The input has no header row.
    #[error("input is empty: no header row")]
    Empty,

    /// Rows do not match the schema shape.
    #[error("malformed table: {message}")]
    MalformedTable { message: String },
}

/// Invalid configuration, rejected before any analysis runs.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A share/threshold parameter lies outside `[0.0, 1.0]`.
    #[error("{name} must be in [0.0, 1.0], got {value}")]
    ShareOutOfRange { name: &'static str, value: f64 },

    /// A quality penalty weight is negative or not a finite number.
    #[error("{name} must be a finite, non-negative weight, got {value}")]
    NegativePenalty { name: &'static str, value: f64 },

    /// A count parameter must be positive.
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },

    /// The separator is not a single ASCII character.
    #[error("separator must be a single ASCII character, got '{value}'")]
    Separator { value: String },

    /// The report title is empty.
    #[error("report title must not be empty")]
    EmptyTitle,
}

/// Error type returned while writing report artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The report configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Underlying I/O error while creating directories or files.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset could not be analyzed.
    #[error(transparent)]
    Load(#[from] LoadError),
}
