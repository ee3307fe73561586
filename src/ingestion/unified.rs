//! Path-based loading entrypoint.
//!
//! Most callers should use [`load_from_path`], which loads a delimited text file into an
//! in-memory [`crate::types::DataSet`].
//!
//! - The separator, encoding, and missing markers come from [`LoadOptions`].
//! - If a [`super::observability::LoadObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ConfigError, LoadError, LoadResult};
use crate::types::DataSet;

use super::csv;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Cell contents treated as missing by default, in addition to empty cells.
pub const DEFAULT_MISSING_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A",
];

/// Options controlling how a table is loaded.
///
/// Use [`Default`] for comma-separated UTF-8 input.
#[derive(Clone)]
pub struct LoadOptions {
    /// Field separator byte.
    pub separator: u8,
    /// Encoding label (e.g. `utf-8`, `windows-1251`).
    pub encoding: String,
    /// Cell contents (after trimming) that mean "missing".
    pub missing_markers: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("separator", &char::from(self.separator))
            .field("encoding", &self.encoding)
            .field("missing_markers", &self.missing_markers)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            encoding: "utf-8".to_string(),
            missing_markers: DEFAULT_MISSING_MARKERS.iter().map(|s| s.to_string()).collect(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Parse a separator given as text (e.g. on the command line) into a byte.
///
/// `\t` is accepted as an alias for a tab.
pub fn parse_separator(value: &str) -> Result<u8, ConfigError> {
    let sep = if value == "\\t" { "\t" } else { value };
    match sep.as_bytes() {
        [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
        _ => Err(ConfigError::Separator {
            value: value.to_string(),
        }),
    }
}

/// Load a delimited text file from `path`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use eda_report::ingestion::{LoadOptions, load_from_path};
///
/// # fn main() -> Result<(), eda_report::LoadError> {
/// let opts = LoadOptions {
///     separator: b';',
///     encoding: "windows-1251".to_string(),
///     ..Default::default()
/// };
/// let ds = load_from_path("sales.csv", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<DataSet> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
        separator: options.separator,
        encoding: options.encoding.clone(),
    };

    let result = csv::load_csv_from_path(
        path,
        options.separator,
        &options.encoding,
        &options.missing_markers,
    );

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::NotFound { .. } | LoadError::Io(_) => LoadSeverity::Critical,
        LoadError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        LoadError::UnknownEncoding { .. }
        | LoadError::Decode { .. }
        | LoadError::Empty
        | LoadError::MalformedTable { .. } => LoadSeverity::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::parse_separator;
    use crate::error::ConfigError;

    #[test]
    fn separator_must_be_one_ascii_char() {
        assert_eq!(parse_separator(";"), Ok(b';'));
        assert_eq!(parse_separator("\\t"), Ok(b'\t'));
        for bad in ["", ";;", "§", "\""] {
            assert_eq!(
                parse_separator(bad),
                Err(ConfigError::Separator {
                    value: bad.to_string()
                })
            );
        }
    }
}
