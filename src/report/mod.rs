//! Report assembly: runs every analysis over a loaded table and writes the artifacts.
//!
//! Output layout inside [`ReportConfig::out_dir`]:
//!
//! - `report.md`: human-readable report
//! - `summary.csv`: one row per column (see [`crate::analysis::SummaryRow`])
//! - `missing.csv`: missing-value shares (only when the table has rows)
//! - `missing_matrix.csv`: per-row missing mask, `1` = missing (only when the table has rows)
//! - `correlation.csv`: correlation matrix (only with two or more numeric columns)
//! - `top_categories/<column>.csv`: value counts per categorical column
//! - `hist_<column>.csv`: histogram bins per numeric column
//!
//! `<column>` is the column name reduced to file-name-safe characters; names that reduce to the
//! same stem get a numeric suffix.
//! - `quality.json`: the quality flags

mod markdown;
mod overview;
mod tables;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use tracing::{debug, info, info_span, warn};

use crate::analysis::{
    QualityFlags, QualityOptions, QualityThresholds, compute_quality_flags, correlation_matrix,
    histograms, missing_table, summarize_dataset, top_categories,
};
use crate::error::{ConfigError, ReportError};
use crate::types::DataSet;

pub use overview::overview_table;

/// Settings for [`generate_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Directory that receives every artifact. Created if missing.
    pub out_dir: PathBuf,
    /// Maximum number of numeric columns that get a histogram. Default: 6.
    pub max_hist_columns: usize,
    /// Values kept per categorical column. Default: 5.
    pub top_k_categories: usize,
    /// Maximum number of categorical columns profiled. Default: 5.
    pub max_category_columns: usize,
    /// Bins per histogram. Default: 20.
    pub histogram_bins: usize,
    /// Markdown heading of the report.
    pub title: String,
    /// Columns with a missing share above this are listed as problematic. Default: 0.3.
    pub min_missing_share: f64,
    /// Quality heuristic limits and penalties.
    pub quality: QualityThresholds,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("reports"),
            max_hist_columns: 6,
            top_k_categories: 5,
            max_category_columns: 5,
            histogram_bins: 20,
            title: "EDA report".to_string(),
            min_missing_share: 0.3,
            quality: QualityThresholds::default(),
        }
    }
}

impl ReportConfig {
    /// Reject invalid settings before any work is done.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_missing_share) {
            return Err(ConfigError::ShareOutOfRange {
                name: "min_missing_share",
                value: self.min_missing_share,
            });
        }
        if !(0.0..=1.0).contains(&self.quality.max_missing_share) {
            return Err(ConfigError::ShareOutOfRange {
                name: "max_missing_share",
                value: self.quality.max_missing_share,
            });
        }
        let t = &self.quality;
        for (name, value) in [
            ("too_few_rows_penalty", t.too_few_rows_penalty),
            ("too_many_columns_penalty", t.too_many_columns_penalty),
            ("too_many_missing_penalty", t.too_many_missing_penalty),
            ("constant_column_penalty", t.constant_column_penalty),
            ("id_duplicates_penalty", t.id_duplicates_penalty),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::NegativePenalty { name, value });
            }
        }
        if self.top_k_categories == 0 {
            return Err(ConfigError::Zero {
                name: "top_k_categories",
            });
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::Zero {
                name: "histogram_bins",
            });
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        Ok(())
    }
}

/// What [`generate_report`] produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifacts {
    pub out_dir: PathBuf,
    /// Every written file, in write order; `report.md` is last.
    pub files: Vec<PathBuf>,
    /// Columns whose missing share exceeds [`ReportConfig::min_missing_share`].
    pub problematic_columns: Vec<String>,
    pub quality: QualityFlags,
}

impl ReportArtifacts {
    /// Path of the Markdown report.
    pub fn report_path(&self) -> PathBuf {
        self.out_dir.join(markdown::REPORT_FILE)
    }
}

/// Analyze `dataset` and write all report artifacts into `config.out_dir`.
///
/// `source_name` is shown in the report header (usually the input file name).
pub fn generate_report(
    dataset: &DataSet,
    source_name: &str,
    config: &ReportConfig,
) -> Result<ReportArtifacts, ReportError> {
    config.validate()?;
    let span = info_span!("report", source = %source_name);
    let _guard = span.enter();

    let summary = summarize_dataset(dataset)?;
    let missing = missing_table(dataset);
    let correlation = correlation_matrix(dataset);
    let top = top_categories(
        dataset,
        config.max_category_columns,
        config.top_k_categories,
    );
    let hists = histograms(dataset, config.max_hist_columns, config.histogram_bins);
    let quality = compute_quality_flags(
        &summary,
        &missing,
        &QualityOptions {
            thresholds: config.quality,
            dataset: Some(dataset),
        },
    );
    info!(
        rows = summary.n_rows,
        columns = summary.n_cols,
        quality_score = quality.quality_score,
        "analysis complete"
    );
    if correlation.is_empty() {
        warn!("fewer than two numeric columns; correlation skipped");
    }

    let problematic_columns: Vec<String> = missing
        .above(config.min_missing_share)
        .map(|e| e.column.clone())
        .collect();

    let out_dir = config.out_dir.clone();
    fs::create_dir_all(&out_dir)?;
    let mut files = Vec::new();

    let path = out_dir.join("summary.csv");
    tables::write_summary(&path, &summary)?;
    files.push(path);

    if !missing.is_empty() {
        let path = out_dir.join("missing.csv");
        tables::write_missing(&path, &missing)?;
        files.push(path);

        let path = out_dir.join(tables::MISSING_MATRIX_FILE);
        tables::write_missing_matrix(&path, dataset)?;
        files.push(path);
    }

    if !correlation.is_empty() {
        let path = out_dir.join("correlation.csv");
        tables::write_correlation(&path, &correlation)?;
        files.push(path);
    }

    if !top.is_empty() {
        let dir = out_dir.join(tables::TOP_CATEGORIES_DIR);
        fs::create_dir_all(&dir)?;
        let mut stems = tables::StemAllocator::default();
        for table in top.tables() {
            let path = dir.join(format!("{}.csv", stems.stem_for(&table.column)));
            tables::write_categories(&path, table)?;
            files.push(path);
        }
    }

    let mut stems = tables::StemAllocator::default();
    for hist in &hists {
        let path = out_dir.join(format!("hist_{}.csv", stems.stem_for(&hist.column)));
        tables::write_histogram(&path, hist)?;
        files.push(path);
    }

    let path = out_dir.join("quality.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&path)?), &quality)?;
    files.push(path);

    let report = markdown::render(&markdown::ReportView {
        config,
        source_name,
        summary: &summary,
        missing: &missing,
        correlation: &correlation,
        top: &top,
        histograms: &hists,
        quality: &quality,
        problematic_columns: &problematic_columns,
    });
    let path = out_dir.join(markdown::REPORT_FILE);
    fs::write(&path, report)?;
    files.push(path);

    debug!(files = files.len(), out_dir = %out_dir.display(), "report written");
    Ok(ReportArtifacts {
        out_dir,
        files,
        problematic_columns,
        quality,
    })
}
