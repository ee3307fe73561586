use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use eda_report::ConfigError;
use eda_report::analysis::summarize_dataset;
use eda_report::ingestion::{LoadOptions, TracingObserver, load_from_path};
use eda_report::report::{ReportArtifacts, ReportConfig, generate_report, overview_table};
use eda_report::types::DataSet;

use crate::cli::{InputArgs, OverviewArgs, ReportArgs};

fn load_input(input: &InputArgs) -> Result<DataSet> {
    let options = LoadOptions {
        separator: input.sep,
        encoding: input.encoding.clone(),
        observer: Some(Arc::new(TracingObserver)),
        ..LoadOptions::default()
    };
    let ds = load_from_path(&input.path, &options)
        .with_context(|| format!("load {}", input.path.display()))?;
    Ok(ds)
}

pub fn run_overview(args: &OverviewArgs) -> Result<()> {
    let ds = load_input(&args.input)?;
    let summary = summarize_dataset(&ds).context("summarize dataset")?;
    if args.json {
        let json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
        println!("{json}");
    } else {
        println!("Rows: {}", summary.n_rows);
        println!("Columns: {}", summary.n_cols);
        println!("{}", overview_table(&summary));
    }
    Ok(())
}

pub fn run_report(args: &ReportArgs) -> Result<ReportArtifacts> {
    let config = ReportConfig {
        out_dir: args.out_dir.clone(),
        max_hist_columns: args.max_hist_columns,
        top_k_categories: args.top_k_categories,
        title: args.title.clone(),
        min_missing_share: args.min_missing_share,
        ..ReportConfig::default()
    };
    config.validate()?;

    let source_name = args
        .input
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.path.display().to_string());
    let span = info_span!("run_report", source = %source_name);
    let _guard = span.enter();

    let ds = load_input(&args.input)?;
    let artifacts = generate_report(&ds, &source_name, &config)
        .with_context(|| format!("write report to {}", config.out_dir.display()))?;
    info!(files = artifacts.files.len(), "report complete");
    Ok(artifacts)
}

pub fn print_artifacts(artifacts: &ReportArtifacts) {
    println!("Report written to {}", artifacts.out_dir.display());
    for file in &artifacts.files {
        println!("  {}", file.display());
    }
    println!("Quality score: {:.2}", artifacts.quality.quality_score);
    if artifacts.problematic_columns.is_empty() {
        println!("No problematic columns.");
    } else {
        println!(
            "Problematic columns: {}",
            artifacts.problematic_columns.join(", ")
        );
    }
}

/// Exit code for a failed command: 2 when a [`ConfigError`] is anywhere in the chain, else 1.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    let is_config = error
        .chain()
        .any(|cause| cause.downcast_ref::<ConfigError>().is_some());
    if is_config { 2 } else { 1 }
}
