//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use eda_report::ingestion::parse_separator;

#[derive(Parser)]
#[command(
    name = "eda-report",
    version,
    about = "Exploratory data analysis for delimited text files",
    long_about = "Profile a CSV file and write an EDA report.\n\n\
                  Produces a Markdown report with per-column statistics, missing values,\n\
                  numeric correlations, top categories, histograms and quality heuristics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print row/column counts and a per-column summary.
    Overview(OverviewArgs),

    /// Run the full analysis and write the report artifacts.
    Report(ReportArgs),
}

/// How the input file is read.
#[derive(Args)]
pub struct InputArgs {
    /// Path to the input CSV file.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Field separator (a single ASCII character; `\t` for tab).
    #[arg(long = "sep", default_value = ",", value_parser = parse_separator)]
    pub sep: u8,

    /// Text encoding of the input file (e.g. utf-8, windows-1251).
    #[arg(long = "encoding", default_value = "utf-8")]
    pub encoding: String,
}

#[derive(Args)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the summary as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the report artifacts.
    #[arg(long = "out-dir", value_name = "DIR", default_value = "reports")]
    pub out_dir: PathBuf,

    /// Maximum number of numeric columns to draw histograms for.
    #[arg(long = "max-hist-columns", default_value_t = 6)]
    pub max_hist_columns: usize,

    /// Number of top values to keep per categorical column.
    #[arg(long = "top-k-categories", default_value_t = 5)]
    pub top_k_categories: usize,

    /// Report title.
    #[arg(long = "title", default_value = "EDA report")]
    pub title: String,

    /// Columns with a missing share above this are listed as problematic.
    #[arg(long = "min-missing-share", default_value_t = 0.3)]
    pub min_missing_share: f64,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_defaults() {
        let cli = Cli::try_parse_from(["eda-report", "report", "data.csv"]).unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report subcommand");
        };
        assert_eq!(args.input.sep, b',');
        assert_eq!(args.input.encoding, "utf-8");
        assert_eq!(args.out_dir.to_str(), Some("reports"));
        assert_eq!(args.max_hist_columns, 6);
        assert_eq!(args.top_k_categories, 5);
        assert_eq!(args.title, "EDA report");
        assert_eq!(args.min_missing_share, 0.3);
    }

    #[test]
    fn rejects_multi_character_separator() {
        let err = Cli::try_parse_from(["eda-report", "overview", "data.csv", "--sep", ";;"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("single ASCII character"));
    }
}
