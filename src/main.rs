//! `eda-report` CLI.

use std::io::{self, IsTerminal};

use clap::Parser;
use eda_report::logging::{LogConfig, LogFormat, init_logging};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg};
use crate::commands::{exit_code_for, print_artifacts, run_overview, run_report};

fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));
    let exit_code = match cli.command {
        Command::Overview(args) => match run_overview(&args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
        Command::Report(args) => match run_report(&args) {
            Ok(artifacts) => {
                print_artifacts(&artifacts);
                0
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    exit_code_for(error)
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: io::stderr().is_terminal(),
        ..LogConfig::default()
    }
}
