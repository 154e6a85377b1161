//! `pgx` command line tool.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use pgx_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReferenceCommand};
use crate::commands::{
    run_classify, run_markers, run_reference_doctor, run_reference_verify, run_report, run_stars,
};
use crate::summary::{print_outcome, print_report_result};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let reference_dir = cli.reference_dir.as_deref();
    match &cli.command {
        Command::Classify(args) => {
            let result = run_classify(reference_dir, args)?;
            if result.json {
                println!("{}", serde_json::to_string_pretty(&result.outcome)?);
            } else {
                print_outcome(&result.outcome);
            }
        }
        Command::Report(args) => {
            let result = run_report(reference_dir, args)?;
            print_report_result(&result.outcome, &result.artifacts);
        }
        Command::Stars(args) => run_stars(reference_dir, args)?,
        Command::Markers(args) => run_markers(reference_dir, args)?,
        Command::Reference(ReferenceCommand::Verify) => run_reference_verify(reference_dir)?,
        Command::Reference(ReferenceCommand::Doctor) => run_reference_doctor(reference_dir)?,
    }
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
