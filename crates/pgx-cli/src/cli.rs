//! CLI argument definitions for the `pgx` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pgx_model::Gene;
use pgx_report::ReportFormat;

#[derive(Parser)]
#[command(
    name = "pgx",
    version,
    about = "Pharmacogenomic phenotypes for DPYD, UGT1A1 and CYP2D6",
    long_about = "Classify DPYD, UGT1A1 and CYP2D6 genotypes into metabolizer phenotypes.\n\n\
                  Reads a request file (TOML or JSON) with marker genotypes or star-allele\n\
                  diplotypes and prints phenotypes with CPIC/DPWG recommendations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Reference data directory (default: $PGX_REFERENCE_DIR or the bundled tables).
    #[arg(long = "reference-dir", value_name = "DIR", global = true)]
    pub reference_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify a request and print the phenotype summary.
    Classify(ClassifyArgs),

    /// Classify a request and write report artifacts.
    Report(ReportArgs),

    /// List the star alleles selectable in diplotype mode.
    Stars(GeneArgs),

    /// List the marker columns read in marker mode.
    Markers(GeneArgs),

    /// Inspect the reference data directory.
    #[command(subcommand)]
    Reference(ReferenceCommand),
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Request file (.toml or .json).
    #[arg(value_name = "REQUEST")]
    pub request: PathBuf,

    /// Print the full outcome as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Request file (.toml or .json).
    #[arg(value_name = "REQUEST")]
    pub request: PathBuf,

    /// Directory for the generated artifacts.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "reports")]
    pub output_dir: PathBuf,

    /// Artifacts to generate.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: ReportFormatArg,

    /// Override the "last update" label of the guideline tables.
    #[arg(long = "last-update", value_name = "LABEL")]
    pub last_update: Option<String>,
}

#[derive(Parser)]
pub struct GeneArgs {
    /// Gene symbol.
    #[arg(value_enum, ignore_case = true)]
    pub gene: GeneArg,
}

#[derive(Subcommand)]
pub enum ReferenceCommand {
    /// Verify checksums and load every table.
    Verify,

    /// Print a JSON report of pins, files, counts and data issues.
    Doctor,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GeneArg {
    #[value(name = "dpyd")]
    Dpyd,
    #[value(name = "ugt1a1")]
    Ugt1a1,
    #[value(name = "cyp2d6")]
    Cyp2d6,
}

impl From<GeneArg> for Gene {
    fn from(arg: GeneArg) -> Self {
        match arg {
            GeneArg::Dpyd => Gene::Dpyd,
            GeneArg::Ugt1a1 => Gene::Ugt1a1,
            GeneArg::Cyp2d6 => Gene::Cyp2d6,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Json,
    Xml,
    Both,
}

impl From<ReportFormatArg> for ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Json => ReportFormat::Json,
            ReportFormatArg::Xml => ReportFormat::Xml,
            ReportFormatArg::Both => ReportFormat::Both,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
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
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_with_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pgx",
            "report",
            "request.toml",
            "--format",
            "xml",
            "--reference-dir",
            "tables",
            "--log-data",
        ])
        .expect("parse");
        assert_eq!(
            cli.reference_dir.as_deref(),
            Some(std::path::Path::new("tables"))
        );
        assert!(cli.log_data);
        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.output_dir, PathBuf::from("reports"));
        assert_eq!(ReportFormat::from(args.format), ReportFormat::Xml);
    }

    #[test]
    fn gene_argument_ignores_case() {
        let cli = Cli::try_parse_from(["pgx", "stars", "CYP2D6"]).expect("parse");
        let Command::Stars(args) = cli.command else {
            panic!("expected stars command");
        };
        assert_eq!(Gene::from(args.gene), Gene::Cyp2d6);
        assert!(Cli::try_parse_from(["pgx", "stars", "tpmt"]).is_err());
    }
}
