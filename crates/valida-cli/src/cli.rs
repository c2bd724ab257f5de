//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "valida",
    version,
    about = "Validate tabular CSV data against a declarative JSON rule set",
    long_about = "Validate tabular CSV data against a declarative JSON rule set.\n\n\
                  Checks required columns, uniqueness, numeric ranges, date ranges and\n\
                  null values, then writes a machine-readable results file, chart\n\
                  images and a bilingual (Spanish/English) report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a dataset and generate results, charts and a report.
    Check(CheckArgs),

    /// Inspect a rule document and report its shape problems.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Path to the CSV dataset to validate.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Path to the JSON rule document.
    #[arg(long = "rules", value_name = "RULES", default_value = "reglas.json")]
    pub rules: PathBuf,

    /// Output directory for generated files (default: <DATASET dir>/informe).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report variant(s) to render.
    #[arg(long = "report", value_enum, default_value = "html")]
    pub report: ReportFormatArg,

    /// Skip chart image generation.
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Fail instead of producing partial results.
    ///
    /// By default a malformed rule entry or a rule the dataset cannot
    /// support is dropped, recorded and reported alongside the remaining
    /// results. With this flag the first such rule aborts the run.
    #[arg(long = "strict")]
    pub strict: bool,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Path to the JSON rule document.
    #[arg(value_name = "RULES")]
    pub rules: PathBuf,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Html,
    Text,
    Both,
    None,
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
