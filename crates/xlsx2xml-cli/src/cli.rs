//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "xlsx2xml",
    version,
    about = "Convert xlsx sheets to XML documents",
    long_about = "Convert spreadsheets laid out as title, type, description, usage scope \
                  and field name rows followed by data rows into XML documents.\n\n\
                  Optionally writes an aggregated schema file describing every exported field."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

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

    /// Allow cell text in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert every workbook under the input directory.
    Convert(ConvertArgs),

    /// Analyze individual workbooks and list their exported fields.
    Check(CheckArgs),

    /// List the effective type registry.
    Types(ConfigArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration file (default: ./xlsx2xml.toml when present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory scanned for .xlsx files (overrides path.in).
    #[arg(long = "input", value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Directory receiving the XML documents (overrides path.out).
    #[arg(long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write the schema file to this path (enables it).
    #[arg(long = "format-file", value_name = "PATH", conflicts_with = "no_format_file")]
    pub format_file: Option<PathBuf>,

    /// Do not write the schema file.
    #[arg(long = "no-format-file")]
    pub no_format_file: bool,

    /// Skip files that fail and continue with the rest.
    ///
    /// By default the first failing file aborts the batch.
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Analyze every file without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Workbooks to analyze.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
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
