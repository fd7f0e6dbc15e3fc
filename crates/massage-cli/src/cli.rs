//! CLI argument definitions for the county massager.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use massage_core::{DEFAULT_COUNTY_COLUMN, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, QuoteStyle};

#[derive(Parser)]
#[command(
    name = "massage",
    version,
    about = "Normalize county names in gun-death CSV data",
    long_about = "Normalize the county column of a CSV file.\n\n\
                  Strips a trailing \" County\" from each value and uppercases the rest,\n\
                  copying every other field and the row order unchanged."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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

    /// Prefix log lines with timestamps (pretty and compact formats).
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Normalize the county column of a CSV file.
    Run(RunArgs),

    /// Show how county values would be normalized.
    Preview(PreviewArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV file to read.
    #[arg(long = "input", value_name = "PATH", default_value = DEFAULT_INPUT_PATH)]
    pub input: PathBuf,

    /// CSV file to create or overwrite.
    #[arg(long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Zero-based index of the county column.
    #[arg(long = "column", value_name = "INDEX", default_value_t = DEFAULT_COUNTY_COLUMN)]
    pub column: usize,

    /// Output quoting policy.
    ///
    /// `always` quotes every field, reproducing Python's `unix` CSV dialect.
    #[arg(long = "quote-style", value_enum, default_value = "necessary")]
    pub quote_style: QuoteStyleArg,

    /// Transform and count rows without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// County values to normalize.
    #[arg(value_name = "VALUE", required = true)]
    pub values: Vec<String>,
}

/// CLI quoting choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum QuoteStyleArg {
    Necessary,
    Always,
}

impl From<QuoteStyleArg> for QuoteStyle {
    fn from(arg: QuoteStyleArg) -> Self {
        match arg {
            QuoteStyleArg::Necessary => Self::Necessary,
            QuoteStyleArg::Always => Self::Always,
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

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["massage", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.input, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(args.column, 2);
        assert!(matches!(args.quote_style, QuoteStyleArg::Necessary));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "massage",
            "run",
            "--input",
            "countypres_2000-2020.csv",
            "--output",
            "pol_data.csv",
            "--column",
            "3",
            "--quote-style",
            "always",
            "--dry-run",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.input, PathBuf::from("countypres_2000-2020.csv"));
        assert_eq!(args.output, PathBuf::from("pol_data.csv"));
        assert_eq!(args.column, 3);
        assert!(matches!(args.quote_style, QuoteStyleArg::Always));
        assert!(args.dry_run);
    }

    #[test]
    fn test_preview_requires_values() {
        assert!(Cli::try_parse_from(["massage", "preview"]).is_err());
        let cli = Cli::try_parse_from(["massage", "preview", "Cook County", "Lake"]).unwrap();
        let Command::Preview(args) = cli.command else {
            panic!("expected preview command");
        };
        assert_eq!(args.values, vec!["Cook County", "Lake"]);
    }

    #[test]
    fn test_global_log_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["massage", "run", "--log-level", "debug", "--log-format", "json"])
                .unwrap();
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }
}
