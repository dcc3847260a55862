//! Command-line argument definitions for `logsum`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

/// Summarize hyphen-delimited service log files.
///
/// Reads lines of the shape `TIMESTAMP - SERVICE - LEVEL - MESSAGE` and
/// prints aggregate statistics: counts by level and service, timestamp
/// range, and an error breakdown. Lines that do not match the shape are
/// skipped.
#[derive(Debug, Parser)]
#[command(name = "logsum", version, about, long_about = None)]
pub struct Cli {
    /// Log file to analyze. Reads stdin when omitted.
    pub file: Option<std::path::PathBuf>,

    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    #[arg(short = 'c', long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Output the summary as JSON instead of the text report.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Timestamp display format for the time range (strftime-compatible).
    #[arg(short = 't', long)]
    pub timestamp_format: Option<String>,

    /// Maximum character length for displayed error messages.
    ///
    /// Messages exceeding this length are truncated with `…`.
    /// Set to `0` to disable truncation.
    #[arg(short = 'M', long)]
    pub max_message_length: Option<usize>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Generate shell completions and exit.
    #[arg(long, value_enum)]
    pub completions: Option<Shell>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}
