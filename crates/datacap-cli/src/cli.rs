//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{HistogramArgs, OutcomesArgs, ProgressionArgs, ReportArgs};

/// Datacap - How fast clients turn allocated datacap into deals
#[derive(Parser)]
#[command(name = "datacap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Report configuration file (TOML)
    #[arg(short, long, global = true, env = "DATACAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate the compliance report for a verifier
    Report(ReportArgs),

    /// Count allocations per milestone and elapsed-time band
    Histogram(HistogramArgs),

    /// Show how each allocation compares to the previous one
    Progression(ProgressionArgs),

    /// Show time to each milestone for every allocation
    Outcomes(OutcomesArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
