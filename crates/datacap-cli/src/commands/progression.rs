//! Progression command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use datacap_analytics::{progression_rows, AllocationProgressionRow};
use datacap_core::traits::AllocationSource;
use datacap_ext_file::JsonClientSource;

use crate::cli::OutputFormat;
use crate::commands::require_file;
use crate::output::print_output;

/// Arguments for the progression command.
#[derive(Args, Debug)]
pub struct ProgressionArgs {
    /// Verified clients JSON (datacap stats API response)
    #[arg(long)]
    pub clients: PathBuf,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct ProgressionLine {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "First Allocation")]
    first: String,
    #[tabled(rename = "Second Allocation")]
    second: String,
    #[tabled(rename = "Third Allocation")]
    third: String,
    #[tabled(rename = "Remaining Allocations")]
    remaining: String,
}

impl From<AllocationProgressionRow> for ProgressionLine {
    fn from(row: AllocationProgressionRow) -> Self {
        let [first, second, third] = row
            .display_cells
            .map(|c| c.unwrap_or_else(|| "-".to_string()));
        let remaining = if row.remaining_sizes.is_empty() {
            "-".to_string()
        } else {
            row.remaining_sizes.join(", ")
        };
        Self {
            id: row.client_id.to_string(),
            first,
            second,
            third,
            remaining,
        }
    }
}

/// Execute the progression command.
pub fn execute(args: ProgressionArgs, format: OutputFormat) -> Result<()> {
    let clients = JsonClientSource::new(require_file(&args.clients)?)?;
    let timelines = clients.allocation_timelines()?;

    let lines: Vec<ProgressionLine> = progression_rows(timelines.values())
        .into_iter()
        .map(ProgressionLine::from)
        .collect();
    print_output(&lines, format)
}
