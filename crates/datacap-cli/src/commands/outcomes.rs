//! Outcomes command implementation.
//!
//! Lists, per allocation, the time from issuance to each milestone.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use datacap_analytics::{analyze_consumption, AllocationOutcome};
use datacap_core::units::format_iec_bytes;
use datacap_core::Milestone;
use datacap_report::{format_time_diff, ReportConfig};

use crate::cli::OutputFormat;
use crate::commands::InputArgs;
use crate::output::{print_json, print_output};

/// Arguments for the outcomes command.
#[derive(Args, Debug)]
pub struct OutcomesArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Only show allocations that were not fully used
    #[arg(long)]
    pub incomplete: bool,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct OutcomeLine {
    #[tabled(rename = "Client")]
    client: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Issued")]
    issued: String,
    #[tabled(rename = "First deal")]
    first: String,
    #[tabled(rename = "25%")]
    quarter: String,
    #[tabled(rename = "50%")]
    half: String,
    #[tabled(rename = "75%")]
    third: String,
    #[tabled(rename = "100%")]
    full: String,
}

fn elapsed(outcome: &AllocationOutcome, milestone: Milestone) -> String {
    outcome
        .elapsed_hours(milestone)
        .map_or_else(|| "-".to_string(), format_time_diff)
}

/// Execute the outcomes command.
pub fn execute(args: OutcomesArgs, config: ReportConfig, format: OutputFormat) -> Result<()> {
    let inputs = args.inputs.load()?;
    let analysis = analyze_consumption(&inputs.allocations, &inputs.deal_timelines, &config.analytics)?;

    if format == OutputFormat::Json {
        return print_json(&analysis.clients);
    }

    let mut lines = Vec::new();
    for consumption in &analysis.clients {
        let name = inputs
            .clients
            .get(&consumption.client_id)
            .and_then(|c| c.name.clone())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "-".to_string());

        for (idx, outcome) in consumption.outcomes.iter().enumerate() {
            if args.incomplete && outcome.is_complete() {
                continue;
            }
            lines.push(OutcomeLine {
                client: consumption.client_id.to_string(),
                name: name.clone(),
                number: idx + 1,
                size: format_iec_bytes(outcome.allocation.size),
                issued: outcome.allocation.issued_at.to_string(),
                first: elapsed(outcome, Milestone::First),
                quarter: elapsed(outcome, Milestone::Quarter),
                half: elapsed(outcome, Milestone::Half),
                third: elapsed(outcome, Milestone::ThirdQuarter),
                full: elapsed(outcome, Milestone::Full),
            });
        }
    }
    print_output(&lines, format)
}
