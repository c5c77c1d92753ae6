//! Histogram command implementation.
//!
//! Counts allocations per milestone and elapsed-time band.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use datacap_analytics::{analyze_consumption, BandCounts};
use datacap_core::{Band, Milestone};
use datacap_report::ReportConfig;

use crate::cli::OutputFormat;
use crate::commands::InputArgs;
use crate::output::{print_json, print_output};

/// Arguments for the histogram command.
#[derive(Args, Debug)]
pub struct HistogramArgs {
    #[command(flatten)]
    pub inputs: InputArgs,
}

/// One milestone's counts.
#[derive(Debug, Clone, Serialize, Tabled)]
struct HistogramRow {
    #[tabled(rename = "Milestone")]
    milestone: String,
    #[tabled(rename = "< 1")]
    #[serde(rename = "< 1")]
    under_one: u64,
    #[tabled(rename = "1 - 12")]
    #[serde(rename = "1 - 12")]
    one_to_twelve: u64,
    #[tabled(rename = "12 - 24")]
    #[serde(rename = "12 - 24")]
    twelve_to_twenty_four: u64,
    #[tabled(rename = "24 - 48")]
    #[serde(rename = "24 - 48")]
    twenty_four_to_forty_eight: u64,
    #[tabled(rename = "> 48")]
    #[serde(rename = "> 48")]
    over_forty_eight: u64,
    #[tabled(rename = "Total")]
    total: u64,
}

impl HistogramRow {
    fn new(milestone: Milestone, counts: &BandCounts) -> Self {
        Self {
            milestone: milestone.label().to_string(),
            under_one: counts.get(Band::UnderOneHour),
            one_to_twelve: counts.get(Band::OneToTwelve),
            twelve_to_twenty_four: counts.get(Band::TwelveToTwentyFour),
            twenty_four_to_forty_eight: counts.get(Band::TwentyFourToFortyEight),
            over_forty_eight: counts.get(Band::OverFortyEight),
            total: counts.total(),
        }
    }
}

/// Execute the histogram command.
pub fn execute(args: HistogramArgs, config: ReportConfig, format: OutputFormat) -> Result<()> {
    let inputs = args.inputs.load()?;
    let analysis = analyze_consumption(&inputs.allocations, &inputs.deal_timelines, &config.analytics)?;

    if format == OutputFormat::Json {
        return print_json(&analysis.histogram);
    }

    let rows: Vec<HistogramRow> = analysis
        .histogram
        .iter()
        .map(|(milestone, counts)| HistogramRow::new(milestone, counts))
        .collect();
    print_output(&rows, format)
}
