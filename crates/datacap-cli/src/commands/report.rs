//! Report command implementation.
//!
//! Builds the compliance report for one verifier and writes it under the
//! uploads directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use datacap_core::ClientId;
use datacap_ext_file::{load_audit_trails, load_flagged_clients, CsvDealSource, JsonClientSource};
use datacap_report::{build_report, ReportConfig, ReportData, ReportWriter};

use crate::cli::OutputFormat;
use crate::commands::{require_file, InputArgs};
use crate::error::CliError;
use crate::output::{print_json, print_success, print_warning};

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Verifier address id; names the report directory
    #[arg(long)]
    pub verifier: String,

    #[command(flatten)]
    pub inputs: InputArgs,

    /// Clients that received datacap from more than one verifier (JSON list)
    #[arg(long)]
    pub flagged: Option<PathBuf>,

    /// Audit-trail links by client id (JSON object)
    #[arg(long)]
    pub audit_trails: Option<PathBuf>,

    /// Output root (overrides the configuration file)
    #[arg(long)]
    pub uploads_dir: Option<PathBuf>,

    /// Seed for chart colours (overrides the configuration file)
    #[arg(long)]
    pub color_seed: Option<u64>,
}

/// Execute the report command.
pub fn execute(
    args: ReportArgs,
    mut config: ReportConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let verifier = ClientId::parse(&args.verifier)
        .map_err(|_| CliError::InvalidVerifier(args.verifier.clone()))?;
    if let Some(dir) = args.uploads_dir {
        config = config.with_uploads_dir(dir);
    }
    if args.color_seed.is_some() {
        config = config.with_color_seed(args.color_seed);
    }

    let clients = JsonClientSource::new(require_file(&args.inputs.clients)?)?;
    let deals = CsvDealSource::new(require_file(&args.inputs.deals)?)?;

    let mut data = ReportData::load(verifier.as_str(), &clients, &deals)?;
    if let Some(path) = &args.flagged {
        data = data.with_flagged(load_flagged_clients(path)?);
    }
    if let Some(path) = &args.audit_trails {
        data = data.with_audit_trails(load_audit_trails(path)?);
    }

    let report = build_report(&data, &config)?;
    let written = ReportWriter::new(&config).write(&report)?;
    info!("Report for {} complete", verifier);

    match format {
        OutputFormat::Json => print_json(&written)?,
        OutputFormat::Table | OutputFormat::Csv => {
            if !quiet {
                if report.is_empty() {
                    print_warning(&format!("No datacap issued for verifier {verifier}"));
                }
                print_success(&format!("Report written to {}", written.report.display()));
                for chart in &written.charts {
                    println!("  {}", chart.display());
                }
            }
        }
    }

    Ok(())
}
