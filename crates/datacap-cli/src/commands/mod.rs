//! CLI command implementations.

pub mod histogram;
pub mod outcomes;
pub mod progression;
pub mod report;

// Re-export submodules for convenience
pub use histogram::HistogramArgs;
pub use outcomes::OutcomesArgs;
pub use progression::ProgressionArgs;
pub use report::ReportArgs;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use datacap_core::traits::{AllocationSource, DealSource};
use datacap_core::{ClientAllocationTimeline, ClientDealTimeline, ClientId};
use datacap_ext_file::{CsvDealSource, JsonClientSource};
use datacap_report::ReportConfig;

use crate::error::{CliError, CliResult};

/// Input files shared by the tracking commands.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Verified clients JSON (datacap stats API response)
    #[arg(long)]
    pub clients: PathBuf,

    /// Deals CSV with columns client_id,deal_value,start_epoch
    #[arg(long)]
    pub deals: PathBuf,
}

/// Timelines loaded from the input files.
pub struct TrackingInputs {
    /// The client source, kept for metadata.
    pub clients: JsonClientSource,
    /// Allocation timelines by client.
    pub allocations: BTreeMap<ClientId, ClientAllocationTimeline>,
    /// Deal timelines by client.
    pub deal_timelines: BTreeMap<ClientId, ClientDealTimeline>,
}

impl InputArgs {
    /// Loads and groups both files.
    pub fn load(&self) -> Result<TrackingInputs> {
        let clients = JsonClientSource::new(require_file(&self.clients)?)?;
        let deals = CsvDealSource::new(require_file(&self.deals)?)?;
        let allocations = clients.allocation_timelines()?;
        let deal_timelines = deals.deal_timelines(&clients.client_ids()?)?;
        Ok(TrackingInputs {
            clients,
            allocations,
            deal_timelines,
        })
    }
}

/// Checks that an input file exists.
pub fn require_file(path: &Path) -> CliResult<&Path> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(CliError::FileNotFound(path.to_path_buf()))
    }
}

/// Loads the report configuration, or defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    match path {
        Some(path) => {
            let config = ReportConfig::from_file(require_file(path)?)
                .map_err(|e| CliError::Config(e.to_string()))?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(config)
        }
        None => Ok(ReportConfig::default()),
    }
}
