//! Cross-client consumption analysis.
//!
//! Clients are tracked independently (optionally in parallel) and their
//! outcomes folded into one [`MilestoneHistogram`] by summing per-worker
//! histograms, never by sharing one mutable accumulator.

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use datacap_core::{ClientAllocationTimeline, ClientDealTimeline, ClientId, DatacapResult};

use crate::config::AnalyticsConfig;
use crate::histogram::MilestoneHistogram;
use crate::parallel::{maybe_parallel_fold, maybe_parallel_map};
use crate::tracker::{track_thresholds, AllocationOutcome};

/// Outcomes for every allocation of one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientConsumption {
    /// The client.
    pub client_id: ClientId,
    /// One outcome per allocation, in issuance order.
    pub outcomes: Vec<AllocationOutcome>,
}

/// Result of tracking every client of a report.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsumptionAnalysis {
    /// Per-client outcomes, ordered by client id.
    pub clients: Vec<ClientConsumption>,
    /// Histogram accumulated over all clients.
    pub histogram: MilestoneHistogram,
}

impl ConsumptionAnalysis {
    /// Outcomes for one client.
    #[must_use]
    pub fn outcomes_for(&self, client_id: &ClientId) -> Option<&[AllocationOutcome]> {
        self.clients
            .iter()
            .find(|c| &c.client_id == client_id)
            .map(|c| c.outcomes.as_slice())
    }

    /// Number of allocations tracked.
    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.clients.iter().map(|c| c.outcomes.len()).sum()
    }

    /// Number of allocations fully consumed.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.clients
            .iter()
            .flat_map(|c| c.outcomes.iter())
            .filter(|o| o.is_complete())
            .count()
    }
}

fn track_client(
    allocations: &ClientAllocationTimeline,
    deals: &BTreeMap<ClientId, ClientDealTimeline>,
) -> DatacapResult<ClientConsumption> {
    let client_id = allocations.client_id();
    let outcomes = match deals.get(client_id) {
        Some(timeline) => track_thresholds(allocations, timeline)?,
        None => track_thresholds(allocations, &ClientDealTimeline::empty(client_id.clone()))?,
    };
    Ok(ClientConsumption {
        client_id: client_id.clone(),
        outcomes,
    })
}

/// Tracks every client with allocations and accumulates the histogram.
///
/// Clients with allocations but no deals get outcomes with nothing reached.
/// Deals of clients without allocations are ignored.
///
/// # Errors
///
/// Propagates `DatacapError::ForeignRecord` if a deal timeline is filed under
/// the wrong client.
pub fn analyze_consumption(
    allocations: &BTreeMap<ClientId, ClientAllocationTimeline>,
    deals: &BTreeMap<ClientId, ClientDealTimeline>,
    config: &AnalyticsConfig,
) -> DatacapResult<ConsumptionAnalysis> {
    let timelines: Vec<&ClientAllocationTimeline> = allocations.values().collect();

    let clients = maybe_parallel_map(&timelines, config, |timeline| track_client(timeline, deals))
        .into_iter()
        .collect::<DatacapResult<Vec<_>>>()?;

    let histogram = maybe_parallel_fold(
        &clients,
        config,
        MilestoneHistogram::new(),
        |mut histogram, client| {
            histogram.record_outcomes(&client.outcomes);
            histogram
        },
        MilestoneHistogram::merged,
    );

    debug!(
        "Analyzed {} clients ({} parallel)",
        clients.len(),
        if config.should_parallelize(timelines.len()) {
            "in"
        } else {
            "not in"
        }
    );

    Ok(ConsumptionAnalysis { clients, histogram })
}
