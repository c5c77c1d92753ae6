//! Threshold tracking: how long each allocation takes to be consumed.
//!
//! For one client, allocations are walked in issuance order and deals in start
//! order. A single [`DealCursor`] is shared across the client's allocations and
//! only moves forward: the deal that completes an allocation is the last one
//! counted for it, and the next allocation starts from the deal after it. No deal
//! is ever counted toward two allocations.
//!
//! Each allocation records up to five milestones. A deal may reach several at
//! once (a deal covering the whole allocation records all five), in which case
//! they share that deal's elapsed time.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Serialize;

use datacap_core::{
    Allocation, ClientAllocationTimeline, ClientDealTimeline, DatacapError, DatacapResult, Deal,
    Milestone,
};

/// Position of the next unconsumed deal in a client's deal timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DealCursor(usize);

impl DealCursor {
    /// A cursor at the first deal.
    #[must_use]
    pub fn start() -> Self {
        Self(0)
    }

    /// Index of the next deal to examine.
    #[must_use]
    pub fn position(self) -> usize {
        self.0
    }
}

/// Milestone times for one allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationOutcome {
    /// The tracked allocation.
    pub allocation: Allocation,

    /// Hours from issuance to each reached milestone. Unreached milestones are absent.
    pub milestone_elapsed_hours: BTreeMap<Milestone, f64>,
}

impl AllocationOutcome {
    /// An outcome with nothing reached yet.
    #[must_use]
    pub fn pending(allocation: Allocation) -> Self {
        Self {
            allocation,
            milestone_elapsed_hours: BTreeMap::new(),
        }
    }

    fn record(&mut self, milestone: Milestone, hours: f64) {
        self.milestone_elapsed_hours.insert(milestone, hours);
    }

    /// Hours to reach `milestone`, if it was reached.
    #[must_use]
    pub fn elapsed_hours(&self, milestone: Milestone) -> Option<f64> {
        self.milestone_elapsed_hours.get(&milestone).copied()
    }

    /// Reached milestones with their elapsed hours, in milestone order.
    pub fn recorded(&self) -> impl Iterator<Item = (Milestone, f64)> + '_ {
        self.milestone_elapsed_hours.iter().map(|(m, h)| (*m, *h))
    }

    /// The furthest milestone reached.
    #[must_use]
    pub fn highest_reached(&self) -> Option<Milestone> {
        self.milestone_elapsed_hours.keys().next_back().copied()
    }

    /// Returns true if the allocation was fully consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.milestone_elapsed_hours.contains_key(&Milestone::Full)
    }
}

/// Tracks a single allocation against `deals`, starting at `cursor`.
///
/// Returns the outcome and the cursor for the next allocation: just past the
/// deal that reached `Full`, or the end of `deals` if it was never reached.
///
/// A zero-size allocation reaches nothing and leaves the cursor where it was.
#[must_use]
pub fn track_allocation(
    allocation: &Allocation,
    deals: &[Deal],
    cursor: DealCursor,
) -> (AllocationOutcome, DealCursor) {
    let mut outcome = AllocationOutcome::pending(allocation.clone());

    if allocation.is_empty() {
        debug!(
            "Skipping zero-size allocation for {} issued at {}",
            allocation.client_id, allocation.issued_at
        );
        return (outcome, cursor);
    }

    let mut used: u64 = 0;
    let mut pending = Some(Milestone::First);

    for (idx, deal) in deals.iter().enumerate().skip(cursor.position()) {
        let elapsed = deal.started_at.hours_since(allocation.issued_at);
        used = used.saturating_add(deal.size_bytes);

        if pending == Some(Milestone::First) && elapsed < 0.0 {
            warn!(
                "Deal for {} starts {:.2}h before its allocation was issued",
                allocation.client_id, -elapsed
            );
        }

        while let Some(milestone) = pending {
            if !milestone.is_reached(used, allocation.size) {
                break;
            }
            outcome.record(milestone, elapsed);
            pending = milestone.next();
        }

        if pending.is_none() {
            return (outcome, DealCursor(idx + 1));
        }
    }

    (outcome, DealCursor(deals.len().max(cursor.position())))
}

/// Tracks every allocation of one client against that client's deals.
///
/// # Errors
///
/// Returns `DatacapError::ForeignRecord` if the timelines belong to different clients.
pub fn track_thresholds(
    allocations: &ClientAllocationTimeline,
    deals: &ClientDealTimeline,
) -> DatacapResult<Vec<AllocationOutcome>> {
    if allocations.client_id() != deals.client_id() {
        return Err(DatacapError::foreign_record(
            allocations.client_id().as_str(),
            deals.client_id().as_str(),
        ));
    }

    let mut outcomes = Vec::with_capacity(allocations.len());
    let mut cursor = DealCursor::start();
    for allocation in allocations.iter() {
        let (outcome, next) = track_allocation(allocation, deals.deals(), cursor);
        cursor = next;
        outcomes.push(outcome);
    }

    debug!(
        "Tracked {} allocations over {} deals for {} (cursor ended at {})",
        allocations.len(),
        deals.len(),
        allocations.client_id(),
        cursor.position()
    );

    Ok(outcomes)
}
