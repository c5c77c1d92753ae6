//! Datacap issuance over time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::warn;
use serde::Serialize;

use datacap_core::Allocation;

/// Total datacap issued on one UTC calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IssuancePoint {
    /// The day.
    pub date: NaiveDate,
    /// Bytes issued that day, across all clients.
    pub total: u64,
}

/// Sums allocation sizes per UTC day, oldest day first.
///
/// Allocations whose timestamp cannot be represented as a date are skipped.
#[must_use]
pub fn daily_issuance<'a>(allocations: impl IntoIterator<Item = &'a Allocation>) -> Vec<IssuancePoint> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for allocation in allocations {
        match allocation.issued_at.utc_date() {
            Some(date) => {
                let total = by_day.entry(date).or_default();
                *total = total.saturating_add(allocation.size);
            }
            None => warn!(
                "Skipping allocation for {} with out-of-range timestamp {}",
                allocation.client_id,
                allocation.issued_at.secs()
            ),
        }
    }

    by_day
        .into_iter()
        .map(|(date, total)| IssuancePoint { date, total })
        .collect()
}
