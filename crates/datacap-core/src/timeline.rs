//! Per-client, time-ordered timelines.
//!
//! The tracker makes a single forward pass over both timelines of a client, so
//! ordering is checked once here rather than assumed downstream. Grouping raw
//! records by client is an explicit step ([`group_allocations`],
//! [`group_deals`]) keyed by [`ClientId`].

use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;

use crate::error::{DatacapError, DatacapResult};
use crate::types::{Allocation, ClientId, Deal, Timestamp};

/// A record that belongs to one client at one instant.
trait Timed {
    fn client_id(&self) -> &ClientId;
    fn at(&self) -> Timestamp;
}

impl Timed for Allocation {
    fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    fn at(&self) -> Timestamp {
        self.issued_at
    }
}

impl Timed for Deal {
    fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    fn at(&self) -> Timestamp {
        self.started_at
    }
}

fn validate<T: Timed>(kind: &'static str, client_id: &ClientId, records: &[T]) -> DatacapResult<()> {
    for (index, record) in records.iter().enumerate() {
        if record.client_id() != client_id {
            return Err(DatacapError::foreign_record(
                client_id.as_str(),
                record.client_id().as_str(),
            ));
        }
        if index > 0 {
            let previous = records[index - 1].at();
            if record.at() < previous {
                return Err(DatacapError::unsorted(
                    kind,
                    client_id.as_str(),
                    index,
                    previous.secs(),
                    record.at().secs(),
                ));
            }
        }
    }
    Ok(())
}

fn group<T: Timed>(
    kind: &'static str,
    records: impl IntoIterator<Item = T>,
) -> BTreeMap<ClientId, Vec<T>> {
    let mut groups: BTreeMap<ClientId, Vec<T>> = BTreeMap::new();
    let mut count = 0_usize;
    for record in records {
        count += 1;
        groups
            .entry(record.client_id().clone())
            .or_default()
            .push(record);
    }
    for records in groups.values_mut() {
        // Stable: ties keep input order.
        records.sort_by_key(|r| r.at());
    }
    debug!("Grouped {count} {kind} records into {} client timelines", groups.len());
    groups
}

/// Allocations of one client, ascending by issuance time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientAllocationTimeline {
    client_id: ClientId,
    allocations: Vec<Allocation>,
}

impl ClientAllocationTimeline {
    /// Builds a timeline from allocations already sorted by `issued_at`.
    ///
    /// Equal timestamps are allowed.
    ///
    /// # Errors
    ///
    /// Returns `DatacapError::UnsortedTimeline` if an allocation precedes the one
    /// before it, or `DatacapError::ForeignRecord` if one belongs to another client.
    pub fn new(client_id: ClientId, allocations: Vec<Allocation>) -> DatacapResult<Self> {
        validate("allocation", &client_id, &allocations)?;
        Ok(Self {
            client_id,
            allocations,
        })
    }

    /// Builds a timeline, sorting the allocations first.
    pub fn from_unsorted(
        client_id: ClientId,
        mut allocations: Vec<Allocation>,
    ) -> DatacapResult<Self> {
        allocations.sort_by_key(|a| a.issued_at);
        Self::new(client_id, allocations)
    }

    /// An empty timeline for `client_id`.
    #[must_use]
    pub fn empty(client_id: ClientId) -> Self {
        Self {
            client_id,
            allocations: Vec::new(),
        }
    }

    /// The owning client.
    #[must_use]
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// The allocations in issuance order.
    #[must_use]
    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    /// Number of allocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Returns true if there are no allocations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Sum of all allocation sizes, saturating.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.allocations
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.size))
    }

    /// Iterates the allocations in issuance order.
    pub fn iter(&self) -> std::slice::Iter<'_, Allocation> {
        self.allocations.iter()
    }
}

/// Deals of one client, ascending by start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDealTimeline {
    client_id: ClientId,
    deals: Vec<Deal>,
}

impl ClientDealTimeline {
    /// Builds a timeline from deals already sorted by `started_at`.
    ///
    /// # Errors
    ///
    /// Returns `DatacapError::UnsortedTimeline` or `DatacapError::ForeignRecord`.
    pub fn new(client_id: ClientId, deals: Vec<Deal>) -> DatacapResult<Self> {
        validate("deal", &client_id, &deals)?;
        Ok(Self { client_id, deals })
    }

    /// Builds a timeline, sorting the deals first.
    pub fn from_unsorted(client_id: ClientId, mut deals: Vec<Deal>) -> DatacapResult<Self> {
        deals.sort_by_key(|d| d.started_at);
        Self::new(client_id, deals)
    }

    /// An empty timeline, for clients that never made a deal.
    #[must_use]
    pub fn empty(client_id: ClientId) -> Self {
        Self {
            client_id,
            deals: Vec::new(),
        }
    }

    /// The owning client.
    #[must_use]
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// The deals in start order.
    #[must_use]
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// Number of deals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// Returns true if there are no deals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Iterates the deals in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, Deal> {
        self.deals.iter()
    }
}

/// Groups allocations by client into issuance-ordered timelines.
#[must_use]
pub fn group_allocations(
    allocations: impl IntoIterator<Item = Allocation>,
) -> BTreeMap<ClientId, ClientAllocationTimeline> {
    group("allocation", allocations)
        .into_iter()
        .map(|(client_id, allocations)| {
            let timeline = ClientAllocationTimeline {
                client_id: client_id.clone(),
                allocations,
            };
            (client_id, timeline)
        })
        .collect()
}

/// Groups deals by client into start-ordered timelines.
#[must_use]
pub fn group_deals(deals: impl IntoIterator<Item = Deal>) -> BTreeMap<ClientId, ClientDealTimeline> {
    group("deal", deals)
        .into_iter()
        .map(|(client_id, deals)| {
            let timeline = ClientDealTimeline {
                client_id: client_id.clone(),
                deals,
            };
            (client_id, timeline)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(client: &str, size: u64, at: i64) -> Allocation {
        Allocation::new(ClientId::new(client), size, Timestamp::from_secs(at))
    }

    fn deal(client: &str, size: u64, at: i64) -> Deal {
        Deal::new(ClientId::new(client), size, Timestamp::from_secs(at))
    }

    #[test]
    fn test_sorted_timeline_accepted() {
        let client = ClientId::new("f01");
        let timeline = ClientAllocationTimeline::new(
            client,
            vec![alloc("f01", 10, 0), alloc("f01", 20, 0), alloc("f01", 30, 5)],
        )
        .unwrap();
        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.total_size(), 60);
    }

    #[test]
    fn test_unsorted_timeline_rejected() {
        let err = ClientDealTimeline::new(
            ClientId::new("f01"),
            vec![deal("f01", 1, 100), deal("f01", 1, 50)],
        )
        .unwrap_err();
        assert_eq!(err, DatacapError::unsorted("deal", "f01", 1, 100, 50));
    }

    #[test]
    fn test_foreign_record_rejected() {
        let err = ClientAllocationTimeline::new(ClientId::new("f01"), vec![alloc("f02", 1, 0)])
            .unwrap_err();
        assert!(matches!(err, DatacapError::ForeignRecord { .. }));
    }

    #[test]
    fn test_from_unsorted_sorts() {
        let timeline = ClientDealTimeline::from_unsorted(
            ClientId::new("f01"),
            vec![deal("f01", 1, 30), deal("f01", 2, 10), deal("f01", 3, 20)],
        )
        .unwrap();
        let sizes: Vec<_> = timeline.iter().map(|d| d.size_bytes).collect();
        assert_eq!(sizes, vec![2, 3, 1]);
    }

    #[test]
    fn test_group_allocations() {
        let groups = group_allocations(vec![
            alloc("f02", 1, 50),
            alloc("f01", 2, 20),
            alloc("f02", 3, 10),
            alloc("f01", 4, 20),
        ]);
        assert_eq!(groups.len(), 2);

        let f01: Vec<_> = groups[&ClientId::new("f01")].iter().map(|a| a.size).collect();
        // Equal timestamps keep input order.
        assert_eq!(f01, vec![2, 4]);

        let f02: Vec<_> = groups[&ClientId::new("f02")].iter().map(|a| a.size).collect();
        assert_eq!(f02, vec![3, 1]);
    }

    #[test]
    fn test_group_deals_keys_ordered() {
        let groups = group_deals(vec![deal("f09", 1, 0), deal("f01", 1, 0), deal("f05", 1, 0)]);
        let keys: Vec<_> = groups.keys().map(ClientId::as_str).collect();
        assert_eq!(keys, vec!["f01", "f05", "f09"]);
    }
}
