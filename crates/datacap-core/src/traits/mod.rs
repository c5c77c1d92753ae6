//! Source traits at the boundary with external stores.
//!
//! - [`AllocationSource`]: Yields allocations granted to clients
//! - [`DealSource`]: Yields deals made by a set of clients
//!
//! Sources are loaded in full before tracking begins; partial timelines are
//! never processed.

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::timeline::{group_allocations, group_deals, ClientAllocationTimeline, ClientDealTimeline};
use crate::types::{Allocation, ClientId, Deal};

/// A store of datacap allocations.
pub trait AllocationSource: Send + Sync {
    /// Error raised while reading the store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns every allocation known to the source, in any order.
    fn allocations(&self) -> Result<Vec<Allocation>, Self::Error>;

    /// Returns allocations grouped into per-client issuance-ordered timelines.
    fn allocation_timelines(
        &self,
    ) -> Result<BTreeMap<ClientId, ClientAllocationTimeline>, Self::Error> {
        Ok(group_allocations(self.allocations()?))
    }
}

/// A store of storage deals.
pub trait DealSource: Send + Sync {
    /// Error raised while reading the store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the deals of the given clients that have a valid start time.
    fn deals_for(&self, clients: &[ClientId]) -> Result<Vec<Deal>, Self::Error>;

    /// Returns deals grouped into per-client start-ordered timelines.
    fn deal_timelines(
        &self,
        clients: &[ClientId],
    ) -> Result<BTreeMap<ClientId, ClientDealTimeline>, Self::Error> {
        Ok(group_deals(self.deals_for(clients)?))
    }
}

impl AllocationSource for Vec<Allocation> {
    type Error = Infallible;

    fn allocations(&self) -> Result<Vec<Allocation>, Self::Error> {
        Ok(self.clone())
    }
}

impl DealSource for Vec<Deal> {
    type Error = Infallible;

    fn deals_for(&self, clients: &[ClientId]) -> Result<Vec<Deal>, Self::Error> {
        Ok(self
            .iter()
            .filter(|d| clients.contains(&d.client_id))
            .cloned()
            .collect())
    }
}
