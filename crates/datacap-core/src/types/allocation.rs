//! Datacap allocations.

use serde::{Deserialize, Serialize};

use super::{ClientId, Timestamp};

/// A grant of datacap to a client at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// The receiving client.
    pub client_id: ClientId,
    /// Granted capacity in bytes.
    pub size: u64,
    /// When the allocation was issued.
    pub issued_at: Timestamp,
}

impl Allocation {
    /// Creates a new allocation.
    #[must_use]
    pub fn new(client_id: ClientId, size: u64, issued_at: Timestamp) -> Self {
        Self {
            client_id,
            size,
            issued_at,
        }
    }

    /// Returns true if the allocation grants no capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
