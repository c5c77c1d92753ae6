//! Storage deals.

use serde::{Deserialize, Serialize};

use super::{ClientId, Timestamp};

/// An on-chain storage deal, consuming some of a client's datacap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// The client that made the deal.
    pub client_id: ClientId,
    /// Piece size in bytes.
    pub size_bytes: u64,
    /// Deal start time.
    pub started_at: Timestamp,
}

impl Deal {
    /// Creates a new deal.
    #[must_use]
    pub fn new(client_id: ClientId, size_bytes: u64, started_at: Timestamp) -> Self {
        Self {
            client_id,
            size_bytes,
            started_at,
        }
    }
}
