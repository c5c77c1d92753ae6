//! # Datacap Core
//!
//! Core types, timelines, and abstractions for datacap allocation-consumption analytics.
//!
//! This crate provides the foundational building blocks used by the rest of the workspace:
//!
//! - **Types**: Domain types like [`Allocation`], [`Deal`], [`ClientId`], [`Timestamp`],
//!   plus the [`Milestone`] and [`Band`] classifications
//! - **Timelines**: Validated, time-ordered per-client sequences of allocations and deals
//! - **Traits**: Source abstractions for loading allocations and deals
//! - **Units**: IEC byte formatting and Filecoin epoch conversion
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes keep client ids and timestamps from mixing with plain values
//! - **Fail Fast**: Timelines refuse unsorted or foreign records at construction
//! - **Explicit Over Implicit**: Grouping by client is a visible construction step
//!
//! ## Example
//!
//! ```rust
//! use datacap_core::prelude::*;
//!
//! let client = ClientId::new("f01234");
//! let allocations = vec![
//!     Allocation::new(client.clone(), 100, Timestamp::from_secs(0)),
//!     Allocation::new(client.clone(), 150, Timestamp::from_secs(3_600)),
//! ];
//! let timeline = ClientAllocationTimeline::new(client, allocations).unwrap();
//! assert_eq!(timeline.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod timeline;
pub mod traits;
pub mod types;
pub mod units;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{DatacapError, DatacapResult};
    pub use crate::timeline::{
        group_allocations, group_deals, ClientAllocationTimeline, ClientDealTimeline,
    };
    pub use crate::traits::{AllocationSource, DealSource};
    pub use crate::types::{Allocation, Band, ClientId, Deal, Milestone, Timestamp};
    pub use crate::units::{epoch_to_timestamp, format_iec_bytes};
}

// Re-export commonly used types at crate root
pub use error::{DatacapError, DatacapResult};
pub use timeline::{ClientAllocationTimeline, ClientDealTimeline};
pub use types::{Allocation, Band, ClientId, Deal, Milestone, Timestamp};
