//! # Datacap Analytics
//!
//! Measures how quickly allocated datacap is consumed by storage deals.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Tracking and bucketing take timelines and return values, no I/O
//! - **Explicit cursor**: The per-client deal cursor is passed in and returned, never captured
//! - **Config-driven parallelism**: Optional rayon fan-out across clients with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use datacap_analytics::prelude::*;
//! use datacap_core::prelude::*;
//!
//! let client = ClientId::new("f01234");
//! let allocations = group_allocations(vec![
//!     Allocation::new(client.clone(), 100, Timestamp::from_secs(0)),
//! ]);
//! let deals = group_deals(vec![
//!     Deal::new(client.clone(), 30, Timestamp::from_secs(2 * 3_600)),
//!     Deal::new(client.clone(), 80, Timestamp::from_secs(30 * 3_600)),
//! ]);
//!
//! let analysis = analyze_consumption(&allocations, &deals, &AnalyticsConfig::default()).unwrap();
//! assert_eq!(analysis.histogram.get(Milestone::First, Band::OneToTwelve), 1);
//! assert_eq!(analysis.histogram.get(Milestone::Full, Band::TwentyFourToFortyEight), 1);
//! ```
//!
//! ## Module Overview
//!
//! - [`tracker`] - Per-allocation milestone times over a shared deal cursor
//! - [`histogram`] - Milestone x band counts
//! - [`consumption`] - Cross-client pipeline
//! - [`progression`] - Allocation-to-allocation size change rows
//! - [`issuance`] - Daily issuance totals
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing across clients

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod consumption;
pub mod histogram;
pub mod issuance;
pub mod parallel;
pub mod progression;
pub mod tracker;

pub use config::AnalyticsConfig;
pub use consumption::{analyze_consumption, ClientConsumption, ConsumptionAnalysis};
pub use histogram::{bucketize, BandCounts, MilestoneHistogram};
pub use issuance::{daily_issuance, IssuancePoint};
pub use parallel::{maybe_parallel_fold, maybe_parallel_map};
pub use progression::{
    percentage_change, progression_row, progression_rows, AllocationProgressionRow,
    DISPLAYED_ALLOCATIONS,
};
pub use tracker::{track_allocation, track_thresholds, AllocationOutcome, DealCursor};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::AnalyticsConfig;
    pub use crate::consumption::{analyze_consumption, ClientConsumption, ConsumptionAnalysis};
    pub use crate::histogram::{bucketize, BandCounts, MilestoneHistogram};
    pub use crate::issuance::{daily_issuance, IssuancePoint};
    pub use crate::progression::{progression_row, progression_rows, AllocationProgressionRow};
    pub use crate::tracker::{track_thresholds, AllocationOutcome};
}
