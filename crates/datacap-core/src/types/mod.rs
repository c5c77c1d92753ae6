//! Domain types for datacap consumption analytics.
//!
//! - [`ClientId`]: Client address id (e.g. `f01234`)
//! - [`Timestamp`]: Unix-seconds instant
//! - [`Allocation`]: A datacap grant to a client
//! - [`Deal`]: An on-chain storage deal consuming datacap
//! - [`Milestone`]: Cumulative-consumption checkpoint
//! - [`Band`]: Elapsed-time range used for histograms

mod allocation;
mod band;
mod client;
mod deal;
mod milestone;
mod timestamp;

pub use allocation::Allocation;
pub use band::Band;
pub use client::ClientId;
pub use deal::Deal;
pub use milestone::Milestone;
pub use timestamp::Timestamp;
