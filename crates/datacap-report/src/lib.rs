//! # Datacap Report
//!
//! Compliance reports for datacap verifiers.
//!
//! A report shows, for one verifier, how each client's allocations grew
//! from one grant to the next, how quickly clients turned datacap into deals,
//! and which clients need attention.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use datacap_ext_file::{load_audit_trails, load_flagged_clients, CsvDealSource, JsonClientSource};
//! use datacap_report::{build_report, ReportConfig, ReportData, ReportWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ReportConfig::default();
//! let clients = JsonClientSource::new("clients.json")?;
//! let deals = CsvDealSource::new("deals.csv")?;
//!
//! let data = ReportData::load("f01234", &clients, &deals)?
//!     .with_flagged(load_flagged_clients("flagged.json")?)
//!     .with_audit_trails(load_audit_trails("audit_trails.json")?);
//! let report = build_report(&data, &config)?;
//! ReportWriter::new(&config).write(&report)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod markdown;
pub mod report;
pub mod writer;

pub use chart::{issuance_chart, milestone_chart, milestone_charts, Bar, BarChart};
pub use color::{ColorSource, FixedPalette, RandomColorSource};
pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use format::format_time_diff;
pub use report::{build_report, ComplianceReport, ReportData};
pub use writer::{ReportWriter, WrittenReport};
