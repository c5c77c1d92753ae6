//! # Datacap Ext File
//!
//! File-based sources for datacap analytics.
//!
//! This crate provides default implementations for offline runs and tests:
//! - JSON verified-clients source (datacap stats API response shape)
//! - CSV deal source (chain state export with start epochs)
//! - JSON flagged-clients list and audit-trail map
//!
//! The sources implement the [`AllocationSource`](datacap_core::traits::AllocationSource)
//! and [`DealSource`](datacap_core::traits::DealSource) seams.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod clients;
mod deals;
mod error;
mod lists;

pub use clients::*;
pub use deals::*;
pub use error::*;
pub use lists::*;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Reads and parses a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> SourceResult<T> {
    let file = File::open(path).map_err(|e| SourceError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| SourceError::json(path, e))
}

/// Loads a verifier's clients and their deals.
///
/// # Errors
///
/// Propagates loader errors from either file.
pub fn create_file_sources(
    clients_json: impl AsRef<Path>,
    deals_csv: impl AsRef<Path>,
) -> SourceResult<(JsonClientSource, CsvDealSource)> {
    Ok((
        JsonClientSource::new(clients_json)?,
        CsvDealSource::new(deals_csv)?,
    ))
}
