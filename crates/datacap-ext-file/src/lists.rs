//! Client annotations: flagged clients and audit trails.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use datacap_core::ClientId;

use crate::error::{SourceError, SourceResult};
use crate::read_json;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlaggedEntry {
    Record {
        #[serde(rename = "addressId")]
        address_id: String,
    },
    Id(String),
}

/// Loads the clients that received datacap from more than one verifier.
///
/// Accepts a JSON list of `{"addressId": ...}` objects or of plain ids.
/// A missing file means no client is flagged.
///
/// # Errors
///
/// Fails on unreadable or malformed JSON, or on a blank id.
pub fn load_flagged_clients(path: impl AsRef<Path>) -> SourceResult<BTreeSet<ClientId>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("Flagged clients file {} not found, no clients flagged", path.display());
        return Ok(BTreeSet::new());
    }

    let entries: Vec<FlaggedEntry> = read_json(path)?;
    let flagged = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let id = match entry {
                FlaggedEntry::Record { address_id } => address_id,
                FlaggedEntry::Id(id) => id,
            };
            ClientId::parse(&id).map_err(|e| SourceError::invalid_record(path, format!("#{i}"), e))
        })
        .collect::<SourceResult<BTreeSet<_>>>()?;

    debug!("Loaded {} flagged clients", flagged.len());
    Ok(flagged)
}

/// Loads audit-trail links keyed by client address id.
///
/// A missing file means no client has an audit trail.
///
/// # Errors
///
/// Fails on unreadable or malformed JSON, or on a blank id.
pub fn load_audit_trails(path: impl AsRef<Path>) -> SourceResult<BTreeMap<ClientId, String>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("Audit trail file {} not found, no links added", path.display());
        return Ok(BTreeMap::new());
    }

    let raw: BTreeMap<String, String> = read_json(path)?;
    let trails = raw
        .into_iter()
        .filter(|(_, url)| !url.trim().is_empty())
        .map(|(id, url)| {
            let client = ClientId::parse(&id)
                .map_err(|e| SourceError::invalid_record(path, id.clone(), e))?;
            Ok((client, url))
        })
        .collect::<SourceResult<BTreeMap<_, _>>>()?;

    debug!("Loaded {} audit trails", trails.len());
    Ok(trails)
}
