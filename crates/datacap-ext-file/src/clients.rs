//! Verified clients of a verifier, as returned by the datacap stats API.

use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use datacap_core::traits::AllocationSource;
use datacap_core::{Allocation, ClientId, DatacapError, DatacapResult, Timestamp};

use crate::error::{SourceError, SourceResult};
use crate::read_json;

// =============================================================================
// RECORDS
// =============================================================================

/// A JSON quantity sent either as a number or as a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JsonAmount {
    /// Non-negative integer.
    Unsigned(u64),
    /// Negative integer.
    Signed(i64),
    /// Number with a fractional part or exponent.
    Float(f64),
    /// Decimal string.
    Text(String),
}

impl JsonAmount {
    /// Converts to a byte count.
    ///
    /// # Errors
    ///
    /// `NegativeValue` for negative amounts, `InvalidNumber` for anything that
    /// is not a whole number.
    pub fn to_u64(&self, field: &str) -> DatacapResult<u64> {
        match self {
            Self::Unsigned(v) => Ok(*v),
            Self::Signed(v) => Err(DatacapError::negative(field, *v)),
            Self::Float(v) => {
                if v.is_finite() && v.fract() == 0.0 && *v >= 0.0 && *v <= u64::MAX as f64 {
                    Ok(*v as u64)
                } else if v.is_finite() && *v < 0.0 {
                    Err(DatacapError::negative(field, *v as i64))
                } else {
                    Err(DatacapError::invalid_number(field, v.to_string()))
                }
            }
            Self::Text(s) => {
                let s = s.trim();
                if let Ok(v) = s.parse::<u64>() {
                    return Ok(v);
                }
                match s.parse::<i64>() {
                    Ok(v) if v < 0 => Err(DatacapError::negative(field, v)),
                    _ => Err(DatacapError::invalid_number(field, s)),
                }
            }
        }
    }
}

/// One datacap grant to a client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceEntry {
    /// Granted bytes.
    pub allowance: JsonAmount,
    /// Unix seconds of the grant message.
    pub create_message_timestamp: i64,
}

/// A verified client and its allowance history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedClient {
    /// On-chain address id (`f0...`).
    pub address_id: String,
    /// Robust address.
    #[serde(default)]
    pub address: Option<String>,
    /// Display name, if registered.
    #[serde(default)]
    pub name: Option<String>,
    /// Grants in the order the API returned them.
    #[serde(default)]
    pub allowance_array: Vec<AllowanceEntry>,
    /// Link to the client's CID checker report.
    #[serde(default)]
    pub cid_report_url: Option<String>,
}

impl VerifiedClient {
    /// The client id.
    ///
    /// # Errors
    ///
    /// `EmptyClientId` when the address id is blank.
    pub fn client_id(&self) -> DatacapResult<ClientId> {
        ClientId::parse(&self.address_id)
    }

    /// Number of grants.
    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.allowance_array.len()
    }

    /// Sum of all grants in bytes.
    ///
    /// # Errors
    ///
    /// Propagates amount conversion errors.
    pub fn total_allowance(&self) -> DatacapResult<u64> {
        self.allowance_array.iter().try_fold(0_u64, |acc, entry| {
            Ok(acc.saturating_add(entry.allowance.to_u64("allowance")?))
        })
    }

    /// The grants as allocations.
    ///
    /// # Errors
    ///
    /// Propagates id and amount validation errors; a negative grant
    /// timestamp is rejected.
    pub fn allocations(&self) -> DatacapResult<Vec<Allocation>> {
        let client_id = self.client_id()?;
        self.allowance_array
            .iter()
            .map(|entry| {
                if entry.create_message_timestamp < 0 {
                    return Err(DatacapError::negative(
                        "createMessageTimestamp",
                        entry.create_message_timestamp,
                    ));
                }
                Ok(Allocation::new(
                    client_id.clone(),
                    entry.allowance.to_u64("allowance")?,
                    Timestamp::from_secs(entry.create_message_timestamp),
                ))
            })
            .collect()
    }
}

/// Accepted document layouts: an API page (`{count, data}`) or a bare list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClientsDocument {
    Page {
        #[serde(default)]
        count: Option<JsonAmount>,
        data: Vec<VerifiedClient>,
    },
    List(Vec<VerifiedClient>),
}

// =============================================================================
// JSON CLIENT SOURCE
// =============================================================================

/// JSON-file source of a verifier's verified clients.
#[derive(Debug, Clone)]
pub struct JsonClientSource {
    file_path: PathBuf,
    clients: Vec<VerifiedClient>,
    total_count: u64,
}

impl JsonClientSource {
    /// Loads clients from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails when the file is missing, is not valid JSON, or has an invalid
    /// `count`.
    pub fn new(file_path: impl AsRef<Path>) -> SourceResult<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        let document: ClientsDocument = read_json(&file_path)?;

        let (count, clients) = match document {
            ClientsDocument::Page { count, data } => (count, data),
            ClientsDocument::List(data) => (None, data),
        };
        let total_count = match count {
            Some(count) => count
                .to_u64("count")
                .map_err(|e| SourceError::invalid_record(&file_path, "count", e))?,
            None => clients.len() as u64,
        };

        debug!(
            "Loaded {} verified clients ({} reported) from {}",
            clients.len(),
            total_count,
            file_path.display()
        );

        Ok(Self {
            file_path,
            clients,
            total_count,
        })
    }

    /// Builds a source from already-parsed clients.
    #[must_use]
    pub fn from_clients(clients: Vec<VerifiedClient>) -> Self {
        let total_count = clients.len() as u64;
        Self {
            file_path: PathBuf::new(),
            clients,
            total_count,
        }
    }

    /// The clients, in file order.
    #[must_use]
    pub fn clients(&self) -> &[VerifiedClient] {
        &self.clients
    }

    /// Number of clients the verifier has in total.
    ///
    /// May exceed `clients().len()` when the file holds one page of a larger
    /// result.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Looks up a client by address id.
    #[must_use]
    pub fn get(&self, client_id: &ClientId) -> Option<&VerifiedClient> {
        self.clients
            .iter()
            .find(|c| c.address_id.trim() == client_id.as_str())
    }

    /// Ids of every client, in file order.
    ///
    /// # Errors
    ///
    /// Fails on a blank address id.
    pub fn client_ids(&self) -> SourceResult<Vec<ClientId>> {
        self.clients
            .iter()
            .enumerate()
            .map(|(i, c)| {
                c.client_id()
                    .map_err(|e| SourceError::invalid_record(&self.file_path, format!("#{i}"), e))
            })
            .collect()
    }
}

impl AllocationSource for JsonClientSource {
    type Error = SourceError;

    fn allocations(&self) -> Result<Vec<Allocation>, Self::Error> {
        let mut allocations = Vec::new();
        for client in &self.clients {
            let granted = client.allocations().map_err(|e| {
                SourceError::invalid_record(&self.file_path, client.address_id.clone(), e)
            })?;
            allocations.extend(granted);
        }
        Ok(allocations)
    }
}
