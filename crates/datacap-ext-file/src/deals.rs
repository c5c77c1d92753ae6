//! Storage deals from a CSV export of chain state.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Deserialize;

use datacap_core::traits::DealSource;
use datacap_core::units::epoch_to_timestamp;
use datacap_core::{ClientId, DatacapError, Deal};

use crate::error::{SourceError, SourceResult};

/// Start epoch of a deal that has not started.
const UNSET_EPOCH: i64 = -1;

/// CSV record for deals.
#[derive(Debug, Deserialize)]
struct DealRecord {
    client_id: String,
    deal_value: i64,
    start_epoch: i64,
}

/// CSV-based deal source.
///
/// Columns: `client_id,deal_value,start_epoch`. Rows with an unset start
/// epoch (`-1`) are skipped.
#[derive(Debug, Clone)]
pub struct CsvDealSource {
    file_path: PathBuf,
    deals: Vec<Deal>,
}

impl CsvDealSource {
    /// Create a new CSV deal source.
    ///
    /// A missing file yields an empty source.
    ///
    /// # Errors
    ///
    /// Fails on malformed rows, negative values, or blank client ids.
    pub fn new(file_path: impl AsRef<Path>) -> SourceResult<Self> {
        let mut source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            deals: Vec::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload deals from file.
    ///
    /// # Errors
    ///
    /// See [`CsvDealSource::new`].
    pub fn reload(&mut self) -> SourceResult<()> {
        self.deals.clear();
        if !self.file_path.exists() {
            warn!("Deal file {} not found, no deals loaded", self.file_path.display());
            return Ok(());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| SourceError::csv(&self.file_path, e))?;

        let mut skipped = 0_usize;
        for (row, result) in reader.deserialize().enumerate() {
            let record: DealRecord = result.map_err(|e| SourceError::csv(&self.file_path, e))?;
            let row_label = format!("row {}", row + 1);
            let invalid = |e| SourceError::invalid_record(&self.file_path, row_label.clone(), e);

            if record.start_epoch == UNSET_EPOCH {
                skipped += 1;
                continue;
            }

            let client_id = ClientId::parse(&record.client_id).map_err(invalid)?;
            let size_bytes = u64::try_from(record.deal_value)
                .map_err(|_| invalid(DatacapError::negative("deal_value", record.deal_value)))?;
            let started_at = epoch_to_timestamp(record.start_epoch)
                .ok_or_else(|| invalid(DatacapError::negative("start_epoch", record.start_epoch)))?;

            self.deals.push(Deal::new(client_id, size_bytes, started_at));
        }

        debug!(
            "Loaded {} deals from {} ({} without start epoch skipped)",
            self.deals.len(),
            self.file_path.display(),
            skipped
        );
        Ok(())
    }

    /// All loaded deals, in file order.
    #[must_use]
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }
}

impl DealSource for CsvDealSource {
    type Error = SourceError;

    fn deals_for(&self, clients: &[ClientId]) -> Result<Vec<Deal>, Self::Error> {
        let wanted: BTreeSet<&ClientId> = clients.iter().collect();
        Ok(self
            .deals
            .iter()
            .filter(|d| wanted.contains(&d.client_id))
            .cloned()
            .collect())
    }
}
