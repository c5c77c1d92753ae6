//! Unit conversions: IEC byte sizes and Filecoin chain epochs.

use crate::types::Timestamp;

/// Unix time of the Filecoin mainnet genesis block.
pub const FILECOIN_GENESIS_UNIX: i64 = 1_598_306_400;

/// Seconds per chain epoch.
pub const EPOCH_DURATION_SECS: i64 = 30;

const IEC_UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Converts a chain epoch (block height) to a unix timestamp.
///
/// Negative epochs mark an unset start (`-1` in chain state) and yield `None`.
#[must_use]
pub fn epoch_to_timestamp(epoch: i64) -> Option<Timestamp> {
    if epoch < 0 {
        return None;
    }
    epoch
        .checked_mul(EPOCH_DURATION_SECS)
        .and_then(|secs| secs.checked_add(FILECOIN_GENESIS_UNIX))
        .map(Timestamp::from_secs)
}

/// Formats a byte count with binary (IEC) prefixes.
///
/// Whole bytes print without decimals (`100 B`); larger units use two
/// (`1.50 KiB`, `2.00 GiB`).
#[must_use]
pub fn format_iec_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < IEC_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", IEC_UNITS[unit])
}
