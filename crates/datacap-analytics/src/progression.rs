//! Allocation progression: how each allocation compares to the one before it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use datacap_core::units::format_iec_bytes;
use datacap_core::{ClientAllocationTimeline, ClientId};

/// Number of allocations shown as individual cells.
pub const DISPLAYED_ALLOCATIONS: usize = 3;

/// One client's row in the progression table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationProgressionRow {
    /// The client.
    pub client_id: ClientId,

    /// The first three allocations, oldest first. `None` where the client has fewer.
    pub display_cells: [Option<String>; DISPLAYED_ALLOCATIONS],

    /// Sizes of every allocation after the third.
    pub remaining_sizes: Vec<String>,
}

/// Percentage of `current` relative to `previous` (`current / previous * 100`).
///
/// Rounded half away from zero to two decimal places with trailing zeros
/// dropped. `None` when `previous` is zero.
#[must_use]
pub fn percentage_change(previous: u64, current: u64) -> Option<Decimal> {
    if previous == 0 {
        return None;
    }
    let ratio = Decimal::from(current).checked_div(Decimal::from(previous))?;
    let pct = ratio.checked_mul(Decimal::ONE_HUNDRED)?;
    Some(
        pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize(),
    )
}

/// Builds the progression row for one client.
#[must_use]
pub fn progression_row(timeline: &ClientAllocationTimeline) -> AllocationProgressionRow {
    let allocations = timeline.allocations();

    let mut display_cells: [Option<String>; DISPLAYED_ALLOCATIONS] = Default::default();
    for (index, cell) in display_cells.iter_mut().enumerate() {
        let Some(current) = allocations.get(index) else {
            break;
        };
        let size = format_iec_bytes(current.size);
        let pct = index
            .checked_sub(1)
            .and_then(|prev| percentage_change(allocations[prev].size, current.size));
        *cell = Some(match pct {
            Some(pct) => format!("{size} ({pct}%)"),
            None => size,
        });
    }

    let remaining_sizes = allocations
        .iter()
        .skip(DISPLAYED_ALLOCATIONS)
        .map(|a| format_iec_bytes(a.size))
        .collect();

    AllocationProgressionRow {
        client_id: timeline.client_id().clone(),
        display_cells,
        remaining_sizes,
    }
}

/// Builds progression rows for many clients, in the order given.
#[must_use]
pub fn progression_rows<'a>(
    timelines: impl IntoIterator<Item = &'a ClientAllocationTimeline>,
) -> Vec<AllocationProgressionRow> {
    timelines.into_iter().map(progression_row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use datacap_core::{Allocation, Timestamp};
    use rust_decimal_macros::dec;

    fn timeline(sizes: &[u64]) -> ClientAllocationTimeline {
        let client = ClientId::new("f01");
        let allocations = sizes
            .iter()
            .enumerate()
            .map(|(i, s)| Allocation::new(client.clone(), *s, Timestamp::from_secs(i as i64)))
            .collect();
        ClientAllocationTimeline::new(client, allocations).unwrap()
    }

    #[test]
    fn test_percentage_change() {
        assert_eq!(percentage_change(100, 150), Some(dec!(150)));
        assert_eq!(percentage_change(150, 100), Some(dec!(66.67)));
        assert_eq!(percentage_change(3, 1), Some(dec!(33.33)));
        assert_eq!(percentage_change(8, 1), Some(dec!(12.5)));
        assert_eq!(percentage_change(0, 50), None);
    }

    #[test]
    fn test_reference_row() {
        let row = progression_row(&timeline(&[100, 150, 100]));
        assert_eq!(
            row.display_cells,
            [
                Some("100 B".to_string()),
                Some("150 B (150%)".to_string()),
                Some("100 B (66.67%)".to_string()),
            ]
        );
        assert!(row.remaining_sizes.is_empty());
    }

    #[test]
    fn test_zero_previous_omits_percentage() {
        let row = progression_row(&timeline(&[0, 50]));
        assert_eq!(row.display_cells[0].as_deref(), Some("0 B"));
        assert_eq!(row.display_cells[1].as_deref(), Some("50 B"));
        assert_eq!(row.display_cells[2], None);
    }

    #[test]
    fn test_remaining_sizes() {
        let row = progression_row(&timeline(&[1024, 2048, 4096, 8192, 1536]));
        assert_eq!(row.display_cells[1].as_deref(), Some("2.00 KiB (200%)"));
        assert_eq!(row.remaining_sizes, vec!["8.00 KiB", "1.50 KiB"]);
    }

    #[test]
    fn test_empty_timeline() {
        let row = progression_row(&ClientAllocationTimeline::empty(ClientId::new("f01")));
        assert_eq!(row.display_cells, [None, None, None]);
        assert!(row.remaining_sizes.is_empty());
    }
}
