//! Property-based tests for timeline construction.
//!
//! - Grouping keeps every record and sorts each client's timeline
//! - Grouped timelines always pass validation
//! - Band classification is total and monotonic in elapsed hours

use datacap_core::prelude::*;
use proptest::prelude::*;

fn arb_allocation() -> impl Strategy<Value = Allocation> {
    (0u8..4, 0u64..1_000_000, -10_000i64..10_000_000).prop_map(|(client, size, at)| {
        Allocation::new(
            ClientId::new(format!("f0{client}")),
            size,
            Timestamp::from_secs(at),
        )
    })
}

fn arb_deal() -> impl Strategy<Value = Deal> {
    (0u8..4, 0u64..1_000_000, 0i64..10_000_000).prop_map(|(client, size, at)| {
        Deal::new(
            ClientId::new(format!("f0{client}")),
            size,
            Timestamp::from_secs(at),
        )
    })
}

proptest! {
    #[test]
    fn grouping_preserves_and_sorts_allocations(records in prop::collection::vec(arb_allocation(), 0..60)) {
        let total = records.len();
        let groups = group_allocations(records);

        let grouped: usize = groups.values().map(ClientAllocationTimeline::len).sum();
        prop_assert_eq!(grouped, total);

        for (client, timeline) in &groups {
            prop_assert_eq!(timeline.client_id(), client);
            let rebuilt = ClientAllocationTimeline::new(client.clone(), timeline.allocations().to_vec());
            prop_assert!(rebuilt.is_ok());
        }
    }

    #[test]
    fn grouping_preserves_and_sorts_deals(records in prop::collection::vec(arb_deal(), 0..60)) {
        let total = records.len();
        let groups = group_deals(records);

        let grouped: usize = groups.values().map(ClientDealTimeline::len).sum();
        prop_assert_eq!(grouped, total);

        for timeline in groups.values() {
            for pair in timeline.deals().windows(2) {
                prop_assert!(pair[0].started_at <= pair[1].started_at);
            }
        }
    }

    #[test]
    fn band_is_monotonic(a in -100.0f64..500.0, b in -100.0f64..500.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Band::from_hours(lo) <= Band::from_hours(hi));
    }
}
