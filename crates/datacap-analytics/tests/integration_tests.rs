//! Integration tests for datacap-analytics.
//!
//! End-to-end runs from raw allocation and deal records to histogram and
//! progression output, covering the reference scenarios.

use approx::assert_relative_eq;
use datacap_analytics::prelude::*;
use datacap_core::prelude::*;

const HOUR: i64 = 3_600;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn alloc(client: &str, size: u64, at: i64) -> Allocation {
    Allocation::new(ClientId::new(client), size, Timestamp::from_secs(at))
}

fn deal(client: &str, size: u64, at: i64) -> Deal {
    Deal::new(ClientId::new(client), size, Timestamp::from_secs(at))
}

/// Three clients with different consumption patterns.
fn verifier_book() -> (Vec<Allocation>, Vec<Deal>) {
    let allocations = vec![
        // Fast consumer: one big deal 30 minutes after issuance.
        alloc("f01001", 1_000, 0),
        // Steady consumer with two allocations.
        alloc("f01002", 400, 0),
        alloc("f01002", 800, 100 * HOUR),
        // Never made a deal.
        alloc("f01003", 5_000, 0),
    ];
    let deals = vec![
        deal("f01001", 2_000, HOUR / 2),
        deal("f01002", 100, 5 * HOUR),
        deal("f01002", 100, 13 * HOUR),
        deal("f01002", 200, 30 * HOUR),
        deal("f01002", 800, 101 * HOUR),
        // Leftover deal after every allocation is complete.
        deal("f01002", 10, 200 * HOUR),
    ];
    (allocations, deals)
}

// =============================================================================
// CONSUMPTION
// =============================================================================

#[test]
fn test_reference_allocation() {
    let allocations = group_allocations(vec![alloc("f01", 100, 0)]);
    let deals = group_deals(vec![deal("f01", 30, 2 * HOUR), deal("f01", 80, 30 * HOUR)]);

    let analysis = analyze_consumption(&allocations, &deals, &AnalyticsConfig::default()).unwrap();
    let outcome = &analysis.outcomes_for(&ClientId::new("f01")).unwrap()[0];

    assert_relative_eq!(outcome.elapsed_hours(Milestone::First).unwrap(), 2.0);
    assert_relative_eq!(outcome.elapsed_hours(Milestone::Quarter).unwrap(), 2.0);
    assert_relative_eq!(outcome.elapsed_hours(Milestone::Half).unwrap(), 30.0);
    assert_relative_eq!(outcome.elapsed_hours(Milestone::ThirdQuarter).unwrap(), 30.0);
    assert_relative_eq!(outcome.elapsed_hours(Milestone::Full).unwrap(), 30.0);

    let h = &analysis.histogram;
    assert_eq!(h.get(Milestone::First, Band::OneToTwelve), 1);
    assert_eq!(h.get(Milestone::Quarter, Band::OneToTwelve), 1);
    assert_eq!(h.get(Milestone::Half, Band::TwentyFourToFortyEight), 1);
    assert_eq!(h.get(Milestone::ThirdQuarter, Band::TwentyFourToFortyEight), 1);
    assert_eq!(h.get(Milestone::Full, Band::TwentyFourToFortyEight), 1);
}

#[test]
fn test_verifier_book() {
    let (allocations, deals) = verifier_book();
    let analysis = analyze_consumption(
        &group_allocations(allocations),
        &group_deals(deals),
        &AnalyticsConfig::default(),
    )
    .unwrap();

    assert_eq!(analysis.clients.len(), 3);
    assert_eq!(analysis.allocation_count(), 4);
    assert_eq!(analysis.completed_count(), 3);

    let steady = analysis.outcomes_for(&ClientId::new("f01002")).unwrap();
    // 400 bytes: 100 @5h (25%), 200 @13h (50%), 400 @30h (75% and 100%)
    assert_relative_eq!(steady[0].elapsed_hours(Milestone::Quarter).unwrap(), 5.0);
    assert_relative_eq!(steady[0].elapsed_hours(Milestone::Half).unwrap(), 13.0);
    assert_relative_eq!(steady[0].elapsed_hours(Milestone::ThirdQuarter).unwrap(), 30.0);
    assert_relative_eq!(steady[0].elapsed_hours(Milestone::Full).unwrap(), 30.0);
    // Second allocation issued at 100h, filled by the 101h deal.
    assert_relative_eq!(steady[1].elapsed_hours(Milestone::First).unwrap(), 1.0);
    assert_relative_eq!(steady[1].elapsed_hours(Milestone::Full).unwrap(), 1.0);

    let idle = analysis.outcomes_for(&ClientId::new("f01003")).unwrap();
    assert!(idle[0].milestone_elapsed_hours.is_empty());

    let h = &analysis.histogram;
    assert_eq!(h.total(Milestone::First), 3);
    assert_eq!(h.get(Milestone::First, Band::UnderOneHour), 1);
    assert_eq!(h.get(Milestone::First, Band::OneToTwelve), 2);
    assert_eq!(h.get(Milestone::Half, Band::TwelveToTwentyFour), 1);
    assert_eq!(h.get(Milestone::Full, Band::TwentyFourToFortyEight), 1);
}

#[test]
fn test_histogram_json_shape() {
    let (allocations, deals) = verifier_book();
    let analysis = analyze_consumption(
        &group_allocations(allocations),
        &group_deals(deals),
        &AnalyticsConfig::sequential(),
    )
    .unwrap();

    let json = serde_json::to_value(&analysis.histogram).unwrap();
    let milestones = json.as_object().unwrap();
    assert_eq!(milestones.len(), 5);
    for bands in milestones.values() {
        let bands = bands.as_object().unwrap();
        assert_eq!(bands.len(), 5);
        for label in Band::labels() {
            assert!(bands.contains_key(label));
        }
    }
}

// =============================================================================
// PROGRESSION
// =============================================================================

#[test]
fn test_progression_reference() {
    let groups = group_allocations(vec![
        alloc("f01", 100, 0),
        alloc("f01", 150, 10),
        alloc("f01", 100, 20),
    ]);
    let rows = progression_rows(groups.values());

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_cells[0].as_deref(), Some("100 B"));
    assert_eq!(rows[0].display_cells[1].as_deref(), Some("150 B (150%)"));
    assert_eq!(rows[0].display_cells[2].as_deref(), Some("100 B (66.67%)"));
    assert!(rows[0].remaining_sizes.is_empty());
}

#[test]
fn test_progression_zero_previous() {
    let groups = group_allocations(vec![alloc("f01", 0, 0), alloc("f01", 50, 10)]);
    let rows = progression_rows(groups.values());
    let cell = rows[0].display_cells[1].as_deref().unwrap();
    assert_eq!(cell, "50 B");
    assert!(!cell.contains("inf"));
    assert!(!cell.contains("NaN"));
}

#[test]
fn test_progression_sorts_by_issuance() {
    let groups = group_allocations(vec![
        alloc("f01", 300, 30),
        alloc("f01", 100, 10),
        alloc("f01", 200, 20),
    ]);
    let rows = progression_rows(groups.values());
    assert_eq!(rows[0].display_cells[0].as_deref(), Some("100 B"));
    assert_eq!(rows[0].display_cells[2].as_deref(), Some("300 B (150%)"));
}

// =============================================================================
// ISSUANCE
// =============================================================================

#[test]
fn test_issuance_series() {
    let (allocations, _) = verifier_book();
    let series = daily_issuance(&allocations);
    // Issued at 0 (1970-01-01) and 100h (1970-01-05).
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].total, 1_000 + 400 + 5_000);
    assert_eq!(series[1].total, 800);
}
