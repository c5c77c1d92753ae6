//! Milestone latency histograms.
//!
//! A [`MilestoneHistogram`] holds, for each of the five milestones, a count per
//! elapsed-time [`Band`]. Every cell exists from construction, so renderers never
//! have to fill in missing bands. Histograms from independent clients combine
//! with [`MilestoneHistogram::merge`].

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use datacap_core::{Band, Milestone};

use crate::tracker::AllocationOutcome;

/// Counts per elapsed-time band for one milestone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandCounts([u64; Band::COUNT]);

impl BandCounts {
    /// All bands at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count in `band`.
    #[must_use]
    pub fn get(&self, band: Band) -> u64 {
        self.0[band.index()]
    }

    /// Adds one to `band`.
    pub fn increment(&mut self, band: Band) {
        self.0[band.index()] += 1;
    }

    /// Sum across bands.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Bands and counts in band order.
    pub fn iter(&self) -> impl Iterator<Item = (Band, u64)> + '_ {
        Band::all().iter().map(move |b| (*b, self.get(*b)))
    }

    /// Counts in band order.
    #[must_use]
    pub fn values(&self) -> [u64; Band::COUNT] {
        self.0
    }

    /// Adds another set of counts into this one.
    pub fn merge(&mut self, other: &BandCounts) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }
}

impl Serialize for BandCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Band::COUNT))?;
        for (band, count) in self.iter() {
            map.serialize_entry(band.label(), &count)?;
        }
        map.end()
    }
}

/// Band counts for every milestone, accumulated across clients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MilestoneHistogram([BandCounts; Milestone::COUNT]);

impl MilestoneHistogram {
    /// An empty histogram with every cell at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one milestone reached after `hours`.
    pub fn record(&mut self, milestone: Milestone, hours: f64) {
        self.0[milestone.index()].increment(Band::from_hours(hours));
    }

    /// Counts every milestone reached by one allocation. Unreached ones add nothing.
    pub fn record_outcome(&mut self, outcome: &AllocationOutcome) {
        for (milestone, hours) in outcome.recorded() {
            self.record(milestone, hours);
        }
    }

    /// Counts a batch of outcomes.
    pub fn record_outcomes<'a>(&mut self, outcomes: impl IntoIterator<Item = &'a AllocationOutcome>) {
        for outcome in outcomes {
            self.record_outcome(outcome);
        }
    }

    /// Band counts for `milestone`.
    #[must_use]
    pub fn counts(&self, milestone: Milestone) -> &BandCounts {
        &self.0[milestone.index()]
    }

    /// A single cell.
    #[must_use]
    pub fn get(&self, milestone: Milestone, band: Band) -> u64 {
        self.counts(milestone).get(band)
    }

    /// Number of allocations that reached `milestone`.
    #[must_use]
    pub fn total(&self, milestone: Milestone) -> u64 {
        self.counts(milestone).total()
    }

    /// Milestones and their counts in milestone order.
    pub fn iter(&self) -> impl Iterator<Item = (Milestone, &BandCounts)> + '_ {
        Milestone::all().iter().map(move |m| (*m, self.counts(*m)))
    }

    /// Adds another histogram's counts into this one.
    pub fn merge(&mut self, other: &MilestoneHistogram) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            mine.merge(theirs);
        }
    }

    /// Consuming merge, for fold/reduce pipelines.
    #[must_use]
    pub fn merged(mut self, other: MilestoneHistogram) -> Self {
        self.merge(&other);
        self
    }

    /// Nested map view: milestone to band to count, all 25 cells present.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<Milestone, BTreeMap<Band, u64>> {
        self.iter()
            .map(|(m, counts)| (m, counts.iter().collect()))
            .collect()
    }
}

impl Serialize for MilestoneHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Milestone::COUNT))?;
        for (milestone, counts) in self.iter() {
            map.serialize_entry(milestone.key(), counts)?;
        }
        map.end()
    }
}

/// Buckets a sequence of outcomes into a fresh histogram.
#[must_use]
pub fn bucketize<'a>(outcomes: impl IntoIterator<Item = &'a AllocationOutcome>) -> MilestoneHistogram {
    let mut histogram = MilestoneHistogram::new();
    histogram.record_outcomes(outcomes);
    histogram
}
