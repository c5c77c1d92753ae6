//! Unix-seconds timestamps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// An instant in unix seconds.
///
/// Allocation issuance and deal start times are both expressed in this unit,
/// so elapsed time is a plain subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix seconds.
    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the unix seconds.
    #[must_use]
    pub const fn secs(&self) -> i64 {
        self.0
    }

    /// Hours elapsed from `earlier` to `self`.
    ///
    /// Negative when `self` precedes `earlier`; the sign is kept.
    #[must_use]
    pub fn hours_since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0) as f64 / SECONDS_PER_HOUR
    }

    /// Converts to a UTC date-time, if representable.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// The UTC calendar day this instant falls on.
    #[must_use]
    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.to_datetime().map(|dt| dt.date_naive())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "@{}", self.0),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}
