//! Cumulative-consumption milestones.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A checkpoint in the consumption of a single allocation.
///
/// Milestones are reached strictly in declaration order. `First` is reached by
/// the first deal following the allocation; the rest by cumulative deal volume
/// reaching a quarter, half, three quarters, and all of the allocation size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// First deal after issuance
    First,
    /// At least 25% consumed
    Quarter,
    /// At least 50% consumed
    Half,
    /// At least 75% consumed
    ThirdQuarter,
    /// Fully consumed
    Full,
}

impl Milestone {
    /// Number of milestones.
    pub const COUNT: usize = 5;

    /// Returns all milestones in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::First,
            Self::Quarter,
            Self::Half,
            Self::ThirdQuarter,
            Self::Full,
        ]
    }

    /// Position of this milestone in [`Milestone::all`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The milestone after this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::all().get(self.index() + 1).copied()
    }

    /// Required consumption in quarters of the allocation size.
    ///
    /// `First` requires none: any deal reaches it.
    #[must_use]
    pub fn quarters(self) -> u8 {
        self as u8
    }

    /// Returns true once `used` bytes satisfy this milestone for an allocation of `size` bytes.
    ///
    /// Compared exactly in integer arithmetic. A zero `size` satisfies nothing.
    #[must_use]
    pub fn is_reached(self, used: u64, size: u64) -> bool {
        if size == 0 {
            return false;
        }
        u128::from(used) * 4 >= u128::from(size) * u128::from(self.quarters())
    }

    /// Short key used in chart titles and file names.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Quarter => "quarter",
            Self::Half => "half",
            Self::ThirdQuarter => "third",
            Self::Full => "full",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "First deal",
            Self::Quarter => "25%",
            Self::Half => "50%",
            Self::ThirdQuarter => "75%",
            Self::Full => "100%",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
