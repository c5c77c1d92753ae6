//! Elapsed-time band classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hours-since-issuance ranges used to bucket milestone latencies.
///
/// Half-open intervals: `[0,1)`, `[1,12)`, `[12,24)`, `[24,48)`, `[48,∞)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    /// Under 1 hour (negative elapsed times included)
    UnderOneHour,
    /// 1 to 12 hours
    OneToTwelve,
    /// 12 to 24 hours
    TwelveToTwentyFour,
    /// 24 to 48 hours
    TwentyFourToFortyEight,
    /// 48 hours or more
    OverFortyEight,
}

impl Band {
    /// Number of bands.
    pub const COUNT: usize = 5;

    /// Classify elapsed hours into a band.
    ///
    /// Anything below one hour, including negative values from deals dated
    /// before their allocation, lands in [`Band::UnderOneHour`].
    #[must_use]
    pub fn from_hours(hours: f64) -> Self {
        if hours < 1.0 {
            Self::UnderOneHour
        } else if hours < 12.0 {
            Self::OneToTwelve
        } else if hours < 24.0 {
            Self::TwelveToTwentyFour
        } else if hours < 48.0 {
            Self::TwentyFourToFortyEight
        } else {
            Self::OverFortyEight
        }
    }

    /// Returns the chart label for this band.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnderOneHour => "< 1",
            Self::OneToTwelve => "1 - 12",
            Self::TwelveToTwentyFour => "12 - 24",
            Self::TwentyFourToFortyEight => "24 - 48",
            Self::OverFortyEight => "> 48",
        }
    }

    /// Position of this band in [`Band::all`].
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Returns all bands in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::UnderOneHour,
            Self::OneToTwelve,
            Self::TwelveToTwentyFour,
            Self::TwentyFourToFortyEight,
            Self::OverFortyEight,
        ]
    }

    /// Returns all band labels in order.
    #[must_use]
    pub fn labels() -> [&'static str; Self::COUNT] {
        ["< 1", "1 - 12", "12 - 24", "24 - 48", "> 48"]
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hours() {
        assert_eq!(Band::from_hours(0.0), Band::UnderOneHour);
        assert_eq!(Band::from_hours(0.99), Band::UnderOneHour);
        assert_eq!(Band::from_hours(1.0), Band::OneToTwelve);
        assert_eq!(Band::from_hours(11.9), Band::OneToTwelve);
        assert_eq!(Band::from_hours(12.0), Band::TwelveToTwentyFour);
        assert_eq!(Band::from_hours(24.0), Band::TwentyFourToFortyEight);
        assert_eq!(Band::from_hours(47.99), Band::TwentyFourToFortyEight);
        assert_eq!(Band::from_hours(48.0), Band::OverFortyEight);
        assert_eq!(Band::from_hours(10_000.0), Band::OverFortyEight);
    }

    #[test]
    fn test_negative_is_under_one_hour() {
        assert_eq!(Band::from_hours(-5.0), Band::UnderOneHour);
        assert_eq!(Band::from_hours(-0.1), Band::UnderOneHour);
    }

    #[test]
    fn test_labels_match_all() {
        let from_all: Vec<_> = Band::all().iter().map(|b| b.label()).collect();
        assert_eq!(from_all, Band::labels().to_vec());
    }

    #[test]
    fn test_ordering() {
        assert!(Band::UnderOneHour < Band::OneToTwelve);
        assert!(Band::TwentyFourToFortyEight < Band::OverFortyEight);
        assert_eq!(Band::OverFortyEight.index(), 4);
    }
}
