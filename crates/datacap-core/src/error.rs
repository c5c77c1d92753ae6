//! Error types for datacap analytics.
//!
//! Only input-contract violations are errors. Degenerate arithmetic (zero-size
//! allocations, a zero previous allocation) and exhausted deal data are defined
//! outcomes and never surface here.

use thiserror::Error;

/// A specialized Result type for datacap operations.
pub type DatacapResult<T> = Result<T, DatacapError>;

/// The main error type for datacap operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatacapError {
    /// A timeline was handed over out of time order.
    #[error(
        "Unsorted {kind} timeline for client {client}: record {index} at {current} precedes {previous}"
    )]
    UnsortedTimeline {
        /// Which timeline kind ("allocation" or "deal").
        kind: &'static str,
        /// The client the timeline belongs to.
        client: String,
        /// Position of the offending record.
        index: usize,
        /// Timestamp of the record before it (unix seconds).
        previous: i64,
        /// Timestamp of the offending record (unix seconds).
        current: i64,
    },

    /// A record belongs to a different client than the timeline.
    #[error("Record for client {found} placed in timeline of client {expected}")]
    ForeignRecord {
        /// The client the timeline was built for.
        expected: String,
        /// The client named by the record.
        found: String,
    },

    /// A quantity that must be non-negative was negative.
    #[error("Negative {field}: {value}")]
    NegativeValue {
        /// The field name.
        field: String,
        /// The offending value.
        value: i64,
    },

    /// A numeric field could not be parsed.
    #[error("Invalid {field}: {value}")]
    InvalidNumber {
        /// The field name.
        field: String,
        /// The raw value.
        value: String,
    },

    /// A client id was empty.
    #[error("Client id must not be empty")]
    EmptyClientId,
}

impl DatacapError {
    /// Create an unsorted timeline error.
    #[must_use]
    pub fn unsorted(
        kind: &'static str,
        client: impl Into<String>,
        index: usize,
        previous: i64,
        current: i64,
    ) -> Self {
        Self::UnsortedTimeline {
            kind,
            client: client.into(),
            index,
            previous,
            current,
        }
    }

    /// Create a foreign record error.
    #[must_use]
    pub fn foreign_record(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ForeignRecord {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a negative value error.
    #[must_use]
    pub fn negative(field: impl Into<String>, value: i64) -> Self {
        Self::NegativeValue {
            field: field.into(),
            value,
        }
    }

    /// Create an invalid number error.
    #[must_use]
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}
