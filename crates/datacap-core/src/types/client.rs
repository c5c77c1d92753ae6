//! Client address identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DatacapError, DatacapResult};

/// Address id of a verified client, such as `f01234`.
///
/// Used as the grouping key for allocations and deals, so it orders and hashes
/// like the underlying string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a client id without validation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a client id from untrusted input, trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns `DatacapError::EmptyClientId` if nothing is left after trimming.
    pub fn parse(id: &str) -> DatacapResult<Self> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(DatacapError::EmptyClientId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id = ClientId::parse("  f01234 ").unwrap();
        assert_eq!(id.as_str(), "f01234");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ClientId::parse("   "), Err(DatacapError::EmptyClientId));
    }

    #[test]
    fn test_serde_transparent() {
        let id = ClientId::new("f0999");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"f0999\"");
    }
}
