//! Identifier types used across the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bond identifier.
///
/// Identifiers are allocated by the ledger, are unique, and are dense
/// starting at 1. Zero is never a valid bond identifier.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BondId(pub u64);

impl BondId {
    /// Create a bond ID from its raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BondId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BondId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Account identifier for issuers, investors, and the ledger treasury.
///
/// Identity is an opaque, externally authenticated principal. The ledger
/// never interprets it beyond equality comparison and map keying.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    /// Create a new account ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bond_id_display() {
        assert_eq!(BondId::new(7).to_string(), "7");
    }

    #[test]
    fn test_account_id_roundtrip() {
        let id = AccountId::new("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(AccountId::from("alice"), id);
    }
}
