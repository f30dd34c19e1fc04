//! Typed identifiers

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product identifier. Integer in the persisted form; seeded catalogs use
/// small values, seller-created products use millisecond timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Owning seller of a product. The `system` sentinel marks house products
/// that belong to no dashboard and never receive order notifications.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

pub const SYSTEM_SELLER: &str = "system";

impl SellerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn system() -> Self {
        Self(SYSTEM_SELLER.to_string())
    }

    pub fn is_system(&self) -> bool {
        self.0 == SYSTEM_SELLER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuyerId(String);

impl BuyerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuyerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public order identifier: tracking prefix plus generation timestamp.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite identity of a cart line: product plus chosen options plus
/// subscription plus negotiated price. Equal ids always merge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Timestamp-derived id source. Ids are `<prefix>-<millis>`; the generator
/// bumps past the last issued millisecond so two ids minted in the same
/// instant stay distinct while the sequence remains roughly chronological.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_ms: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str) -> String {
        let now = Utc::now().timestamp_millis();
        self.last_ms = if now > self.last_ms { now } else { self.last_ms + 1 };
        format!("{prefix}-{}", self.last_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_sentinel() {
        assert!(SellerId::system().is_system());
        assert!(!SellerId::new("seller-1").is_system());
    }

    #[test]
    fn test_generator_never_repeats() {
        let mut ids = IdGenerator::new();
        let a = ids.next("SK");
        let b = ids.next("SK");
        let c = ids.next("SK");
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(a.starts_with("SK-"));
    }
}
