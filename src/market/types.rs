//! Identifier and statistics types for the marketplace

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle returned by producer registration
///
/// Ids are allocated sequentially in registration order and are never
/// reused for the lifetime of a marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProducerId(pub u64);

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle returned when a consumer opens a new cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub u64);

impl fmt::Display for CartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product identifier traded through the marketplace
///
/// Products are compared by identifier only; two units of the same product
/// are interchangeable no matter which producer published them.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product(String);

impl Product {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Product {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Product {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Product {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Point-in-time counters for the marketplace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketStats {
    /// Number of registered producers
    pub producers: usize,
    /// Number of carts ever created, open and placed
    pub carts: usize,
    /// Number of carts that have been placed
    pub placed_carts: usize,
    /// Units currently on offer across all producers
    pub available_units: u64,
    /// Units currently reserved in open carts
    pub reserved_units: u64,
}
