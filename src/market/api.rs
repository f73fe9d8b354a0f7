//! Public API for the marketplace
//!
//! This module provides the complete public API for the marketplace.
//! External modules should import from here rather than directly from
//! internal modules. See module documentation for usage examples.

// Core marketplace
pub use crate::market::marketplace::Marketplace;

// Identifier and statistics types
pub use crate::market::types::{CartId, MarketStats, Product, ProducerId};

// Cart lifecycle
pub use crate::market::cart::CartState;

// Error handling
pub use crate::market::error::{MarketError, MarketResult};
