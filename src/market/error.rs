//! Marketplace Error Types

use crate::core::error_handling::ContextualError;
use crate::market::types::{CartId, Product, ProducerId};

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Producer inventory is full (capacity: {capacity})")]
    CapacityExceeded { capacity: u32 },

    #[error("No producer currently stocks '{product}'")]
    ProductUnavailable { product: Product },

    #[error("Producer not found: {producer}")]
    InvalidProducer { producer: ProducerId },

    #[error("Cart not found: {cart}")]
    InvalidCart { cart: CartId },

    #[error("Cart {cart} has already been placed")]
    CartAlreadyPlaced { cart: CartId },

    #[error("Product '{product}' is not in cart {cart}")]
    ProductNotInCart { cart: CartId, product: Product },

    #[error("Operation failed: {message}")]
    Internal { message: String },
}

impl MarketError {
    /// Whether a worker may usefully retry the operation after backing off.
    ///
    /// Capacity and availability are transient conditions; every other
    /// variant signals a misused handle or a broken invariant.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MarketError::CapacityExceeded { .. } | MarketError::ProductUnavailable { .. }
        )
    }
}

impl ContextualError for MarketError {
    fn is_user_actionable(&self) -> bool {
        // Market failures point at worker logic, not at something the
        // user can fix by editing a scenario or a flag
        false
    }
}

/// Result type for marketplace operations
pub type MarketResult<T> = Result<T, MarketError>;
