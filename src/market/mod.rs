//! Marketplace Component
//!
//! A thread-safe marketplace that mediates between producers publishing
//! capacity-capped inventory and consumers reserving units into carts.
//!
//! # Overview
//!
//! This module provides the shared state at the centre of the simulator.
//! Key features include:
//!
//! - **Multiple Producers**: Any number of producers publish concurrently,
//!   each against its own capacity-capped inventory
//! - **Multiple Consumers**: Consumers build carts independently; a unit
//!   reserved into one cart is invisible to every other cart
//! - **Atomic Reservations**: A unit moves between inventory and cart in a
//!   single step, so no interleaving sees it in both places or in neither
//! - **Cart Lifecycle**: Carts accept changes until placed, then freeze
//! - **Wakeup Hooks**: Waiting workers sleep on notifications instead of
//!   polling the shared state
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐      ┌──────────────┐      ┌──────────────┐
//! │  Producer 0  │      │  Producer 1  │      │  Producer 2  │
//! └──────┬───────┘      └──────┬───────┘      └──────┬───────┘
//!        │ publish             │ publish             │ publish
//!        ▼                     ▼                     ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Marketplace                          │
//! │   ┌───────────────┐  ┌───────────────┐  ┌───────────────┐  │
//! │   │ inventory #0  │  │ inventory #1  │  │ inventory #2  │  │
//! │   │  (≤ capacity) │  │  (≤ capacity) │  │  (≤ capacity) │  │
//! │   └───────┬───────┘  └───────┬───────┘  └───────┬───────┘  │
//! │           └──────────────────┼──────────────────┘          │
//! │                              │ reserve / release           │
//! │           ┌──────────────────┼──────────────────┐          │
//! │   ┌───────┴───────┐  ┌───────┴───────┐  ┌───────┴───────┐  │
//! │   │    cart #0    │  │    cart #1    │  │    cart #2    │  │
//! │   └───────────────┘  └───────────────┘  └───────────────┘  │
//! └───────────┬──────────────────┬──────────────────┬──────────┘
//!             │ place_order      │ place_order      │
//!      ┌──────┴─────┐     ┌──────┴─────┐     ┌──────┴─────┐
//!      │ Consumer A │     │ Consumer B │     │ Consumer C │
//!      └────────────┘     └────────────┘     └────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use marketsim::market::api::{Marketplace, Product};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), marketsim::market::api::MarketError> {
//! // Each producer may have at most 4 units on offer at once
//! let market = Arc::new(Marketplace::new(4));
//!
//! // Producers register once, then publish unit by unit
//! let producer = market.register_producer()?;
//! market.publish(producer, Product::from("bread"))?;
//! market.publish(producer, Product::from("butter"))?;
//!
//! // Consumers reserve units into carts, then place the order
//! let cart = market.new_cart()?;
//! market.add_to_cart(cart, Product::from("bread"))?;
//! market.add_to_cart(cart, Product::from("butter"))?;
//! market.remove_from_cart(cart, &Product::from("butter"))?;
//!
//! let order = market.place_order(cart)?;
//! assert_eq!(order, vec![Product::from("bread")]);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod cart;
mod error;
mod inventory;
mod marketplace;
mod types;

pub use cart::CartState;
pub use error::{MarketError, MarketResult};
pub use marketplace::Marketplace;
pub use types::{CartId, MarketStats, Product, ProducerId};

#[cfg(test)]
mod tests;
