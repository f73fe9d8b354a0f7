//! Concurrent producer/consumer marketplace simulator
//!
//! Producers publish units into capacity-limited inventories and
//! consumers reserve them into carts before placing orders. The
//! [`market`] module holds the shared state, [`worker`] the async tasks
//! that drive it, and [`app`] the scenario-driven command line front end.

pub mod app;
pub mod core;
pub mod market;
pub mod worker;
