//! Worker Tasks
//!
//! Async producers and consumers that drive a shared [`Marketplace`]:
//!
//! ```text
//!  ProducerWorker ──publish──▶ Marketplace ◀──add/remove/place── ConsumerWorker
//!       │                          │                                  │
//!       └── ProducerReport         └── capacity/restock wakeups       └── Vec<PurchaseRecord>
//! ```
//!
//! Each worker owns a shutdown receiver and cooperates with
//! [`ShutdownCoordinator`]: a worker blocked in a wait wakes up on the
//! shutdown broadcast, abandons its current plan or session, and returns
//! what it accomplished so far.
//!
//! [`Marketplace`]: crate::market::api::Marketplace
//! [`ShutdownCoordinator`]: crate::core::shutdown::ShutdownCoordinator

pub mod api;

mod consumer;
mod producer;
mod types;

pub use consumer::ConsumerWorker;
pub use producer::ProducerWorker;
pub use types::{
    duration_secs, CartOp, OpKind, ProducerReport, PurchaseRecord, Session, SupplyItem,
};

#[cfg(test)]
mod tests;
