//! Public API for worker tasks
//!
//! Everything other modules need to drive the marketplace with async
//! workers: the worker types themselves, the plan and session structures
//! they consume, and the reports they produce.

pub use crate::worker::consumer::ConsumerWorker;
pub use crate::worker::producer::ProducerWorker;
pub use crate::worker::types::{
    duration_secs, CartOp, OpKind, ProducerReport, PurchaseRecord, Session, SupplyItem,
};
