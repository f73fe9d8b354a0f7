//! Consumer worker running cart sessions against the marketplace

use crate::core::retry::backoff;
use crate::market::api::{MarketError, MarketResult, Marketplace};
use crate::worker::types::{OpKind, PurchaseRecord, Session};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Runs a fixed list of sessions, opening a fresh cart for each one
///
/// Adds that find nothing on offer wait for a restock, capped by the
/// retry wait, and try again. Removes act on the consumer's own
/// reservations and never wait. Each completed session ends with a
/// placed order whose units are printed and collected.
pub struct ConsumerWorker {
    name: String,
    sessions: Vec<Session>,
    retry_wait: Duration,
    market: Arc<Marketplace>,
    shutdown: broadcast::Receiver<()>,
}

impl ConsumerWorker {
    pub fn new(
        name: impl Into<String>,
        sessions: Vec<Session>,
        retry_wait: Duration,
        market: Arc<Marketplace>,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            name: name.into(),
            sessions,
            retry_wait,
            market,
            shutdown,
        }
    }

    /// Run every session to completion or until shutdown
    ///
    /// Returns the purchase records accumulated so far. A session cut off
    /// by shutdown never places its cart, so its reservations stay out of
    /// the records.
    pub async fn run(self) -> MarketResult<Vec<PurchaseRecord>> {
        let Self {
            name,
            sessions,
            retry_wait,
            market,
            mut shutdown,
        } = self;

        let mut records = Vec::new();

        'sessions: for session in &sessions {
            let cart = market.new_cart()?;
            log::debug!("consumer '{}' opened cart {}", name, cart);

            for op in &session.ops {
                for _ in 0..op.quantity {
                    match op.kind {
                        OpKind::Add => loop {
                            match market.add_to_cart(cart, op.product.clone()) {
                                Ok(()) => break,
                                Err(MarketError::ProductUnavailable { .. }) => {
                                    if backoff(market.restocked(), retry_wait, &mut shutdown)
                                        .await
                                        .is_cancelled()
                                    {
                                        break 'sessions;
                                    }
                                }
                                Err(err) => {
                                    log::error!("consumer '{}' cannot reserve: {}", name, err);
                                    return Err(err);
                                }
                            }
                        },
                        OpKind::Remove => {
                            market.remove_from_cart(cart, &op.product)?;
                        }
                    }
                }
            }

            let order = market.place_order(cart)?;
            log::debug!(
                "consumer '{}' placed cart {} with {} units",
                name,
                cart,
                order.len()
            );

            for product in order {
                let record = PurchaseRecord {
                    consumer: name.clone(),
                    product,
                };
                println!("{record}");
                records.push(record);
            }
        }

        log::info!(
            "consumer '{}' stopping: {} units bought",
            name,
            records.len()
        );

        Ok(records)
    }
}
