//! Producer worker cycling through a supply plan

use crate::core::retry::{backoff, pause};
use crate::market::api::{MarketError, MarketResult, Marketplace};
use crate::worker::types::{ProducerReport, SupplyItem};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// Publishes its supply plan unit by unit, restarting the plan from the
/// top when it runs out, until shutdown is requested
///
/// Every attempt is followed by the item's cooldown. A rejected attempt
/// additionally waits for marketplace capacity to free up, capped by the
/// republish wait so a missed wakeup only costs one extra round.
pub struct ProducerWorker {
    name: String,
    supply: Vec<SupplyItem>,
    republish_wait: Duration,
    market: Arc<Marketplace>,
    shutdown: broadcast::Receiver<()>,
}

impl ProducerWorker {
    pub fn new(
        name: impl Into<String>,
        supply: Vec<SupplyItem>,
        republish_wait: Duration,
        market: Arc<Marketplace>,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            name: name.into(),
            supply,
            republish_wait,
            market,
            shutdown,
        }
    }

    /// Run until shutdown, then report how many units were published
    ///
    /// Capacity rejections are retried indefinitely; any other publish
    /// failure ends the run with that error.
    pub async fn run(self) -> MarketResult<ProducerReport> {
        let Self {
            name,
            supply,
            republish_wait,
            market,
            mut shutdown,
        } = self;

        let producer = market.register_producer()?;
        log::debug!("producer '{}' registered as producer {}", name, producer);

        let mut published: u64 = 0;
        let mut rejected: u64 = 0;

        'production: loop {
            if supply.is_empty() {
                // Nothing to publish; park until shutdown
                let _ = shutdown.recv().await;
                break;
            }

            for item in &supply {
                let mut remaining = item.quantity;
                while remaining > 0 {
                    let accepted = match market.publish(producer, item.product.clone()) {
                        Ok(()) => true,
                        Err(MarketError::CapacityExceeded { .. }) => false,
                        Err(err) => {
                            log::error!("producer '{}' cannot publish: {}", name, err);
                            return Err(err);
                        }
                    };

                    if accepted {
                        published += 1;
                        remaining -= 1;
                        log::trace!("producer '{}' published {}", name, item.product);
                    } else {
                        rejected += 1;
                        log::trace!(
                            "producer '{}' rejected on {}, inventory full",
                            name,
                            item.product
                        );
                    }

                    if pause(item.cooldown, &mut shutdown).await.is_cancelled() {
                        break 'production;
                    }

                    if !accepted
                        && backoff(market.capacity_freed(), republish_wait, &mut shutdown)
                            .await
                            .is_cancelled()
                    {
                        break 'production;
                    }
                }
            }
        }

        log::info!(
            "producer '{}' stopping: {} published, {} rejected",
            name,
            published,
            rejected
        );

        Ok(ProducerReport {
            producer,
            published,
            rejected,
        })
    }
}
