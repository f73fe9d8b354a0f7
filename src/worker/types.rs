//! Work descriptions and results for producer and consumer tasks

use crate::market::api::{Product, ProducerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Serde adapter reading durations as fractional seconds
///
/// Scenario files express waits as plain numbers ("0.15" is 150ms).
/// Values a `Duration` cannot hold (negative, non-finite or oversized)
/// are rejected at parse time.
pub mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "wait must be a non-negative number of seconds, got {secs}"
            )));
        }
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(format!("wait of {secs:e} seconds is too large"))
        })
    }
}

/// One batch in a producer's supply plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyItem {
    /// Product to publish
    pub product: Product,
    /// Units to publish before moving on to the next item
    pub quantity: u32,
    /// Pause after every publish attempt, accepted or rejected
    #[serde(with = "duration_secs")]
    pub cooldown: Duration,
}

/// What a cart operation does with its product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Add,
    Remove,
}

/// One step of a consumer session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartOp {
    #[serde(rename = "type")]
    pub kind: OpKind,
    pub product: Product,
    pub quantity: u32,
}

/// An ordered list of cart operations ending in one placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub ops: Vec<CartOp>,
}

/// One purchased unit, attributed to the consumer that bought it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub consumer: String,
    pub product: Product,
}

impl fmt::Display for PurchaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bought {}", self.consumer, self.product)
    }
}

/// Publish counters a producer reports when it stops
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerReport {
    pub producer: ProducerId,
    pub published: u64,
    pub rejected: u64,
}
