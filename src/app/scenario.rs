//! Scenario files describing a simulation run
//!
//! A scenario is a TOML document naming the market limits and the cast of
//! producers and consumers:
//!
//! ```toml
//! queue-size-per-producer = 4
//! republish-wait-time = 0.2
//! retry-wait-time = 0.05
//!
//! [[producer]]
//! name = "bakery"
//! supply = [
//!     { product = "bread", quantity = 2, cooldown = 0.01 },
//! ]
//!
//! [[consumer]]
//! name = "alice"
//!
//! [[consumer.session]]
//! ops = [
//!     { type = "add", product = "bread", quantity = 2 },
//! ]
//! ```
//!
//! Values are loaded from the file first, then command-line overrides are
//! applied, then the result is validated as a whole.

use crate::app::cli::Args;
use crate::core::error_handling::ContextualError;
use crate::worker::api::{duration_secs, OpKind, Session, SupplyItem};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating a scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Cannot read scenario file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse scenario file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid scenario: {message}")]
    Invalid { message: String },
}

impl ContextualError for ScenarioError {
    fn is_user_actionable(&self) -> bool {
        // Scenario problems are always fixable by editing the file or flags
        true
    }
}

fn invalid(message: impl Into<String>) -> ScenarioError {
    ScenarioError::Invalid {
        message: message.into(),
    }
}

fn default_wait() -> Duration {
    Duration::from_millis(100)
}

/// A producer and its supply plan
#[derive(Debug, Clone, Deserialize)]
pub struct ProducerSpec {
    pub name: String,
    #[serde(default)]
    pub supply: Vec<SupplyItem>,
}

/// A consumer and its shopping sessions
#[derive(Debug, Clone, Deserialize)]
pub struct ConsumerSpec {
    pub name: String,
    #[serde(rename = "session", default)]
    pub sessions: Vec<Session>,
}

/// Full simulation description read from a scenario file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Scenario {
    /// Inventory cap applied to every producer
    pub queue_size_per_producer: u32,

    /// How long a producer waits before retrying a rejected publish
    #[serde(with = "duration_secs", default = "default_wait")]
    pub republish_wait_time: Duration,

    /// How long a consumer waits before retrying a failed reservation
    #[serde(with = "duration_secs", default = "default_wait")]
    pub retry_wait_time: Duration,

    #[serde(rename = "producer", default)]
    pub producers: Vec<ProducerSpec>,

    #[serde(rename = "consumer", default)]
    pub consumers: Vec<ConsumerSpec>,
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub async fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ScenarioError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        toml::from_str(&contents).map_err(|err| ScenarioError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Apply command-line overrides on top of the file values
    pub fn apply_overrides(&mut self, args: &Args) -> Result<(), ScenarioError> {
        if let Some(queue_size) = args.queue_size {
            self.queue_size_per_producer = queue_size;
        }
        self.republish_wait_time = override_wait(
            args.republish_wait,
            "republish-wait",
            self.republish_wait_time,
        )?;
        self.retry_wait_time = override_wait(args.retry_wait, "retry-wait", self.retry_wait_time)?;
        Ok(())
    }

    /// Reject configurations the simulation could never run to completion
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.queue_size_per_producer == 0 {
            return Err(invalid("queue-size-per-producer must be at least 1"));
        }
        if self.consumers.is_empty() {
            return Err(invalid("at least one consumer is required"));
        }

        for producer in &self.producers {
            if producer.name.trim().is_empty() {
                return Err(invalid("producer names must not be empty"));
            }
            for item in &producer.supply {
                if item.product.as_str().trim().is_empty() {
                    return Err(invalid(format!(
                        "producer '{}' supplies a product with an empty name",
                        producer.name
                    )));
                }
                if item.quantity == 0 {
                    return Err(invalid(format!(
                        "producer '{}' supplies zero units of '{}'",
                        producer.name, item.product
                    )));
                }
            }
        }

        for consumer in &self.consumers {
            if consumer.name.trim().is_empty() {
                return Err(invalid("consumer names must not be empty"));
            }
            for session in &consumer.sessions {
                for op in &session.ops {
                    if op.product.as_str().trim().is_empty() {
                        return Err(invalid(format!(
                            "consumer '{}' references a product with an empty name",
                            consumer.name
                        )));
                    }
                    if op.quantity == 0 {
                        return Err(invalid(format!(
                            "consumer '{}' has an operation on zero units of '{}'",
                            consumer.name, op.product
                        )));
                    }
                    if op.kind == OpKind::Add && self.producers.is_empty() {
                        return Err(invalid(format!(
                            "consumer '{}' adds '{}' but the scenario has no producers",
                            consumer.name, op.product
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

fn override_wait(
    secs: Option<f64>,
    flag: &str,
    current: Duration,
) -> Result<Duration, ScenarioError> {
    match secs {
        None => Ok(current),
        Some(secs) if secs.is_finite() && secs >= 0.0 => Duration::try_from_secs_f64(secs)
            .map_err(|_| invalid(format!("--{flag} of {secs:e} seconds is too large"))),
        Some(secs) => Err(invalid(format!(
            "--{flag} must be a non-negative number of seconds, got {secs}"
        ))),
    }
}
