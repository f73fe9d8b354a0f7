//! Command line interface for the marketplace simulator
//!
//! A single positional argument names the scenario file; everything else
//! tunes logging or overrides scenario values for quick experiments.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "marketsim")]
#[command(about = "Concurrent producer/consumer marketplace simulator")]
#[command(version)]
pub struct Args {
    /// Scenario file describing producers, consumers and market limits
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Override the per-producer inventory capacity from the scenario
    #[arg(short = 'q', long = "queue-size", value_name = "UNITS")]
    pub queue_size: Option<u32>,

    /// Override the producer republish wait, in seconds
    #[arg(long = "republish-wait", value_name = "SECONDS")]
    pub republish_wait: Option<f64>,

    /// Override the consumer retry wait, in seconds
    #[arg(long = "retry-wait", value_name = "SECONDS")]
    pub retry_wait: Option<f64>,

    /// Force colored log output (overrides TTY detection)
    #[arg(long = "color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path (log output goes to stderr by default)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,
}
