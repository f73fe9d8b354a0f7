//! Application startup and simulation orchestration
//!
//! Wires the pieces together: parse arguments, initialize logging, load
//! and validate the scenario, then run producer and consumer workers on a
//! multi-threaded runtime until every consumer is done or a signal stops
//! the run early.

use crate::app::cli::Args;
use crate::app::scenario::Scenario;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::shutdown::ShutdownCoordinator;
use crate::core::version;
use crate::market::api::Marketplace;
use crate::worker::api::{ConsumerWorker, ProducerWorker};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Parse arguments, set up logging and run the simulation
///
/// Returns the process exit code; purchase records go to stdout, all
/// diagnostics to stderr or the log file.
pub fn run() -> i32 {
    let args = Args::parse();

    let use_color = (args.color || std::io::stderr().is_terminal()) && !args.no_color;
    if let Err(err) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        args.log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: cannot initialize logging: {err}");
        return 1;
    }

    log::info!(
        "marketsim {} ({}, built {}) starting",
        env!("CARGO_PKG_VERSION"),
        version::git_hash(),
        version::build_time()
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            log::error!("FATAL: cannot start async runtime: {}", err);
            return 1;
        }
    };

    runtime.block_on(execute(args))
}

/// Load, override and validate the scenario, then simulate it
async fn execute(args: Args) -> i32 {
    let mut scenario = match Scenario::load(&args.scenario).await {
        Ok(scenario) => scenario,
        Err(err) => {
            log_error_with_context(&err, "loading scenario");
            return 1;
        }
    };

    if let Err(err) = scenario.apply_overrides(&args) {
        log_error_with_context(&err, "applying command-line overrides");
        return 1;
    }

    if let Err(err) = scenario.validate() {
        log_error_with_context(&err, "validating scenario");
        return 1;
    }

    simulate(scenario).await
}

/// Run all workers to completion and report what the market did
async fn simulate(scenario: Scenario) -> i32 {
    let market = Arc::new(Marketplace::new(scenario.queue_size_per_producer));
    let (coordinator, _shutdown_rx) = ShutdownCoordinator::new();
    coordinator.install_signal_handlers();

    log::info!(
        "simulating {} producer(s) and {} consumer(s), capacity {} per producer",
        scenario.producers.len(),
        scenario.consumers.len(),
        scenario.queue_size_per_producer
    );

    let mut producers = JoinSet::new();
    for spec in &scenario.producers {
        let worker = ProducerWorker::new(
            spec.name.clone(),
            spec.supply.clone(),
            scenario.republish_wait_time,
            Arc::clone(&market),
            coordinator.subscribe(),
        );
        producers.spawn(worker.run());
    }

    let mut consumers = JoinSet::new();
    for spec in &scenario.consumers {
        let worker = ConsumerWorker::new(
            spec.name.clone(),
            spec.sessions.clone(),
            scenario.retry_wait_time,
            Arc::clone(&market),
            coordinator.subscribe(),
        );
        consumers.spawn(worker.run());
    }

    // Consumers finish on their own; producers run until told to stop
    let mut purchased: usize = 0;
    let mut failed = false;
    while let Some(joined) = consumers.join_next().await {
        match joined {
            Ok(Ok(records)) => purchased += records.len(),
            Ok(Err(err)) => {
                log_error_with_context(&err, "running consumer");
                failed = true;
            }
            Err(err) => {
                log::error!("FATAL: consumer task panicked: {}", err);
                failed = true;
            }
        }
    }

    if !coordinator.is_shutdown_requested() {
        coordinator.trigger_shutdown();
    }

    let mut published: u64 = 0;
    while let Some(joined) = producers.join_next().await {
        match joined {
            Ok(Ok(report)) => {
                log::debug!(
                    "producer {}: {} published, {} rejected",
                    report.producer,
                    report.published,
                    report.rejected
                );
                published += report.published;
            }
            Ok(Err(err)) => {
                log_error_with_context(&err, "running producer");
                failed = true;
            }
            Err(err) => {
                log::error!("FATAL: producer task panicked: {}", err);
                failed = true;
            }
        }
    }

    let stats = market.stats();
    log::info!(
        "simulation complete: {} unit(s) bought, {} published, {} still on offer, {} order(s) placed",
        purchased,
        published,
        stats.available_units,
        stats.placed_carts
    );

    if failed {
        1
    } else {
        0
    }
}
