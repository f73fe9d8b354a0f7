//! Coordinated Shutdown
//!
//! Broadcast-based shutdown coordination for the worker tasks, wired to
//! the usual Unix termination signals.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Coordinates graceful shutdown across all worker tasks
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new coordinator together with an initial receiver
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        // Room for a burst of triggers without dropping any
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);

        let coordinator = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        };

        (coordinator, shutdown_rx)
    }

    /// Subscribe to shutdown notifications
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown
    pub fn trigger_shutdown(&self) {
        // Release pairs with the Acquire load in is_shutdown_requested()
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    /// Check if shutdown has been requested
    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Install signal handlers that trigger this coordinator
    ///
    /// Must be called from within a tokio runtime. The first signal starts
    /// a graceful shutdown; a second one exits immediately with code 130.
    pub fn install_signal_handlers(&self) {
        install_signal_handlers(
            self.shutdown_tx.clone(),
            Arc::clone(&self.shutdown_requested),
        );
    }
}

#[cfg(unix)]
fn install_signal_handlers(
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
) {
    // Purchase records stream to stdout and may be piped; restore default
    // SIGPIPE so a closed pipe terminates the process instead of panicking.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    use tokio::signal::unix::{signal, SignalKind};

    let signal_count = Arc::new(AtomicUsize::new(0));
    let kinds = [
        SignalKind::interrupt(),
        SignalKind::terminate(),
        SignalKind::hangup(),
    ];

    for kind in kinds {
        let tx = shutdown_tx.clone();
        let requested = Arc::clone(&shutdown_requested);
        let count = Arc::clone(&signal_count);

        tokio::spawn(async move {
            let Ok(mut stream) = signal(kind) else {
                return;
            };
            while stream.recv().await.is_some() {
                requested.store(true, Ordering::Release);
                let _ = tx.send(());
                if count.fetch_add(1, Ordering::AcqRel) >= 1 {
                    // Second signal forces an immediate exit
                    std::process::exit(130);
                }
            }
        });
    }
}

#[cfg(not(unix))]
fn install_signal_handlers(
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown_requested.store(true, Ordering::Release);
            let _ = shutdown_tx.send(());
        }
    });
}
