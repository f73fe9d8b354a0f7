//! Cancellable waits for worker retry loops
//!
//! Workers never spin on the marketplace: after a transient failure they
//! park on a wakeup future with a timeout cap, and every wait doubles as
//! a cancellation point for coordinated shutdown.

use std::future::Future;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::sleep;

/// Outcome of a cancellable wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The wait ran its course; the caller may proceed or retry
    Ready,
    /// Shutdown fired while waiting
    Cancelled,
}

impl WaitOutcome {
    pub fn is_cancelled(self) -> bool {
        self == WaitOutcome::Cancelled
    }
}

/// Sleep for `delay` unless shutdown fires first
pub async fn pause(delay: Duration, shutdown: &mut broadcast::Receiver<()>) -> WaitOutcome {
    tokio::select! {
        _ = sleep(delay) => WaitOutcome::Ready,
        _ = shutdown.recv() => WaitOutcome::Cancelled,
    }
}

/// Wait for `wake` to resolve or for `cap` to elapse, whichever comes
/// first, unless shutdown fires
///
/// Wakeups landing before the caller starts waiting are missed; the cap
/// bounds that window, so a retry is never delayed by more than `cap`.
pub async fn backoff<W>(
    wake: W,
    cap: Duration,
    shutdown: &mut broadcast::Receiver<()>,
) -> WaitOutcome
where
    W: Future<Output = ()>,
{
    tokio::select! {
        _ = wake => WaitOutcome::Ready,
        _ = sleep(cap) => WaitOutcome::Ready,
        _ = shutdown.recv() => WaitOutcome::Cancelled,
    }
}
