//! Scheduling adapters.
//!
//! The kernel itself never spawns or waits. A [`Scheduler`] decides where
//! a closure runs: the serial runner guarantees at most one job in flight
//! at a time, the concurrent runner makes no such promise and is meant for
//! background work outside the state-mutation path.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, warn};

/// Unit of work handed to a scheduler.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Injection point for "run this closure".
pub trait Scheduler: Send + Sync {
    /// Runs `job` with no other serial job in flight.
    fn serial(&self, job: Job);

    /// Runs `job` with no ordering or exclusion guarantee.
    fn concurrent(&self, job: Job);
}

/// Runs every job immediately on the calling thread.
///
/// Serial jobs are gated by a mutex so callers on different threads cannot
/// overlap. A serial job must not submit another serial job to the same
/// scheduler.
#[derive(Debug, Default)]
pub struct InlineScheduler {
    gate: Mutex<()>,
}

impl InlineScheduler {
    /// Creates an inline scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for InlineScheduler {
    fn serial(&self, job: Job) {
        let _gate = self.gate.lock();
        job();
    }

    fn concurrent(&self, job: Job) {
        job();
    }
}

/// Serializes jobs onto one queue drained by a dedicated blocking worker.
///
/// Serial jobs run in submission order, one at a time. Concurrent jobs go
/// to the runtime's blocking pool. The worker stops once every clone of
/// the scheduler has been dropped.
#[derive(Clone)]
pub struct TokioScheduler {
    serial_tx: mpsc::UnboundedSender<Job>,
    handle: Handle,
}

impl TokioScheduler {
    /// Starts the serial worker on `handle`.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        let (serial_tx, serial_rx) = mpsc::unbounded_channel();
        handle.spawn_blocking(move || run_serial_queue(serial_rx));
        Self { serial_tx, handle }
    }

    /// Starts the serial worker on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Resolves once every serial job submitted before this call has run.
    pub async fn drain(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.serial(Box::new(move || {
            let _ = done_tx.send(());
        }));
        let _ = done_rx.await;
    }
}

fn run_serial_queue(mut serial_rx: mpsc::UnboundedReceiver<Job>) {
    while let Some(job) = serial_rx.blocking_recv() {
        if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
            // A panicking cascade leaves the state collection half-published.
            error!("serial job panicked, aborting");
            std::process::abort();
        }
    }
}

impl Scheduler for TokioScheduler {
    fn serial(&self, job: Job) {
        if self.serial_tx.send(job).is_err() {
            warn!("serial queue closed, job dropped");
        }
    }

    fn concurrent(&self, job: Job) {
        self.handle.spawn_blocking(job);
    }
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("closed", &self.serial_tx.is_closed())
            .finish_non_exhaustive()
    }
}
