//! An inline `Scheduler` that counts what it runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use starfold_core::scheduler::{InlineScheduler, Job, Scheduler};

/// Runs every job inline and records how many went to each runner.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    inner: InlineScheduler,
    serial: AtomicUsize,
    concurrent: AtomicUsize,
}

impl RecordingScheduler {
    /// Creates a scheduler with both counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs submitted to the serial runner so far.
    #[must_use]
    pub fn serial_jobs(&self) -> usize {
        self.serial.load(Ordering::SeqCst)
    }

    /// Jobs submitted to the concurrent runner so far.
    #[must_use]
    pub fn concurrent_jobs(&self) -> usize {
        self.concurrent.load(Ordering::SeqCst)
    }
}

impl Scheduler for RecordingScheduler {
    fn serial(&self, job: Job) {
        self.serial.fetch_add(1, Ordering::SeqCst);
        self.inner.serial(job);
    }

    fn concurrent(&self, job: Job) {
        self.concurrent.fetch_add(1, Ordering::SeqCst);
        self.inner.concurrent(job);
    }
}
