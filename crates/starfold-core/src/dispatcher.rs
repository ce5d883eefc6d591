//! Thread-safe front door to a [`Kernel`].

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::instrument;

use crate::aggregate::{Aggregate, Domain};
use crate::command::Command;
use crate::kernel::{Kernel, ReadModelHandle};
use crate::scheduler::Scheduler;

/// Cloneable handle that any number of timers, input handlers or network
/// callbacks may share.
///
/// Every top-level dispatch is posted to the scheduler's serial runner, so
/// concurrent callers are serialized into one logical stream and the state
/// collection has a single writer. The cascade itself runs synchronously
/// inside that one serial job.
pub struct Dispatcher<D: Domain> {
    kernel: Arc<Mutex<Kernel<D>>>,
    scheduler: Arc<dyn Scheduler>,
}

impl<D: Domain> Dispatcher<D> {
    /// Wraps a kernel so it can be driven through `scheduler`.
    #[must_use]
    pub fn new(kernel: Kernel<D>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            kernel: Arc::new(Mutex::new(kernel)),
            scheduler,
        }
    }

    /// Posts `command` to the serial runner.
    ///
    /// With an inline scheduler the cascade has settled when this returns;
    /// with a queued scheduler it runs after every previously posted
    /// command.
    #[instrument(
        skip(self, command),
        fields(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id()
        )
    )]
    pub fn dispatch(&self, command: D::Command) {
        let kernel = Arc::clone(&self.kernel);
        self.scheduler.serial(Box::new(move || {
            kernel.lock().dispatch(command);
        }));
    }

    /// Posts fire-and-forget background work to the concurrent runner.
    pub fn spawn(&self, job: impl FnOnce() + Send + 'static) {
        self.scheduler.concurrent(Box::new(job));
    }

    /// Clones the current state of aggregate `A`.
    #[must_use]
    pub fn inspect<A: Aggregate<D>>(&self) -> Option<A::State> {
        self.kernel.lock().inspect::<A>().cloned()
    }

    /// Number of events published so far.
    #[must_use]
    pub fn last_event_id(&self) -> u64 {
        self.kernel.lock().last_event_id()
    }

    /// The read model the kernel projects into.
    #[must_use]
    pub fn read_model(&self) -> ReadModelHandle<D::ReadModel> {
        Arc::clone(self.kernel.lock().read_model())
    }

    /// Runs `f` against the kernel while holding its lock.
    pub fn with_kernel<R>(&self, f: impl FnOnce(&Kernel<D>) -> R) -> R {
        f(&self.kernel.lock())
    }
}

impl<D: Domain> Clone for Dispatcher<D> {
    fn clone(&self) -> Self {
        Self {
            kernel: Arc::clone(&self.kernel),
            scheduler: Arc::clone(&self.scheduler),
        }
    }
}

impl<D: Domain> fmt::Debug for Dispatcher<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handles", &Arc::strong_count(&self.kernel))
            .finish_non_exhaustive()
    }
}
