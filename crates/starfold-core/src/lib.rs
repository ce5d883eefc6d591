//! Starfold Core — the event-sourcing dispatch kernel.
//!
//! Commands are routed to the single aggregate that executes them, the
//! resulting events are folded into every aggregate's state, projected into
//! a caller-owned read model, and processed into follow-up commands which
//! are dispatched depth-first until the cascade settles.
//!
//! This crate contains no domain code; bounded contexts implement
//! [`aggregate::Aggregate`] for their own command and event types.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod kernel;
pub mod result;
pub mod rng;
pub mod scheduler;

pub use aggregate::{Aggregate, Domain};
pub use dispatcher::Dispatcher;
pub use kernel::{Cascade, Kernel, KernelBuilder, ReadModelHandle};
pub use result::DispatchResult;
pub use scheduler::{InlineScheduler, Scheduler, TokioScheduler};
