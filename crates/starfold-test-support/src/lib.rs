//! Shared test doubles for the Starfold simulation.

mod clock;
mod rng;
mod scheduler;

pub use clock::{FixedClock, SteppingClock};
pub use rng::{MockRng, SequenceRng};
pub use scheduler::RecordingScheduler;
