//! Simulated time.

use starfold_core::aggregate::Aggregate;
use starfold_core::result::DispatchResult;

use crate::domain::Physics;
use crate::domain::commands::{DetectCollisions, SimCommand, SimCommandKind};
use crate::domain::events::{SimEvent, TimeAdvanced};

/// Accumulated simulation time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeState {
    /// Seconds simulated so far.
    pub elapsed: f64,
    /// Ticks applied so far.
    pub ticks: u64,
}

/// Turns ticks into `TimeAdvanced` and schedules collision detection after
/// every step.
#[derive(Debug, Default)]
pub struct Time;

impl Aggregate<Physics> for Time {
    type State = TimeState;

    fn name(&self) -> &'static str {
        "time"
    }

    fn accepts(&self) -> &'static [SimCommandKind] {
        &[SimCommandKind::Tick]
    }

    fn execute(&self, _state: &TimeState, command: &SimCommand) -> DispatchResult<SimEvent> {
        let SimCommand::Tick(tick) = command else {
            return DispatchResult::None;
        };
        DispatchResult::One(
            TimeAdvanced {
                correlation_id: tick.correlation_id,
                dt: tick.dt,
            }
            .into(),
        )
    }

    fn apply(&self, state: &TimeState, event: &SimEvent) -> Option<TimeState> {
        let SimEvent::TimeAdvanced(advanced) = event else {
            return None;
        };
        Some(TimeState {
            elapsed: state.elapsed + advanced.dt,
            ticks: state.ticks + 1,
        })
    }

    fn process(&self, _state: &TimeState, event: &SimEvent) -> DispatchResult<SimCommand> {
        let SimEvent::TimeAdvanced(advanced) = event else {
            return DispatchResult::None;
        };
        DispatchResult::One(
            DetectCollisions {
                correlation_id: advanced.correlation_id,
            }
            .into(),
        )
    }
}
