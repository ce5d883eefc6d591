//! Mass, velocity and accumulated force.

use std::collections::BTreeMap;

use starfold_core::aggregate::Aggregate;
use starfold_core::result::DispatchResult;
use tracing::{debug, warn};

use crate::domain::Physics;
use crate::domain::commands::{MoveEntity, SimCommand, SimCommandKind};
use crate::domain::events::{ForceApplied, RigidBodyCreated, SimEvent};
use crate::domain::types::{EntityId, Vec2};

/// Dynamic properties of one entity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dynamics {
    /// Mass in kilograms, always positive.
    pub mass: f64,
    /// Velocity in metres per second.
    pub velocity: Vec2,
    /// Force accumulated since the last tick, in newtons.
    pub force: Vec2,
}

/// Rigid bodies by entity.
pub type RigidBodyState = BTreeMap<EntityId, Dynamics>;

/// Integrates forces into velocities and moves bodies every tick.
///
/// On `TimeAdvanced` each body's velocity grows by `F / m * dt` and its
/// force resets; every body still moving is then displaced by `v * dt`.
#[derive(Debug, Default)]
pub struct RigidBody;

impl Aggregate<Physics> for RigidBody {
    type State = RigidBodyState;

    fn name(&self) -> &'static str {
        "rigid_body"
    }

    fn accepts(&self) -> &'static [SimCommandKind] {
        &[SimCommandKind::CreateRigidBody, SimCommandKind::ApplyForce]
    }

    fn execute(&self, state: &RigidBodyState, command: &SimCommand) -> DispatchResult<SimEvent> {
        match command {
            SimCommand::CreateRigidBody(create) => {
                if !(create.mass.is_finite() && create.mass > 0.0) {
                    warn!(
                        entity_id = %create.entity_id,
                        mass = create.mass,
                        "rigid body needs a positive mass"
                    );
                    return DispatchResult::None;
                }
                DispatchResult::One(
                    RigidBodyCreated {
                        correlation_id: create.correlation_id,
                        entity_id: create.entity_id,
                        mass: create.mass,
                    }
                    .into(),
                )
            }
            SimCommand::ApplyForce(push) => {
                if !state.contains_key(&push.entity_id) {
                    debug!(entity_id = %push.entity_id, "force on entity without rigid body ignored");
                    return DispatchResult::None;
                }
                DispatchResult::One(
                    ForceApplied {
                        correlation_id: push.correlation_id,
                        entity_id: push.entity_id,
                        force: push.force,
                    }
                    .into(),
                )
            }
            _ => DispatchResult::None,
        }
    }

    fn apply(&self, state: &RigidBodyState, event: &SimEvent) -> Option<RigidBodyState> {
        match event {
            SimEvent::RigidBodyCreated(created) => {
                let mut next = state.clone();
                next.insert(
                    created.entity_id,
                    Dynamics {
                        mass: created.mass,
                        ..Dynamics::default()
                    },
                );
                Some(next)
            }
            SimEvent::ForceApplied(applied) => {
                let mut next = state.clone();
                next.get_mut(&applied.entity_id)?.force += applied.force;
                Some(next)
            }
            SimEvent::TimeAdvanced(advanced) if !state.is_empty() => {
                let mut next = state.clone();
                for body in next.values_mut() {
                    body.velocity += body.force / body.mass * advanced.dt;
                    body.force = Vec2::ZERO;
                }
                Some(next)
            }
            _ => None,
        }
    }

    fn process(&self, state: &RigidBodyState, event: &SimEvent) -> DispatchResult<SimCommand> {
        let SimEvent::TimeAdvanced(advanced) = event else {
            return DispatchResult::None;
        };
        state
            .iter()
            .filter(|(_, body)| body.velocity.is_nonzero())
            .map(|(entity_id, body)| {
                SimCommand::from(MoveEntity {
                    correlation_id: advanced.correlation_id,
                    entity_id: *entity_id,
                    distance: body.velocity * advanced.dt,
                })
            })
            .collect()
    }
}
