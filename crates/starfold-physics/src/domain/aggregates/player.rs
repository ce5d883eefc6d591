//! Players and the ships they steer.

use std::collections::BTreeMap;

use starfold_core::aggregate::Aggregate;
use starfold_core::result::DispatchResult;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::Physics;
use crate::domain::commands::{
    ApplyForce, CreateCollider, CreateEntity, CreateRigidBody, SimCommand, SimCommandKind,
};
use crate::domain::events::{PlayerCreated, RotationChanged, SimEvent, ThrusterActivated};
use crate::domain::types::{EntityId, Vec2};

/// Main thruster force of a new ship, in newtons.
pub const SHIP_THRUST: f64 = 10.0;

/// Mass of a new ship, in kilograms.
pub const SHIP_MASS: f64 = 1.0;

/// Half side length of a ship's collider, in metres.
pub const SHIP_HALF_EXTENT: f64 = 0.5;

/// One player's ship.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pilot {
    /// Main thruster force in newtons; zero until the ship exists.
    pub thrust: f64,
    /// The ship entity, once created.
    pub entity_id: Option<EntityId>,
    /// Heading in radians.
    pub rotation: f64,
}

/// Players by ID.
pub type PlayerState = BTreeMap<Uuid, Pilot>;

/// Creates ships for new players and turns input into forces and turns.
///
/// Creating a player cascades: `PlayerCreated` asks for an entity
/// correlated by the player ID, and the resulting `EntityCreated` asks for
/// a rigid body and a collider together.
#[derive(Debug, Default)]
pub struct Player;

impl Player {
    fn ship(state: &PlayerState, player_id: Uuid) -> Option<(&Pilot, EntityId)> {
        let pilot = state.get(&player_id)?;
        Some((pilot, pilot.entity_id?))
    }
}

impl Aggregate<Physics> for Player {
    type State = PlayerState;

    fn name(&self) -> &'static str {
        "player"
    }

    fn accepts(&self) -> &'static [SimCommandKind] {
        &[
            SimCommandKind::CreatePlayer,
            SimCommandKind::ActivateThruster,
            SimCommandKind::SetRotation,
        ]
    }

    fn execute(&self, state: &PlayerState, command: &SimCommand) -> DispatchResult<SimEvent> {
        match command {
            SimCommand::CreatePlayer(create) => {
                if state.contains_key(&create.player_id) {
                    debug!(player_id = %create.player_id, "player already exists");
                    return DispatchResult::None;
                }
                DispatchResult::One(
                    PlayerCreated {
                        player_id: create.player_id,
                    }
                    .into(),
                )
            }
            SimCommand::ActivateThruster(activate) => {
                Self::ship(state, activate.player_id)
                    .map(|_| {
                        SimEvent::from(ThrusterActivated {
                            player_id: activate.player_id,
                        })
                    })
                    .into()
            }
            SimCommand::SetRotation(turn) => Self::ship(state, turn.player_id)
                .map(|(_, entity_id)| {
                    SimEvent::from(RotationChanged {
                        correlation_id: turn.player_id,
                        entity_id,
                        rotation: turn.rotation,
                    })
                })
                .into(),
            _ => DispatchResult::None,
        }
    }

    fn apply(&self, state: &PlayerState, event: &SimEvent) -> Option<PlayerState> {
        match event {
            SimEvent::PlayerCreated(created) => {
                let mut next = state.clone();
                next.insert(created.player_id, Pilot::default());
                Some(next)
            }
            SimEvent::EntityCreated(created) => {
                let pilot = state.get(&created.correlation_id)?;
                if pilot.entity_id.is_some() {
                    return None;
                }
                let mut next = state.clone();
                next.insert(
                    created.correlation_id,
                    Pilot {
                        thrust: SHIP_THRUST,
                        entity_id: Some(created.entity_id),
                        rotation: 0.0,
                    },
                );
                Some(next)
            }
            SimEvent::RotationChanged(changed) => {
                let mut next = state.clone();
                next.get_mut(&changed.correlation_id)?.rotation = changed.rotation;
                Some(next)
            }
            _ => None,
        }
    }

    fn process(&self, state: &PlayerState, event: &SimEvent) -> DispatchResult<SimCommand> {
        match event {
            SimEvent::PlayerCreated(created) => DispatchResult::One(
                CreateEntity {
                    correlation_id: created.player_id,
                }
                .into(),
            ),
            SimEvent::EntityCreated(created) => {
                let Some((_, entity_id)) = Self::ship(state, created.correlation_id) else {
                    return DispatchResult::None;
                };
                if entity_id != created.entity_id {
                    return DispatchResult::None;
                }
                info!(
                    player_id = %created.correlation_id,
                    entity_id = %entity_id,
                    "ship created"
                );
                (
                    SimCommand::from(CreateRigidBody {
                        correlation_id: created.correlation_id,
                        entity_id,
                        mass: SHIP_MASS,
                    }),
                    SimCommand::from(CreateCollider {
                        correlation_id: created.correlation_id,
                        entity_id,
                        half_extent: SHIP_HALF_EXTENT,
                    }),
                )
                    .into()
            }
            SimEvent::ThrusterActivated(activated) => Self::ship(state, activated.player_id)
                .map(|(pilot, entity_id)| {
                    SimCommand::from(ApplyForce {
                        correlation_id: activated.player_id,
                        entity_id,
                        force: Vec2::from_angle(pilot.rotation) * pilot.thrust,
                    })
                })
                .into(),
            _ => DispatchResult::None,
        }
    }
}
