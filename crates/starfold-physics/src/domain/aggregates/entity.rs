//! Positions and headings of every simulated entity.

use std::collections::BTreeMap;

use starfold_core::aggregate::Aggregate;
use starfold_core::result::DispatchResult;
use tracing::debug;

use crate::domain::Physics;
use crate::domain::commands::{SimCommand, SimCommandKind};
use crate::domain::events::{EntityCreated, PositionChanged, SimEvent};
use crate::domain::types::{EntityId, Vec2};

/// Where an entity is and which way it faces.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    /// Position in metres.
    pub position: Vec2,
    /// Heading in radians.
    pub rotation: f64,
}

/// Every entity plus the next identifier to hand out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityState {
    /// Entities by ID.
    pub entities: BTreeMap<EntityId, Body>,
    /// Identifier the next `CreateEntity` receives.
    pub next_id: EntityId,
}

/// Allocates entities and turns relative moves into absolute positions.
#[derive(Debug, Default)]
pub struct Entity;

impl Aggregate<Physics> for Entity {
    type State = EntityState;

    fn name(&self) -> &'static str {
        "entity"
    }

    fn accepts(&self) -> &'static [SimCommandKind] {
        &[SimCommandKind::CreateEntity, SimCommandKind::MoveEntity]
    }

    fn execute(&self, state: &EntityState, command: &SimCommand) -> DispatchResult<SimEvent> {
        match command {
            SimCommand::CreateEntity(create) => DispatchResult::One(
                EntityCreated {
                    correlation_id: create.correlation_id,
                    entity_id: state.next_id,
                }
                .into(),
            ),
            SimCommand::MoveEntity(movement) => {
                let Some(body) = state.entities.get(&movement.entity_id) else {
                    debug!(entity_id = %movement.entity_id, "move for unknown entity ignored");
                    return DispatchResult::None;
                };
                DispatchResult::One(
                    PositionChanged {
                        correlation_id: movement.correlation_id,
                        entity_id: movement.entity_id,
                        position: body.position + movement.distance,
                    }
                    .into(),
                )
            }
            _ => DispatchResult::None,
        }
    }

    fn apply(&self, state: &EntityState, event: &SimEvent) -> Option<EntityState> {
        match event {
            SimEvent::EntityCreated(created) => {
                let mut next = state.clone();
                next.entities.insert(created.entity_id, Body::default());
                next.next_id = created.entity_id.next().max(state.next_id);
                Some(next)
            }
            SimEvent::PositionChanged(changed) => {
                let mut next = state.clone();
                next.entities.get_mut(&changed.entity_id)?.position = changed.position;
                Some(next)
            }
            SimEvent::RotationChanged(changed) => {
                let mut next = state.clone();
                next.entities.get_mut(&changed.entity_id)?.rotation = changed.rotation;
                Some(next)
            }
            _ => None,
        }
    }
}
