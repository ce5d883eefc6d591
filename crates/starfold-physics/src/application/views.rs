//! Read-only snapshots of a running world.
//!
//! Views are assembled from aggregate state and the scene, and serialize
//! to JSON for status logs and the end-of-run summary.

use serde::Serialize;
use starfold_core::kernel::Kernel;
use uuid::Uuid;

use crate::domain::Physics;
use crate::domain::aggregates::collider::ColliderState;
use crate::domain::aggregates::entity::EntityState;
use crate::domain::aggregates::player::PlayerState;
use crate::domain::aggregates::rigid_body::RigidBodyState;
use crate::domain::aggregates::{Collider, Entity, Player, RigidBody, Time};
use crate::domain::types::{EntityId, Vec2};

/// One entity and, if it has a rigid body, its velocity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    /// The entity identifier.
    pub entity_id: EntityId,
    /// Position in metres.
    pub position: Vec2,
    /// Heading in radians.
    pub rotation: f64,
    /// Velocity in metres per second; `None` without a rigid body.
    pub velocity: Option<Vec2>,
}

/// One player and the ship entity they steer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    /// The player identifier.
    pub player_id: Uuid,
    /// The ship entity, once created.
    pub entity_id: Option<EntityId>,
}

/// Snapshot of the whole simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationView {
    /// Events published so far.
    pub last_event_id: u64,
    /// Seconds simulated.
    pub elapsed: f64,
    /// Ticks applied.
    pub ticks: u64,
    /// Every entity, by ascending ID.
    pub entities: Vec<EntityView>,
    /// Every player, by ascending ID.
    pub players: Vec<PlayerView>,
    /// Colliders in the spatial index.
    pub colliders: usize,
    /// Overlapping pairs reported so far.
    pub collisions: u64,
    /// Wall tiles in the scene.
    pub tiles: usize,
    /// Camera centre in pixels.
    pub camera: Vec2,
}

impl SimulationView {
    /// Captures the current state of `kernel` and its scene.
    #[must_use]
    pub fn capture(kernel: &Kernel<Physics>) -> Self {
        let time = kernel.inspect::<Time>().copied().unwrap_or_default();
        let bodies = kernel.inspect::<RigidBody>();
        let entities = kernel
            .inspect::<Entity>()
            .map_or_else(Vec::new, |state| entity_views(state, bodies));
        let players = kernel
            .inspect::<Player>()
            .map_or_else(Vec::new, player_views);
        let colliders = kernel
            .inspect::<Collider>()
            .map_or(0, |state: &ColliderState| state.index.len());

        let scene = kernel.read_model().lock();
        Self {
            last_event_id: kernel.last_event_id(),
            elapsed: time.elapsed,
            ticks: time.ticks,
            entities,
            players,
            colliders,
            collisions: scene.collisions,
            tiles: scene.tiles.len(),
            camera: scene.camera,
        }
    }
}

fn entity_views(state: &EntityState, bodies: Option<&RigidBodyState>) -> Vec<EntityView> {
    state
        .entities
        .iter()
        .map(|(entity_id, body)| EntityView {
            entity_id: *entity_id,
            position: body.position,
            rotation: body.rotation,
            velocity: bodies
                .and_then(|bodies| bodies.get(entity_id))
                .map(|dynamics| dynamics.velocity),
        })
        .collect()
}

fn player_views(state: &PlayerState) -> Vec<PlayerView> {
    state
        .iter()
        .map(|(player_id, pilot)| PlayerView {
            player_id: *player_id,
            entity_id: pilot.entity_id,
        })
        .collect()
}
