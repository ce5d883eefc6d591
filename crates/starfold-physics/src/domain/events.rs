//! Domain events for the physics context.

use serde::{Deserialize, Serialize};
use starfold_core::event::DomainEvent;
use uuid::Uuid;

use super::types::{EntityId, MapGrid, Vec2};

/// Emitted when simulated time advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAdvanced {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Elapsed time in seconds.
    pub dt: f64,
}

/// Emitted when the level map is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapUpdated {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The new wall grid.
    pub grid: MapGrid,
}

/// Emitted when a player joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCreated {
    /// The player identifier.
    pub player_id: Uuid,
}

/// Emitted when a player fires the main thruster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrusterActivated {
    /// The player identifier.
    pub player_id: Uuid,
}

/// Emitted when an entity is allocated at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCreated {
    /// The correlation ID for tracing; the player ID for ship entities.
    pub correlation_id: Uuid,
    /// The new entity.
    pub entity_id: EntityId,
}

/// Emitted when an entity reaches a new position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionChanged {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity that moved.
    pub entity_id: EntityId,
    /// Absolute position in metres.
    pub position: Vec2,
}

/// Emitted when an entity turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationChanged {
    /// The correlation ID for tracing; the player ID for ship entities.
    pub correlation_id: Uuid,
    /// The entity that turned.
    pub entity_id: EntityId,
    /// Heading in radians, measured from the x axis.
    pub rotation: f64,
}

/// Emitted when an entity gains a rigid body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyCreated {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity the body belongs to.
    pub entity_id: EntityId,
    /// Mass in kilograms.
    pub mass: f64,
}

/// Emitted when a force is applied to a rigid body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceApplied {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity whose body is pushed.
    pub entity_id: EntityId,
    /// Force in newtons.
    pub force: Vec2,
}

/// Emitted when an entity gains a collider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderCreated {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity the collider belongs to.
    pub entity_id: EntityId,
    /// Half of the footprint's side length in metres.
    pub half_extent: f64,
}

/// Emitted once per overlapping pair found by collision detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollidersOverlapped {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The lower of the two entity IDs.
    pub first: EntityId,
    /// The higher of the two entity IDs.
    pub second: EntityId,
}

/// Closed set of events produced by the physics kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// See [`TimeAdvanced`].
    TimeAdvanced(TimeAdvanced),
    /// See [`MapUpdated`].
    MapUpdated(MapUpdated),
    /// See [`PlayerCreated`].
    PlayerCreated(PlayerCreated),
    /// See [`ThrusterActivated`].
    ThrusterActivated(ThrusterActivated),
    /// See [`EntityCreated`].
    EntityCreated(EntityCreated),
    /// See [`PositionChanged`].
    PositionChanged(PositionChanged),
    /// See [`RotationChanged`].
    RotationChanged(RotationChanged),
    /// See [`RigidBodyCreated`].
    RigidBodyCreated(RigidBodyCreated),
    /// See [`ForceApplied`].
    ForceApplied(ForceApplied),
    /// See [`ColliderCreated`].
    ColliderCreated(ColliderCreated),
    /// See [`CollidersOverlapped`].
    CollidersOverlapped(CollidersOverlapped),
}

impl DomainEvent for SimEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::TimeAdvanced(_) => "physics.time_advanced",
            Self::MapUpdated(_) => "physics.map_updated",
            Self::PlayerCreated(_) => "physics.player_created",
            Self::ThrusterActivated(_) => "physics.thruster_activated",
            Self::EntityCreated(_) => "physics.entity_created",
            Self::PositionChanged(_) => "physics.position_changed",
            Self::RotationChanged(_) => "physics.rotation_changed",
            Self::RigidBodyCreated(_) => "physics.rigid_body_created",
            Self::ForceApplied(_) => "physics.force_applied",
            Self::ColliderCreated(_) => "physics.collider_created",
            Self::CollidersOverlapped(_) => "physics.colliders_overlapped",
        }
    }

    fn correlation_id(&self) -> Uuid {
        match self {
            Self::TimeAdvanced(event) => event.correlation_id,
            Self::MapUpdated(event) => event.correlation_id,
            Self::PlayerCreated(event) => event.player_id,
            Self::ThrusterActivated(event) => event.player_id,
            Self::EntityCreated(event) => event.correlation_id,
            Self::PositionChanged(event) => event.correlation_id,
            Self::RotationChanged(event) => event.correlation_id,
            Self::RigidBodyCreated(event) => event.correlation_id,
            Self::ForceApplied(event) => event.correlation_id,
            Self::ColliderCreated(event) => event.correlation_id,
            Self::CollidersOverlapped(event) => event.correlation_id,
        }
    }
}

macro_rules! impl_from_event {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for SimEvent {
                fn from(event: $variant) -> Self {
                    Self::$variant(event)
                }
            }
        )*
    };
}

impl_from_event!(
    TimeAdvanced,
    MapUpdated,
    PlayerCreated,
    ThrusterActivated,
    EntityCreated,
    PositionChanged,
    RotationChanged,
    RigidBodyCreated,
    ForceApplied,
    ColliderCreated,
    CollidersOverlapped,
);
