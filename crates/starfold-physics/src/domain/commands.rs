//! Commands for the physics context.

use serde::{Deserialize, Serialize};
use starfold_core::command::Command;
use uuid::Uuid;

use super::types::{EntityId, MapGrid, Vec2};

/// Advance simulated time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Elapsed time in seconds.
    pub dt: f64,
}

/// Replace the level map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMap {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The new wall grid.
    pub grid: MapGrid,
}

/// Join a new player. The player ID doubles as the correlation ID of the
/// whole creation cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayer {
    /// The player identifier.
    pub player_id: Uuid,
}

/// Fire the main thruster of a player's ship for one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivateThruster {
    /// The player identifier.
    pub player_id: Uuid,
}

/// Point a player's ship in a new direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRotation {
    /// The player identifier.
    pub player_id: Uuid,
    /// Heading in radians, measured from the x axis.
    pub rotation: f64,
}

/// Allocate a new entity at the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntity {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Displace an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveEntity {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity to move.
    pub entity_id: EntityId,
    /// Displacement in metres.
    pub distance: Vec2,
}

/// Give an entity mass so it responds to forces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRigidBody {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity the body belongs to.
    pub entity_id: EntityId,
    /// Mass in kilograms.
    pub mass: f64,
}

/// Push a rigid body until the next tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyForce {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity whose body is pushed.
    pub entity_id: EntityId,
    /// Force in newtons.
    pub force: Vec2,
}

/// Give an entity a square collision footprint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollider {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entity the collider belongs to.
    pub entity_id: EntityId,
    /// Half of the footprint's side length in metres.
    pub half_extent: f64,
}

/// Look for overlapping colliders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectCollisions {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Closed set of commands routed by the physics kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimCommand {
    /// See [`Tick`].
    Tick(Tick),
    /// See [`CreateMap`].
    CreateMap(CreateMap),
    /// See [`CreatePlayer`].
    CreatePlayer(CreatePlayer),
    /// See [`ActivateThruster`].
    ActivateThruster(ActivateThruster),
    /// See [`SetRotation`].
    SetRotation(SetRotation),
    /// See [`CreateEntity`].
    CreateEntity(CreateEntity),
    /// See [`MoveEntity`].
    MoveEntity(MoveEntity),
    /// See [`CreateRigidBody`].
    CreateRigidBody(CreateRigidBody),
    /// See [`ApplyForce`].
    ApplyForce(ApplyForce),
    /// See [`CreateCollider`].
    CreateCollider(CreateCollider),
    /// See [`DetectCollisions`].
    DetectCollisions(DetectCollisions),
}

/// Discriminant of [`SimCommand`], used for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimCommandKind {
    Tick,
    CreateMap,
    CreatePlayer,
    ActivateThruster,
    SetRotation,
    CreateEntity,
    MoveEntity,
    CreateRigidBody,
    ApplyForce,
    CreateCollider,
    DetectCollisions,
}

impl SimCommandKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Tick,
        Self::CreateMap,
        Self::CreatePlayer,
        Self::ActivateThruster,
        Self::SetRotation,
        Self::CreateEntity,
        Self::MoveEntity,
        Self::CreateRigidBody,
        Self::ApplyForce,
        Self::CreateCollider,
        Self::DetectCollisions,
    ];
}

impl Command for SimCommand {
    type Kind = SimCommandKind;

    fn kind(&self) -> SimCommandKind {
        match self {
            Self::Tick(_) => SimCommandKind::Tick,
            Self::CreateMap(_) => SimCommandKind::CreateMap,
            Self::CreatePlayer(_) => SimCommandKind::CreatePlayer,
            Self::ActivateThruster(_) => SimCommandKind::ActivateThruster,
            Self::SetRotation(_) => SimCommandKind::SetRotation,
            Self::CreateEntity(_) => SimCommandKind::CreateEntity,
            Self::MoveEntity(_) => SimCommandKind::MoveEntity,
            Self::CreateRigidBody(_) => SimCommandKind::CreateRigidBody,
            Self::ApplyForce(_) => SimCommandKind::ApplyForce,
            Self::CreateCollider(_) => SimCommandKind::CreateCollider,
            Self::DetectCollisions(_) => SimCommandKind::DetectCollisions,
        }
    }

    fn all_kinds() -> &'static [SimCommandKind] {
        &SimCommandKind::ALL
    }

    fn command_type(&self) -> &'static str {
        match self {
            Self::Tick(_) => "physics.tick",
            Self::CreateMap(_) => "physics.create_map",
            Self::CreatePlayer(_) => "physics.create_player",
            Self::ActivateThruster(_) => "physics.activate_thruster",
            Self::SetRotation(_) => "physics.set_rotation",
            Self::CreateEntity(_) => "physics.create_entity",
            Self::MoveEntity(_) => "physics.move_entity",
            Self::CreateRigidBody(_) => "physics.create_rigid_body",
            Self::ApplyForce(_) => "physics.apply_force",
            Self::CreateCollider(_) => "physics.create_collider",
            Self::DetectCollisions(_) => "physics.detect_collisions",
        }
    }

    fn correlation_id(&self) -> Uuid {
        match self {
            Self::Tick(command) => command.correlation_id,
            Self::CreateMap(command) => command.correlation_id,
            Self::CreatePlayer(command) => command.player_id,
            Self::ActivateThruster(command) => command.player_id,
            Self::SetRotation(command) => command.player_id,
            Self::CreateEntity(command) => command.correlation_id,
            Self::MoveEntity(command) => command.correlation_id,
            Self::CreateRigidBody(command) => command.correlation_id,
            Self::ApplyForce(command) => command.correlation_id,
            Self::CreateCollider(command) => command.correlation_id,
            Self::DetectCollisions(command) => command.correlation_id,
        }
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for SimCommand {
                fn from(command: $variant) -> Self {
                    Self::$variant(command)
                }
            }
        )*
    };
}

impl_from_command!(
    Tick,
    CreateMap,
    CreatePlayer,
    ActivateThruster,
    SetRotation,
    CreateEntity,
    MoveEntity,
    CreateRigidBody,
    ApplyForce,
    CreateCollider,
    DetectCollisions,
);
