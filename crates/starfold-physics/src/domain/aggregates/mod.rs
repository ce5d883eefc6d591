//! Aggregates of the physics context.

pub mod collider;
pub mod entity;
pub mod map;
pub mod player;
pub mod projections;
pub mod rigid_body;
pub mod time;

pub use collider::Collider;
pub use entity::Entity;
pub use map::Map;
pub use player::Player;
pub use projections::{CameraProjection, CollisionProjection, MapProjection, ShipProjection};
pub use rigid_body::RigidBody;
pub use time::Time;
