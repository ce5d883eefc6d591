//! Assembles the physics kernel.

use starfold_core::error::RoutingError;
use starfold_core::kernel::{Kernel, KernelBuilder, ReadModelHandle};
use tracing::info;

use crate::domain::Physics;
use crate::domain::aggregates::{
    CameraProjection, Collider, CollisionProjection, Entity, Map, MapProjection, Player, RigidBody,
    ShipProjection, Time,
};
use crate::domain::read_model::SceneModel;

/// Builds a kernel with every physics aggregate registered, projecting
/// into `read_model`.
///
/// `Time` is registered after `RigidBody` so that, within one tick, the
/// moves requested by rigid bodies settle before collisions are detected.
///
/// # Errors
///
/// Returns a `RoutingError` if the routing self-check fails.
pub fn build_world(read_model: ReadModelHandle<SceneModel>) -> Result<Kernel<Physics>, RoutingError> {
    let kernel = KernelBuilder::new(read_model)
        .register(Player)
        .register(ShipProjection)
        .register(CameraProjection)
        .register(Map)
        .register(MapProjection)
        .register(Entity)
        .register(RigidBody)
        .register(Time)
        .register(Collider)
        .register(CollisionProjection)
        .build()?;

    info!(aggregates = ?kernel.aggregate_names(), "physics world ready");
    Ok(kernel)
}
