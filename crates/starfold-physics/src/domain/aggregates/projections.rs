//! Stateless aggregates that only write the scene.

use starfold_core::aggregate::Aggregate;

use crate::domain::Physics;
use crate::domain::events::SimEvent;
use crate::domain::read_model::{PIXELS_PER_METRE, SceneModel, Tile};
use crate::domain::types::Vec2;

/// Keeps ship sprites in step with entity positions and headings.
#[derive(Debug, Default)]
pub struct ShipProjection;

impl Aggregate<Physics> for ShipProjection {
    type State = ();

    fn name(&self) -> &'static str {
        "ship_projection"
    }

    fn project(&self, scene: &mut SceneModel, event: &SimEvent) {
        match event {
            SimEvent::PositionChanged(changed) => {
                scene.ships.entry(changed.entity_id).or_default().position =
                    changed.position * PIXELS_PER_METRE;
            }
            SimEvent::RotationChanged(changed) => {
                scene.ships.entry(changed.entity_id).or_default().rotation_degrees =
                    changed.rotation.to_degrees() + 90.0;
            }
            _ => {}
        }
    }
}

/// Centres the camera on whatever moved last.
#[derive(Debug, Default)]
pub struct CameraProjection;

impl Aggregate<Physics> for CameraProjection {
    type State = ();

    fn name(&self) -> &'static str {
        "camera_projection"
    }

    fn project(&self, scene: &mut SceneModel, event: &SimEvent) {
        if let SimEvent::PositionChanged(changed) = event {
            scene.camera = changed.position * PIXELS_PER_METRE;
        }
    }
}

/// Turns the wall grid into screen tiles.
#[derive(Debug, Default)]
pub struct MapProjection;

impl Aggregate<Physics> for MapProjection {
    type State = ();

    fn name(&self) -> &'static str {
        "map_projection"
    }

    #[allow(clippy::cast_precision_loss)]
    fn project(&self, scene: &mut SceneModel, event: &SimEvent) {
        let SimEvent::MapUpdated(updated) = event else {
            return;
        };
        let size = updated.grid.cell_width() * PIXELS_PER_METRE;
        scene.tiles = updated
            .grid
            .wall_cells()
            .map(|(x, y)| Tile {
                origin: Vec2::new(x as f64 * size, y as f64 * size),
                size,
            })
            .collect();
    }
}

/// Counts overlapping collider pairs.
#[derive(Debug, Default)]
pub struct CollisionProjection;

impl Aggregate<Physics> for CollisionProjection {
    type State = ();

    fn name(&self) -> &'static str {
        "collision_projection"
    }

    fn project(&self, scene: &mut SceneModel, event: &SimEvent) {
        if let SimEvent::CollidersOverlapped(overlap) = event {
            scene.collisions += 1;
            scene.last_overlap = Some((overlap.first, overlap.second));
        }
    }
}
