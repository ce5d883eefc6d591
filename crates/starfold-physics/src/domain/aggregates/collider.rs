//! Collision footprints indexed by a persistent quadtree.

use std::collections::BTreeSet;

use starfold_core::aggregate::Aggregate;
use starfold_core::result::DispatchResult;
use starfold_spatial::{BoundingBox, Entry, Point, QuadTree};
use tracing::{debug, warn};

use crate::domain::Physics;
use crate::domain::commands::{SimCommand, SimCommandKind};
use crate::domain::events::{ColliderCreated, CollidersOverlapped, SimEvent};
use crate::domain::types::EntityId;

/// Half side length of the indexed world, centred on the origin.
pub const WORLD_HALF_EXTENT: f64 = 4096.0;

/// Colliders a quadtree node holds before it subdivides.
pub const NODE_CAPACITY: usize = 8;

/// Half extent of the window searched around a new position when a
/// collider follows its entity.
pub const SEARCH_RADIUS: f64 = 10.0;

/// A square footprint owned by one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderBody {
    /// The owning entity.
    pub entity_id: EntityId,
    /// Half of the footprint's side length in metres.
    pub half_extent: f64,
}

/// Spatial index of every collider.
#[derive(Debug, Clone)]
pub struct ColliderState {
    /// Colliders keyed by position.
    pub index: QuadTree<ColliderBody>,
    /// Largest half extent of any collider, used to widen proximity queries.
    pub largest_half_extent: f64,
}

impl Default for ColliderState {
    fn default() -> Self {
        let boundary = BoundingBox::new(Point::new(0.0, 0.0), WORLD_HALF_EXTENT);
        let index =
            QuadTree::new(boundary, NODE_CAPACITY).expect("world index constants are valid");
        Self {
            index,
            largest_half_extent: 0.0,
        }
    }
}

impl ColliderState {
    fn contains(&self, entity_id: EntityId) -> bool {
        self.index.iter().any(|entry| entry.payload.entity_id == entity_id)
    }

    /// Every overlapping pair, lower entity ID first, each pair once.
    #[must_use]
    pub fn overlapping_pairs(&self) -> BTreeSet<(EntityId, EntityId)> {
        let mut pairs = BTreeSet::new();
        for entry in &self.index {
            let reach = entry.payload.half_extent + self.largest_half_extent;
            let window = BoundingBox::new(entry.position, reach);
            for other in self.index.query(window) {
                let (first, second) = (entry.payload.entity_id, other.payload.entity_id);
                if first < second && overlaps(entry, other) {
                    pairs.insert((first, second));
                }
            }
        }
        pairs
    }
}

fn overlaps(a: &Entry<ColliderBody>, b: &Entry<ColliderBody>) -> bool {
    let reach = a.payload.half_extent + b.payload.half_extent;
    (a.position.x - b.position.x).abs() <= reach && (a.position.y - b.position.y).abs() <= reach
}

/// Keeps colliders in step with their entities and reports overlaps.
///
/// A collider follows its entity by searching a window of
/// [`SEARCH_RADIUS`] around the entity's new position. If the collider
/// sits in a quadrant that window does not touch, it is not found and
/// stays where it was.
#[derive(Debug, Default)]
pub struct Collider;

impl Aggregate<Physics> for Collider {
    type State = ColliderState;

    fn name(&self) -> &'static str {
        "collider"
    }

    fn accepts(&self) -> &'static [SimCommandKind] {
        &[SimCommandKind::CreateCollider, SimCommandKind::DetectCollisions]
    }

    fn execute(&self, state: &ColliderState, command: &SimCommand) -> DispatchResult<SimEvent> {
        match command {
            SimCommand::CreateCollider(create) => {
                if !(create.half_extent.is_finite() && create.half_extent > 0.0) {
                    warn!(
                        entity_id = %create.entity_id,
                        half_extent = create.half_extent,
                        "collider needs a positive extent"
                    );
                    return DispatchResult::None;
                }
                if state.contains(create.entity_id) {
                    debug!(entity_id = %create.entity_id, "entity already has a collider");
                    return DispatchResult::None;
                }
                DispatchResult::One(
                    ColliderCreated {
                        correlation_id: create.correlation_id,
                        entity_id: create.entity_id,
                        half_extent: create.half_extent,
                    }
                    .into(),
                )
            }
            SimCommand::DetectCollisions(detect) => state
                .overlapping_pairs()
                .into_iter()
                .map(|(first, second)| {
                    SimEvent::from(CollidersOverlapped {
                        correlation_id: detect.correlation_id,
                        first,
                        second,
                    })
                })
                .collect(),
            _ => DispatchResult::None,
        }
    }

    fn apply(&self, state: &ColliderState, event: &SimEvent) -> Option<ColliderState> {
        match event {
            SimEvent::ColliderCreated(created) => {
                let body = ColliderBody {
                    entity_id: created.entity_id,
                    half_extent: created.half_extent,
                };
                match state.index.insert(body, Point::new(0.0, 0.0)) {
                    Ok(index) => Some(ColliderState {
                        index,
                        largest_half_extent: state.largest_half_extent.max(created.half_extent),
                    }),
                    Err(error) => {
                        warn!(entity_id = %created.entity_id, %error, "collider not indexed");
                        None
                    }
                }
            }
            SimEvent::PositionChanged(changed) => {
                let moved = state.index.move_where(
                    changed.position.into(),
                    SEARCH_RADIUS,
                    |body| body.entity_id == changed.entity_id,
                );
                match moved {
                    Ok(index) if index.ptr_eq(&state.index) => None,
                    Ok(index) => Some(ColliderState {
                        index,
                        largest_half_extent: state.largest_half_extent,
                    }),
                    Err(error) => {
                        warn!(entity_id = %changed.entity_id, %error, "collider left the indexed world");
                        None
                    }
                }
            }
            _ => None,
        }
    }
}
