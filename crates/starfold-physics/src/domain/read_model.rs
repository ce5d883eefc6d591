//! The scene a renderer would draw, kept current by projections.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{EntityId, Vec2};

/// Screen pixels per world metre.
pub const PIXELS_PER_METRE: f64 = 100.0;

/// A ship sprite in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ShipSprite {
    /// Sprite centre in pixels.
    pub position: Vec2,
    /// Sprite rotation in degrees. The artwork points up, so a heading of
    /// zero radians draws at 90 degrees.
    pub rotation_degrees: f64,
}

/// A square wall tile in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    /// Top-left corner in pixels.
    pub origin: Vec2,
    /// Side length in pixels.
    pub size: f64,
}

/// Everything projected from the event stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneModel {
    /// Ship sprites by entity.
    pub ships: BTreeMap<EntityId, ShipSprite>,
    /// Camera centre in pixels.
    pub camera: Vec2,
    /// Wall tiles of the current map.
    pub tiles: Vec<Tile>,
    /// Overlapping collider pairs seen so far.
    pub collisions: u64,
    /// The most recent overlapping pair.
    pub last_overlap: Option<(EntityId, EntityId)>,
}
