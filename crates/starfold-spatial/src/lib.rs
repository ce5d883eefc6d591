//! Starfold Spatial — an immutable 2D point index.
//!
//! [`QuadTree`] values are persistent: every mutation returns a new tree
//! that shares all untouched nodes with the old one, so any number of
//! readers may keep historical roots alive without locking.

pub mod error;
pub mod geometry;
pub mod quadtree;

pub use error::SpatialError;
pub use geometry::{BoundingBox, Point};
pub use quadtree::{Entry, QuadTree, Query};
