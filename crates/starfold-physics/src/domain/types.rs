//! Value types shared by the physics aggregates.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

use serde::{Deserialize, Serialize};
use starfold_spatial::Point;

/// Identifier of a simulated entity, assigned sequentially from zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The identifier following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity-{}", self.0)
    }
}

/// A 2D vector. Positions are in metres, velocities in metres per second
/// and forces in newtons; `y` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `radians`, measured from the x axis.
    #[must_use]
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns `true` if either component is non-zero.
    #[must_use]
    pub fn is_nonzero(self) -> bool {
        self.x != 0.0 || self.y != 0.0
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl From<Vec2> for Point {
    fn from(value: Vec2) -> Self {
        Point::new(value.x, value.y)
    }
}

/// Row-major grid of wall cells, each `cell_width` metres square.
///
/// Cell `(0, 0)` has its top-left corner at the world origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapGrid {
    width: usize,
    height: usize,
    cell_width: f64,
    walls: Vec<bool>,
}

impl MapGrid {
    /// Creates a grid with no walls.
    #[must_use]
    pub fn open(width: usize, height: usize, cell_width: f64) -> Self {
        Self {
            width,
            height,
            cell_width,
            walls: vec![false; width * height],
        }
    }

    /// Cells per row.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Side length of one cell in metres.
    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Returns `true` if the cell is a wall. Cells outside the grid are not.
    #[must_use]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.walls[y * self.width + x]
    }

    /// Marks a cell as wall or floor. Cells outside the grid are ignored.
    pub fn set_wall(&mut self, x: usize, y: usize, wall: bool) {
        if x < self.width && y < self.height {
            self.walls[y * self.width + x] = wall;
        }
    }

    /// Coordinates of every wall cell, row by row.
    pub fn wall_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, wall)| **wall)
            .map(|(index, _)| (index % self.width, index / self.width))
    }

    /// Number of wall cells.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|wall| **wall).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityId, MapGrid, Vec2};

    #[test]
    fn test_vec2_arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);

        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(a / 2.0, Vec2::new(0.5, 1.0));
        assert!((Vec2::new(3.0, 4.0).length() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vec2_is_nonzero_on_either_axis() {
        assert!(!Vec2::ZERO.is_nonzero());
        assert!(Vec2::new(0.0, -0.1).is_nonzero());
        assert!(Vec2::new(2.0, 0.0).is_nonzero());
    }

    #[test]
    fn test_from_angle_points_along_heading() {
        let south = Vec2::from_angle(std::f64::consts::FRAC_PI_2);

        assert!(south.x.abs() < 1e-12);
        assert!((south.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_map_grid_walls() {
        // Arrange
        let mut grid = MapGrid::open(3, 2, 1.0);

        // Act
        grid.set_wall(2, 1, true);
        grid.set_wall(0, 0, true);
        grid.set_wall(9, 9, true);

        // Assert
        assert!(grid.is_wall(2, 1));
        assert!(!grid.is_wall(1, 1));
        assert!(!grid.is_wall(9, 9));
        assert_eq!(grid.wall_cells().collect::<Vec<_>>(), vec![(0, 0), (2, 1)]);
        assert_eq!(grid.wall_count(), 2);
    }

    #[test]
    fn test_entity_id_display_and_next() {
        assert_eq!(EntityId(4).next(), EntityId(5));
        assert_eq!(EntityId(4).to_string(), "entity-4");
    }
}
