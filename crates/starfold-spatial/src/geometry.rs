//! Points and axis-aligned square regions.

/// A position in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate; grows southward.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned square given by its centre and half side length.
///
/// Both [`contains`](Self::contains) and [`intersects`](Self::intersects)
/// treat the edges as inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Centre of the square.
    pub center: Point,
    /// Half of the side length.
    pub half_extent: f64,
}

impl BoundingBox {
    /// Creates a square centred on `center`.
    #[must_use]
    pub const fn new(center: Point, half_extent: f64) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Returns `true` if `point` lies inside or on the edge of this square.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let Point { x, y } = self.center;
        let w = self.half_extent;
        point.x >= x - w && point.x <= x + w && point.y >= y - w && point.y <= y + w
    }

    /// Returns `true` if the two squares overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let Point { x, y } = self.center;
        let w = self.half_extent;
        let o = other.half_extent;
        !(other.center.x - o > x + w
            || other.center.x + o < x - w
            || other.center.y - o > y + w
            || other.center.y + o < y - w)
    }

    /// Splits the square into its northwest, northeast, southwest and
    /// southeast quarters, in that order.
    #[must_use]
    pub fn quadrants(&self) -> [Self; 4] {
        let Point { x, y } = self.center;
        let half = self.half_extent / 2.0;
        [
            Self::new(Point::new(x - half, y - half), half),
            Self::new(Point::new(x + half, y - half), half),
            Self::new(Point::new(x - half, y + half), half),
            Self::new(Point::new(x + half, y + half), half),
        ]
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.center.is_finite() && self.half_extent.is_finite() && self.half_extent > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundingBox, Point};

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point::new(0.0, 0.0), 1.0)
    }

    #[test]
    fn test_contains_includes_edges() {
        let boundary = unit_box();

        assert!(boundary.contains(Point::new(1.0, 1.0)));
        assert!(boundary.contains(Point::new(-1.0, 0.0)));
        assert!(!boundary.contains(Point::new(1.0001, 0.0)));
    }

    #[test]
    fn test_intersects_touching_and_disjoint() {
        let boundary = unit_box();
        let touching = BoundingBox::new(Point::new(2.0, 0.0), 1.0);
        let disjoint = BoundingBox::new(Point::new(0.0, 3.5), 1.0);
        let enclosed = BoundingBox::new(Point::new(0.25, 0.25), 0.1);

        assert!(boundary.intersects(&touching));
        assert!(!boundary.intersects(&disjoint));
        assert!(boundary.intersects(&enclosed));
        assert!(enclosed.intersects(&boundary));
    }

    #[test]
    fn test_quadrants_partition_the_square() {
        // Arrange
        let boundary = BoundingBox::new(Point::new(10.0, 10.0), 4.0);

        // Act
        let [nw, ne, sw, se] = boundary.quadrants();

        // Assert
        assert_eq!(nw, BoundingBox::new(Point::new(8.0, 8.0), 2.0));
        assert_eq!(ne, BoundingBox::new(Point::new(12.0, 8.0), 2.0));
        assert_eq!(sw, BoundingBox::new(Point::new(8.0, 12.0), 2.0));
        assert_eq!(se, BoundingBox::new(Point::new(12.0, 12.0), 2.0));
        for corner in [
            Point::new(6.0, 6.0),
            Point::new(14.0, 6.0),
            Point::new(6.0, 14.0),
            Point::new(14.0, 14.0),
            Point::new(10.0, 10.0),
        ] {
            assert!([nw, ne, sw, se].iter().any(|q| q.contains(corner)));
        }
    }

    #[test]
    fn test_degenerate_boxes_are_invalid() {
        assert!(unit_box().is_valid());
        assert!(!BoundingBox::new(Point::new(0.0, 0.0), 0.0).is_valid());
        assert!(!BoundingBox::new(Point::new(f64::NAN, 0.0), 1.0).is_valid());
        assert!(!BoundingBox::new(Point::new(0.0, 0.0), f64::INFINITY).is_valid());
    }
}
