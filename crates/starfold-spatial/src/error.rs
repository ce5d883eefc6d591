//! Spatial index error types.

/// Errors a caller can provoke when building or updating a [`QuadTree`].
///
/// [`QuadTree`]: crate::QuadTree
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpatialError {
    /// A node must hold at least one entry before it subdivides.
    #[error("quadtree capacity must be at least 1")]
    ZeroCapacity,

    /// The root boundary has a non-finite centre or a non-positive extent.
    #[error("invalid boundary: centre ({x}, {y}), half extent {half_extent}")]
    InvalidBoundary {
        /// Centre x.
        x: f64,
        /// Centre y.
        y: f64,
        /// Half of the side length.
        half_extent: f64,
    },

    /// A move was asked to search a negative or non-finite window.
    #[error("search radius must be finite and non-negative, got {radius}")]
    InvalidSearchRadius {
        /// The rejected radius.
        radius: f64,
    },

    /// The point lies outside the root boundary.
    #[error("point ({x}, {y}) lies outside the tree boundary")]
    OutOfBounds {
        /// Point x.
        x: f64,
        /// Point y.
        y: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::SpatialError;

    #[test]
    fn test_out_of_bounds_display() {
        let error = SpatialError::OutOfBounds { x: 12.5, y: -3.0 };

        assert_eq!(
            error.to_string(),
            "point (12.5, -3) lies outside the tree boundary"
        );
    }
}
