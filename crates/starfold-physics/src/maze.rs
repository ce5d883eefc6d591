//! Maze generation by randomized Kruskal.
//!
//! The maze is a spanning tree over a `width` x `height` lattice of rooms.
//! Every room is `scale - 1` grid cells square; walls are one grid cell
//! thick, and a passage between two rooms opens the wall segment that
//! separates them. The outer border is always solid.

use starfold_core::rng::DeterministicRng;
use tracing::debug;

use crate::domain::types::MapGrid;

/// Side length of one grid cell in metres.
pub const CELL_WIDTH: f64 = 1.0;

/// A wall between a room and its west or north neighbour.
#[derive(Debug, Clone, Copy)]
enum Edge {
    West { x: usize, y: usize },
    North { x: usize, y: usize },
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Joins the sets of `a` and `b`; `false` if they were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        self.parent[b] = a;
        true
    }
}

/// Generates a maze of `width` x `height` rooms, each `scale` grid cells
/// apart, as a wall grid of `width * scale + 1` by `height * scale + 1`
/// cells.
///
/// Dimensions are clamped to at least one room, and `scale` to at least 2
/// so every room has an open interior. The same RNG sequence always
/// yields the same maze.
#[must_use]
pub fn generate(
    width: usize,
    height: usize,
    scale: usize,
    rng: &mut dyn DeterministicRng,
) -> MapGrid {
    let (width, height, scale) = (width.max(1), height.max(1), scale.max(2));
    let room = |x: usize, y: usize| y * width + x;

    let mut edges = Vec::with_capacity(2 * width * height);
    for y in 0..height {
        for x in 0..width {
            if y > 0 {
                edges.push(Edge::North { x, y });
            }
            if x > 0 {
                edges.push(Edge::West { x, y });
            }
        }
    }
    shuffle(&mut edges, rng);

    let mut west_open = vec![false; width * height];
    let mut north_open = vec![false; width * height];
    let mut rooms = DisjointSet::new(width * height);
    for edge in edges {
        match edge {
            Edge::West { x, y } => {
                if rooms.union(room(x - 1, y), room(x, y)) {
                    west_open[room(x, y)] = true;
                }
            }
            Edge::North { x, y } => {
                if rooms.union(room(x, y - 1), room(x, y)) {
                    north_open[room(x, y)] = true;
                }
            }
        }
    }

    let (grid_width, grid_height) = (width * scale + 1, height * scale + 1);
    let mut grid = MapGrid::open(grid_width, grid_height, CELL_WIDTH);
    for gy in 0..grid_height {
        for gx in 0..grid_width {
            let on_column = gx % scale == 0;
            let on_row = gy % scale == 0;
            let (x, y) = (gx / scale, gy / scale);
            let wall = match (on_column, on_row) {
                (true, true) => true,
                (true, false) => gx == 0 || gx == grid_width - 1 || !west_open[room(x, y)],
                (false, true) => gy == 0 || gy == grid_height - 1 || !north_open[room(x, y)],
                (false, false) => false,
            };
            grid.set_wall(gx, gy, wall);
        }
    }

    debug!(
        width,
        height,
        scale,
        walls = grid.wall_count(),
        "maze generated"
    );
    grid
}

/// Fisher-Yates, drawing each swap index from `rng`.
fn shuffle<T>(items: &mut [T], rng: &mut dyn DeterministicRng) {
    for i in (1..items.len()).rev() {
        let bound = u32::try_from(i).unwrap_or(u32::MAX);
        let j = usize::try_from(rng.next_u32_range(0, bound)).map_or(i, |j| j.min(i));
        items.swap(i, j);
    }
}
