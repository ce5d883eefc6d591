//! Persistent point quadtree.
//!
//! Nodes are immutable and reference counted. Inserting, removing or
//! moving an entry rebuilds only the nodes on the path from the root to
//! the touched leaf; every other subtree is shared between the old and
//! the new tree.

use std::sync::Arc;

use tracing::debug;

use crate::error::SpatialError;
use crate::geometry::{BoundingBox, Point};

/// Depth at which nodes stop subdividing and accept entries past capacity.
pub const MAX_DEPTH: u32 = 32;

/// A payload stored at a position.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    /// Where the payload sits.
    pub position: Point,
    /// The indexed value.
    pub payload: T,
}

#[derive(Debug, Clone)]
struct Node<T> {
    boundary: BoundingBox,
    capacity: usize,
    depth: u32,
    entries: Vec<Entry<T>>,
    /// Northwest, northeast, southwest, southeast.
    children: Option<[Arc<Node<T>>; 4]>,
}

impl<T: Clone> Node<T> {
    fn empty(boundary: BoundingBox, capacity: usize, depth: u32) -> Self {
        Self {
            boundary,
            capacity,
            depth,
            entries: Vec::new(),
            children: None,
        }
    }

    fn subdivide(&self) -> [Arc<Self>; 4] {
        self.boundary
            .quadrants()
            .map(|quadrant| Arc::new(Self::empty(quadrant, self.capacity, self.depth + 1)))
    }

    fn has_room(&self) -> bool {
        self.entries.len() < self.capacity || self.depth >= MAX_DEPTH
    }

    /// Returns `None` if `entry` lies outside this node.
    fn insert(node: &Arc<Self>, entry: Entry<T>) -> Option<Arc<Self>> {
        if !node.boundary.contains(entry.position) {
            return None;
        }

        if node.children.is_none() && node.has_room() {
            let mut next = Self::clone(node);
            next.entries.push(entry);
            return Some(Arc::new(next));
        }

        let mut children = match &node.children {
            Some(children) => children.clone(),
            None => node.subdivide(),
        };
        let slot = children
            .iter()
            .position(|child| child.boundary.contains(entry.position))
            .unwrap_or_else(|| {
                panic!(
                    "quadtree geometry violated: no quadrant of {:?} contains ({}, {})",
                    node.boundary, entry.position.x, entry.position.y
                )
            });
        let updated = Self::insert(&children[slot], entry).unwrap_or_else(|| {
            panic!("quadtree geometry violated: quadrant {slot} rejected a point it contains")
        });
        children[slot] = updated;

        let mut next = Self::clone(node);
        next.children = Some(children);
        Some(Arc::new(next))
    }

    fn take<P>(
        node: &Arc<Self>,
        range: &BoundingBox,
        predicate: &mut P,
    ) -> Option<(Arc<Self>, Entry<T>)>
    where
        P: FnMut(&T) -> bool,
    {
        if !node.boundary.intersects(range) {
            return None;
        }

        if let Some(index) = node.entries.iter().position(|entry| predicate(&entry.payload)) {
            let mut next = Self::clone(node);
            let removed = next.entries.remove(index);
            return Some((Arc::new(next), removed));
        }

        let children = node.children.as_ref()?;
        for (slot, child) in children.iter().enumerate() {
            if let Some((updated, removed)) = Self::take(child, range, predicate) {
                let mut next_children = children.clone();
                next_children[slot] = updated;
                let mut next = Self::clone(node);
                next.children = Some(next_children);
                return Some((Arc::new(next), removed));
            }
        }
        None
    }

    fn len(&self) -> usize {
        self.entries.len()
            + self
                .children
                .iter()
                .flatten()
                .map(|child| child.len())
                .sum::<usize>()
    }
}

/// An immutable quadtree of payloads indexed by position.
///
/// Cloning is O(1) and every operation that changes the tree returns a new
/// value, leaving `self` untouched.
#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    root: Arc<Node<T>>,
}

impl<T: Clone> QuadTree<T> {
    /// Creates an empty tree covering `boundary`, holding up to `capacity`
    /// entries per node before subdividing.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::ZeroCapacity`] for a zero capacity and
    /// [`SpatialError::InvalidBoundary`] for a non-finite or non-positive
    /// boundary.
    pub fn new(boundary: BoundingBox, capacity: usize) -> Result<Self, SpatialError> {
        if capacity == 0 {
            return Err(SpatialError::ZeroCapacity);
        }
        if !boundary.is_valid() {
            return Err(SpatialError::InvalidBoundary {
                x: boundary.center.x,
                y: boundary.center.y,
                half_extent: boundary.half_extent,
            });
        }
        Ok(Self {
            root: Arc::new(Node::empty(boundary, capacity, 0)),
        })
    }

    /// The region covered by the root node.
    #[must_use]
    pub fn boundary(&self) -> BoundingBox {
        self.root.boundary
    }

    /// Entries a node holds before it subdivides.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.root.capacity
    }

    /// Number of entries in the whole tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a tree with `payload` added at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::OutOfBounds`] if `position` lies outside the
    /// root boundary.
    ///
    /// # Panics
    ///
    /// Panics if a subdivided node cannot place a point it contains into
    /// any of its quadrants, which means the quadrant arithmetic is broken.
    pub fn insert(&self, payload: T, position: Point) -> Result<Self, SpatialError> {
        self.insert_entry(Entry { position, payload })
    }

    fn insert_entry(&self, entry: Entry<T>) -> Result<Self, SpatialError> {
        let Point { x, y } = entry.position;
        let root = Node::insert(&self.root, entry).ok_or(SpatialError::OutOfBounds { x, y })?;
        Ok(Self { root })
    }

    /// Lazily yields every entry whose position lies inside `range`.
    ///
    /// Entries come out in pre-order: a node's own entries, then its
    /// northwest, northeast, southwest and southeast subtrees. Subtrees
    /// whose boundary does not touch `range` are skipped.
    #[must_use]
    pub fn query(&self, range: BoundingBox) -> Query<'_, T> {
        Query {
            range,
            pending: vec![self.root.as_ref()],
            current: None,
        }
    }

    /// Yields every entry in the tree, in the same order as [`query`](Self::query).
    #[must_use]
    pub fn iter(&self) -> Query<'_, T> {
        self.query(self.root.boundary)
    }

    /// Removes the first entry whose payload satisfies `predicate`.
    ///
    /// Only nodes whose boundary touches `range` are searched, in
    /// pre-order. Within a searched node the payload is matched regardless
    /// of where inside the node it sits. Returns `None` if nothing matched.
    #[must_use]
    pub fn remove_where(
        &self,
        range: BoundingBox,
        predicate: impl FnMut(&T) -> bool,
    ) -> Option<Self> {
        self.take_where(range, predicate).map(|(tree, _)| tree)
    }

    /// Like [`remove_where`](Self::remove_where), but also hands back the
    /// removed entry.
    #[must_use]
    pub fn take_where(
        &self,
        range: BoundingBox,
        mut predicate: impl FnMut(&T) -> bool,
    ) -> Option<(Self, Entry<T>)> {
        Node::take(&self.root, &range, &mut predicate).map(|(root, removed)| (Self { root }, removed))
    }

    /// Relocates the first payload matching `predicate` to `destination`.
    ///
    /// The payload is searched for in a square of half extent
    /// `search_radius` centred on `destination`. If the payload currently
    /// sits outside that window it is not found and an unchanged tree is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidSearchRadius`] for a negative or
    /// non-finite `search_radius`, and [`SpatialError::OutOfBounds`] if
    /// `destination` lies outside the root boundary.
    ///
    /// # Panics
    ///
    /// Panics under the same geometry violation as [`insert`](Self::insert).
    pub fn move_where(
        &self,
        destination: Point,
        search_radius: f64,
        predicate: impl FnMut(&T) -> bool,
    ) -> Result<Self, SpatialError> {
        if !search_radius.is_finite() || search_radius < 0.0 {
            return Err(SpatialError::InvalidSearchRadius {
                radius: search_radius,
            });
        }
        if !self.root.boundary.contains(destination) {
            return Err(SpatialError::OutOfBounds {
                x: destination.x,
                y: destination.y,
            });
        }

        let window = BoundingBox::new(destination, search_radius);
        match self.take_where(window, predicate) {
            Some((tree, removed)) => tree.insert_entry(Entry {
                position: destination,
                payload: removed.payload,
            }),
            None => {
                debug!(
                    x = destination.x,
                    y = destination.y,
                    search_radius,
                    "move found no matching entry inside the search window"
                );
                Ok(self.clone())
            }
        }
    }

    /// Returns `true` if both trees share the same root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.root, &other.root)
    }
}

impl<'a, T: Clone> IntoIterator for &'a QuadTree<T> {
    type Item = &'a Entry<T>;
    type IntoIter = Query<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy, pre-order range query over a [`QuadTree`].
#[derive(Debug)]
pub struct Query<'a, T> {
    range: BoundingBox,
    pending: Vec<&'a Node<T>>,
    current: Option<(&'a Node<T>, usize)>,
}

impl<'a, T> Iterator for Query<'a, T> {
    type Item = &'a Entry<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((node, index)) = self.current.as_mut() {
                let node: &'a Node<T> = *node;
                while let Some(entry) = node.entries.get(*index) {
                    *index += 1;
                    if self.range.contains(entry.position) {
                        return Some(entry);
                    }
                }
                if let Some(children) = &node.children {
                    self.pending
                        .extend(children.iter().rev().map(AsRef::as_ref));
                }
                self.current = None;
            }

            let node = self.pending.pop()?;
            if node.boundary.intersects(&self.range) {
                self.current = Some((node, 0));
            }
        }
    }
}
