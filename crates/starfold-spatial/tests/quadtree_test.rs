//! Behavioural guarantees of the persistent quadtree.

use starfold_spatial::{BoundingBox, Point, QuadTree};

fn world() -> QuadTree<u32> {
    QuadTree::new(BoundingBox::new(Point::new(0.0, 0.0), 1000.0), 4).unwrap()
}

fn payloads(tree: &QuadTree<u32>) -> Vec<u32> {
    let mut found: Vec<u32> = tree.iter().map(|entry| entry.payload).collect();
    found.sort_unstable();
    found
}

fn grid_points() -> Vec<(u32, Point)> {
    (0u32..64)
        .map(|n| {
            let x = f64::from(n % 8) * 220.0 - 770.0;
            let y = f64::from(n / 8) * 220.0 - 770.0;
            (n, Point::new(x, y))
        })
        .collect()
}

#[test]
fn test_round_trip_returns_every_inserted_entry_once() {
    // Arrange
    let mut tree = world();
    let points = grid_points();

    // Act
    for (payload, position) in &points {
        tree = tree.insert(*payload, *position).unwrap();
    }

    // Assert
    let everything: Vec<_> = tree.query(tree.boundary()).collect();
    assert_eq!(everything.len(), points.len());
    assert_eq!(payloads(&tree), (0..64).collect::<Vec<_>>());
    for (payload, position) in &points {
        let matches: Vec<_> = everything
            .iter()
            .filter(|entry| entry.payload == *payload)
            .collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].position, *position);
    }
}

#[test]
fn test_move_twice_to_same_destination_is_idempotent() {
    // Arrange
    let mut tree = world();
    for (payload, position) in grid_points() {
        tree = tree.insert(payload, position).unwrap();
    }
    let destination = Point::new(-765.0, -765.0);

    // Act
    let once = tree.move_where(destination, 10.0, |payload| *payload == 0).unwrap();
    let twice = once.move_where(destination, 10.0, |payload| *payload == 0).unwrap();

    // Assert
    let located = |tree: &QuadTree<u32>| {
        tree.iter()
            .filter(|entry| entry.payload == 0)
            .map(|entry| entry.position)
            .collect::<Vec<_>>()
    };
    assert_eq!(located(&once), vec![destination]);
    assert_eq!(located(&twice), vec![destination]);
    assert_eq!(payloads(&once), payloads(&twice));
    assert_eq!(twice.len(), 64);
}

#[test]
fn test_move_with_window_missing_the_entry_changes_nothing() {
    // Arrange
    let mut tree = world();
    for (payload, position) in grid_points() {
        tree = tree.insert(payload, position).unwrap();
    }
    let before: Vec<_> = tree.iter().cloned().collect();

    // Act
    let after = tree
        .move_where(Point::new(-700.0, -700.0), 5.0, |payload| *payload == 63)
        .unwrap();

    // Assert
    let after_entries: Vec<_> = after.iter().cloned().collect();
    assert_eq!(after_entries, before);
}

#[test]
fn test_old_roots_keep_their_contents() {
    // Arrange
    let mut tree = world();
    for (payload, position) in grid_points() {
        tree = tree.insert(payload, position).unwrap();
    }
    let original: Vec<_> = tree.iter().cloned().collect();

    // Act
    let inserted = tree.insert(100, Point::new(1.0, 1.0)).unwrap();
    let removed = inserted
        .remove_where(inserted.boundary(), |payload| *payload == 5)
        .unwrap();
    let moved = removed
        .move_where(Point::new(-760.0, -760.0), 15.0, |payload| *payload == 0)
        .unwrap();

    // Assert
    assert_eq!(tree.iter().cloned().collect::<Vec<_>>(), original);
    assert_eq!(inserted.len(), 65);
    assert!(payloads(&inserted).contains(&5));
    assert_eq!(removed.len(), 64);
    assert!(!payloads(&removed).contains(&5));
    assert!(
        removed
            .iter()
            .any(|entry| entry.payload == 0 && entry.position == Point::new(-770.0, -770.0))
    );
    assert!(
        moved
            .iter()
            .any(|entry| entry.payload == 0 && entry.position == Point::new(-760.0, -760.0))
    );
}

#[test]
fn test_query_over_subset_matches_brute_force() {
    // Arrange
    let mut tree = world();
    let points = grid_points();
    for (payload, position) in &points {
        tree = tree.insert(*payload, *position).unwrap();
    }
    let range = BoundingBox::new(Point::new(-100.0, 200.0), 350.0);

    // Act
    let mut found: Vec<u32> = tree.query(range).map(|entry| entry.payload).collect();
    found.sort_unstable();

    // Assert
    let mut expected: Vec<u32> = points
        .iter()
        .filter(|(_, position)| range.contains(*position))
        .map(|(payload, _)| *payload)
        .collect();
    expected.sort_unstable();
    assert!(!expected.is_empty());
    assert_eq!(found, expected);
}
