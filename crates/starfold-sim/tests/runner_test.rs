use chrono::{TimeDelta, TimeZone, Utc};
use starfold_core::rng::SeededRng;
use starfold_physics::domain::types::Vec2;
use starfold_physics::maze;
use starfold_sim::{SimConfig, run};
use starfold_test_support::{FixedClock, MockRng, SteppingClock};

fn config(ticks: u64) -> SimConfig {
    SimConfig {
        ticks,
        tick_millis: 1,
        players: 2,
        maze_width: 3,
        maze_height: 3,
        maze_scale: 2,
        seed: 0,
    }
}

fn clock() -> SteppingClock {
    let start = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
    SteppingClock::new(start, TimeDelta::milliseconds(100))
}

#[tokio::test]
async fn test_run_reports_final_world() {
    // Arrange
    let config = config(5);
    let walls = maze::generate(3, 3, 2, &mut MockRng).wall_count();

    // Act
    let view = run(&config, &clock(), &mut MockRng).await.unwrap();

    // Assert
    assert_eq!(view.ticks, 5);
    assert!((view.elapsed - 0.5).abs() < 1e-9);
    assert_eq!(view.players.len(), 2);
    assert!(view.players.iter().all(|player| player.entity_id.is_some()));
    assert_eq!(view.entities.len(), 2);
    assert_eq!(view.colliders, 2);
    assert_eq!(view.tiles, walls);
}

#[tokio::test]
async fn test_ships_flying_in_formation_collide_every_tick() {
    // Arrange
    let config = config(5);

    // Act
    let view = run(&config, &clock(), &mut MockRng).await.unwrap();

    // Assert
    assert_eq!(view.collisions, 5);
    assert_eq!(view.entities[0].position, view.entities[1].position);
    assert!((view.entities[0].position.x - 1.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_frozen_clock_ticks_without_advancing_time() {
    // Arrange
    let config = config(4);
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());

    // Act
    let view = run(&config, &clock, &mut MockRng).await.unwrap();

    // Assert
    assert_eq!(view.ticks, 4);
    assert!(view.elapsed.abs() < f64::EPSILON);
    for entity in &view.entities {
        assert_eq!(entity.position, Vec2::ZERO);
        assert_eq!(entity.velocity, Some(Vec2::ZERO));
    }
    assert_eq!(view.collisions, 4);
}

#[tokio::test]
async fn test_zero_ticks_still_builds_world() {
    let view = run(&config(0), &clock(), &mut MockRng).await.unwrap();

    assert_eq!(view.ticks, 0);
    assert_eq!(view.entities.len(), 2);
    assert!(view.last_event_id > 0);
}

#[tokio::test]
async fn test_same_seed_replays_same_flight() {
    // Arrange
    let config = config(20);

    // Act
    let first = run(&config, &clock(), &mut SeededRng::new(9)).await.unwrap();
    let second = run(&config, &clock(), &mut SeededRng::new(9)).await.unwrap();

    // Assert
    assert_eq!(first.entities, second.entities);
    assert_eq!(first.last_event_id, second.last_event_id);
    assert_eq!(first.collisions, second.collisions);
}
