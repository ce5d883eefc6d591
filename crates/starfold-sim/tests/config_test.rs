use std::collections::HashMap;
use std::time::Duration;

use starfold_sim::config::{MAX_MAZE_ROOMS, MAX_MAZE_SCALE};
use starfold_sim::{SimConfig, SimError};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_unset_variables_keep_defaults() {
    let config = SimConfig::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config, SimConfig::default());
    assert_eq!(config.tick_interval(), Duration::from_millis(16));
}

#[test]
fn test_variables_override_defaults() {
    // Arrange
    let vars = lookup(&[
        ("STARFOLD_TICKS", "42"),
        ("STARFOLD_TICK_MILLIS", "5"),
        ("STARFOLD_PLAYERS", "4"),
        ("STARFOLD_MAZE_WIDTH", "6"),
        ("STARFOLD_MAZE_HEIGHT", " 7 "),
        ("STARFOLD_MAZE_SCALE", "3"),
        ("STARFOLD_SEED", "1234"),
    ]);

    // Act
    let config = SimConfig::from_lookup(vars).unwrap();

    // Assert
    assert_eq!(
        config,
        SimConfig {
            ticks: 42,
            tick_millis: 5,
            players: 4,
            maze_width: 6,
            maze_height: 7,
            maze_scale: 3,
            seed: 1234,
        }
    );
}

#[test]
fn test_unparsable_value_names_the_variable() {
    // Arrange
    let vars = lookup(&[("STARFOLD_TICKS", "many")]);

    // Act
    let err = SimConfig::from_lookup(vars).unwrap_err();

    // Assert
    assert!(matches!(err, SimError::Config(_)));
    assert!(err.to_string().contains("STARFOLD_TICKS must be a valid u64"));
}

#[test]
fn test_negative_seed_is_rejected() {
    let err = SimConfig::from_lookup(lookup(&[("STARFOLD_SEED", "-1")])).unwrap_err();

    assert!(err.to_string().contains("STARFOLD_SEED"));
}

#[test]
fn test_out_of_range_values_are_rejected() {
    let cases = [
        ("STARFOLD_TICK_MILLIS", "0"),
        ("STARFOLD_MAZE_WIDTH", "0"),
        ("STARFOLD_MAZE_HEIGHT", "0"),
        ("STARFOLD_MAZE_SCALE", "1"),
    ];

    for (key, value) in cases {
        let err = SimConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "configuration error: {key} must be at least {}, got {value}",
                if key == "STARFOLD_MAZE_SCALE" { 2 } else { 1 }
            )
        );
    }
}

#[test]
fn test_oversized_maze_is_rejected() {
    // Arrange
    let cases = [
        ("STARFOLD_MAZE_WIDTH", "129", 128),
        ("STARFOLD_MAZE_HEIGHT", "100000", 128),
        ("STARFOLD_MAZE_SCALE", "33", 32),
    ];

    for (key, value, max) in cases {
        // Act
        let err = SimConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();

        // Assert
        assert_eq!(
            err.to_string(),
            format!("configuration error: {key} must be at most {max}, got {value}")
        );
    }
}

#[test]
fn test_largest_maze_is_accepted() {
    let vars = lookup(&[
        ("STARFOLD_MAZE_WIDTH", "128"),
        ("STARFOLD_MAZE_HEIGHT", "128"),
        ("STARFOLD_MAZE_SCALE", "32"),
    ]);

    let config = SimConfig::from_lookup(vars).unwrap();

    assert_eq!(
        (config.maze_width, config.maze_height, config.maze_scale),
        (MAX_MAZE_ROOMS, MAX_MAZE_ROOMS, MAX_MAZE_SCALE)
    );
}
