//! Runtime settings read from the environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::error::SimError;

/// Largest maze side, in rooms.
pub const MAX_MAZE_ROOMS: usize = 128;

/// Largest room size, in grid cells.
pub const MAX_MAZE_SCALE: usize = 32;

/// Settings for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Ticks to simulate before exiting (`STARFOLD_TICKS`).
    pub ticks: u64,
    /// Wall-clock pause between ticks in milliseconds
    /// (`STARFOLD_TICK_MILLIS`, at least 1).
    pub tick_millis: u64,
    /// Players to join (`STARFOLD_PLAYERS`).
    pub players: usize,
    /// Maze width in rooms (`STARFOLD_MAZE_WIDTH`, 1 to 128).
    pub maze_width: usize,
    /// Maze height in rooms (`STARFOLD_MAZE_HEIGHT`, 1 to 128).
    pub maze_height: usize,
    /// Grid cells per room (`STARFOLD_MAZE_SCALE`, 2 to 32).
    pub maze_scale: usize,
    /// Seed for maze generation and simulated input (`STARFOLD_SEED`).
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            tick_millis: 16,
            players: 2,
            maze_width: 10,
            maze_height: 10,
            maze_scale: 10,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if a variable is set but cannot be parsed
    /// or is out of range.
    pub fn from_env() -> Result<Self, SimError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; unset keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if a value cannot be parsed or is out of
    /// range.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SimError> {
        let defaults = Self::default();
        let config = Self {
            ticks: parse(&lookup, "STARFOLD_TICKS", defaults.ticks)?,
            tick_millis: parse(&lookup, "STARFOLD_TICK_MILLIS", defaults.tick_millis)?,
            players: parse(&lookup, "STARFOLD_PLAYERS", defaults.players)?,
            maze_width: parse(&lookup, "STARFOLD_MAZE_WIDTH", defaults.maze_width)?,
            maze_height: parse(&lookup, "STARFOLD_MAZE_HEIGHT", defaults.maze_height)?,
            maze_scale: parse(&lookup, "STARFOLD_MAZE_SCALE", defaults.maze_scale)?,
            seed: parse(&lookup, "STARFOLD_SEED", defaults.seed)?,
        };

        at_least("STARFOLD_TICK_MILLIS", config.tick_millis, 1)?;
        at_least("STARFOLD_MAZE_WIDTH", config.maze_width, 1)?;
        at_most("STARFOLD_MAZE_WIDTH", config.maze_width, MAX_MAZE_ROOMS)?;
        at_least("STARFOLD_MAZE_HEIGHT", config.maze_height, 1)?;
        at_most("STARFOLD_MAZE_HEIGHT", config.maze_height, MAX_MAZE_ROOMS)?;
        at_least("STARFOLD_MAZE_SCALE", config.maze_scale, 2)?;
        at_most("STARFOLD_MAZE_SCALE", config.maze_scale, MAX_MAZE_SCALE)?;
        Ok(config)
    }

    /// Pause between ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, SimError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e| {
            SimError::Config(format!(
                "{key} must be a valid {}: {e}",
                std::any::type_name::<T>()
            ))
        }),
    }
}

fn at_least<T: PartialOrd + Display>(key: &str, value: T, min: T) -> Result<(), SimError> {
    if value < min {
        return Err(SimError::Config(format!(
            "{key} must be at least {min}, got {value}"
        )));
    }
    Ok(())
}

fn at_most<T: PartialOrd + Display>(key: &str, value: T, max: T) -> Result<(), SimError> {
    if value > max {
        return Err(SimError::Config(format!(
            "{key} must be at most {max}, got {value}"
        )));
    }
    Ok(())
}
