//! Starfold simulation — a headless run of the physics world.
//!
//! Reads its settings from the environment, generates a maze, joins the
//! configured number of players and drives the kernel with wall-clock
//! ticks through a [`starfold_core::TokioScheduler`].

pub mod config;
pub mod error;
pub mod runner;

pub use config::SimConfig;
pub use error::SimError;
pub use runner::run;
