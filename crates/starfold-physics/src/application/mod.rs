//! Wiring and reporting on top of the physics domain.

pub mod views;
pub mod world;
