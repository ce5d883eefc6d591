//! Starfold — toy 2D physics bounded context.
//!
//! Players steer ships through a generated maze. Every piece of behaviour
//! is an aggregate registered with a `starfold_core::Kernel`; the scene a
//! renderer would draw is kept up to date through projections.

pub mod application;
pub mod domain;
pub mod maze;
