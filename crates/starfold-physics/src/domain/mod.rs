//! Domain model for the physics context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod read_model;
pub mod types;

use starfold_core::aggregate::Domain;

use self::commands::SimCommand;
use self::events::SimEvent;
use self::read_model::SceneModel;

/// Marker tying the physics commands, events and scene together.
#[derive(Debug)]
pub struct Physics;

impl Domain for Physics {
    type Command = SimCommand;
    type Event = SimEvent;
    type ReadModel = SceneModel;
}
