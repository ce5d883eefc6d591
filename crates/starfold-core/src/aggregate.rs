//! Aggregate abstraction.

use std::fmt::Debug;

use crate::command::Command;
use crate::event::DomainEvent;
use crate::result::DispatchResult;

/// Groups the command, event and read-model types of one kernel.
pub trait Domain: 'static {
    /// Closed set of commands routed by the kernel.
    type Command: Command;
    /// Closed set of events produced by `execute`.
    type Event: DomainEvent;
    /// Caller-owned structure mutated only through `project`.
    type ReadModel: Send + 'static;
}

/// Kind discriminant of a domain's commands.
pub type CommandKind<D> = <<D as Domain>::Command as Command>::Kind;

/// A unit of state and behavior participating in the dispatch cycle.
///
/// Every capability is optional: the defaults decline every input, which
/// is how an aggregate that only projects, or only applies, is written.
/// The kernel owns the state; the aggregate itself is a stateless bundle
/// of functions (configuration fields are fine).
pub trait Aggregate<D: Domain>: Send + 'static {
    /// State folded from events. Aggregates without state use `()`.
    type State: Clone + Default + Debug + Send + Sync + 'static;

    /// Stable name used in logs and routing errors.
    fn name(&self) -> &'static str;

    /// Command kinds this aggregate executes.
    ///
    /// Every kind must be claimed by exactly one registered aggregate.
    fn accepts(&self) -> &'static [CommandKind<D>] {
        &[]
    }

    /// Decides which events a routed command produces.
    ///
    /// Only called for commands whose kind appears in [`Aggregate::accepts`].
    /// Returning [`DispatchResult::None`] is legal: the command was handled
    /// and nothing happened.
    fn execute(&self, _state: &Self::State, _command: &D::Command) -> DispatchResult<D::Event> {
        DispatchResult::None
    }

    /// Folds an event into a new state. `None` leaves the state unchanged.
    fn apply(&self, _state: &Self::State, _event: &D::Event) -> Option<Self::State> {
        None
    }

    /// Reacts to an event, after it has been applied, with follow-up commands.
    fn process(&self, _state: &Self::State, _event: &D::Event) -> DispatchResult<D::Command> {
        DispatchResult::None
    }

    /// Writes an event into the read model.
    fn project(&self, _read_model: &mut D::ReadModel, _event: &D::Event) {}
}
