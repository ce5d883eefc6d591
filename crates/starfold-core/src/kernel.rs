//! The dispatch kernel.
//!
//! Execute → apply → project → process → recurse, depth-first, until the
//! cascade started by one external command settles.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::aggregate::{Aggregate, CommandKind, Domain};
use crate::command::Command;
use crate::error::RoutingError;
use crate::event::DomainEvent;
use crate::result::DispatchResult;

/// Shared handle to the caller-owned read model.
pub type ReadModelHandle<R> = Arc<Mutex<R>>;

/// One immutable aggregate state in the state collection.
type SharedState = Arc<dyn Any + Send + Sync>;

/// Summary of one external dispatch and everything it triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cascade {
    /// Commands executed, the external one included.
    pub commands: usize,
    /// Events published.
    pub events: usize,
    /// Deepest nesting level reached; the external command is level 0.
    pub max_depth: usize,
}

impl Cascade {
    fn record_command(&mut self, depth: usize) {
        self.commands += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Object-safe view of an [`Aggregate`] whose state lives in a shared slot.
trait RegisteredAggregate<D: Domain>: Send {
    fn name(&self) -> &'static str;
    fn identity(&self) -> TypeId;
    fn accepts(&self) -> &'static [CommandKind<D>];
    fn initial_state(&self) -> SharedState;
    fn execute(&self, state: &SharedState, command: &D::Command) -> DispatchResult<D::Event>;
    fn apply(&self, state: &SharedState, event: &D::Event) -> Option<SharedState>;
    fn process(&self, state: &SharedState, event: &D::Event) -> DispatchResult<D::Command>;
    fn project(&self, read_model: &mut D::ReadModel, event: &D::Event);
}

struct Registered<A>(A);

fn state_of<S: 'static>(state: &SharedState) -> &S {
    (**state)
        .downcast_ref::<S>()
        .expect("state slot holds the state type of the aggregate it was created for")
}

impl<D: Domain, A: Aggregate<D>> RegisteredAggregate<D> for Registered<A> {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn identity(&self) -> TypeId {
        TypeId::of::<A>()
    }

    fn accepts(&self) -> &'static [CommandKind<D>] {
        self.0.accepts()
    }

    fn initial_state(&self) -> SharedState {
        Arc::new(A::State::default())
    }

    fn execute(&self, state: &SharedState, command: &D::Command) -> DispatchResult<D::Event> {
        self.0.execute(state_of::<A::State>(state), command)
    }

    fn apply(&self, state: &SharedState, event: &D::Event) -> Option<SharedState> {
        self.0
            .apply(state_of::<A::State>(state), event)
            .map(|next| Arc::new(next) as SharedState)
    }

    fn process(&self, state: &SharedState, event: &D::Event) -> DispatchResult<D::Command> {
        self.0.process(state_of::<A::State>(state), event)
    }

    fn project(&self, read_model: &mut D::ReadModel, event: &D::Event) {
        self.0.project(read_model, event);
    }
}

/// Collects aggregates and verifies routing before handing out a [`Kernel`].
pub struct KernelBuilder<D: Domain> {
    aggregates: Vec<Box<dyn RegisteredAggregate<D>>>,
    read_model: ReadModelHandle<D::ReadModel>,
}

impl<D: Domain> KernelBuilder<D> {
    /// Starts a builder that projects into `read_model`.
    #[must_use]
    pub fn new(read_model: ReadModelHandle<D::ReadModel>) -> Self {
        Self {
            aggregates: Vec::new(),
            read_model,
        }
    }

    /// Registers an aggregate. Registration order is the order in which
    /// states are folded, projections run and follow-up commands are
    /// dispatched.
    #[must_use]
    pub fn register<A: Aggregate<D>>(mut self, aggregate: A) -> Self {
        self.aggregates.push(Box::new(Registered(aggregate)));
        self
    }

    /// Runs the exhaustive routing self-check and builds the kernel.
    ///
    /// # Errors
    ///
    /// Returns `RoutingError::DuplicateAggregate` if an aggregate type was
    /// registered twice, `RoutingError::Unhandled` if a command kind has no
    /// executing aggregate and `RoutingError::Ambiguous` if it has several.
    pub fn build(self) -> Result<Kernel<D>, RoutingError> {
        let mut slots = HashMap::with_capacity(self.aggregates.len());
        for (index, aggregate) in self.aggregates.iter().enumerate() {
            if slots.insert(aggregate.identity(), index).is_some() {
                return Err(RoutingError::DuplicateAggregate(aggregate.name()));
            }
        }

        let kinds = D::Command::all_kinds();
        let mut routes = HashMap::with_capacity(kinds.len());
        for kind in kinds {
            let claimants: Vec<usize> = self
                .aggregates
                .iter()
                .enumerate()
                .filter(|(_, aggregate)| aggregate.accepts().contains(kind))
                .map(|(index, _)| index)
                .collect();

            match claimants.as_slice() {
                [] => {
                    return Err(RoutingError::Unhandled {
                        kind: format!("{kind:?}"),
                    });
                }
                [index] => {
                    routes.insert(*kind, *index);
                }
                many => {
                    return Err(RoutingError::Ambiguous {
                        kind: format!("{kind:?}"),
                        aggregates: many
                            .iter()
                            .map(|index| self.aggregates[*index].name())
                            .collect(),
                    });
                }
            }
        }

        let states = self
            .aggregates
            .iter()
            .map(|aggregate| aggregate.initial_state())
            .collect();

        info!(
            aggregates = self.aggregates.len(),
            routes = routes.len(),
            "kernel routing table verified"
        );

        Ok(Kernel {
            aggregates: self.aggregates,
            states,
            slots,
            routes,
            read_model: self.read_model,
            last_event_id: 0,
        })
    }
}

/// Owns the state collection and drives the dispatch cycle.
///
/// Exactly one state slot exists per registered aggregate; slots are
/// created at build time and replaced, never mutated, on every publish.
pub struct Kernel<D: Domain> {
    aggregates: Vec<Box<dyn RegisteredAggregate<D>>>,
    states: Vec<SharedState>,
    slots: HashMap<TypeId, usize>,
    routes: HashMap<CommandKind<D>, usize>,
    read_model: ReadModelHandle<D::ReadModel>,
    last_event_id: u64,
}

impl<D: Domain> Kernel<D> {
    /// Shorthand for [`KernelBuilder::new`].
    #[must_use]
    pub fn builder(read_model: ReadModelHandle<D::ReadModel>) -> KernelBuilder<D> {
        KernelBuilder::new(read_model)
    }

    /// Dispatches a command and runs its whole cascade before returning.
    ///
    /// Every follow-up command is dispatched fully, including its own
    /// cascade, before the next one starts.
    ///
    /// # Panics
    ///
    /// Panics if a command's kind is missing from the routing table, which
    /// only happens when `Command::all_kinds` does not list every kind that
    /// `Command::kind` can return.
    pub fn dispatch(&mut self, command: D::Command) -> Cascade {
        let mut cascade = Cascade::default();
        self.dispatch_nested(&command, 0, &mut cascade);
        debug!(
            command_type = command.command_type(),
            correlation_id = %command.correlation_id(),
            commands = cascade.commands,
            events = cascade.events,
            max_depth = cascade.max_depth,
            "cascade settled"
        );
        cascade
    }

    fn dispatch_nested(&mut self, command: &D::Command, depth: usize, cascade: &mut Cascade) {
        let kind = command.kind();
        let Some(&index) = self.routes.get(&kind) else {
            panic!(
                "unhandled command {}: kind {kind:?} is missing from Command::all_kinds",
                command.command_type()
            );
        };
        cascade.record_command(depth);

        let aggregate = &self.aggregates[index];
        trace!(
            command_type = command.command_type(),
            aggregate = aggregate.name(),
            depth,
            "executing command"
        );
        let events = aggregate.execute(&self.states[index], command);

        events.visit(|event| self.publish(&event, depth, cascade));
    }

    fn publish(&mut self, event: &D::Event, depth: usize, cascade: &mut Cascade) {
        let next = self
            .aggregates
            .iter()
            .zip(&self.states)
            .map(|(aggregate, state)| {
                aggregate
                    .apply(state, event)
                    .unwrap_or_else(|| Arc::clone(state))
            })
            .collect();
        self.states = next;
        self.last_event_id += 1;
        cascade.events += 1;
        trace!(
            event_type = event.event_type(),
            event_id = self.last_event_id,
            "event applied"
        );

        {
            let mut read_model = self.read_model.lock();
            for aggregate in &self.aggregates {
                aggregate.project(&mut read_model, event);
            }
        }

        let commands = self
            .aggregates
            .iter()
            .zip(&self.states)
            .fold(DispatchResult::None, |commands, (aggregate, state)| {
                commands.chain(aggregate.process(state, event))
            });

        commands.visit(|command| self.dispatch_nested(&command, depth + 1, cascade));
    }

    /// Returns the current state of aggregate `A`, if it is registered.
    #[must_use]
    pub fn inspect<A: Aggregate<D>>(&self) -> Option<&A::State> {
        let index = *self.slots.get(&TypeId::of::<A>())?;
        (*self.states[index]).downcast_ref::<A::State>()
    }

    /// Name of the aggregate that executes commands of `kind`.
    #[must_use]
    pub fn executor_of(&self, kind: CommandKind<D>) -> Option<&'static str> {
        self.routes
            .get(&kind)
            .map(|index| self.aggregates[*index].name())
    }

    /// Names of the registered aggregates, in registration order.
    #[must_use]
    pub fn aggregate_names(&self) -> Vec<&'static str> {
        self.aggregates.iter().map(|aggregate| aggregate.name()).collect()
    }

    /// Number of events published since the kernel was built.
    #[must_use]
    pub fn last_event_id(&self) -> u64 {
        self.last_event_id
    }

    /// The read model this kernel projects into.
    #[must_use]
    pub fn read_model(&self) -> &ReadModelHandle<D::ReadModel> {
        &self.read_model
    }
}

impl<D: Domain> fmt::Debug for Kernel<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("aggregates", &self.aggregate_names())
            .field("routes", &self.routes.len())
            .field("last_event_id", &self.last_event_id)
            .finish_non_exhaustive()
    }
}
