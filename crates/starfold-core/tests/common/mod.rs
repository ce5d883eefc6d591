//! Shared fixture domain for kernel integration tests.
#![allow(dead_code)]

pub mod chorus;

use std::sync::Arc;

use parking_lot::Mutex;
use starfold_core::aggregate::{Aggregate, Domain};
use starfold_core::command::Command;
use starfold_core::event::DomainEvent;
use starfold_core::kernel::ReadModelHandle;
use starfold_core::result::DispatchResult;
use uuid::Uuid;

/// Ordered record shared by every fixture aggregate and the read model.
pub type Log = ReadModelHandle<Vec<String>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Start,
    First,
    Second,
    Emit,
}

#[derive(Debug, Clone)]
pub enum ScenarioCommand {
    Start,
    First,
    Second,
    /// Emits its values through the shape named by `Shape`.
    Emit(Shape, Vec<i64>),
}

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    List,
    Group,
    Optional,
    /// The event itself, with no wrapping collection.
    Single,
}

impl Command for ScenarioCommand {
    type Kind = ScenarioKind;

    fn kind(&self) -> ScenarioKind {
        match self {
            Self::Start => ScenarioKind::Start,
            Self::First => ScenarioKind::First,
            Self::Second => ScenarioKind::Second,
            Self::Emit(..) => ScenarioKind::Emit,
        }
    }

    fn all_kinds() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Start,
            ScenarioKind::First,
            ScenarioKind::Second,
            ScenarioKind::Emit,
        ]
    }

    fn command_type(&self) -> &'static str {
        match self {
            Self::Start => "scenario.start",
            Self::First => "scenario.first",
            Self::Second => "scenario.second",
            Self::Emit(..) => "scenario.emit",
        }
    }

    fn correlation_id(&self) -> Uuid {
        Uuid::nil()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioEvent {
    Started,
    FirstDone,
    SecondDone,
    Emitted(i64),
}

impl ScenarioEvent {
    fn label(&self) -> String {
        match self {
            Self::Started => "E".to_owned(),
            Self::FirstDone => "E2".to_owned(),
            Self::SecondDone => "E3".to_owned(),
            Self::Emitted(n) => format!("N{n}"),
        }
    }
}

impl DomainEvent for ScenarioEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Started => "scenario.started",
            Self::FirstDone => "scenario.first_done",
            Self::SecondDone => "scenario.second_done",
            Self::Emitted(_) => "scenario.emitted",
        }
    }

    fn correlation_id(&self) -> Uuid {
        Uuid::nil()
    }
}

pub struct Scenario;

impl Domain for Scenario {
    type Command = ScenarioCommand;
    type Event = ScenarioEvent;
    type ReadModel = Vec<String>;
}

/// Executes `Start` and records it.
pub struct Origin {
    pub log: Log,
}

impl Aggregate<Scenario> for Origin {
    type State = ();

    fn name(&self) -> &'static str {
        "origin"
    }

    fn accepts(&self) -> &'static [ScenarioKind] {
        &[ScenarioKind::Start]
    }

    fn execute(&self, _state: &(), _command: &ScenarioCommand) -> DispatchResult<ScenarioEvent> {
        self.log.lock().push("dispatch(C0)".to_owned());
        DispatchResult::One(ScenarioEvent::Started)
    }
}

/// Executes `First` and `Second`.
pub struct Worker {
    pub log: Log,
}

impl Aggregate<Scenario> for Worker {
    type State = ();

    fn name(&self) -> &'static str {
        "worker"
    }

    fn accepts(&self) -> &'static [ScenarioKind] {
        &[ScenarioKind::First, ScenarioKind::Second]
    }

    fn execute(&self, _state: &(), command: &ScenarioCommand) -> DispatchResult<ScenarioEvent> {
        match command {
            ScenarioCommand::First => {
                self.log.lock().push("dispatch(C1)".to_owned());
                DispatchResult::One(ScenarioEvent::FirstDone)
            }
            ScenarioCommand::Second => {
                self.log.lock().push("dispatch(C2)".to_owned());
                DispatchResult::One(ScenarioEvent::SecondDone)
            }
            _ => DispatchResult::None,
        }
    }
}

/// Folds every event, projects it and reacts to `Started` with `[C1, C2]`.
pub struct Tracker {
    pub log: Log,
}

impl Aggregate<Scenario> for Tracker {
    type State = Vec<i64>;

    fn name(&self) -> &'static str {
        "tracker"
    }

    fn accepts(&self) -> &'static [ScenarioKind] {
        &[ScenarioKind::Emit]
    }

    fn execute(&self, _state: &Vec<i64>, command: &ScenarioCommand) -> DispatchResult<ScenarioEvent> {
        let ScenarioCommand::Emit(shape, values) = command else {
            return DispatchResult::None;
        };
        let events: Vec<ScenarioEvent> = values.iter().copied().map(ScenarioEvent::Emitted).collect();
        match shape {
            Shape::List => events.into(),
            Shape::Group => match events.as_slice() {
                [a, b, c] => (a.clone(), b.clone(), c.clone()).into(),
                [a, b] => (a.clone(), b.clone()).into(),
                _ => events.iter().cloned().collect(),
            },
            Shape::Optional => DispatchResult::from(events.into_iter().next()),
            Shape::Single => match events.into_iter().next() {
                Some(event) => DispatchResult::One(event),
                None => DispatchResult::None,
            },
        }
    }

    fn apply(&self, state: &Vec<i64>, event: &ScenarioEvent) -> Option<Vec<i64>> {
        self.log.lock().push(format!("apply({})", event.label()));
        let ScenarioEvent::Emitted(n) = event else {
            return None;
        };
        let mut next = state.clone();
        next.push(*n);
        Some(next)
    }

    fn process(&self, _state: &Vec<i64>, event: &ScenarioEvent) -> DispatchResult<ScenarioCommand> {
        match event {
            ScenarioEvent::Started => vec![ScenarioCommand::First, ScenarioCommand::Second].into(),
            _ => DispatchResult::None,
        }
    }

    fn project(&self, read_model: &mut Vec<String>, event: &ScenarioEvent) {
        read_model.push(format!("project({})", event.label()));
    }
}
