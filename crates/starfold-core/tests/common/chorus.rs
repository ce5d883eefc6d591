//! Fan-out fixture: several aggregates react to the same event.

use starfold_core::aggregate::{Aggregate, Domain};
use starfold_core::command::Command;
use starfold_core::event::DomainEvent;
use starfold_core::result::DispatchResult;
use uuid::Uuid;

use super::Log;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChorusKind {
    Call,
    Answer,
}

#[derive(Debug, Clone)]
pub enum ChorusCommand {
    Call,
    Answer(char),
}

impl Command for ChorusCommand {
    type Kind = ChorusKind;

    fn kind(&self) -> ChorusKind {
        match self {
            Self::Call => ChorusKind::Call,
            Self::Answer(_) => ChorusKind::Answer,
        }
    }

    fn all_kinds() -> &'static [ChorusKind] {
        &[ChorusKind::Call, ChorusKind::Answer]
    }

    fn command_type(&self) -> &'static str {
        match self {
            Self::Call => "chorus.call",
            Self::Answer(_) => "chorus.answer",
        }
    }

    fn correlation_id(&self) -> Uuid {
        Uuid::nil()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChorusEvent {
    Called,
    Answered(char),
}

impl DomainEvent for ChorusEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Called => "chorus.called",
            Self::Answered(_) => "chorus.answered",
        }
    }

    fn correlation_id(&self) -> Uuid {
        Uuid::nil()
    }
}

pub struct Chorus;

impl Domain for Chorus {
    type Command = ChorusCommand;
    type Event = ChorusEvent;
    type ReadModel = Vec<String>;
}

/// Executes every chorus command and records it.
pub struct Leader {
    pub log: Log,
}

impl Aggregate<Chorus> for Leader {
    type State = ();

    fn name(&self) -> &'static str {
        "leader"
    }

    fn accepts(&self) -> &'static [ChorusKind] {
        &[ChorusKind::Call, ChorusKind::Answer]
    }

    fn execute(&self, _state: &(), command: &ChorusCommand) -> DispatchResult<ChorusEvent> {
        match command {
            ChorusCommand::Call => {
                self.log.lock().push("dispatch(call)".to_owned());
                DispatchResult::One(ChorusEvent::Called)
            }
            ChorusCommand::Answer(voice) => {
                self.log.lock().push(format!("dispatch(answer {voice})"));
                DispatchResult::One(ChorusEvent::Answered(*voice))
            }
        }
    }
}

/// Projects `Called` and answers it with its own follow-up command.
pub struct Voice<const TAG: char>;

impl<const TAG: char> Aggregate<Chorus> for Voice<TAG> {
    type State = ();

    fn name(&self) -> &'static str {
        match TAG {
            'A' => "voice-a",
            _ => "voice-b",
        }
    }

    fn process(&self, _state: &(), event: &ChorusEvent) -> DispatchResult<ChorusCommand> {
        match event {
            ChorusEvent::Called => DispatchResult::One(ChorusCommand::Answer(TAG)),
            ChorusEvent::Answered(_) => DispatchResult::None,
        }
    }

    fn project(&self, read_model: &mut Vec<String>, event: &ChorusEvent) {
        if *event == ChorusEvent::Called {
            read_model.push(format!("project({TAG})"));
        }
    }
}
