//! The level map.

use starfold_core::aggregate::Aggregate;
use starfold_core::result::DispatchResult;

use crate::domain::Physics;
use crate::domain::commands::{SimCommand, SimCommandKind};
use crate::domain::events::{MapUpdated, SimEvent};
use crate::domain::types::MapGrid;

/// Holds the current wall grid.
#[derive(Debug, Default)]
pub struct Map;

impl Aggregate<Physics> for Map {
    type State = MapGrid;

    fn name(&self) -> &'static str {
        "map"
    }

    fn accepts(&self) -> &'static [SimCommandKind] {
        &[SimCommandKind::CreateMap]
    }

    fn execute(&self, _state: &MapGrid, command: &SimCommand) -> DispatchResult<SimEvent> {
        let SimCommand::CreateMap(create) = command else {
            return DispatchResult::None;
        };
        DispatchResult::One(
            MapUpdated {
                correlation_id: create.correlation_id,
                grid: create.grid.clone(),
            }
            .into(),
        )
    }

    fn apply(&self, _state: &MapGrid, event: &SimEvent) -> Option<MapGrid> {
        match event {
            SimEvent::MapUpdated(updated) => Some(updated.grid.clone()),
            _ => None,
        }
    }
}
