//! The tick loop.

use std::f64::consts::TAU;
use std::sync::Arc;

use parking_lot::Mutex;
use starfold_core::clock::{Clock, seconds_between};
use starfold_core::dispatcher::Dispatcher;
use starfold_core::rng::DeterministicRng;
use starfold_core::scheduler::TokioScheduler;
use starfold_physics::application::views::SimulationView;
use starfold_physics::application::world::build_world;
use starfold_physics::domain::Physics;
use starfold_physics::domain::commands::{
    ActivateThruster, CreateMap, CreatePlayer, SetRotation, SimCommand, Tick,
};
use starfold_physics::domain::read_model::SceneModel;
use starfold_physics::maze;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::SimConfig;
use crate::error::SimError;

/// Chance per tick that a player fires the thruster.
const THRUST_CHANCE: f64 = 0.3;

/// Chance per tick that a player picks a new heading.
const TURN_CHANCE: f64 = 0.1;

/// Ticks between status log lines.
const STATUS_EVERY: u64 = 60;

/// Runs a whole simulation and returns the final snapshot.
///
/// Must be called inside a Tokio runtime. `dt` for every tick is measured
/// with `clock`; maze layout and simulated player input are drawn from
/// `rng`.
///
/// # Errors
///
/// Returns `SimError::Routing` if the physics world fails its routing
/// self-check.
#[instrument(skip_all, fields(ticks = config.ticks, players = config.players))]
pub async fn run(
    config: &SimConfig,
    clock: &dyn Clock,
    rng: &mut dyn DeterministicRng,
) -> Result<SimulationView, SimError> {
    let scene = Arc::new(Mutex::new(SceneModel::default()));
    let kernel = build_world(scene)?;
    let scheduler = Arc::new(TokioScheduler::current());
    let dispatcher = Dispatcher::new(kernel, scheduler.clone());

    let grid = maze::generate(config.maze_width, config.maze_height, config.maze_scale, rng);
    dispatcher.dispatch(SimCommand::from(CreateMap {
        correlation_id: Uuid::now_v7(),
        grid,
    }));

    let players: Vec<Uuid> = (0..config.players).map(|_| Uuid::now_v7()).collect();
    for player_id in &players {
        dispatcher.dispatch(SimCommand::from(CreatePlayer {
            player_id: *player_id,
        }));
    }
    info!(players = players.len(), "players joined");

    let mut interval = time::interval(config.tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = clock.now();

    for tick in 1..=config.ticks {
        interval.tick().await;
        steer(&dispatcher, &players, rng);

        let now = clock.now();
        dispatcher.dispatch(SimCommand::from(Tick {
            correlation_id: Uuid::now_v7(),
            dt: seconds_between(last, now),
        }));
        last = now;

        if tick % STATUS_EVERY == 0 {
            report(&dispatcher, tick);
        }
    }

    scheduler.drain().await;
    let view = dispatcher.with_kernel(SimulationView::capture);
    info!(
        events = view.last_event_id,
        collisions = view.collisions,
        "simulation finished"
    );
    Ok(view)
}

/// Simulated input: random thrust and turns for every player.
fn steer(dispatcher: &Dispatcher<Physics>, players: &[Uuid], rng: &mut dyn DeterministicRng) {
    for player_id in players {
        if rng.next_f64() < TURN_CHANCE {
            dispatcher.dispatch(SimCommand::from(SetRotation {
                player_id: *player_id,
                rotation: rng.next_f64() * TAU,
            }));
        }
        if rng.next_f64() < THRUST_CHANCE {
            dispatcher.dispatch(SimCommand::from(ActivateThruster {
                player_id: *player_id,
            }));
        }
    }
}

fn report(dispatcher: &Dispatcher<Physics>, tick: u64) {
    let status = dispatcher.clone();
    dispatcher.spawn(move || {
        let view = status.with_kernel(SimulationView::capture);
        info!(
            tick,
            elapsed = view.elapsed,
            events = view.last_event_id,
            collisions = view.collisions,
            "status"
        );
    });
}
