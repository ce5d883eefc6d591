//! Starfold simulation entry point.

use std::error::Error;

use starfold_core::clock::SystemClock;
use starfold_core::rng::SeededRng;
use starfold_sim::{SimConfig, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = SimConfig::from_env()?;
    tracing::info!(?config, "Starting Starfold simulation");

    let mut rng = SeededRng::new(config.seed);
    let view = run(&config, &SystemClock, &mut rng).await?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
