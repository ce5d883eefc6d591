//! Starfold simulation — error types.

use starfold_core::error::RoutingError;
use thiserror::Error;

/// Startup errors for the simulation binary.
#[derive(Debug, Error)]
pub enum SimError {
    /// An environment variable holds an unusable value.
    #[error("configuration error: {0}")]
    Config(String),

    /// The physics kernel failed its routing self-check.
    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),
}
