use thiserror::Error;

use crate::types::Real;

/// Errors raised while acquiring a grid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse grid config RON: {0}")]
    Parse(String),

    #[error("grid must have at least one cell per axis")]
    EmptyGrid,

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(Real),

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(Real),

    #[error("response must have at least one sample")]
    NoSamples,
}
