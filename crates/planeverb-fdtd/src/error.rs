use planeverb_core::{ConfigError, ExecutionMode};
use thiserror::Error;

/// Errors returned by the solver and its response queries.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("execution mode {0:?} is not implemented")]
    Unsupported(ExecutionMode),

    #[error("world position ({x}, {y}) lies outside the simulation grid")]
    PositionOutOfBounds { x: f32, y: f32 },

    #[error("grid cell ({ix}, {iy}) lies outside the simulation grid")]
    CellOutOfBounds { ix: u32, iy: u32 },

    #[error("no response available: generate_response has not completed")]
    NoResponse,

    #[error("excitation signal too short: expected {expected} samples, got {actual}")]
    ExcitationTooShort { expected: usize, actual: usize },

    #[error("failed to build solver thread pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
