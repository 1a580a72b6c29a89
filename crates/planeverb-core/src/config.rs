use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CELL_SIZE, DEFAULT_CFL_FRACTION, DEFAULT_GRID_CELLS, DEFAULT_RESPONSE_SAMPLES,
    SPEED_OF_SOUND,
};
use crate::error::ConfigError;
use crate::types::Real;

/// Where the solver runs. Only `Cpu` is implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionMode {
    #[default]
    Cpu,
    Gpu,
}

/// How the simulation domain is placed in the world each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CenteringPolicy {
    /// Domain anchored at the world origin; the listener is mapped into it.
    #[default]
    Static,
    /// Domain re-centred on the listener; the listener sits on the centre cell.
    Dynamic,
}

/// Immutable simulation parameters shared by every solver component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cell count along x. The field holds `size_x + 1` columns.
    pub size_x: u32,
    /// Cell count along y. The field holds `size_y + 1` rows.
    pub size_y: u32,
    /// Grid spacing dx in metres.
    pub cell_size: Real,
    /// Simulation step dt in seconds.
    pub time_step: Real,
    /// Impulse response length in samples.
    pub response_samples: usize,
    pub execution: ExecutionMode,
    pub centering: CenteringPolicy,
    /// Worker thread cap, 0 = all available hardware threads.
    pub max_threads: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size_x: DEFAULT_GRID_CELLS,
            size_y: DEFAULT_GRID_CELLS,
            cell_size: DEFAULT_CELL_SIZE,
            time_step: Self::stable_time_step(DEFAULT_CELL_SIZE) * DEFAULT_CFL_FRACTION,
            response_samples: DEFAULT_RESPONSE_SAMPLES,
            execution: ExecutionMode::Cpu,
            centering: CenteringPolicy::Static,
            max_threads: 0,
        }
    }
}

impl GridConfig {
    /// Courant number `c * dt / dx`.
    pub fn courant(&self) -> Real {
        SPEED_OF_SOUND * self.time_step / self.cell_size
    }

    /// Largest dt satisfying the 2D CFL condition for spacing `cell_size`.
    /// Informational only: the solver never checks it.
    pub fn stable_time_step(cell_size: Real) -> Real {
        cell_size / (SPEED_OF_SOUND * (2.0 as Real).sqrt())
    }

    /// Duration covered by the impulse response, in seconds.
    pub fn response_duration(&self) -> Real {
        self.response_samples as Real * self.time_step
    }

    /// Row stride of the flat cell array.
    pub fn stride(&self) -> usize {
        self.size_y as usize + 1
    }

    /// Total number of cells in the field, boundary row/column included.
    pub fn cell_count(&self) -> usize {
        (self.size_x as usize + 1) * self.stride()
    }
}

/// Check a configuration for values the solver cannot run with at all.
///
/// Numerical stability (CFL) is the caller's responsibility and is not checked.
pub fn validate_config(config: &GridConfig) -> Result<(), ConfigError> {
    if config.size_x == 0 || config.size_y == 0 {
        return Err(ConfigError::EmptyGrid);
    }
    if !(config.cell_size.is_finite() && config.cell_size > 0.0) {
        return Err(ConfigError::InvalidCellSize(config.cell_size));
    }
    if !(config.time_step.is_finite() && config.time_step > 0.0) {
        return Err(ConfigError::InvalidTimeStep(config.time_step));
    }
    if config.response_samples == 0 {
        return Err(ConfigError::NoSamples);
    }
    Ok(())
}

/// Parse a grid configuration from RON and validate it.
pub fn load_config_from_str(ron_str: &str) -> Result<GridConfig, ConfigError> {
    let options = ron::Options::default();
    let config: GridConfig = options
        .from_str(ron_str)
        .map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}
