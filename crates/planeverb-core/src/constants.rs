//! Single source of truth for shared constants.

use crate::types::Real;

/// Speed of sound in air at ~20 °C, in metres per second.
pub const SPEED_OF_SOUND: Real = 343.21;

/// Default grid spacing in metres.
pub const DEFAULT_CELL_SIZE: Real = 0.25;

/// Default number of cells per axis (the field holds one extra row/column).
pub const DEFAULT_GRID_CELLS: u32 = 80;

/// Default impulse response length in samples.
pub const DEFAULT_RESPONSE_SAMPLES: usize = 500;

/// Default upper frequency of the excitation pulse, in Hz.
pub const DEFAULT_MAX_FREQUENCY: Real = 275.0;

/// Fraction of the 2D CFL limit used by `GridConfig::default()`.
pub const DEFAULT_CFL_FRACTION: Real = 0.95;

/// Reflection coefficient stored for a rigid wall (admittance 0).
pub const RIGID_REFLECTANCE: Real = 1.0;
