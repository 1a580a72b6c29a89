//! One FDTD timestep, split into passes that each complete over the whole
//! field before the next starts.

pub mod boundary;
pub mod excitation;
pub mod pressure;
pub mod velocity;

use planeverb_core::Real;

use crate::field::CellField;

/// Advance `field` by one timestep and inject `sample` at `listener`.
///
/// Order: pressure, velocity x, velocity y, edge absorption, excitation.
/// Every pass reads neighbour values written by the one before it.
pub fn step(field: &mut CellField, courant: Real, listener: usize, sample: Real) {
    pressure::update_pressure(field, courant);
    velocity::update_velocity_x(field, courant);
    velocity::update_velocity_y(field, courant);
    boundary::absorb_edges(field);
    excitation::inject(field, listener, sample);
}
