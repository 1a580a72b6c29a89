use planeverb_core::Real;

use crate::field::CellField;

/// Add one excitation sample to the listener cell's pressure.
///
/// The sample is gated by the cell's rigidity, so a listener placed inside a
/// wall leaves it a pressure node.
pub fn inject(field: &mut CellField, listener: usize, sample: Real) {
    field.pressure[listener] += field.rigidity[listener] * sample;
}
