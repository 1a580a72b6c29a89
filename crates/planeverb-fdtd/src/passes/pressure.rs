use planeverb_core::Real;
use rayon::prelude::*;

use crate::field::CellField;

/// Pressure pass: `p = rigidity * (p - courant * div v)`.
///
/// The divergence uses this cell's velocities and those of its forward
/// neighbours (+x, +y). A neighbour past the last column or row contributes
/// zero velocity. Wall cells (rigidity 0) are forced to zero pressure.
pub fn update_pressure(field: &mut CellField, courant: Real) {
    let stride = field.stride();
    let columns = field.columns();
    let CellField {
        pressure,
        velocity_x,
        velocity_y,
        rigidity,
        ..
    } = field;
    let vx: &[Real] = velocity_x;
    let vy: &[Real] = velocity_y;

    pressure
        .par_chunks_mut(stride)
        .zip(rigidity.par_chunks(stride))
        .enumerate()
        .for_each(|(ix, (p_col, beta_col))| {
            let base = ix * stride;
            let vx_col = &vx[base..base + stride];
            let vy_col = &vy[base..base + stride];
            let vx_next = (ix + 1 < columns).then(|| &vx[base + stride..base + 2 * stride]);

            for iy in 0..stride {
                let next_x = vx_next.map_or(0.0, |col| col[iy]);
                let next_y = if iy + 1 < stride { vy_col[iy + 1] } else { 0.0 };
                let divergence = (next_x - vx_col[iy]) + (next_y - vy_col[iy]);
                p_col[iy] = beta_col[iy] * (p_col[iy] - courant * divergence);
            }
        });
}
