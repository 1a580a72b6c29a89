use planeverb_core::types::admittance;
use planeverb_core::Real;
use rayon::prelude::*;

use crate::field::CellField;

/// The static and pressure state of one cell on either side of a face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceSide {
    pub pressure: Real,
    pub rigidity: Real,
    pub absorption: Real,
}

impl FaceSide {
    #[inline]
    fn load(field: &CellField, index: usize) -> Self {
        Self {
            pressure: field.pressure[index],
            rigidity: field.rigidity[index],
            absorption: field.absorption[index],
        }
    }
}

/// New particle velocity on the face between `prev` (the backward neighbour)
/// and `this`, given the face's current `velocity`.
///
/// Branch-free blend of two updates selected by the rigidities:
/// - air | air: free-field update `v - courant * (p - p_prev)`
/// - air | wall: impedance boundary `±Y_wall * p_air`, signed toward the wall
/// - wall | wall: 0
#[inline]
pub fn face_velocity(prev: FaceSide, this: FaceSide, velocity: Real, courant: Real) -> Real {
    let beta = this.rigidity;
    let beta_prev = prev.rigidity;

    let air_update = velocity - courant * (this.pressure - prev.pressure);

    let y_boundary = beta * admittance(prev.absorption) + beta_prev * admittance(this.absorption);
    let wall_update = y_boundary * (prev.pressure * beta_prev + this.pressure * beta);

    beta * beta_prev * air_update + (beta_prev - beta) * wall_update
}

/// X-velocity pass over every column except the first.
pub fn update_velocity_x(field: &mut CellField, courant: Real) {
    let stride = field.stride();
    let mut velocity_x = std::mem::take(&mut field.velocity_x);
    {
        let field: &CellField = field;
        velocity_x
            .par_chunks_mut(stride)
            .enumerate()
            .skip(1)
            .for_each(|(ix, v_col)| {
                let base = ix * stride;
                for (iy, v) in v_col.iter_mut().enumerate() {
                    let this = FaceSide::load(field, base + iy);
                    let prev = FaceSide::load(field, base + iy - stride);
                    *v = face_velocity(prev, this, *v, courant);
                }
            });
    }
    field.velocity_x = velocity_x;
}

/// Y-velocity pass over every row except the first.
pub fn update_velocity_y(field: &mut CellField, courant: Real) {
    let stride = field.stride();
    let mut velocity_y = std::mem::take(&mut field.velocity_y);
    {
        let field: &CellField = field;
        velocity_y
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(ix, v_col)| {
                let base = ix * stride;
                for (iy, v) in v_col.iter_mut().enumerate().skip(1) {
                    let this = FaceSide::load(field, base + iy);
                    let prev = FaceSide::load(field, base + iy - 1);
                    *v = face_velocity(prev, this, *v, courant);
                }
            });
    }
    field.velocity_y = velocity_y;
}
