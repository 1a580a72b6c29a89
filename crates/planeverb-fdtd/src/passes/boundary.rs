use crate::field::CellField;

/// Open-domain termination on the four outer edges.
///
/// Overwrites the velocity normal to each edge from the adjacent pressure:
/// the near edges (x = 0, y = 0) take the negated pressure of the edge cell,
/// the far edges (x = size_x, y = size_y) copy the pressure of the interior
/// neighbour. Must run after both velocity passes.
pub fn absorb_edges(field: &mut CellField) {
    let stride = field.stride();
    let size_x = field.size_x() as usize;
    let size_y = field.size_y() as usize;
    let CellField {
        pressure,
        velocity_x,
        velocity_y,
        ..
    } = field;

    for iy in 0..size_y {
        let near = iy;
        let far = size_x * stride + iy;
        velocity_x[near] = -pressure[near];
        velocity_x[far] = pressure[far - stride];
    }

    for ix in 0..size_x {
        let near = ix * stride;
        let far = ix * stride + size_y;
        velocity_y[near] = -pressure[near];
        velocity_y[far] = pressure[far - 1];
    }
}
