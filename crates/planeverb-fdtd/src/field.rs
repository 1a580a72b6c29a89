use glam::UVec2;
use planeverb_core::math::cell_index;
use planeverb_core::{BoundaryKind, Cell, Real};

/// The simulated cell field, `(size_x + 1) × (size_y + 1)` cells.
///
/// Stored as one array per quantity so an update pass can write one array
/// while reading the others. Index `ix * stride + iy` with `stride = size_y + 1`.
#[derive(Debug, Clone)]
pub struct CellField {
    size_x: u32,
    size_y: u32,
    pub(crate) pressure: Vec<Real>,
    pub(crate) velocity_x: Vec<Real>,
    pub(crate) velocity_y: Vec<Real>,
    pub(crate) rigidity: Vec<Real>,
    pub(crate) absorption: Vec<Real>,
}

impl CellField {
    /// An all-air field at rest.
    pub fn new(size_x: u32, size_y: u32) -> Self {
        let len = (size_x as usize + 1) * (size_y as usize + 1);
        let (rigidity, absorption) = BoundaryKind::Air.coefficients();
        Self {
            size_x,
            size_y,
            pressure: vec![0.0; len],
            velocity_x: vec![0.0; len],
            velocity_y: vec![0.0; len],
            rigidity: vec![rigidity; len],
            absorption: vec![absorption; len],
        }
    }

    pub fn size_x(&self) -> u32 {
        self.size_x
    }

    pub fn size_y(&self) -> u32 {
        self.size_y
    }

    /// Row stride of the flat layout (`size_y + 1`).
    pub fn stride(&self) -> usize {
        self.size_y as usize + 1
    }

    /// Number of columns along x (`size_x + 1`).
    pub fn columns(&self) -> usize {
        self.size_x as usize + 1
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.pressure.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressure.is_empty()
    }

    /// Flat index of `cell`, or `None` outside the field.
    pub fn index_of(&self, cell: UVec2) -> Option<usize> {
        (cell.x <= self.size_x && cell.y <= self.size_y)
            .then(|| cell_index(cell.x, cell.y, self.stride()))
    }

    /// Snapshot of the cell at flat index `index`.
    ///
    /// Panics if `index >= self.len()`.
    pub fn cell_at(&self, index: usize) -> Cell {
        Cell {
            pressure: self.pressure[index],
            velocity_x: self.velocity_x[index],
            velocity_y: self.velocity_y[index],
            rigidity: self.rigidity[index],
            absorption: self.absorption[index],
        }
    }

    /// Snapshot of `cell`, or `None` outside the field.
    pub fn get(&self, cell: UVec2) -> Option<Cell> {
        self.index_of(cell).map(|i| self.cell_at(i))
    }

    /// Set the static boundary kind of `cell`. Returns false outside the field.
    pub fn set_kind(&mut self, cell: UVec2, kind: BoundaryKind) -> bool {
        let Some(index) = self.index_of(cell) else {
            return false;
        };
        let (rigidity, absorption) = kind.coefficients();
        self.rigidity[index] = rigidity;
        self.absorption[index] = absorption;
        true
    }

    pub fn pressure(&self) -> &[Real] {
        &self.pressure
    }

    pub fn velocity_x(&self) -> &[Real] {
        &self.velocity_x
    }

    pub fn velocity_y(&self) -> &[Real] {
        &self.velocity_y
    }

    /// Zero pressure and velocity. Rigidity and absorption are geometry and stay.
    pub fn reset_transient(&mut self) {
        self.pressure.fill(0.0);
        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_include_boundary_row() {
        let field = CellField::new(4, 2);
        assert_eq!(field.len(), 5 * 3);
        assert_eq!(field.stride(), 3);
        assert_eq!(field.columns(), 5);
        assert!(!field.is_empty());
    }

    #[test]
    fn test_index_bounds() {
        let field = CellField::new(4, 2);
        assert_eq!(field.index_of(UVec2::new(0, 0)), Some(0));
        assert_eq!(field.index_of(UVec2::new(4, 2)), Some(14));
        assert_eq!(field.index_of(UVec2::new(1, 2)), Some(5));
        assert_eq!(field.index_of(UVec2::new(5, 0)), None);
        assert_eq!(field.index_of(UVec2::new(0, 3)), None);
        assert!(field.get(UVec2::new(9, 9)).is_none());
    }

    #[test]
    fn test_set_kind_and_reset_keeps_geometry() {
        let mut field = CellField::new(3, 3);
        let wall = UVec2::new(1, 2);
        assert!(field.set_kind(wall, BoundaryKind::Absorptive(0.4)));
        assert!(!field.set_kind(UVec2::new(4, 0), BoundaryKind::Rigid));

        let index = field.index_of(wall).expect("in bounds");
        field.pressure[index] = 3.0;
        field.velocity_x[index] = -1.0;
        field.velocity_y[index] = 2.0;

        field.reset_transient();
        let cell = field.get(wall).expect("in bounds");
        assert_eq!(cell.pressure, 0.0);
        assert_eq!(cell.velocity_x, 0.0);
        assert_eq!(cell.velocity_y, 0.0);
        assert_eq!(cell.kind(), BoundaryKind::Absorptive(0.4));
    }
}
