use glam::{UVec2, Vec2};
use planeverb_core::math::cell_index;
use planeverb_core::{Cell, GridMapping};
use rayon::prelude::*;

use crate::field::CellField;

/// Time series of every cell over one generation run.
///
/// Stored cell-major: the `samples` snapshots of cell `i` are contiguous, so a
/// query hands out one borrowed slice.
#[derive(Debug, Clone)]
pub struct ResponseBuffer {
    samples: usize,
    stride: usize,
    mapping: GridMapping,
    listener: UVec2,
    data: Vec<Cell>,
}

impl ResponseBuffer {
    /// Buffer for `field`, `samples` steps long, recorded under `mapping`.
    pub fn new(field: &CellField, samples: usize, mapping: GridMapping, listener: UVec2) -> Self {
        Self {
            samples,
            stride: field.stride(),
            mapping,
            listener,
            data: vec![Cell::default(); field.len() * samples],
        }
    }

    /// Reuse this buffer's allocation for a new run. Every entry is
    /// overwritten by the run's recordings.
    pub fn recycle(
        mut self,
        field: &CellField,
        samples: usize,
        mapping: GridMapping,
        listener: UVec2,
    ) -> Self {
        self.data.resize(field.len() * samples, Cell::default());
        self.samples = samples;
        self.stride = field.stride();
        self.mapping = mapping;
        self.listener = listener;
        self
    }

    /// Copy the whole field into timestep `t`.
    pub fn record(&mut self, field: &CellField, t: usize) {
        debug_assert!(t < self.samples);
        self.data
            .par_chunks_mut(self.samples)
            .enumerate()
            .for_each(|(i, series)| series[t] = field.cell_at(i));
    }

    /// Number of recorded timesteps per cell.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// World/grid mapping the run was recorded under.
    pub fn mapping(&self) -> &GridMapping {
        &self.mapping
    }

    /// Cell the excitation was injected at.
    pub fn listener(&self) -> UVec2 {
        self.listener
    }

    /// Time series of `cell`, or `None` outside the grid.
    pub fn series(&self, cell: UVec2) -> Option<&[Cell]> {
        let max = self.mapping.max_cell;
        if cell.x > max.x || cell.y > max.y {
            return None;
        }
        let start = cell_index(cell.x, cell.y, self.stride) * self.samples;
        self.data.get(start..start + self.samples)
    }

    /// Time series of the cell containing `world`, or `None` outside the grid.
    pub fn series_at(&self, world: Vec2) -> Option<&[Cell]> {
        self.mapping.world_to_grid(world).and_then(|cell| self.series(cell))
    }
}
