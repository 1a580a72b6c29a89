//! Two-dimensional FDTD acoustic wave solver.
//!
//! A [`Grid`] owns the cell field and, after [`Grid::generate_response`],
//! the per-cell impulse response for every grid point.

pub mod error;
pub mod execution;
pub mod field;
pub mod grid;
pub mod passes;
pub mod recorder;

pub use error::SolverError;
pub use execution::ExecutionContext;
pub use field::CellField;
pub use grid::{Grid, SolverState};
pub use recorder::ResponseBuffer;

#[cfg(test)]
mod test_harness;
