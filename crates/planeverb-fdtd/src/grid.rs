use std::time::Instant;

use glam::{UVec2, Vec2, Vec3};
use planeverb_core::config::validate_config;
use planeverb_core::math::horizontal;
use planeverb_core::{
    BoundaryKind, CenteringPolicy, Cell, ExecutionMode, GridConfig, GridMapping, Real,
};

use crate::error::SolverError;
use crate::execution::ExecutionContext;
use crate::field::CellField;
use crate::passes;
use crate::recorder::ResponseBuffer;

/// Lifecycle of the response held by a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// No run has completed yet.
    Idle,
    /// A run is in progress (or was interrupted); no response is readable.
    Running,
    /// The last run completed; its response is readable.
    Complete,
}

/// Owns the cell field, the excitation signal and the latest impulse response.
///
/// Built once per configuration change. Each [`Grid::generate_response`]
/// starts from a silent field, so runs never depend on one another.
#[derive(Debug)]
pub struct Grid {
    config: GridConfig,
    field: CellField,
    excitation: Vec<Real>,
    context: ExecutionContext,
    response: Option<ResponseBuffer>,
    state: SolverState,
}

impl Grid {
    /// Create an all-air grid for `config` that injects `excitation` at the listener.
    pub fn new(config: GridConfig, excitation: Vec<Real>) -> Result<Self, SolverError> {
        validate_config(&config)?;
        check_excitation(&config, &excitation)?;

        let context = ExecutionContext::new(config.max_threads)?;
        let field = CellField::new(config.size_x, config.size_y);

        log::debug!(
            "FDTD grid {}x{} cells, dx={}m, dt={}s, courant={:.4}, {} samples, {} threads",
            config.size_x + 1,
            config.size_y + 1,
            config.cell_size,
            config.time_step,
            config.courant(),
            config.response_samples,
            context.threads(),
        );

        Ok(Self {
            config,
            field,
            excitation,
            context,
            response: None,
            state: SolverState::Idle,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn field(&self) -> &CellField {
        &self.field
    }

    pub fn state(&self) -> SolverState {
        self.state
    }

    pub fn excitation(&self) -> &[Real] {
        &self.excitation
    }

    /// Replace the excitation signal used by subsequent runs.
    pub fn set_excitation(&mut self, excitation: Vec<Real>) -> Result<(), SolverError> {
        check_excitation(&self.config, &excitation)?;
        self.excitation = excitation;
        Ok(())
    }

    /// Current state of cell `(ix, iy)`.
    pub fn cell(&self, ix: u32, iy: u32) -> Option<Cell> {
        self.field.get(UVec2::new(ix, iy))
    }

    /// Set the boundary kind of one cell.
    pub fn set_cell(&mut self, ix: u32, iy: u32, kind: BoundaryKind) -> Result<(), SolverError> {
        if self.field.set_kind(UVec2::new(ix, iy), kind) {
            Ok(())
        } else {
            Err(SolverError::CellOutOfBounds { ix, iy })
        }
    }

    /// Set the boundary kind of every cell in the inclusive rectangle `min..=max`.
    pub fn fill_rect(
        &mut self,
        min: UVec2,
        max: UVec2,
        kind: BoundaryKind,
    ) -> Result<(), SolverError> {
        for corner in [min, max] {
            if self.field.index_of(corner).is_none() {
                return Err(SolverError::CellOutOfBounds {
                    ix: corner.x,
                    iy: corner.y,
                });
            }
        }
        for ix in min.x.min(max.x)..=min.x.max(max.x) {
            for iy in min.y.min(max.y)..=min.y.max(max.y) {
                self.field.set_kind(UVec2::new(ix, iy), kind);
            }
        }
        Ok(())
    }

    /// Run one full generation with the listener at `listener` (x/z used).
    ///
    /// Fails without touching the field or the previous response when the
    /// execution mode is unsupported or a statically centred listener lies
    /// outside the grid.
    pub fn generate_response(&mut self, listener: Vec3) -> Result<(), SolverError> {
        match self.config.execution {
            ExecutionMode::Cpu => self.generate_response_cpu(listener),
            ExecutionMode::Gpu => Err(SolverError::Unsupported(ExecutionMode::Gpu)),
        }
    }

    fn generate_response_cpu(&mut self, listener: Vec3) -> Result<(), SolverError> {
        let listener = horizontal(listener);
        let mapping = GridMapping::for_run(&self.config, listener);
        let listener_cell = match self.config.centering {
            CenteringPolicy::Static => {
                mapping
                    .world_to_grid(listener)
                    .ok_or(SolverError::PositionOutOfBounds {
                        x: listener.x,
                        y: listener.y,
                    })?
            }
            CenteringPolicy::Dynamic => GridMapping::center_cell_of(&self.config),
        };
        let listener_index = self
            .field
            .index_of(listener_cell)
            .ok_or(SolverError::CellOutOfBounds {
                ix: listener_cell.x,
                iy: listener_cell.y,
            })?;

        let courant = self.config.courant();
        let samples = self.config.response_samples;
        log::debug!(
            "Generating response: listener cell ({}, {}), {} samples",
            listener_cell.x,
            listener_cell.y,
            samples
        );
        let start = Instant::now();

        self.state = SolverState::Running;
        let mut response = match self.response.take() {
            Some(previous) => previous.recycle(&self.field, samples, mapping, listener_cell),
            None => ResponseBuffer::new(&self.field, samples, mapping, listener_cell),
        };
        self.field.reset_transient();

        let field = &mut self.field;
        let excitation = &self.excitation[..samples];
        self.context.install(|| {
            for (t, &sample) in excitation.iter().enumerate() {
                passes::step(field, courant, listener_index, sample);
                response.record(field, t);
            }
        });

        self.response = Some(response);
        self.state = SolverState::Complete;
        log::debug!(
            "Response generated in {:.2}ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    /// The completed response buffer.
    pub fn response_buffer(&self) -> Result<&ResponseBuffer, SolverError> {
        match (self.state, &self.response) {
            (SolverState::Complete, Some(buffer)) => Ok(buffer),
            _ => Err(SolverError::NoResponse),
        }
    }

    /// Impulse response at a world-space point on the solver plane.
    ///
    /// The slice holds `response_samples` snapshots and borrows the grid, so
    /// it cannot outlive the next run.
    pub fn response(&self, world: Vec2) -> Result<&[Cell], SolverError> {
        self.response_buffer()?
            .series_at(world)
            .ok_or(SolverError::PositionOutOfBounds {
                x: world.x,
                y: world.y,
            })
    }

    /// Impulse response at a 3D world position, projected onto x/z.
    pub fn impulse_response(&self, position: Vec3) -> Result<&[Cell], SolverError> {
        self.response(horizontal(position))
    }

    /// Impulse response of grid cell `(ix, iy)`.
    pub fn response_at(&self, ix: u32, iy: u32) -> Result<&[Cell], SolverError> {
        self.response_buffer()?
            .series(UVec2::new(ix, iy))
            .ok_or(SolverError::CellOutOfBounds { ix, iy })
    }

    /// Cell the excitation was injected at in the last completed run.
    pub fn listener_cell(&self) -> Option<UVec2> {
        self.response_buffer().ok().map(ResponseBuffer::listener)
    }

    /// World/grid mapping of the last completed run.
    pub fn mapping(&self) -> Option<GridMapping> {
        self.response_buffer().ok().map(|b| *b.mapping())
    }
}

fn check_excitation(config: &GridConfig, excitation: &[Real]) -> Result<(), SolverError> {
    if excitation.len() < config.response_samples {
        return Err(SolverError::ExcitationTooShort {
            expected: config.response_samples,
            actual: excitation.len(),
        });
    }
    Ok(())
}
