use std::time::Instant;

use planeverb_core::excitation::gaussian_pulse;
use planeverb_core::constants::DEFAULT_MAX_FREQUENCY;
use planeverb_core::GridConfig;
use planeverb_fdtd::{Grid, SolverError};

use crate::scenes::{build_scene, SceneConfig};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub cell_count: usize,
    pub samples: usize,
    pub threads: usize,
    pub run_count: u32,
    pub timings: TimingSeries,
}

impl BenchmarkResult {
    /// Mean cost of updating one cell for one timestep, in nanoseconds.
    ///
    /// Independent of grid size and response length, so results from
    /// differently sized runs stay comparable. 0 when the run did no work.
    pub fn ns_per_cell_step(&self) -> f64 {
        let work = self.cell_count as f64 * self.samples as f64;
        if work > 0.0 {
            self.timings.mean_ms * 1.0e6 / work
        } else {
            0.0
        }
    }
}

/// Times `Grid::generate_response` over the standard scenes.
pub struct BenchmarkRunner {
    config: GridConfig,
    run_count: u32,
}

impl BenchmarkRunner {
    pub fn new(config: GridConfig, run_count: u32) -> Self {
        Self { config, run_count }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, scene: &SceneConfig) -> Result<BenchmarkResult, SolverError> {
        log::info!(
            "Running scene '{}' ({} cells, {} samples)...",
            scene.name,
            self.config.cell_count(),
            self.config.response_samples
        );

        let excitation = gaussian_pulse(
            self.config.response_samples,
            self.config.time_step,
            DEFAULT_MAX_FREQUENCY,
        );
        let mut grid = Grid::new(self.config.clone(), excitation)?;
        build_scene(&mut grid, scene.layout)?;

        let listener = scene.listener_position();
        let mut run_times = Vec::with_capacity(self.run_count as usize);
        for _ in 0..self.run_count {
            let start = Instant::now();
            grid.generate_response(listener)?;
            run_times.push(start.elapsed().as_secs_f64() * 1000.0);
        }

        let timings = TimingSeries::from_runs(&run_times);
        let result = BenchmarkResult {
            scene_name: scene.name.to_string(),
            cell_count: grid.field().len(),
            samples: self.config.response_samples,
            threads: self.config.max_threads,
            run_count: self.run_count,
            timings,
        };
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, {:.2}ns/cell-step",
            result.timings.mean_ms,
            result.timings.p95_ms,
            result.ns_per_cell_step()
        );
        Ok(result)
    }
}

impl TimingSeries {
    /// Summarise per-run wall times in milliseconds. Percentiles interpolate
    /// linearly between the two nearest runs.
    pub fn from_runs(times: &[f64]) -> Self {
        let mut sorted = times.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mean = if sorted.is_empty() {
            0.0
        } else {
            sorted.iter().sum::<f64>() / sorted.len() as f64
        };
        Self {
            mean_ms: mean,
            median_ms: quantile(&sorted, 0.5),
            p95_ms: quantile(&sorted, 0.95),
            p99_ms: quantile(&sorted, 0.99),
            min_ms: quantile(&sorted, 0.0),
            max_ms: quantile(&sorted, 1.0),
        }
    }
}

/// Linearly interpolated quantile `q` in [0, 1] of an ascending slice; 0 when empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return 0.0;
    };
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}
