use std::io::ErrorKind;
use std::path::Path;

use crate::error::ReportError;
use crate::runner::BenchmarkResult;

/// Results of one `bench-runner` invocation, persisted as JSON.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    /// Seconds since the Unix epoch when the baseline was written.
    pub created_unix: u64,
    pub results: Vec<BenchmarkResult>,
}

/// A scene whose per-cell-step cost grew past the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub scene_name: String,
    pub baseline_ns: f64,
    pub current_ns: f64,
}

impl Regression {
    /// Relative slowdown in percent.
    pub fn change_pct(&self) -> f64 {
        (self.current_ns / self.baseline_ns - 1.0) * 100.0
    }
}

/// Read a baseline. `Ok(None)` when the file does not exist; an unreadable
/// or malformed file is an error.
pub fn load_baseline(path: &Path) -> Result<Option<Baseline>, ReportError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ReportError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })
}

/// Write a baseline as pretty JSON, creating parent directories.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> Result<(), ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_error)
}

/// Scenes whose ns per cell-step exceeds the baseline by more than
/// `threshold_pct`. Scenes are matched by name; grid size and sample count
/// may differ since the metric is normalised by both.
pub fn compare(
    current: &[BenchmarkResult],
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    current
        .iter()
        .filter_map(|result| {
            let base = baseline
                .results
                .iter()
                .find(|b| b.scene_name == result.scene_name)?;
            let baseline_ns = base.ns_per_cell_step();
            if baseline_ns <= 0.0 {
                return None;
            }
            let regression = Regression {
                scene_name: result.scene_name.clone(),
                baseline_ns,
                current_ns: result.ns_per_cell_step(),
            };
            (regression.change_pct() > threshold_pct).then_some(regression)
        })
        .collect()
}

/// Markdown summary table, one row per scene.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::from(
        "| Scene | Cells | Samples | Threads | Mean (ms) | Median (ms) | P95 (ms) | ns/cell-step |\n\
         |-------|-------|---------|---------|-----------|-------------|----------|--------------|\n",
    );
    for r in results {
        let threads = match r.threads {
            0 => "all".to_string(),
            n => n.to_string(),
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {:.2} | {:.2} | {:.2} | {:.1} |\n",
            r.scene_name,
            r.cell_count,
            r.samples,
            threads,
            r.timings.mean_ms,
            r.timings.median_ms,
            r.timings.p95_ms,
            r.ns_per_cell_step(),
        ));
    }
    out
}

/// Human-readable verdict for `compare`'s output.
pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!("No scene slowed down by more than {threshold_pct:.0}% per cell-step.\n");
    }
    let mut out = format!("REGRESSIONS (>{threshold_pct:.0}% per cell-step):\n");
    for r in regressions {
        out.push_str(&format!(
            "  - {}: {:.1} -> {:.1} ns/cell-step (+{:.1}%)\n",
            r.scene_name,
            r.baseline_ns,
            r.current_ns,
            r.change_pct()
        ));
    }
    out
}
