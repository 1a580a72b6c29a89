use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::SolverError;

/// Worker pool the solver fans its per-cell passes out on.
///
/// Each grid owns its own pool, sized from the configuration, so no
/// process-wide thread setting is touched.
pub struct ExecutionContext {
    pool: ThreadPool,
}

impl ExecutionContext {
    /// Build a pool with at most `max_threads` workers (0 = all hardware threads).
    pub fn new(max_threads: usize) -> Result<Self, SolverError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .thread_name(|i| format!("planeverb-fdtd-{i}"))
            .build()
            .map_err(|e| SolverError::ThreadPool(e.to_string()))?;
        Ok(Self { pool })
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` with every rayon call inside it scheduled on this pool.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("threads", &self.threads())
            .finish()
    }
}
