mod execute;
#[cfg(not(feature = "loom"))]
mod setup;

use crate::{
    config::Config,
    error::Result,
    graph::Graph,
    matrix::{DistanceMatrix, DistanceSnapshot, SharedMatrix},
    scheduler::execute::join_rows,
    sync::share,
    task::TaskError,
    types::Pivot,
};
use derive_more::Debug;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Barrier-synchronized concurrent Floyd-Warshall sweep.
///
/// For every pivot `k` the scheduler fans out one row-task per source row
/// onto its worker pool and joins all of them before moving on to `k + 1`.
/// The barrier is required: row `i` at pivot `k + 1` reads `dist[k + 1][j]`,
/// which any other row-task may have lowered during pivot `k`.
///
/// The pool is built once and reused by every round and every sweep.
#[must_use]
#[derive(Debug)]
pub struct Scheduler {
    config: Config,
    #[cfg(not(feature = "loom"))]
    #[debug(skip)]
    pool: rayon::ThreadPool,
}

/// Counters of a completed sweep.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Pivot rounds completed.
    pub pivots: usize,
    /// Cells lowered across all rounds.
    pub updated: usize,
}

/// Result of solving a graph.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub distances: DistanceSnapshot,
    /// Wall-clock time from matrix initialization to the final snapshot.
    pub elapsed: Duration,
    pub stats: SweepStats,
}

impl Solution {
    #[must_use]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl Scheduler {
    /// # Errors
    /// [`crate::Error::ThreadPool`] if the worker pool cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            #[cfg(not(feature = "loom"))]
            pool: setup::build_pool(&config)?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute all-pairs shortest distances of `graph`.
    ///
    /// The distance matrix lives only for the duration of the call; nothing is
    /// returned if a row-task fails.
    ///
    /// # Errors
    /// [`crate::Error::AllocationFailure`] or [`crate::Error::TaskFailure`].
    pub fn solve(&self, graph: &Graph) -> Result<Solution> {
        info!(
            nodes = graph.order(),
            workers = self.config.effective_workers().get(),
            consistency = %self.config.consistency,
            "solving all-pairs shortest paths"
        );
        let started = Instant::now();
        let matrix = DistanceMatrix::initialize(graph)?;
        #[cfg(feature = "loom")]
        let matrix = crate::sync::Arc::new(matrix);
        let stats = self.run(share(&matrix))?;
        let distances = matrix.snapshot();
        let elapsed = started.elapsed();
        info!(
            elapsed_secs = elapsed.as_secs_f64(),
            updated = stats.updated,
            "sweep complete"
        );
        Ok(Solution {
            distances,
            elapsed,
            stats,
        })
    }

    /// Run the full pivot sweep over an initialized matrix.
    ///
    /// Running it again on a converged matrix lowers no cell.
    ///
    /// # Errors
    /// [`crate::Error::TaskFailure`] for the first failed row-task. The matrix
    /// is then left between two pivots and must be discarded.
    pub fn run(&self, matrix: SharedMatrix<'_>) -> Result<SweepStats> {
        let order = matrix.order();
        let mut stats = SweepStats::default();
        for k in 0..order {
            // Copies the reference outside of `loom`.
            #[allow(noop_method_call)]
            let updated = self.round(matrix.clone(), Pivot(k))?;
            debug!(pivot = k, updated, "pivot round complete");
            stats.pivots += 1;
            stats.updated += updated;
        }
        Ok(stats)
    }

    #[cfg(not(feature = "loom"))]
    fn round(&self, matrix: SharedMatrix<'_>, pivot: Pivot) -> Result<usize, TaskError> {
        let rows = 0..matrix.order();
        let consistency = self.config.consistency;
        self.pool
            .install(|| join_rows(matrix, rows, pivot, consistency))
    }

    /// Loom-testable version of `round`: rows are forked onto model threads.
    #[cfg(feature = "loom")]
    fn round(&self, matrix: SharedMatrix<'_>, pivot: Pivot) -> Result<usize, TaskError> {
        let rows = 0..matrix.order();
        join_rows(matrix, rows, pivot, self.config.consistency)
    }
}
