use core::num::NonZeroUsize;
use derive_more::Display;

/// Largest node count accepted unless configured otherwise.
pub const DEFAULT_MAX_NODES: usize = 100;

/// How a row-task turns a shorter candidate into a write.
///
/// The candidate is always computed under the shared lock. The two modes
/// differ in whether the comparison against the current cell is repeated
/// inside the exclusive section that performs the write.
#[derive(Debug, Display, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Consistency {
    /// Compare and write inside one exclusive critical section.
    #[default]
    #[display("checked")]
    Checked,
    /// Compare under the shared lock, then write under a separate exclusive
    /// acquisition.
    ///
    /// Sound because the sweep only ever decreases cells: during pivot `k`
    /// the cells `dist[i][k]` and `dist[k][j]` cannot change (their own
    /// candidates add `dist[k][k] == 0`), and row `i` is written by row-task
    /// `i` alone. A stale comparison therefore never raises a cell.
    #[display("monotone")]
    Monotone,
}

/// Runtime configuration of the solver.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Upper bound on the node count accepted by [`crate::graph::Graph`].
    pub max_nodes: usize,
    /// Size of the worker pool. `None` sizes it to the available parallelism.
    pub workers: Option<NonZeroUsize>,
    /// Compare-then-write discipline of row-tasks.
    pub consistency: Consistency,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            workers: None,
            consistency: Consistency::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = consistency;
        self
    }

    /// Worker count the pool is built with.
    #[must_use]
    pub fn effective_workers(&self) -> NonZeroUsize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
        })
    }
}
