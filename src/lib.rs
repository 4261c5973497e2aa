//! All-pairs shortest paths over dense weighted undirected graphs, computed by
//! a concurrent Floyd-Warshall sweep.
//!
//! The sweep runs one round per pivot `k`. Each round fans out one row-task
//! per source node `i`; the task lowers `dist[i][j]` to
//! `dist[i][k] + dist[k][j]` wherever that is shorter. All row-tasks of a
//! round are joined before the next round starts, which preserves the
//! invariant of the sequential algorithm: after round `k`, `dist[i][j]` is at
//! most the shortest path whose intermediate nodes all lie in `0..=k`.
//!
//! Key modules:
//! - `graph`: validated adjacency input and the text input format.
//! - `matrix`: the shared distance matrix guarded by a reader/writer lock,
//!   and the immutable snapshot handed out after a sweep.
//! - `task`: the row-task, the unit of concurrent work.
//! - `scheduler`: the worker pool and the per-pivot fork/join barrier.
//! - `sequential`: the single-threaded reference sweep.
//! - `config`: node bound, pool size and compare-then-write discipline.
//!
//! Quick start:
//! 1. Build a [`Graph`] with [`Graph::from_edges`] or [`Graph::parse`].
//! 2. Build a [`Scheduler`] from a [`Config`].
//! 3. Call [`Scheduler::solve`] and read the [`DistanceSnapshot`] of the
//!    returned [`Solution`].
//!
//! Distances are `u64`; edge weights are bounded by `u32::MAX`, so finite path
//! sums never overflow, and the unreachable sentinel saturates under addition
//! instead of wrapping.

/// Solver configuration.
///
/// Exposes [`Config`] and the [`Consistency`] choice for row-task writes.
pub mod config;
mod error;
/// Graph input: edges, validation and the whitespace-separated text format.
pub mod graph;
/// The shared distance matrix and its snapshot.
///
/// Every access is bounds-checked and goes through a single reader/writer
/// lock over the whole matrix.
pub mod matrix;
/// The concurrent sweep.
///
/// Owns the worker pool, dispatches one row-task per row for every pivot and
/// joins them before advancing to the next pivot.
pub mod scheduler;
pub mod sequential;
mod sync;
/// Row-tasks and their failures.
pub mod task;
/// Distances, node indexes and the unreachable sentinel.
pub mod types;

pub use config::{Config, Consistency};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, InputError};
pub use matrix::{DistanceMatrix, DistanceSnapshot, MatrixError, SharedMatrix};
pub use scheduler::{Scheduler, Solution, SweepStats};
pub use task::{RowTask, TaskError, relax_row};
pub use types::{Distance, INF, Pivot, Row};
