//! Single-threaded Floyd-Warshall over the same initialization and numeric
//! policy as [`crate::Scheduler`], for comparison runs.

use crate::{
    error::Result,
    graph::Graph,
    matrix::{DistanceSnapshot, initial_distances},
    scheduler::{Solution, SweepStats},
    types::{INF, path_sum},
};
use std::time::Instant;
use tracing::info;

/// Shortest distances between every pair of nodes of `graph`.
///
/// # Errors
/// [`crate::Error::AllocationFailure`] if the matrix cannot be allocated.
pub fn floyd_warshall(graph: &Graph) -> Result<DistanceSnapshot> {
    sweep(graph).map(|(distances, _)| distances)
}

/// Like [`floyd_warshall`], with timing and counters.
///
/// # Errors
/// See [`floyd_warshall`].
pub fn solve(graph: &Graph) -> Result<Solution> {
    info!(nodes = graph.order(), "solving all-pairs shortest paths sequentially");
    let started = Instant::now();
    let (distances, stats) = sweep(graph)?;
    let elapsed = started.elapsed();
    info!(elapsed_secs = elapsed.as_secs_f64(), updated = stats.updated, "sweep complete");
    Ok(Solution {
        distances,
        elapsed,
        stats,
    })
}

fn sweep(graph: &Graph) -> Result<(DistanceSnapshot, SweepStats)> {
    let n = graph.order();
    let mut dist = initial_distances(graph)?;
    let mut stats = SweepStats::default();
    for k in 0..n {
        for i in 0..n {
            let through = dist[i * n + k];
            if through == INF {
                continue;
            }
            for j in 0..n {
                let candidate = path_sum(through, dist[k * n + j]);
                if candidate < dist[i * n + j] {
                    dist[i * n + j] = candidate;
                    stats.updated += 1;
                }
            }
        }
        stats.pivots += 1;
    }
    Ok((DistanceSnapshot::from_cells(n, dist), stats))
}
