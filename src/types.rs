use derive_more::{Deref, Display};

/// Distance stored in a matrix cell.
///
/// Finite distances never come close to [`INF`]: edge weights are bounded by
/// [`MAX_WEIGHT`] and a simple path has at most `N - 1` edges.
pub type Distance = u64;

/// Sentinel stored for "no known path".
///
/// Sums involving it saturate, so `INF + x` stays `INF` instead of wrapping
/// around to a small bogus value.
pub const INF: Distance = Distance::MAX;

/// Largest accepted edge weight.
pub const MAX_WEIGHT: i64 = u32::MAX as i64;

/// Zero-based index of a node in `0..N`.
pub type NodeIndex = usize;

/// Sum of two path lengths under the saturating policy.
#[inline]
#[must_use]
pub fn path_sum(lhs: Distance, rhs: Distance) -> Distance {
    lhs.saturating_add(rhs)
}

/// Pivot of a Floyd-Warshall round, i.e. the waypoint currently considered.
#[derive(Debug, Display, Deref, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("pivot {_0}")]
#[repr(transparent)]
pub struct Pivot(pub NodeIndex);

/// Source row relaxed by a single row-task.
#[derive(Debug, Display, Deref, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("row {_0}")]
#[repr(transparent)]
pub struct Row(pub NodeIndex);
