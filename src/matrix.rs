use crate::{
    error::{Error, Result},
    graph::Graph,
    sync::RwLock,
    types::{Distance, INF, NodeIndex, path_sum},
};
use core::fmt;
use derive_more::Debug;
use thiserror::Error;

/// Handle through which row-tasks reach the matrix.
///
/// Row-tasks never own the matrix; the scheduler lends it for the duration of
/// a sweep.
#[cfg(not(feature = "loom"))]
pub type SharedMatrix<'a> = &'a DistanceMatrix;

/// Handle through which row-tasks reach the matrix.
#[cfg(feature = "loom")]
pub type SharedMatrix<'a> = crate::sync::Arc<DistanceMatrix>;

/// Bounds violation on a matrix access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MatrixError {
    /// The requested cell lies outside the `order x order` matrix.
    #[error("cell ({row}, {col}) is outside a {order}x{order} matrix")]
    OutOfBounds {
        row: NodeIndex,
        col: NodeIndex,
        order: usize,
    },
}

/// Mutable `N x N` distance state shared by the row-tasks of a pivot round.
///
/// A single reader/writer lock guards the whole matrix: any number of
/// row-tasks may read concurrently, a write excludes every other access, and
/// a write is visible to every read that acquires the lock after it.
#[must_use]
#[derive(Debug)]
pub struct DistanceMatrix {
    order: usize,
    #[debug(skip)]
    cells: RwLock<Vec<Distance>>,
}

impl DistanceMatrix {
    /// Build the matrix from the adjacency of `graph`.
    ///
    /// The diagonal is zero, cells with a direct edge hold its weight and
    /// every other cell holds [`INF`].
    ///
    /// # Errors
    /// [`Error::AllocationFailure`] if the cells cannot be allocated.
    pub fn initialize(graph: &Graph) -> Result<Self> {
        Ok(Self {
            order: graph.order(),
            cells: RwLock::new(initial_distances(graph)?),
        })
    }

    /// Number of nodes, i.e. the side length of the matrix.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    fn index(&self, row: NodeIndex, col: NodeIndex) -> Result<usize, MatrixError> {
        let order = self.order;
        if row < order && col < order {
            Ok(row * order + col)
        } else {
            Err(MatrixError::OutOfBounds { row, col, order })
        }
    }

    /// Current distance from `row` to `col`.
    ///
    /// # Errors
    /// [`MatrixError::OutOfBounds`] for indexes outside the matrix.
    pub fn read(&self, row: NodeIndex, col: NodeIndex) -> Result<Distance, MatrixError> {
        let idx = self.index(row, col)?;
        Ok(self.cells.read()[idx])
    }

    /// Overwrite the distance from `row` to `col`.
    ///
    /// # Errors
    /// [`MatrixError::OutOfBounds`] for indexes outside the matrix.
    pub fn write(&self, row: NodeIndex, col: NodeIndex, value: Distance) -> Result<(), MatrixError> {
        let idx = self.index(row, col)?;
        self.cells.write()[idx] = value;
        Ok(())
    }

    /// Store `value` only if it is shorter than the current distance.
    ///
    /// Comparison and store happen under one exclusive acquisition. Returns
    /// whether the cell changed.
    ///
    /// # Errors
    /// [`MatrixError::OutOfBounds`] for indexes outside the matrix.
    pub fn write_if_shorter(
        &self,
        row: NodeIndex,
        col: NodeIndex,
        value: Distance,
    ) -> Result<bool, MatrixError> {
        let idx = self.index(row, col)?;
        let mut cells = self.cells.write();
        let shorter = value < cells[idx];
        if shorter {
            cells[idx] = value;
        }
        Ok(shorter)
    }

    /// Length of the path `row -> pivot -> col` if it beats the current
    /// distance from `row` to `col`.
    ///
    /// All three cells are read under one shared acquisition.
    ///
    /// # Errors
    /// [`MatrixError::OutOfBounds`] if any of the three cells lies outside the
    /// matrix.
    pub fn relaxation(
        &self,
        row: NodeIndex,
        col: NodeIndex,
        pivot: NodeIndex,
    ) -> Result<Option<Distance>, MatrixError> {
        let through_idx = self.index(row, pivot)?;
        let onward_idx = self.index(pivot, col)?;
        let current_idx = self.index(row, col)?;
        let cells = self.cells.read();
        let candidate = path_sum(cells[through_idx], cells[onward_idx]);
        Ok((candidate < cells[current_idx]).then_some(candidate))
    }

    /// Immutable copy of every cell.
    pub fn snapshot(&self) -> DistanceSnapshot {
        DistanceSnapshot {
            order: self.order,
            cells: self.cells.read().clone(),
        }
    }
}

/// Allocate `order * order` cells filled with `fill`, reporting failure
/// instead of aborting.
pub(crate) fn square<T: Clone>(order: usize, fill: T) -> Result<Vec<T>> {
    let len = order.saturating_mul(order);
    let mut cells = Vec::new();
    cells
        .try_reserve_exact(len)
        .map_err(|source| Error::AllocationFailure { cells: len, source })?;
    cells.resize(len, fill);
    Ok(cells)
}

/// Distances before any relaxation, as a flat row-major buffer.
pub(crate) fn initial_distances(graph: &Graph) -> Result<Vec<Distance>> {
    let order = graph.order();
    let mut cells = square(order, INF)?;
    for (idx, cell) in cells.iter_mut().enumerate() {
        let (row, col) = (idx / order, idx % order);
        if row == col {
            *cell = 0;
        } else if let Some(weight) = graph.weight(row, col) {
            *cell = Distance::from(weight);
        }
    }
    Ok(cells)
}

/// Final distances handed to the presentation layer.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceSnapshot {
    order: usize,
    cells: Vec<Distance>,
}

impl DistanceSnapshot {
    pub(crate) fn from_cells(order: usize, cells: Vec<Distance>) -> Self {
        debug_assert_eq!(cells.len(), order * order);
        Self { order, cells }
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Shortest distance from `row` to `col`, `None` when unreachable.
    ///
    /// # Panics
    /// If either index is not below [`Self::order`].
    #[must_use]
    pub fn distance(&self, row: NodeIndex, col: NodeIndex) -> Option<Distance> {
        assert!(
            row < self.order && col < self.order,
            "cell ({row}, {col}) is outside a {0}x{0} snapshot",
            self.order
        );
        let cell = self.cells[row * self.order + col];
        (cell != INF).then_some(cell)
    }

    /// Raw rows, with [`INF`] standing in for unreachable cells.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Distance]> + '_ {
        self.cells.chunks_exact(self.order.max(1))
    }

    /// Rows with unreachable cells mapped to `None`.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Option<Distance>>> {
        self.rows()
            .map(|row| row.iter().map(|&cell| (cell != INF).then_some(cell)).collect())
            .collect()
    }
}

/// One line per row, cells separated by spaces, `INF` for unreachable cells.
impl fmt::Display for DistanceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (col, &cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                if cell == INF {
                    f.write_str("INF")?;
                } else {
                    write!(f, "{cell}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
