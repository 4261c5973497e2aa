use crate::{
    config::Consistency,
    matrix::{DistanceMatrix, MatrixError},
    types::{Pivot, Row},
};
use derive_more::Debug;
use thiserror::Error;

/// Failure of a single row-task. Aborts the pivot round and the whole sweep.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskError {
    /// The task addressed a cell outside the matrix.
    #[error("{row} failed at {pivot}: {source}")]
    Matrix {
        pivot: Pivot,
        row: Row,
        #[source]
        source: MatrixError,
    },
    /// The task panicked.
    #[error("{row} panicked at {pivot}: {message}")]
    Panicked {
        pivot: Pivot,
        row: Row,
        message: String,
    },
}

impl TaskError {
    /// Pivot of the round the task belonged to.
    #[must_use]
    pub fn pivot(&self) -> Pivot {
        match self {
            Self::Matrix { pivot, .. } | Self::Panicked { pivot, .. } => *pivot,
        }
    }

    /// Row the task was relaxing.
    #[must_use]
    pub fn row(&self) -> Row {
        match self {
            Self::Matrix { row, .. } | Self::Panicked { row, .. } => *row,
        }
    }
}

/// Unit of concurrent work: relax one source row against one pivot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RowTask {
    pub row: Row,
    pub pivot: Pivot,
    pub consistency: Consistency,
}

impl RowTask {
    /// Relax every destination of the row through the pivot.
    ///
    /// Returns the number of cells that were lowered.
    ///
    /// # Errors
    /// [`TaskError::Matrix`] if the row or pivot lies outside the matrix.
    pub fn exec(&self, matrix: &DistanceMatrix) -> Result<usize, TaskError> {
        let &Self {
            row,
            pivot,
            consistency,
        } = self;
        let (Row(i), Pivot(k)) = (row, pivot);
        let fail = |source| TaskError::Matrix { pivot, row, source };
        let mut updated = 0;
        for j in 0..matrix.order() {
            let Some(candidate) = matrix.relaxation(i, j, k).map_err(fail)? else {
                continue;
            };
            let lowered = match consistency {
                Consistency::Checked => matrix.write_if_shorter(i, j, candidate).map_err(fail)?,
                // The cell may have moved since `relaxation` released the
                // shared lock. Only this task writes row `i`, so it cannot
                // have moved below `candidate`.
                Consistency::Monotone => {
                    matrix.write(i, j, candidate).map_err(fail)?;
                    true
                }
            };
            updated += usize::from(lowered);
        }
        Ok(updated)
    }
}

/// Relax row `row` of `matrix` through `pivot`.
///
/// Shorthand for [`RowTask::exec`].
///
/// # Errors
/// See [`RowTask::exec`].
pub fn relax_row(
    matrix: &DistanceMatrix,
    row: Row,
    pivot: Pivot,
    consistency: Consistency,
) -> Result<usize, TaskError> {
    RowTask {
        row,
        pivot,
        consistency,
    }
    .exec(matrix)
}
