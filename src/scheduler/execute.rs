use crate::{
    config::Consistency,
    matrix::SharedMatrix,
    sync::join,
    task::{RowTask, TaskError},
    types::{Pivot, Row},
};
use core::ops::Range;
use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};
use tracing::error;

/// Run the row-tasks of one pivot round over `rows` and return once all of
/// them have finished.
///
/// The range is split in halves and both halves are joined, so returning from
/// the outermost call is the barrier between this pivot and the next.
/// Returns the total number of lowered cells, or the error of a failed
/// row-task (the left half wins if both halves fail).
pub(super) fn join_rows(
    matrix: SharedMatrix<'_>,
    rows: Range<usize>,
    pivot: Pivot,
    consistency: Consistency,
) -> Result<usize, TaskError> {
    match rows.len() {
        0 => return Ok(0),
        1 => {
            let task = RowTask {
                row: Row(rows.start),
                pivot,
                consistency,
            };
            return exec_guarded(&task, &matrix);
        }
        _ => {}
    }

    let mid = rows.start + rows.len() / 2;
    let (left, right) = (rows.start..mid, mid..rows.end);
    // Copies the reference outside of `loom`.
    #[allow(noop_method_call)]
    let rhs_matrix = matrix.clone();
    let (lhs, rhs) = join(
        move || join_rows(matrix, left, pivot, consistency),
        move || join_rows(rhs_matrix, right, pivot, consistency),
    );
    Ok(lhs? + rhs?)
}

/// Execute a row-task, turning a panic into [`TaskError::Panicked`].
fn exec_guarded(task: &RowTask, matrix: &SharedMatrix<'_>) -> Result<usize, TaskError> {
    let result = catch_unwind(AssertUnwindSafe(|| task.exec(matrix)))
        .unwrap_or_else(|payload| {
            Err(TaskError::Panicked {
                pivot: task.pivot,
                row: task.row,
                message: panic_message(payload.as_ref()),
            })
        });
    if let Err(err) = &result {
        error!(pivot = *task.pivot, row = *task.row, %err, "row-task failed");
    }
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
