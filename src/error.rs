use crate::{graph::InputError, task::TaskError};
use std::collections::TryReserveError;
use thiserror::Error;

/// Result type of fallible crate operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Fatal errors. None of them is retried and none leaves a usable partial
/// distance matrix behind.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The graph input was rejected before any computation started.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// Adjacency or distance storage could not be allocated.
    #[error("failed to allocate {cells} cells")]
    AllocationFailure {
        cells: usize,
        #[source]
        source: TryReserveError,
    },
    /// A row-task failed, aborting its pivot round and the whole sweep.
    #[error("computation aborted: {0}")]
    TaskFailure(#[from] TaskError),
    /// The worker pool could not be started.
    #[error("failed to build the worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
