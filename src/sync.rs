#[cfg(feature = "loom")]
mod imp {
    use crate::matrix::{DistanceMatrix, SharedMatrix};
    pub(crate) use loom::sync::Arc;
    use loom::{
        sync::{RwLockReadGuard, RwLockWriteGuard},
        thread,
    };
    use std::{panic::resume_unwind, sync::PoisonError};

    /// `loom` lock with the non-poisoning surface of `parking_lot`.
    pub(crate) struct RwLock<T>(loom::sync::RwLock<T>);

    impl<T> RwLock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(loom::sync::RwLock::new(value))
        }

        pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
            self.0.read().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
            self.0.write().unwrap_or_else(PoisonError::into_inner)
        }
    }

    pub(crate) fn share(matrix: &Arc<DistanceMatrix>) -> SharedMatrix<'_> {
        Arc::clone(matrix)
    }

    pub(crate) fn join<A, B>(
        lhs: impl FnOnce() -> A + Send + 'static,
        rhs: impl FnOnce() -> B + Send + 'static,
    ) -> (A, B)
    where
        A: Send + 'static,
        B: Send + 'static,
    {
        let lhs = thread::spawn(lhs);
        let rhs = rhs();
        let lhs = lhs.join().unwrap_or_else(|payload| resume_unwind(payload));
        (lhs, rhs)
    }
}

#[cfg(not(feature = "loom"))]
mod imp {
    use crate::matrix::{DistanceMatrix, SharedMatrix};
    pub(crate) use parking_lot::RwLock;

    pub(crate) fn share(matrix: &DistanceMatrix) -> SharedMatrix<'_> {
        matrix
    }

    pub(crate) fn join<A, B>(lhs: impl FnOnce() -> A + Send, rhs: impl FnOnce() -> B + Send) -> (A, B)
    where
        A: Send,
        B: Send,
    {
        rayon::join(lhs, rhs)
    }
}

pub(crate) use imp::*;
