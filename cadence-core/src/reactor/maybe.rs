//! Deferred Values
//!
//! A [`Maybe`] is a reactor's value slot: either a value of the element
//! type, or an error captured while producing one. Errors are *deferred*:
//! `commit` never fails, and a captured error surfaces only when a
//! consumer reads the slot.
//!
//! Captured errors are shared and cloneable ([`ReactorError`] wraps the
//! source error in an `Arc`) so the same failure can flow through several
//! positions in a graph without being consumed.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Raised when a value is read from a reactor that has not produced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("reactor has not produced an evaluation")]
pub struct NoEvaluation;

/// A shared, cloneable capture of an error raised while producing a value.
#[derive(Clone)]
pub struct ReactorError {
    inner: Arc<dyn Error + Send + Sync + 'static>,
}

impl ReactorError {
    /// Captures an error.
    pub fn new(error: impl Error + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Returns the captured error if it is of type `E`.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    /// Whether the captured error is of type `E`.
    pub fn is<E: Error + 'static>(&self) -> bool {
        self.downcast_ref::<E>().is_some()
    }
}

impl fmt::Debug for ReactorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReactorError").field(&self.inner).finish()
    }
}

impl fmt::Display for ReactorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Error for ReactorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.source()
    }
}

/// A value slot: a value of type `T` or a deferred error.
///
/// `Maybe<()>` covers value-less reactors, carrying only presence or
/// failure.
#[derive(Debug, Clone)]
pub enum Maybe<T> {
    /// A produced value.
    Ready(T),

    /// A deferred error, surfaced when the slot is read.
    Failed(ReactorError),
}

impl<T> Maybe<T> {
    /// Wraps a value.
    pub fn of(value: T) -> Self {
        Maybe::Ready(value)
    }

    /// Wraps an already-captured error.
    pub fn failed(error: ReactorError) -> Self {
        Maybe::Failed(error)
    }

    /// Captures a fresh error.
    pub fn error(error: impl Error + Send + Sync + 'static) -> Self {
        Maybe::Failed(ReactorError::new(error))
    }

    /// The slot of a reactor that has not produced anything yet.
    pub fn unevaluated() -> Self {
        Maybe::error(NoEvaluation)
    }

    /// Whether the slot holds a value.
    pub fn is_ready(&self) -> bool {
        matches!(self, Maybe::Ready(_))
    }

    /// Whether the slot holds a deferred error.
    pub fn is_failed(&self) -> bool {
        matches!(self, Maybe::Failed(_))
    }

    /// Reads the slot, surfacing a deferred error.
    pub fn get(&self) -> Result<&T, ReactorError> {
        match self {
            Maybe::Ready(value) => Ok(value),
            Maybe::Failed(error) => Err(error.clone()),
        }
    }

    /// Consumes the slot, surfacing a deferred error.
    pub fn into_result(self) -> Result<T, ReactorError> {
        match self {
            Maybe::Ready(value) => Ok(value),
            Maybe::Failed(error) => Err(error),
        }
    }

    /// Maps the value, passing a deferred error through.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Maybe<U> {
        match self {
            Maybe::Ready(value) => Maybe::Ready(f(value)),
            Maybe::Failed(error) => Maybe::Failed(error),
        }
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Self {
        Maybe::Ready(value)
    }
}

impl<T> From<Result<T, ReactorError>> for Maybe<T> {
    fn from(result: Result<T, ReactorError>) -> Self {
        match result {
            Ok(value) => Maybe::Ready(value),
            Err(error) => Maybe::Failed(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn ready_slot_reads_back() {
        let slot = Maybe::of(7);
        assert!(slot.is_ready());
        assert_eq!(*slot.get().unwrap(), 7);
        assert_eq!(slot.into_result().unwrap(), 7);
    }

    #[test]
    fn failed_slot_surfaces_on_read() {
        let slot = Maybe::<i32>::error(Boom);
        assert!(slot.is_failed());
        let error = slot.get().unwrap_err();
        assert!(error.is::<Boom>());
    }

    #[test]
    fn failed_slot_is_shareable() {
        let slot = Maybe::<i32>::error(Boom);
        let copy = slot.clone();
        assert!(slot.get().unwrap_err().is::<Boom>());
        assert!(copy.get().unwrap_err().is::<Boom>());
    }

    #[test]
    fn map_passes_errors_through() {
        let doubled = Maybe::of(4).map(|v| v * 2);
        assert_eq!(doubled.into_result().unwrap(), 8);

        let failed = Maybe::<i32>::error(Boom).map(|v| v * 2);
        assert!(failed.get().unwrap_err().is::<Boom>());
    }

    #[test]
    fn unevaluated_is_a_deferred_error() {
        let slot = Maybe::<i32>::unevaluated();
        assert!(slot.get().unwrap_err().is::<NoEvaluation>());
    }
}
