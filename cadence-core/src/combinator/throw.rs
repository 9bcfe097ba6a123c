//! Throwing Reactor
//!
//! Produces a single deferred error and completes. Reading the value
//! surfaces the error.

use std::error::Error;
use std::marker::PhantomData;

use crate::reactor::{Maybe, Reactor, ReactorError, State};

/// A reactor whose only evaluation is a captured error.
#[derive(Debug, Clone)]
pub struct Throw<T> {
    error: ReactorError,
    _element: PhantomData<fn() -> T>,
}

impl<T: Clone> Throw<T> {
    pub fn new(error: impl Error + Send + Sync + 'static) -> Self {
        Self {
            error: ReactorError::new(error),
            _element: PhantomData,
        }
    }
}

impl<T: Clone> Reactor for Throw<T> {
    type Output = T;

    fn commit(&mut self, _sequence: u64) -> State {
        State::CompleteEvaluated
    }

    fn eval(&self) -> Maybe<T> {
        Maybe::failed(self.error.clone())
    }
}

/// Makes a reactor that evaluates to a deferred `error` and completes.
pub fn throw<T: Clone>(error: impl Error + Send + Sync + 'static) -> Throw<T> {
    Throw::new(error)
}
