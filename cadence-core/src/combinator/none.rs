//! Empty Reactor
//!
//! Completes immediately without ever producing a value.

use std::marker::PhantomData;

use crate::reactor::{Maybe, Reactor, State};

/// A reactor that never produces a value.
#[derive(Debug, Clone)]
pub struct NoneReactor<T> {
    _element: PhantomData<fn() -> T>,
}

impl<T: Clone> NoneReactor<T> {
    pub fn new() -> Self {
        Self {
            _element: PhantomData,
        }
    }
}

impl<T: Clone> Default for NoneReactor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Reactor for NoneReactor<T> {
    type Output = T;

    fn commit(&mut self, _sequence: u64) -> State {
        State::CompleteEmpty
    }

    fn eval(&self) -> Maybe<T> {
        Maybe::unevaluated()
    }
}

/// Makes a reactor that completes without producing anything.
pub fn none<T: Clone>() -> NoneReactor<T> {
    NoneReactor::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactor::NoEvaluation;

    #[test]
    fn completes_empty() {
        let mut reactor = none::<i32>();
        assert_eq!(reactor.commit(0), State::CompleteEmpty);
        assert!(reactor.eval().into_result().unwrap_err().is::<NoEvaluation>());
    }
}
