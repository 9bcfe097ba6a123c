//! The Reactor Contract
//!
//! A reactor is a lazy, pull-driven, discretely-clocked value producer.
//! Every component in this crate satisfies the same two-method contract:
//!
//! 1. `commit(sequence)` advances the reactor one step and reports a
//!    [`State`]. It is total: errors raised by user-supplied functions are
//!    captured into the value slot, never propagated out of `commit`.
//!
//! 2. `eval()` reads the current value slot. It is meaningful after a
//!    commit whose state carried the evaluation facet and keeps returning
//!    the most recent value through later non-evaluating commits.
//!
//! # Protocol obligations
//!
//! - `sequence` arguments are monotonically non-decreasing; committing the
//!   same sequence twice returns the memoized state without re-running
//!   children.
//! - Once a complete state is returned, every later commit returns the
//!   same terminal state and children are not touched again.
//!
//! # Pointer coercion
//!
//! Combinators own their children by value. Blanket implementations for
//! `&mut R` and `Box<R>` let a graph borrow or heap-allocate a child
//! without changing any combinator's signature.

use super::maybe::Maybe;
use super::state::State;

/// A pull-driven producer of values of type `Output`.
pub trait Reactor {
    /// The element type produced. `()` marks a value-less reactor.
    type Output: Clone;

    /// Advances this reactor to `sequence` and reports its state.
    fn commit(&mut self, sequence: u64) -> State;

    /// Reads the current value slot.
    ///
    /// Returns the most recent evaluation, a deferred error captured while
    /// producing it, or a [`NoEvaluation`](super::NoEvaluation) error if
    /// nothing has been produced yet.
    fn eval(&self) -> Maybe<Self::Output>;
}

impl<R: Reactor + ?Sized> Reactor for &mut R {
    type Output = R::Output;

    fn commit(&mut self, sequence: u64) -> State {
        (**self).commit(sequence)
    }

    fn eval(&self) -> Maybe<Self::Output> {
        (**self).eval()
    }
}

impl<R: Reactor + ?Sized> Reactor for Box<R> {
    type Output = R::Output;

    fn commit(&mut self, sequence: u64) -> State {
        (**self).commit(sequence)
    }

    fn eval(&self) -> Maybe<Self::Output> {
        (**self).eval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::constant;

    #[test]
    fn borrowed_reactor_delegates() {
        let mut inner = constant(5);
        let mut borrowed = &mut inner;
        assert_eq!(borrowed.commit(0), State::CompleteEvaluated);
        assert_eq!(borrowed.eval().into_result().unwrap(), 5);
    }

    #[test]
    fn boxed_allocation_delegates() {
        let mut boxed: Box<dyn Reactor<Output = i32>> = Box::new(constant(9));
        assert_eq!(boxed.commit(0), State::CompleteEvaluated);
        assert_eq!(boxed.eval().into_result().unwrap(), 9);
    }
}
