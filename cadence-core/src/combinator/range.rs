//! Numeric Ranges
//!
//! [`range`] counts from a start value to a stop value (exclusive) by a
//! step. All three endpoints are themselves reactors, so a fresh value
//! from any of them perturbs the sequence: an increased start makes the
//! count jump forward, a moved stop resumes a paused count.
//!
//! The construction is a showcase of the combinator protocol rather than
//! a bespoke reactor: the endpoints are shared, their lifecycles are
//! mirrored with [`StateReactor`], and a [`Perpetual`](super::Perpetual)
//! pulse keeps the
//! lifted closure firing every sequence. The closure holds the count and
//! steers the outcome through [`FunctionEvaluation`] hints:
//!
//! - past the stop with both endpoints settled: complete
//! - past the stop with a live endpoint: pause (no value) until it moves
//! - on the last step with both endpoints settled: emit and complete
//!   together
//! - otherwise: emit and request the next tick

use std::ops::Add;

use crate::reactor::{Maybe, Reactor, State};

use super::lift::{lift_state, FunctionEvaluation};
use super::perpetual::perpetual;
use super::shared::Shared;
use super::state_reactor::StateReactor;

/// Makes a reactor counting from `start` (inclusive) to `stop`
/// (exclusive) by `step`.
pub fn range<S, E, P>(start: S, stop: E, step: P) -> impl Reactor<Output = S::Output>
where
    S: Reactor,
    E: Reactor<Output = S::Output>,
    P: Reactor<Output = S::Output>,
    S::Output: Clone + PartialOrd + Add<Output = S::Output> + 'static,
{
    let start = Shared::new(start);
    let start_updates = StateReactor::new(start.clone());
    let stop = Shared::new(stop);
    let stop_updates = StateReactor::new(stop.clone());
    let step = Shared::new(step);
    let step_updates = StateReactor::new(step.clone());
    let mut value: Option<S::Output> = None;
    lift_state(
        move |start: Maybe<S::Output>,
              start_state: Maybe<State>,
              stop: Maybe<S::Output>,
              stop_state: Maybe<State>,
              step: Maybe<S::Output>,
              _step_state: Maybe<State>,
              _pulse: Maybe<()>| {
            let (start, stop, step) = match (
                start.into_result(),
                stop.into_result(),
                step.into_result(),
            ) {
                (Ok(start), Ok(stop), Ok(step)) => (start, stop, step),
                (Err(error), _, _) | (_, Err(error), _) | (_, _, Err(error)) => {
                    return FunctionEvaluation::error(error)
                }
            };
            let (start_state, stop_state) =
                match (start_state.into_result(), stop_state.into_result()) {
                    (Ok(a), Ok(b)) => (a, b),
                    (Err(error), _) | (_, Err(error)) => {
                        return FunctionEvaluation::error(error)
                    }
                };
            let candidate = match &value {
                None => start,
                Some(current) => {
                    let incremented = current.clone() + step.clone();
                    if start > incremented {
                        start
                    } else {
                        incremented
                    }
                }
            };
            if candidate >= stop {
                if start_state.is_complete() && stop_state.is_complete() {
                    return FunctionEvaluation::state(State::Complete);
                }
                return FunctionEvaluation::state(State::None);
            }
            value = Some(candidate.clone());
            if start_state.is_complete()
                && stop_state.is_complete()
                && candidate.clone() + step >= stop
            {
                return FunctionEvaluation::with_state(candidate, State::Complete);
            }
            FunctionEvaluation::value(candidate)
        },
        (
            start,
            start_updates,
            stop,
            stop_updates,
            step,
            step_updates,
            perpetual(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{constant, Queue};

    #[test]
    fn counts_to_the_stop_exclusive() {
        let mut reactor = range(constant(0), constant(3), constant(1));
        assert_eq!(reactor.commit(0), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 0);
        assert_eq!(reactor.commit(1), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);
        assert_eq!(reactor.commit(2), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 2);
    }

    #[test]
    fn an_empty_range_completes_without_values() {
        let mut reactor = range(constant(5), constant(5), constant(1));
        let state = reactor.commit(0);
        assert!(state.is_complete());
        assert!(!state.has_evaluation());
    }

    #[test]
    fn pauses_until_the_stop_moves() {
        let stop = Queue::new();
        stop.push(1);
        let mut reactor = range(constant(0), stop.clone(), constant(1));

        assert_eq!(reactor.commit(0), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 0);

        // The count reached the stop, but the stop can still move: the
        // range pauses instead of completing.
        let state = reactor.commit(1);
        assert!(!state.is_complete());
        assert!(!state.has_evaluation());

        stop.push(3);
        stop.set_complete();
        assert_eq!(reactor.commit(2), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);
        assert_eq!(reactor.commit(3), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 2);
    }

    #[test]
    fn a_raised_start_makes_the_count_jump() {
        let start = Queue::new();
        start.push(0);
        let mut reactor = range(start.clone(), constant(10), constant(1));

        assert_eq!(reactor.commit(0), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 0);
        assert_eq!(reactor.commit(1), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);

        start.push(7);
        assert_eq!(reactor.commit(2), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 7);
        assert_eq!(reactor.commit(3), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 8);
    }
}
