//! Duplicate Suppression
//!
//! Passes a series' evaluations through but suppresses a value equal to
//! the one most recently emitted: the evaluation facet is demoted while
//! completion and continuation flow through unchanged. Deferred errors
//! are never considered equal and always pass.

use crate::reactor::{Maybe, Reactor, State};

/// A reactor that drops consecutive duplicate values.
pub struct Unconsecutive<R>
where
    R: Reactor,
{
    series: R,
    value: Option<Maybe<R::Output>>,
    state: State,
    previous_sequence: Option<u64>,
}

impl<R> Unconsecutive<R>
where
    R: Reactor,
    R::Output: PartialEq,
{
    pub fn new(series: R) -> Self {
        Self {
            series,
            value: None,
            state: State::Empty,
            previous_sequence: None,
        }
    }
}

impl<R> Reactor for Unconsecutive<R>
where
    R: Reactor,
    R::Output: PartialEq,
{
    type Output = R::Output;

    fn commit(&mut self, sequence: u64) -> State {
        if self.previous_sequence == Some(sequence) || self.state.is_complete() {
            return self.state;
        }
        let committed = self.series.commit(sequence);
        self.state = if committed.has_evaluation() {
            let fresh = self.series.eval();
            let duplicate = match (&self.value, &fresh) {
                (Some(Maybe::Ready(previous)), Maybe::Ready(current)) => previous == current,
                _ => false,
            };
            if duplicate {
                State::from_flags(
                    false,
                    committed.has_continuation(),
                    committed.is_complete(),
                    false,
                )
            } else {
                self.value = Some(fresh);
                committed
            }
        } else {
            committed
        };
        self.previous_sequence = Some(sequence);
        self.state
    }

    fn eval(&self) -> Maybe<Self::Output> {
        self.value.clone().unwrap_or_else(Maybe::unevaluated)
    }
}

/// Makes a reactor that suppresses consecutive duplicates of `series`.
pub fn unconsecutive<R>(series: R) -> Unconsecutive<R>
where
    R: Reactor,
    R::Output: PartialEq,
{
    Unconsecutive::new(series)
}
