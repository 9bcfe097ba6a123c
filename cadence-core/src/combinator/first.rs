//! First Value
//!
//! Emits the wrapped series' first evaluation, then completes. If the
//! series completes without ever evaluating, the wrapper completes
//! without a value. While waiting it reports no value of its own.

use crate::reactor::{Maybe, Reactor, State};

/// A reactor that captures its series' first value and settles.
pub struct First<R>
where
    R: Reactor,
{
    series: R,
    value: Option<Maybe<R::Output>>,
    state: State,
    previous_sequence: Option<u64>,
}

impl<R: Reactor> First<R> {
    pub fn new(series: R) -> Self {
        Self {
            series,
            value: None,
            state: State::None,
            previous_sequence: None,
        }
    }
}

impl<R: Reactor> Reactor for First<R> {
    type Output = R::Output;

    fn commit(&mut self, sequence: u64) -> State {
        if self.previous_sequence == Some(sequence) || self.state.is_complete() {
            return self.state;
        }
        let committed = self.series.commit(sequence);
        self.state = if committed.has_evaluation() {
            self.value = Some(self.series.eval());
            State::CompleteEvaluated
        } else if committed.is_complete() {
            State::Complete
        } else if committed.has_continuation() {
            State::Continue
        } else {
            State::None
        };
        self.previous_sequence = Some(sequence);
        self.state
    }

    fn eval(&self) -> Maybe<Self::Output> {
        self.value.clone().unwrap_or_else(Maybe::unevaluated)
    }
}

/// Makes a reactor that emits `series`' first value and completes.
pub fn first<R: Reactor>(series: R) -> First<R> {
    First::new(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{constant, none, Queue, Shared};

    #[test]
    fn captures_a_constant_immediately() {
        let mut reactor = first(constant(123));
        assert_eq!(reactor.commit(0), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 123);
    }

    #[test]
    fn completes_without_a_value_for_an_empty_series() {
        let mut reactor = first(none::<i32>());
        assert_eq!(reactor.commit(0), State::Complete);
    }

    #[test]
    fn waits_for_a_queue_to_produce() {
        let queue = Queue::new();
        let mut reactor = first(Shared::new(queue.clone()));
        assert_eq!(reactor.commit(0), State::None);
        queue.push(10);
        assert_eq!(reactor.commit(1), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 10);
        // Later values are never read.
        queue.push(11);
        assert_eq!(reactor.commit(2), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 10);
    }
}
