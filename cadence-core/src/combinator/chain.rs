//! Sequential Composition
//!
//! [`Chain`] emits its first series' values until that series completes,
//! then emits its second series' values.
//!
//! # Transition rules
//!
//! - If the first series completes *with* a final value, that value is
//!   emitted as a plain evaluation and the second series starts at the
//!   next sequence; the completion facet is withheld so the driver keeps
//!   committing.
//! - If the first series completes *without* a value this commit, the
//!   second series is committed within the same sequence so no tick is
//!   lost.
//! - The second series' completion is the chain's completion. The chain
//!   reports an empty completion only when neither series ever produced
//!   a value.

use crate::reactor::{Maybe, Reactor, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Driving the first series.
    Initial,
    /// The first series ended with a value; start the second next commit.
    Transitioning,
    /// Driving the second series.
    Continuation,
}

/// A reactor that emits one series, then another.
pub struct Chain<A, B>
where
    A: Reactor,
{
    initial: A,
    continuation: B,
    phase: Phase,
    value: Option<Maybe<A::Output>>,
    state: State,
    previous_sequence: Option<u64>,
}

impl<A, B> Chain<A, B>
where
    A: Reactor,
    B: Reactor<Output = A::Output>,
{
    /// Chains `initial` before `continuation`.
    pub fn new(initial: A, continuation: B) -> Self {
        Self {
            initial,
            continuation,
            phase: Phase::Initial,
            value: None,
            state: State::Empty,
            previous_sequence: None,
        }
    }

    fn commit_continuation(&mut self, sequence: u64) -> State {
        let committed = self.continuation.commit(sequence);
        if committed.has_evaluation() {
            self.value = Some(self.continuation.eval());
            return committed;
        }
        let produced = self.value.is_some();
        match committed {
            State::CompleteEmpty if produced => State::Complete,
            State::Empty if produced => State::None,
            other => other,
        }
    }
}

impl<A, B> Reactor for Chain<A, B>
where
    A: Reactor,
    B: Reactor<Output = A::Output>,
{
    type Output = A::Output;

    fn commit(&mut self, sequence: u64) -> State {
        if self.previous_sequence == Some(sequence) || self.state.is_complete() {
            return self.state;
        }
        self.state = match self.phase {
            Phase::Initial => {
                let committed = self.initial.commit(sequence);
                if committed.has_evaluation() {
                    self.value = Some(self.initial.eval());
                }
                if committed.is_complete() {
                    if committed.has_evaluation() {
                        self.phase = Phase::Transitioning;
                        State::Evaluated
                    } else {
                        self.phase = Phase::Continuation;
                        self.commit_continuation(sequence)
                    }
                } else {
                    committed
                }
            }
            Phase::Transitioning => {
                self.phase = Phase::Continuation;
                self.commit_continuation(sequence)
            }
            Phase::Continuation => self.commit_continuation(sequence),
        };
        self.previous_sequence = Some(sequence);
        self.state
    }

    fn eval(&self) -> Maybe<Self::Output> {
        self.value.clone().unwrap_or_else(Maybe::unevaluated)
    }
}

/// Chains two series: emit `initial`'s values until it completes, then
/// `continuation`'s.
pub fn chain<A, B>(initial: A, continuation: B) -> Chain<A, B>
where
    A: Reactor,
    B: Reactor<Output = A::Output>,
{
    Chain::new(initial, continuation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{constant, none, Queue};

    #[test]
    fn emits_both_constants_in_order() {
        let mut reactor = chain(constant(100), constant(200));
        assert_eq!(reactor.commit(0), State::Evaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 100);
        assert_eq!(reactor.commit(1), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 200);
    }

    #[test]
    fn keeps_the_first_value_when_the_second_series_is_empty() {
        let mut reactor = chain(constant(911), none::<i32>());
        assert_eq!(reactor.commit(0), State::Evaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 911);
        assert_eq!(reactor.commit(1), State::Complete);
        assert_eq!(reactor.eval().into_result().unwrap(), 911);
    }

    #[test]
    fn transitions_within_one_commit_when_the_first_is_empty() {
        let mut reactor = chain(none::<i32>(), constant(911));
        assert_eq!(reactor.commit(0), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 911);
    }

    #[test]
    fn completes_empty_when_both_series_are_empty() {
        let mut reactor = chain(none::<i32>(), none::<i32>());
        assert_eq!(reactor.commit(0), State::CompleteEmpty);
    }

    #[test]
    fn drains_a_queue_before_switching() {
        let first = Queue::new();
        first.push(1);
        first.push(2);
        first.set_complete();
        let mut reactor = chain(first.clone(), constant(3));

        assert_eq!(reactor.commit(0), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);
        // The queue's last value arrives with its completion; the chain
        // holds the completion back and emits the value.
        assert_eq!(reactor.commit(1), State::Evaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 2);
        assert_eq!(reactor.commit(2), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 3);
    }
}
