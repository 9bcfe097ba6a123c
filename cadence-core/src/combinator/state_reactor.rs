//! State Mirror
//!
//! Mirrors a reactor's commit states into the value domain: each commit
//! evaluates to the wrapped reactor's freshly reported [`State`].
//! Combinators use this to react to a sibling's lifecycle, for example a
//! range watching whether its endpoints have settled.

use crate::reactor::{Maybe, Reactor, State};

/// A reactor whose values are another reactor's states.
#[derive(Debug, Clone)]
pub struct StateReactor<R> {
    reactor: R,
    state: State,
}

impl<R: Reactor> StateReactor<R> {
    /// Mirrors `reactor`. Committing the mirror commits the wrapped
    /// reactor, so the wrapped reactor is usually a shared handle that
    /// memoizes per sequence.
    pub fn new(reactor: R) -> Self {
        Self {
            reactor,
            state: State::Empty,
        }
    }
}

impl<R: Reactor> Reactor for StateReactor<R> {
    type Output = State;

    fn commit(&mut self, sequence: u64) -> State {
        self.state = self.reactor.commit(sequence);
        if self.state.is_complete() {
            State::CompleteEvaluated
        } else {
            State::Evaluated
        }
    }

    fn eval(&self) -> Maybe<State> {
        Maybe::of(self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{constant, Queue};

    #[test]
    fn mirrors_states_as_values() {
        let queue = Queue::new();
        let mut mirror = StateReactor::new(queue.clone());

        assert_eq!(mirror.commit(0), State::Evaluated);
        assert_eq!(mirror.eval().into_result().unwrap(), State::Empty);

        queue.push(7);
        assert_eq!(mirror.commit(1), State::Evaluated);
        assert_eq!(mirror.eval().into_result().unwrap(), State::Evaluated);
    }

    #[test]
    fn completes_with_the_mirrored_reactor() {
        let mut mirror = StateReactor::new(constant(1));
        assert_eq!(mirror.commit(0), State::CompleteEvaluated);
        assert_eq!(
            mirror.eval().into_result().unwrap(),
            State::CompleteEvaluated
        );
    }
}
