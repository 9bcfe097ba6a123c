//! Queue Reactor
//!
//! The external-input leaf. Producers push values from outside the commit
//! call chain; the reactor emits them in order, one per commit.
//!
//! # Handles
//!
//! A `Queue` is a cloneable handle over a shared buffer: the graph owns
//! one clone as a child while producers keep another to push with. Pushes
//! between commits are the normal case; the driver coordinates pushes
//! with commits.
//!
//! Note that cloning shares the buffer but not any per-sequence commit
//! memoization. To place one queue in several positions of a graph, wrap
//! a handle in [`Shared`](super::Shared) so the buffer is popped at most
//! once per sequence.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracing::trace;

use crate::reactor::{Maybe, Reactor, State};

struct QueueCell<T> {
    entries: VecDeque<T>,
    value: Option<Maybe<T>>,
    state: State,
    previous_sequence: Option<u64>,
    is_closed: bool,
}

/// An externally fed reactor emitting pushed values in order.
pub struct Queue<T> {
    cell: Arc<Mutex<QueueCell<T>>>,
}

impl<T: Clone> Queue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            cell: Arc::new(Mutex::new(QueueCell {
                entries: VecDeque::new(),
                value: None,
                state: State::Empty,
                previous_sequence: None,
                is_closed: false,
            })),
        }
    }

    /// Enqueues a value to be emitted on a later commit.
    pub fn push(&self, value: T) {
        let mut cell = self.cell.lock().expect("queue lock poisoned");
        cell.entries.push_back(value);
        trace!(pending = cell.entries.len(), "queue push");
    }

    /// Marks the queue complete: once drained, the reactor settles.
    pub fn set_complete(&self) {
        let mut cell = self.cell.lock().expect("queue lock poisoned");
        cell.is_closed = true;
        trace!(pending = cell.entries.len(), "queue closed");
    }
}

impl<T: Clone> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Clone> Reactor for Queue<T> {
    type Output = T;

    fn commit(&mut self, sequence: u64) -> State {
        let mut cell = self.cell.lock().expect("queue lock poisoned");
        if cell.previous_sequence == Some(sequence) || cell.state.is_complete() {
            return cell.state;
        }
        if let Some(head) = cell.entries.pop_front() {
            cell.value = Some(Maybe::of(head));
            cell.state = if !cell.entries.is_empty() {
                State::ContinueEvaluated
            } else if cell.is_closed {
                State::CompleteEvaluated
            } else {
                State::Evaluated
            };
        } else if cell.is_closed {
            cell.state = if cell.state.is_empty() {
                State::CompleteEmpty
            } else {
                State::Complete
            };
        } else if cell.state.is_empty() {
            cell.state = State::Empty;
        } else {
            cell.state = State::None;
        }
        cell.previous_sequence = Some(sequence);
        cell.state
    }

    fn eval(&self) -> Maybe<T> {
        let cell = self.cell.lock().expect("queue lock poisoned");
        cell.value.clone().unwrap_or_else(Maybe::unevaluated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_in_push_order() {
        let queue = Queue::new();
        let mut reactor = queue.clone();

        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(reactor.commit(0), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);
        assert_eq!(reactor.commit(1), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 2);
        assert_eq!(reactor.commit(2), State::Evaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 3);
    }

    #[test]
    fn reports_empty_until_the_first_value() {
        let queue = Queue::<i32>::new();
        let mut reactor = queue.clone();

        assert_eq!(reactor.commit(0), State::Empty);
        queue.push(9);
        assert_eq!(reactor.commit(1), State::Evaluated);
        // Drained but open: no new value this commit.
        assert_eq!(reactor.commit(2), State::None);
        assert_eq!(reactor.eval().into_result().unwrap(), 9);
    }

    #[test]
    fn settles_once_closed_and_drained() {
        let queue = Queue::new();
        let mut reactor = queue.clone();

        queue.push(5);
        queue.set_complete();
        assert_eq!(reactor.commit(0), State::CompleteEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 5);
        assert_eq!(reactor.commit(1), State::CompleteEvaluated);
    }

    #[test]
    fn settles_empty_when_closed_without_values() {
        let queue = Queue::<i32>::new();
        let mut reactor = queue.clone();

        queue.set_complete();
        assert_eq!(reactor.commit(0), State::CompleteEmpty);
    }

    #[test]
    fn closing_after_values_completes_non_empty() {
        let queue = Queue::new();
        let mut reactor = queue.clone();

        queue.push(1);
        assert_eq!(reactor.commit(0), State::Evaluated);
        queue.set_complete();
        assert_eq!(reactor.commit(1), State::Complete);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);
    }

    #[test]
    fn memoizes_a_repeated_sequence() {
        let queue = Queue::new();
        let mut reactor = queue.clone();

        queue.push(1);
        queue.push(2);
        assert_eq!(reactor.commit(0), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);
        // Same sequence: nothing is popped.
        assert_eq!(reactor.commit(0), State::ContinueEvaluated);
        assert_eq!(reactor.eval().into_result().unwrap(), 1);
    }
}
