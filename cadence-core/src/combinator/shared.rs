//! Shared Reactor
//!
//! An aliasing wrapper: clones of a `Shared` all point at one underlying
//! reactor, and a per-sequence memo guarantees that the underlying
//! reactor is committed at most once per sequence no matter how many
//! positions in a graph hold a clone. Every holder observes the same
//! returned state.
//!
//! The cell must not be committed re-entrantly; a graph in which a shared
//! reactor is a descendant of itself would deadlock on the cell lock.

use std::sync::{Arc, RwLock};

use crate::reactor::{Maybe, Reactor, State};

struct SharedCell<R> {
    reactor: R,
    state: State,
    previous_sequence: Option<u64>,
}

/// A ref-counted reactor cell with a per-sequence commit memo.
pub struct Shared<R> {
    cell: Arc<RwLock<SharedCell<R>>>,
}

impl<R: Reactor> Shared<R> {
    /// Takes ownership of `reactor` and shares it.
    pub fn new(reactor: R) -> Self {
        Self {
            cell: Arc::new(RwLock::new(SharedCell {
                reactor,
                state: State::Empty,
                previous_sequence: None,
            })),
        }
    }
}

impl<R> Clone for Shared<R> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<R: Reactor> Reactor for Shared<R> {
    type Output = R::Output;

    fn commit(&mut self, sequence: u64) -> State {
        let mut cell = self.cell.write().expect("shared cell lock poisoned");
        if cell.previous_sequence == Some(sequence) || cell.state.is_complete() {
            return cell.state;
        }
        cell.state = cell.reactor.commit(sequence);
        cell.previous_sequence = Some(sequence);
        cell.state
    }

    fn eval(&self) -> Maybe<Self::Output> {
        let cell = self.cell.read().expect("shared cell lock poisoned");
        cell.reactor.eval()
    }
}
