//! Type-Erased Reactor Handles
//!
//! [`Boxed`] hides a reactor's concrete type behind a trait object with a
//! fixed element type, enabling graphs whose shape is only known at run
//! time. [`SharedBox`] adds shared ownership and the per-sequence commit
//! memo of [`Shared`](super::Shared), making it the handle of choice for
//! dynamic child lists.
//!
//! Boxing is idempotent: constructing a `Boxed` from a `Boxed` (or a
//! `SharedBox` from a `SharedBox`) reuses the existing handle instead of
//! stacking another indirection. The check is an identity test on the
//! concrete input type at construction.

use std::any::Any;
use std::sync::{Arc, Mutex};

use crate::reactor::{Maybe, Reactor, State};

/// An owning, type-erased reactor handle.
pub struct Boxed<T> {
    reactor: Box<dyn Reactor<Output = T> + Send>,
}

impl<T: Clone + 'static> Boxed<T> {
    /// Erases `reactor`'s concrete type. An already-erased input is
    /// returned as-is.
    pub fn new<R>(reactor: R) -> Self
    where
        R: Reactor<Output = T> + Send + 'static,
    {
        let mut slot = Some(reactor);
        if let Some(boxed) = (&mut slot as &mut dyn Any).downcast_mut::<Option<Boxed<T>>>() {
            return boxed.take().expect("freshly filled slot");
        }
        Self {
            reactor: Box::new(slot.take().expect("freshly filled slot")),
        }
    }
}

impl<T: Clone + 'static> Reactor for Boxed<T> {
    type Output = T;

    fn commit(&mut self, sequence: u64) -> State {
        self.reactor.commit(sequence)
    }

    fn eval(&self) -> Maybe<T> {
        self.reactor.eval()
    }
}

struct BoxCell<T> {
    reactor: Boxed<T>,
    state: State,
    previous_sequence: Option<u64>,
}

/// A shared, type-erased reactor handle with a per-sequence commit memo.
pub struct SharedBox<T> {
    cell: Arc<Mutex<BoxCell<T>>>,
}

impl<T: Clone + 'static> SharedBox<T> {
    /// Erases and shares `reactor`. An already-shared input is returned
    /// as-is, so re-wrapping cannot stack cells.
    pub fn new<R>(reactor: R) -> Self
    where
        R: Reactor<Output = T> + Send + 'static,
    {
        let mut slot = Some(reactor);
        if let Some(shared) = (&mut slot as &mut dyn Any).downcast_mut::<Option<SharedBox<T>>>() {
            return shared.take().expect("freshly filled slot");
        }
        Self {
            cell: Arc::new(Mutex::new(BoxCell {
                reactor: Boxed::new(slot.take().expect("freshly filled slot")),
                state: State::Empty,
                previous_sequence: None,
            })),
        }
    }
}

impl<T> Clone for SharedBox<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: Clone + 'static> Reactor for SharedBox<T> {
    type Output = T;

    fn commit(&mut self, sequence: u64) -> State {
        let mut cell = self.cell.lock().expect("shared box lock poisoned");
        if cell.previous_sequence == Some(sequence) || cell.state.is_complete() {
            return cell.state;
        }
        cell.state = cell.reactor.commit(sequence);
        cell.previous_sequence = Some(sequence);
        cell.state
    }

    fn eval(&self) -> Maybe<T> {
        let cell = self.cell.lock().expect("shared box lock poisoned");
        cell.reactor.eval()
    }
}
