//! Commit Aggregation
//!
//! A [`CommitHandler`] drives the children of a combinator and folds their
//! per-commit states into one composite. The composite follows the
//! lattice rules:
//!
//! - the evaluation facet is set when any child evaluated this commit
//! - the continuation facet is set when any child requested one, or when
//!   one child just left the empty state while another is still empty
//!   (the composite asks for a re-commit so lagging children can catch
//!   up)
//! - the completion facet is set only when every child is complete
//! - the composite is empty only while every child is empty
//!
//! A complete child is removed from later traversals; its last value
//! stays readable through its own slot. Committing the same sequence
//! twice returns the memoized composite without touching any child.
//!
//! Children are addressed through [`ReactorSet`], which is implemented
//! for heterogeneous tuples up to eight reactors and for `Vec`s of one
//! reactor type, so static combinators and dynamic child lists share the
//! same handler.

use super::state::State;
use super::traits::Reactor;

/// A list of child reactors addressable by index.
pub trait ReactorSet {
    /// The number of children.
    fn len(&self) -> usize;

    /// Whether the set has no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Commits the child at `index`.
    fn commit_at(&mut self, index: usize, sequence: u64) -> State;
}

impl<R: Reactor> ReactorSet for Vec<R> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn commit_at(&mut self, index: usize, sequence: u64) -> State {
        self[index].commit(sequence)
    }
}

macro_rules! impl_reactor_set {
    ($count:literal; $(($reactor:ident, $index:tt)),*) => {
        impl<$($reactor: Reactor),*> ReactorSet for ($($reactor,)*) {
            fn len(&self) -> usize {
                $count
            }

            #[allow(unused_variables)]
            fn commit_at(&mut self, index: usize, sequence: u64) -> State {
                match index {
                    $($index => self.$index.commit(sequence),)*
                    _ => unreachable!("child index out of range"),
                }
            }
        }
    };
}

impl_reactor_set!(0;);
impl_reactor_set!(1; (A, 0));
impl_reactor_set!(2; (A, 0), (B, 1));
impl_reactor_set!(3; (A, 0), (B, 1), (C, 2));
impl_reactor_set!(4; (A, 0), (B, 1), (C, 2), (D, 3));
impl_reactor_set!(5; (A, 0), (B, 1), (C, 2), (D, 3), (E, 4));
impl_reactor_set!(6; (A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5));
impl_reactor_set!(7; (A, 0), (B, 1), (C, 2), (D, 3), (E, 4), (F, 5), (G, 6));
impl_reactor_set!(
    8;
    (A, 0),
    (B, 1),
    (C, 2),
    (D, 3),
    (E, 4),
    (F, 5),
    (G, 6),
    (H, 7)
);

/// Aggregates the commits of a set of child reactors.
pub struct CommitHandler<A: ReactorSet> {
    children: A,
    slots: Vec<State>,
    state: State,
    previous_sequence: Option<u64>,
}

impl<A: ReactorSet> CommitHandler<A> {
    /// Wraps a child set. Every child starts in the empty state.
    pub fn new(children: A) -> Self {
        let count = children.len();
        Self {
            children,
            slots: vec![State::Empty; count],
            state: State::Empty,
            previous_sequence: None,
        }
    }

    /// The wrapped children, for reading their value slots.
    pub fn children(&self) -> &A {
        &self.children
    }

    /// The number of children.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the handler drives no children.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Commits every non-complete child once and folds their states.
    pub fn commit(&mut self, sequence: u64) -> State {
        if self.previous_sequence == Some(sequence) || self.state.is_complete() {
            return self.state;
        }
        let mut evaluated = false;
        let mut continuing = false;
        let mut all_complete = true;
        let mut all_empty = true;
        let mut caught_up = false;
        for index in 0..self.slots.len() {
            let previous = self.slots[index];
            if previous.is_complete() {
                // A settled child keeps only its completion and emptiness;
                // its old evaluation is not a fresh one.
                all_empty &= previous.is_empty();
                continue;
            }
            let current = self.children.commit_at(index, sequence);
            self.slots[index] = current;
            evaluated |= current.has_evaluation();
            continuing |= current.has_continuation();
            all_complete &= current.is_complete();
            all_empty &= current.is_empty();
            if previous.is_empty() && !current.is_empty() {
                caught_up = true;
            }
        }
        let lagging = self.slots.iter().any(|slot| slot.is_empty());
        self.state = State::from_flags(
            evaluated,
            continuing || (caught_up && lagging),
            all_complete,
            all_empty,
        );
        self.previous_sequence = Some(sequence);
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::{constant, none, Queue};

    #[test]
    fn folds_completed_constants() {
        let mut handler = CommitHandler::new((constant(1), constant(2)));
        assert_eq!(handler.commit(0), State::CompleteEvaluated);
        assert_eq!(handler.commit(1), State::CompleteEvaluated);
    }

    #[test]
    fn empty_only_while_every_child_is_empty() {
        let mut handler = CommitHandler::new((none::<i32>(), none::<i32>()));
        assert_eq!(handler.commit(0), State::CompleteEmpty);
    }

    #[test]
    fn requests_catch_up_for_lagging_children() {
        let filled = Queue::new();
        filled.push(10);
        let lagging = Queue::<i32>::new();
        let mut handler = CommitHandler::new((filled, lagging.clone()));

        // One child produced while the other is still empty: the composite
        // asks for a re-commit.
        assert_eq!(handler.commit(0), State::ContinueEvaluated);

        lagging.push(20);
        assert_eq!(handler.commit(1), State::Evaluated);
    }

    #[test]
    fn memoizes_by_sequence() {
        let queue = Queue::new();
        queue.push(1);
        queue.push(2);
        let mut handler = CommitHandler::new((queue,));

        let first = handler.commit(0);
        assert_eq!(first, State::ContinueEvaluated);
        // Same sequence: memoized, the queue is not popped again.
        assert_eq!(handler.commit(0), first);
        assert_eq!(handler.commit(1), State::Evaluated);
    }

    #[test]
    fn complete_children_are_not_recommitted() {
        let queue = Queue::new();
        queue.push(5);
        queue.set_complete();
        let mut handler = CommitHandler::new((constant(1), queue));

        assert_eq!(handler.commit(0), State::CompleteEvaluated);
        // The composite is terminal; later commits return it unchanged.
        assert_eq!(handler.commit(5), State::CompleteEvaluated);
    }

    #[test]
    fn dynamic_child_lists_fold_identically() {
        let mut handler = CommitHandler::new(vec![constant(1), constant(2), constant(3)]);
        assert_eq!(handler.commit(0), State::CompleteEvaluated);
    }
}
