//! Commit State Lattice
//!
//! Every commit reports one [`State`] value. A state independently tracks
//! three facets plus one lifecycle marker:
//!
//! - **evaluation**: did this commit produce a fresh value?
//! - **continuation**: does this reactor request an immediate re-commit?
//! - **completion**: is this reactor done for good?
//! - **empty**: has this reactor produced no value *yet*? (Distinct from
//!   "no new value this commit".)
//!
//! # Lattice rules
//!
//! [`State::combine`] ORs the evaluation, continuation and completion
//! facets and keeps `empty` only when both operands were empty. Two
//! canonicalization rules keep the set of states closed:
//!
//! - completion absorbs continuation (a complete reactor is never
//!   re-committed, so a pending re-commit request is meaningless)
//! - `empty` is dropped as soon as any other facet is present
//!
//! These rules leave exactly the eight named states below.

use serde::{Deserialize, Serialize};

/// The state reported by one commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// No value has ever been produced.
    Empty,

    /// No new value this commit.
    None,

    /// A fresh value is available through `eval`.
    Evaluated,

    /// Re-commit immediately; no new value yet.
    Continue,

    /// A fresh value is available and a re-commit is requested.
    ContinueEvaluated,

    /// The reactor will never produce another value.
    Complete,

    /// The reactor completed without ever producing a value.
    CompleteEmpty,

    /// The reactor produced a final value and completed.
    CompleteEvaluated,
}

impl State {
    /// Builds the canonical state for a combination of facets.
    ///
    /// Continuation is dropped when completion is set, and emptiness is
    /// dropped when any other facet is present.
    pub fn from_flags(evaluation: bool, continuation: bool, completion: bool, empty: bool) -> Self {
        if completion {
            if evaluation {
                State::CompleteEvaluated
            } else if empty {
                State::CompleteEmpty
            } else {
                State::Complete
            }
        } else if evaluation {
            if continuation {
                State::ContinueEvaluated
            } else {
                State::Evaluated
            }
        } else if continuation {
            State::Continue
        } else if empty {
            State::Empty
        } else {
            State::None
        }
    }

    /// Whether this commit produced a fresh value.
    pub fn has_evaluation(self) -> bool {
        matches!(
            self,
            State::Evaluated | State::ContinueEvaluated | State::CompleteEvaluated
        )
    }

    /// Whether an immediate re-commit is requested.
    pub fn has_continuation(self) -> bool {
        matches!(self, State::Continue | State::ContinueEvaluated)
    }

    /// Whether the reactor is settled and will be called no more.
    pub fn is_complete(self) -> bool {
        matches!(
            self,
            State::Complete | State::CompleteEmpty | State::CompleteEvaluated
        )
    }

    /// Whether the reactor has produced no value yet.
    pub fn is_empty(self) -> bool {
        matches!(self, State::Empty | State::CompleteEmpty)
    }

    /// Joins two states facet-wise.
    pub fn combine(self, other: State) -> State {
        State::from_flags(
            self.has_evaluation() || other.has_evaluation(),
            self.has_continuation() || other.has_continuation(),
            self.is_complete() || other.is_complete(),
            self.is_empty() && other.is_empty(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_predicates() {
        assert!(State::Empty.is_empty());
        assert!(!State::None.is_empty());
        assert!(State::CompleteEmpty.is_empty());
        assert!(State::CompleteEmpty.is_complete());
        assert!(State::ContinueEvaluated.has_evaluation());
        assert!(State::ContinueEvaluated.has_continuation());
        assert!(!State::Evaluated.has_continuation());
        assert!(State::CompleteEvaluated.is_complete());
        assert!(!State::CompleteEvaluated.has_continuation());
    }

    #[test]
    fn combine_ors_facets() {
        assert_eq!(
            State::Evaluated.combine(State::Continue),
            State::ContinueEvaluated
        );
        assert_eq!(
            State::None.combine(State::Complete),
            State::Complete
        );
        assert_eq!(
            State::Evaluated.combine(State::Complete),
            State::CompleteEvaluated
        );
    }

    #[test]
    fn combine_keeps_empty_only_when_both_empty() {
        assert_eq!(State::Empty.combine(State::Empty), State::Empty);
        assert_eq!(State::Empty.combine(State::None), State::None);
        assert_eq!(
            State::Empty.combine(State::CompleteEmpty),
            State::CompleteEmpty
        );
        assert_eq!(State::Empty.combine(State::Evaluated), State::Evaluated);
    }

    #[test]
    fn completion_absorbs_continuation() {
        assert_eq!(State::Continue.combine(State::Complete), State::Complete);
        assert_eq!(
            State::ContinueEvaluated.combine(State::CompleteEmpty),
            State::CompleteEvaluated
        );
    }

    #[test]
    fn from_flags_is_canonical() {
        assert_eq!(State::from_flags(false, false, false, false), State::None);
        assert_eq!(State::from_flags(false, false, false, true), State::Empty);
        assert_eq!(State::from_flags(true, false, false, true), State::Evaluated);
        assert_eq!(State::from_flags(false, true, true, false), State::Complete);
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn arb_state() -> impl Strategy<Value = State> {
        prop_oneof![
            Just(State::Empty),
            Just(State::None),
            Just(State::Evaluated),
            Just(State::Continue),
            Just(State::ContinueEvaluated),
            Just(State::Complete),
            Just(State::CompleteEmpty),
            Just(State::CompleteEvaluated),
        ]
    }

    proptest! {
        #[test]
        fn combine_commutative(a in arb_state(), b in arb_state()) {
            prop_assert_eq!(a.combine(b), b.combine(a));
        }

        #[test]
        fn combine_associative(a in arb_state(), b in arb_state(), c in arb_state()) {
            prop_assert_eq!(a.combine(b).combine(c), a.combine(b.combine(c)));
        }

        #[test]
        fn combine_idempotent(a in arb_state()) {
            prop_assert_eq!(a.combine(a), a);
        }

        #[test]
        fn empty_identity(a in arb_state()) {
            // Empty contributes no facets, so it is the lattice bottom.
            prop_assert_eq!(a.combine(State::Empty).is_complete(), a.is_complete());
            prop_assert_eq!(a.combine(State::Empty).has_evaluation(), a.has_evaluation());
            prop_assert_eq!(a.combine(State::Empty).has_continuation(), a.has_continuation());
        }

        #[test]
        fn complete_is_absorbing(a in arb_state()) {
            prop_assert!(a.combine(State::Complete).is_complete());
            prop_assert!(!a.combine(State::Complete).has_continuation());
        }

        #[test]
        fn empty_excludes_evaluation(a in arb_state(), b in arb_state()) {
            let joined = a.combine(b);
            prop_assert!(!(joined.is_empty() && joined.has_evaluation()));
        }
    }
}
