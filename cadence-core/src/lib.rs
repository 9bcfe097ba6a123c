//! Cadence Core
//!
//! This crate provides the core engine for the Cadence reactive dataflow
//! framework. It implements:
//!
//! - The reactor evaluation protocol (commit sequences, the state lattice,
//!   deferred errors)
//! - The foundational leaves (constants, queues, pulses)
//! - The combinator library (lift, chain, concur, until, range, first,
//!   unconsecutive)
//! - Type-erased and shared reactor handles for dynamic composition
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `reactor`: the evaluation protocol — `State`, `Maybe`, the `Reactor`
//!   trait, and commit aggregation
//! - `combinator`: every concrete reactor built on that protocol
//!
//! # Evaluation model
//!
//! A reactor denotes a lazy sequence of values produced one per commit. A
//! driver repeatedly calls `commit` with monotonically increasing sequence
//! numbers; each reactor commits its children at the same sequence,
//! aggregates their states, and optionally recomputes its own value. The
//! returned [`reactor::State`] tells the driver whether a fresh value is
//! available, whether an immediate re-commit is requested, and whether the
//! reactor is done. Values are read with `eval`, which is also where
//! captured errors surface.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::combinator::{constant, lift};
//! use cadence_core::reactor::{Reactor, State};
//!
//! let mut sum = lift(|a: i32, b: i32| a + b, (constant(3), constant(4)));
//! assert_eq!(sum.commit(0), State::CompleteEvaluated);
//! assert_eq!(sum.eval().into_result().unwrap(), 7);
//! ```

pub mod combinator;
pub mod reactor;
