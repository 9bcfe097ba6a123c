//! Reactor Combinators
//!
//! Every concrete reactor in the crate lives here, built on the protocol
//! defined in [`crate::reactor`].
//!
//! # Leaves
//!
//! [`Constant`], [`NoneReactor`], [`Throw`] and [`Perpetual`] are the
//! trivial sources; [`Queue`] is the external-input source fed from
//! outside the commit call chain; [`StateReactor`] mirrors another
//! reactor's lifecycle into the value domain.
//!
//! # Wrappers
//!
//! [`Shared`] aliases one reactor across several graph positions with a
//! per-sequence commit memo. [`Boxed`] and [`SharedBox`] erase the
//! concrete reactor type for dynamically composed graphs.
//!
//! # Combinators
//!
//! [`Lift`] applies a function to its children's values and is the basis
//! for most derived reactors; [`range`] is built entirely from it.
//! [`Chain`], [`Concur`], [`Until`], [`First`] and [`Unconsecutive`]
//! sequence, merge, cut off, truncate and deduplicate series.

mod boxed;
mod chain;
mod concur;
mod constant;
mod first;
mod lift;
mod none;
mod perpetual;
mod queue;
mod range;
mod shared;
mod state_reactor;
mod throw;
mod unconsecutive;
mod until;

pub use boxed::{Boxed, SharedBox};
pub use chain::{chain, Chain};
pub use concur::{concur, Concur};
pub use constant::{constant, Constant};
pub use first::{first, First};
pub use lift::{
    boxed_lift, lift, lift_state, try_lift, BoxedLift, Dynamic, Fallible, FunctionEvaluation,
    Lift, LiftFunction, Mapped, Stateful,
};
pub use none::{none, NoneReactor};
pub use perpetual::{perpetual, Perpetual};
pub use queue::Queue;
pub use range::range;
pub use shared::Shared;
pub use state_reactor::StateReactor;
pub use throw::{throw, Throw};
pub use unconsecutive::{unconsecutive, Unconsecutive};
pub use until::{until, Until};
