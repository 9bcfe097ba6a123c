//! Function Lifting
//!
//! [`Lift`] is the universal combinator: it applies a function to the
//! current values of its child reactors, lifted over the deferred-error
//! discipline and the state lattice.
//!
//! # How Lift commits
//!
//! 1. A memoized state is returned for a repeated sequence or after
//!    completion.
//! 2. The children are driven through a [`CommitHandler`]; its composite
//!    state decides whether the function fires. The function fires when a
//!    child evaluated, when the previous invocation requested a
//!    continuation, or when the children just completed non-empty (one
//!    final invocation over their last values).
//! 3. The invocation's [`FunctionEvaluation`] decides the outcome: a
//!    value marks this commit evaluated, a bare state is merged with the
//!    composite, and completion from either side is folded per the
//!    lattice rules.
//!
//! # Function shapes
//!
//! Three constructors replace the original's overload resolution:
//!
//! - [`lift`]: the function consumes plain values and always produces
//!   one; an upstream error short-circuits into this reactor's slot
//!   without invoking the function.
//! - [`try_lift`]: the function returns `Result`; an `Err` is captured
//!   as the deferred value.
//! - [`lift_state`]: the function consumes [`Maybe`] values (observing
//!   upstream errors) and returns a [`FunctionEvaluation`], controlling
//!   both value presence and state hints.
//!
//! A fourth, [`boxed_lift`], takes a dynamic vector of type-erased
//! children and presents the identical commit/eval contract.

use std::marker::PhantomData;

use crate::reactor::{CommitHandler, Maybe, Reactor, ReactorError, ReactorSet, State};

use super::boxed::SharedBox;

/// The result of one lifted-function invocation.
///
/// Carries an optional value slot and a state hint. The constructors
/// replicate the merge table of the evaluation protocol: supplying a
/// value together with a completing or continuing hint yields
/// `CompleteEvaluated` or `ContinueEvaluated`, a value alone yields
/// `Evaluated`, and a hint without a value must not claim an evaluation.
#[derive(Debug, Clone)]
pub struct FunctionEvaluation<T> {
    value: Option<Maybe<T>>,
    state: State,
}

impl<T> FunctionEvaluation<T> {
    /// No value this invocation.
    pub fn none() -> Self {
        Self {
            value: None,
            state: State::None,
        }
    }

    /// A fresh value.
    pub fn value(value: T) -> Self {
        Self::evaluated(Maybe::of(value))
    }

    /// A fresh slot, value or deferred error.
    pub fn evaluated(value: Maybe<T>) -> Self {
        Self {
            value: Some(value),
            state: State::Evaluated,
        }
    }

    /// A deferred error as this invocation's result.
    pub fn error(error: ReactorError) -> Self {
        Self::evaluated(Maybe::failed(error))
    }

    /// A state hint without a value. The hint must not carry the
    /// evaluation facet.
    pub fn state(state: State) -> Self {
        debug_assert!(!state.has_evaluation());
        Self { value: None, state }
    }

    /// A fresh value merged with a state hint.
    pub fn with_state(value: T, state: State) -> Self {
        let merged = if state.is_complete() {
            State::CompleteEvaluated
        } else if state.has_continuation() {
            State::ContinueEvaluated
        } else {
            State::Evaluated
        };
        Self {
            value: Some(Maybe::of(value)),
            state: merged,
        }
    }
}

/// A lifted function applicable to a reactor set's current values.
pub trait LiftFunction<A: ReactorSet> {
    /// The element type this function produces.
    type Output: Clone;

    /// Reads the children's slots and invokes the function.
    fn apply(&mut self, args: &A) -> FunctionEvaluation<Self::Output>;
}

/// Adapter for functions over plain values; upstream errors
/// short-circuit.
pub struct Mapped<F, Out> {
    function: F,
    _output: PhantomData<fn() -> Out>,
}

/// Adapter for `Result`-returning functions; errors are captured as
/// deferred values.
pub struct Fallible<F, Out, E> {
    function: F,
    _output: PhantomData<fn() -> (Out, E)>,
}

/// Adapter for functions over [`Maybe`] values returning a
/// [`FunctionEvaluation`].
pub struct Stateful<F, Out> {
    function: F,
    _output: PhantomData<fn() -> Out>,
}

/// Adapter for functions over a dynamic slice of [`Maybe`] values.
pub struct Dynamic<F, Out> {
    function: F,
    _output: PhantomData<fn() -> Out>,
}

impl<F, B, Out> LiftFunction<Vec<B>> for Dynamic<F, Out>
where
    B: Reactor,
    Out: Clone,
    F: FnMut(&[Maybe<B::Output>]) -> FunctionEvaluation<Out>,
{
    type Output = Out;

    fn apply(&mut self, args: &Vec<B>) -> FunctionEvaluation<Out> {
        let values: Vec<Maybe<B::Output>> = args.iter().map(|child| child.eval()).collect();
        (self.function)(&values)
    }
}

macro_rules! impl_lift_function {
    ($(($reactor:ident, $value:ident, $index:tt)),*) => {
        impl<Out, Fun, $($reactor),*> LiftFunction<($($reactor,)*)> for Mapped<Fun, Out>
        where
            Out: Clone,
            Fun: FnMut($($reactor::Output),*) -> Out,
            $($reactor: Reactor,)*
        {
            type Output = Out;

            #[allow(unused_variables)]
            fn apply(&mut self, args: &($($reactor,)*)) -> FunctionEvaluation<Out> {
                $(
                    let $value = match args.$index.eval().into_result() {
                        Ok(value) => value,
                        Err(error) => return FunctionEvaluation::error(error),
                    };
                )*
                FunctionEvaluation::value((self.function)($($value),*))
            }
        }

        impl<Out, Failure, Fun, $($reactor),*> LiftFunction<($($reactor,)*)> for Fallible<Fun, Out, Failure>
        where
            Out: Clone,
            Failure: std::error::Error + Send + Sync + 'static,
            Fun: FnMut($($reactor::Output),*) -> Result<Out, Failure>,
            $($reactor: Reactor,)*
        {
            type Output = Out;

            #[allow(unused_variables)]
            fn apply(&mut self, args: &($($reactor,)*)) -> FunctionEvaluation<Out> {
                $(
                    let $value = match args.$index.eval().into_result() {
                        Ok(value) => value,
                        Err(error) => return FunctionEvaluation::error(error),
                    };
                )*
                match (self.function)($($value),*) {
                    Ok(value) => FunctionEvaluation::value(value),
                    Err(error) => FunctionEvaluation::error(ReactorError::new(error)),
                }
            }
        }

        impl<Out, Fun, $($reactor),*> LiftFunction<($($reactor,)*)> for Stateful<Fun, Out>
        where
            Out: Clone,
            Fun: FnMut($(Maybe<$reactor::Output>),*) -> FunctionEvaluation<Out>,
            $($reactor: Reactor,)*
        {
            type Output = Out;

            #[allow(unused_variables)]
            fn apply(&mut self, args: &($($reactor,)*)) -> FunctionEvaluation<Out> {
                (self.function)($(args.$index.eval()),*)
            }
        }
    };
}

impl_lift_function!();
impl_lift_function!((A, a, 0));
impl_lift_function!((A, a, 0), (B, b, 1));
impl_lift_function!((A, a, 0), (B, b, 1), (C, c, 2));
impl_lift_function!((A, a, 0), (B, b, 1), (C, c, 2), (D, d, 3));
impl_lift_function!((A, a, 0), (B, b, 1), (C, c, 2), (D, d, 3), (E, e, 4));
impl_lift_function!(
    (A, a, 0),
    (B, b, 1),
    (C, c, 2),
    (D, d, 3),
    (E, e, 4),
    (F, f, 5)
);
impl_lift_function!(
    (A, a, 0),
    (B, b, 1),
    (C, c, 2),
    (D, d, 3),
    (E, e, 4),
    (F, f, 5),
    (G, g, 6)
);
impl_lift_function!(
    (A, a, 0),
    (B, b, 1),
    (C, c, 2),
    (D, d, 3),
    (E, e, 4),
    (F, f, 5),
    (G, g, 6),
    (H, h, 7)
);

/// A reactor that applies a function to the evaluations of its children.
pub struct Lift<F, A>
where
    A: ReactorSet,
    F: LiftFunction<A>,
{
    function: F,
    handler: CommitHandler<A>,
    value: Option<Maybe<F::Output>>,
    state: State,
    previous_sequence: Option<u64>,
    has_continuation: bool,
    had_evaluation: bool,
}

impl<F, A> Lift<F, A>
where
    A: ReactorSet,
    F: LiftFunction<A>,
{
    /// Wraps a function adapter and its children.
    pub fn new(function: F, args: A) -> Self {
        Self {
            function,
            handler: CommitHandler::new(args),
            value: None,
            state: State::None,
            previous_sequence: None,
            has_continuation: false,
            had_evaluation: false,
        }
    }

    fn invoke(&mut self) -> State {
        let evaluation = self.function.apply(self.handler.children());
        if let Some(value) = evaluation.value {
            self.value = Some(value);
        }
        evaluation.state
    }
}

impl<F, A> Reactor for Lift<F, A>
where
    A: ReactorSet,
    F: LiftFunction<A>,
{
    type Output = F::Output;

    fn commit(&mut self, sequence: u64) -> State {
        if self.previous_sequence == Some(sequence) || self.state.is_complete() {
            return self.state;
        }
        if self.handler.is_empty() {
            // No children: invoke once and settle.
            let invocation = self.invoke();
            self.state = if invocation.has_evaluation() {
                State::CompleteEvaluated
            } else {
                State::CompleteEmpty
            };
            self.previous_sequence = Some(sequence);
            self.had_evaluation |= self.state.has_evaluation();
            return self.state;
        }
        let state = self.handler.commit(sequence);
        if state.has_evaluation()
            || self.has_continuation
            || (state.is_complete() && !state.is_empty())
        {
            self.has_continuation = false;
            let invocation = self.invoke();
            if invocation == State::None {
                self.state = if state.is_complete() {
                    if self.had_evaluation {
                        State::Complete
                    } else {
                        State::CompleteEmpty
                    }
                } else if state.has_continuation() {
                    State::Continue
                } else {
                    State::None
                };
            } else if invocation.is_complete() {
                self.state = if invocation.has_evaluation() {
                    State::CompleteEvaluated
                } else if self.had_evaluation {
                    State::Complete
                } else {
                    State::CompleteEmpty
                };
            } else {
                self.state = invocation;
                self.has_continuation = invocation.has_continuation();
                if state.has_continuation() {
                    self.state = self.state.combine(State::Continue);
                } else if state.is_complete() && !self.has_continuation {
                    self.state = self.state.combine(State::Complete);
                }
            }
        } else {
            self.state = state;
        }
        self.previous_sequence = Some(sequence);
        self.had_evaluation |= self.state.has_evaluation();
        self.state
    }

    fn eval(&self) -> Maybe<Self::Output> {
        self.value.clone().unwrap_or_else(Maybe::unevaluated)
    }
}

/// Lifts a function over plain values to operate on reactors.
///
/// The function is invoked with the children's current values; an
/// upstream deferred error becomes this reactor's value without the
/// function running.
pub fn lift<Out, F, A>(function: F, args: A) -> Lift<Mapped<F, Out>, A>
where
    Out: Clone,
    A: ReactorSet,
    Mapped<F, Out>: LiftFunction<A, Output = Out>,
{
    Lift::new(
        Mapped {
            function,
            _output: PhantomData,
        },
        args,
    )
}

/// Lifts a fallible function; an `Err` is captured as the deferred value
/// and surfaces when this reactor is read.
pub fn try_lift<Out, Failure, F, A>(function: F, args: A) -> Lift<Fallible<F, Out, Failure>, A>
where
    Out: Clone,
    A: ReactorSet,
    Fallible<F, Out, Failure>: LiftFunction<A, Output = Out>,
{
    Lift::new(
        Fallible {
            function,
            _output: PhantomData,
        },
        args,
    )
}

/// Lifts a function that observes [`Maybe`] arguments and controls its
/// own evaluation outcome through a [`FunctionEvaluation`].
pub fn lift_state<Out, F, A>(function: F, args: A) -> Lift<Stateful<F, Out>, A>
where
    Out: Clone,
    A: ReactorSet,
    Stateful<F, Out>: LiftFunction<A, Output = Out>,
{
    Lift::new(
        Stateful {
            function,
            _output: PhantomData,
        },
        args,
    )
}

/// A lift over a dynamic vector of type-erased children.
pub type BoxedLift<F, T, Out> = Lift<Dynamic<F, Out>, Vec<SharedBox<T>>>;

/// Lifts a function over the values of a dynamic vector of type-erased
/// children.
pub fn boxed_lift<Out, F, T>(function: F, children: Vec<SharedBox<T>>) -> BoxedLift<F, T, Out>
where
    T: Clone + 'static,
    Out: Clone,
    F: FnMut(&[Maybe<T>]) -> FunctionEvaluation<Out>,
{
    Lift::new(
        Dynamic {
            function,
            _output: PhantomData,
        },
        children,
    )
}
