//! Conditional Termination
//!
//! [`Until`] commits a series until a condition reactor evaluates to
//! `true`, at which point the series is torn down and the reactor
//! completes. Completion of the condition is a terminate event, not a
//! pass-through completion: only the series' own completion flows
//! through, and any continuation the condition carried on its final
//! commit is dropped with the series.

use tracing::debug;

use crate::reactor::{Maybe, Reactor, State};

/// A reactor that emits a series until a condition is reached.
pub struct Until<C, S>
where
    S: Reactor,
{
    condition: C,
    series: Option<S>,
    value: Option<Maybe<S::Output>>,
    condition_state: State,
    state: State,
    previous_sequence: Option<u64>,
}

impl<C, S> Until<C, S>
where
    C: Reactor<Output = bool>,
    S: Reactor,
{
    /// Emits `series` until `condition` evaluates to `true`.
    pub fn new(condition: C, series: S) -> Self {
        Self {
            condition,
            series: Some(series),
            value: None,
            condition_state: State::Empty,
            state: State::Empty,
            previous_sequence: None,
        }
    }
}

impl<C, S> Reactor for Until<C, S>
where
    C: Reactor<Output = bool>,
    S: Reactor,
{
    type Output = S::Output;

    fn commit(&mut self, sequence: u64) -> State {
        if self.previous_sequence == Some(sequence) || self.state.is_complete() {
            return self.state;
        }
        if !self.condition_state.is_complete() {
            let condition_state = self.condition.commit(sequence);
            if condition_state.has_evaluation()
                || (self.condition_state.is_empty() && !condition_state.is_empty())
            {
                match self.condition.eval().into_result() {
                    Ok(true) => {
                        self.series = None;
                        self.state = if self.state.is_empty() {
                            State::CompleteEmpty
                        } else {
                            State::Complete
                        };
                        debug!(sequence, "condition reached, series torn down");
                    }
                    Ok(false) => {}
                    Err(error) => {
                        self.value = Some(Maybe::failed(error));
                    }
                }
            }
            self.condition_state = condition_state;
        }
        if let Some(series) = &mut self.series {
            let series_state = series.commit(sequence);
            if series_state.has_evaluation()
                || (self.state.is_empty() && !series_state.is_empty())
            {
                self.value = Some(series.eval());
                self.state = State::Evaluated;
            } else if self.state.is_empty() {
                self.state = State::Empty;
            } else {
                self.state = State::None;
            }
            if series_state.is_complete() {
                self.state = self.state.combine(State::Complete);
            } else if self.condition_state.has_continuation() || series_state.has_continuation() {
                self.state = self.state.combine(State::Continue);
            }
        }
        self.previous_sequence = Some(sequence);
        self.state
    }

    fn eval(&self) -> Maybe<Self::Output> {
        self.value.clone().unwrap_or_else(Maybe::unevaluated)
    }
}

/// Emits `series` until `condition` evaluates to `true`.
pub fn until<C, S>(condition: C, series: S) -> Until<C, S>
where
    C: Reactor<Output = bool>,
    S: Reactor,
{
    Until::new(condition, series)
}
