//! Concurrent Merge
//!
//! [`Concur`] commits a producer whose values are themselves reactors and
//! merges every produced series: each series joins the graph at the
//! sequence it was produced, every live series is committed once per
//! sequence, and any series' evaluation becomes this reactor's value.
//! When several series evaluate in one commit, the latest-produced wins;
//! one value slot per commit is the protocol's contract.
//!
//! The merge completes only when the producer has completed and every
//! produced series has completed.

use tracing::debug;

use crate::reactor::{Maybe, Reactor, State};

struct Series<R> {
    reactor: R,
    state: State,
}

/// A reactor that merges the series produced by another reactor.
pub struct Concur<P>
where
    P: Reactor,
    P::Output: Reactor,
{
    producer: P,
    producer_state: State,
    series: Vec<Series<P::Output>>,
    value: Option<Maybe<<P::Output as Reactor>::Output>>,
    state: State,
    previous_sequence: Option<u64>,
}

impl<P> Concur<P>
where
    P: Reactor,
    P::Output: Reactor,
{
    /// Merges every series produced by `producer`.
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            producer_state: State::Empty,
            series: Vec::new(),
            value: None,
            state: State::Empty,
            previous_sequence: None,
        }
    }
}

impl<P> Reactor for Concur<P>
where
    P: Reactor,
    P::Output: Reactor,
{
    type Output = <P::Output as Reactor>::Output;

    fn commit(&mut self, sequence: u64) -> State {
        if self.previous_sequence == Some(sequence) || self.state.is_complete() {
            return self.state;
        }
        let mut evaluated = false;
        let mut continuing = false;
        if !self.producer_state.is_complete() {
            let producer_state = self.producer.commit(sequence);
            if producer_state.has_evaluation() {
                match self.producer.eval().into_result() {
                    Ok(reactor) => {
                        self.series.push(Series {
                            reactor,
                            state: State::Empty,
                        });
                        debug!(sequence, live = self.series.len(), "series admitted");
                    }
                    Err(error) => {
                        self.value = Some(Maybe::failed(error));
                        evaluated = true;
                    }
                }
            }
            continuing |= producer_state.has_continuation();
            self.producer_state = producer_state;
        }
        for series in &mut self.series {
            if series.state.is_complete() {
                continue;
            }
            series.state = series.reactor.commit(sequence);
            if series.state.has_evaluation() {
                self.value = Some(series.reactor.eval());
                evaluated = true;
            }
            continuing |= series.state.has_continuation();
        }
        let complete = self.producer_state.is_complete()
            && self.series.iter().all(|series| series.state.is_complete());
        let empty = self.state.is_empty() && !evaluated;
        self.state = State::from_flags(evaluated, continuing, complete, empty);
        self.previous_sequence = Some(sequence);
        self.state
    }

    fn eval(&self) -> Maybe<Self::Output> {
        self.value.clone().unwrap_or_else(Maybe::unevaluated)
    }
}

/// Merges every series produced by `producer`.
pub fn concur<P>(producer: P) -> Concur<P>
where
    P: Reactor,
    P::Output: Reactor,
{
    Concur::new(producer)
}
