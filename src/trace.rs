//! Diagnostic side channel of a search. Observers see every expansion and every improved
//! jump point; they cannot influence the result.
use core::fmt::Debug;
use log::{debug, trace};

use crate::coordinate::Coordinate;

#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent<N = Coordinate, C = f64> {
    /// A node was popped from the frontier and is being expanded.
    Expanded { node: N, cost: C, estimated_cost: C },
    /// A jump point was discovered or reached more cheaply than before.
    Discovered {
        node: N,
        parent: N,
        cost: C,
        estimated_cost: C,
        reopened: bool,
    },
    Found { node: N, cost: C, expansions: usize },
    Exhausted { expansions: usize },
}

pub trait SearchObserver<N = Coordinate, C = f64> {
    fn observe(&mut self, event: &SearchEvent<N, C>);
}

/// Ignores every event.
impl<N, C> SearchObserver<N, C> for () {
    fn observe(&mut self, _event: &SearchEvent<N, C>) {}
}

impl<N, C, O: SearchObserver<N, C>> SearchObserver<N, C> for &mut O {
    fn observe(&mut self, event: &SearchEvent<N, C>) {
        (**self).observe(event);
    }
}

/// Forwards events to the [log] facade: per-node events at trace level, outcomes at debug.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl<N: Debug, C: Debug> SearchObserver<N, C> for LogObserver {
    fn observe(&mut self, event: &SearchEvent<N, C>) {
        match event {
            SearchEvent::Expanded {
                node,
                cost,
                estimated_cost,
            } => trace!("Expanding {node:?}, g={cost:?}, f={estimated_cost:?}"),
            SearchEvent::Discovered {
                node,
                parent,
                cost,
                estimated_cost,
                reopened,
            } => trace!(
                "Jumped from {parent:?} to {node:?}, g={cost:?}, f={estimated_cost:?}{}",
                if *reopened { " (reopened)" } else { "" }
            ),
            SearchEvent::Found {
                node,
                cost,
                expansions,
            } => debug!("Reached {node:?} at cost {cost:?} after {expansions} expansions"),
            SearchEvent::Exhausted { expansions } => {
                debug!("No path found after {expansions} expansions")
            }
        }
    }
}

/// Keeps every event in order of emission.
#[derive(Clone, Debug)]
pub struct RecordingObserver<N = Coordinate, C = f64> {
    pub events: Vec<SearchEvent<N, C>>,
}

impl<N, C> Default for RecordingObserver<N, C> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<N, C> RecordingObserver<N, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in the order they were expanded.
    pub fn expanded(&self) -> impl Iterator<Item = &N> + '_ {
        self.events.iter().filter_map(|event| match event {
            SearchEvent::Expanded { node, .. } => Some(node),
            _ => None,
        })
    }
}

impl<N: Clone, C: Clone> SearchObserver<N, C> for RecordingObserver<N, C> {
    fn observe(&mut self, event: &SearchEvent<N, C>) {
        self.events.push(event.clone());
    }
}
