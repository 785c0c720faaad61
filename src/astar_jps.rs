//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! which enables the JPS implementation to generate successors based on the parent if there is one
//! as it should.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{info, warn};
use num_traits::Zero;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

use crate::error::SearchError;
use crate::trace::{SearchEvent, SearchObserver};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

struct SmallestCostHolder<N, K> {
    estimated_cost: K,
    cost: K,
    node: N,
    index: usize,
}

impl<N: Ord, K: PartialOrd> Eq for SmallestCostHolder<N, K> {}

impl<N: Ord, K: PartialOrd> PartialEq for SmallestCostHolder<N, K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord, K: PartialOrd> PartialOrd for SmallestCostHolder<N, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord, K: PartialOrd> Ord for SmallestCostHolder<N, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // The heap pops the greatest entry: smallest estimated cost first, then the
        // smallest node.
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.node.cmp(&self.node),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = std::iter::successors(Some(start), |&i| {
        parents.get_index(i).map(|(_, value)| parent(value))
    })
    .map_while(|i| parents.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Search-local state of one best-first search: the frontier, the node table holding the
/// best known cost and predecessor of every discovered node, and the closed set. Created per
/// search, so concurrent searches never share mutable state.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<N, C>>,
    parents: FxIndexMap<N, (usize, C)>,
    closed: FxHashSet<usize>,
    expansions: usize,
}

impl<N, C> Default for SearchContext<N, C>
where
    N: Eq + Hash + Clone + Ord,
    C: Zero + PartialOrd + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone + Ord,
    C: Zero + PartialOrd + Copy,
{
    pub fn new() -> SearchContext<N, C> {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
            closed: FxHashSet::default(),
            expansions: 0,
        }
    }

    /// Number of nodes popped and expanded so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Nodes expanded at least once.
    pub fn closed_nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.closed
            .iter()
            .filter_map(|&ix| self.parents.get_index(ix).map(|(node, _)| node))
    }

    /// Best known cost of a discovered node.
    pub fn cost_of(&self, node: &N) -> Option<C> {
        self.parents.get(node).map(|&(_, cost)| cost)
    }

    /// A* driven by parent-aware successors. Stale frontier entries (whose cost exceeds the
    /// node's current best) are skipped on pop, and closed nodes are reopened whenever a
    /// strictly cheaper route to them turns up. With `budget` set, the search fails once
    /// that many nodes have been expanded without reaching the goal.
    pub fn astar_jps<FN, IN, FH, FS, O>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut heuristic: FH,
        mut success: FS,
        budget: Option<usize>,
        observer: &mut O,
    ) -> Result<Option<(Vec<N>, C)>, SearchError>
    where
        C: Add<Output = C>,
        FN: FnMut(Option<&N>, &N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FH: FnMut(&N) -> C,
        FS: FnMut(&N) -> bool,
        O: SearchObserver<N, C>,
    {
        self.to_see.clear();
        self.parents.clear();
        self.closed.clear();
        self.expansions = 0;

        self.to_see.push(SmallestCostHolder {
            estimated_cost: heuristic(start),
            cost: Zero::zero(),
            node: start.clone(),
            index: 0,
        });
        self.parents
            .insert(start.clone(), (usize::MAX, Zero::zero()));
        while let Some(SmallestCostHolder {
            estimated_cost,
            cost,
            index,
            ..
        }) = self.to_see.pop()
        {
            let (current, successors) = {
                let Some((node, &(parent_index, c))) = self.parents.get_index(index) else {
                    continue;
                };
                // We may have inserted a node several time into the binary heap if we found
                // a better way to access it. Ensure that we are currently dealing with the
                // best path and discard the others.
                if cost > c {
                    continue;
                }
                if success(node) {
                    observer.observe(&SearchEvent::Found {
                        node: node.clone(),
                        cost,
                        expansions: self.expansions,
                    });
                    let path = reverse_path(&self.parents, |&(p, _)| p, index);
                    return Ok(Some((path, cost)));
                }
                if let Some(limit) = budget {
                    if self.expansions >= limit {
                        warn!("Search gave up after {} expansions", limit);
                        return Err(SearchError::BudgetExhausted { limit });
                    }
                }
                self.expansions += 1;
                self.closed.insert(index);
                observer.observe(&SearchEvent::Expanded {
                    node: node.clone(),
                    cost,
                    estimated_cost,
                });
                let optional_parent_node = self.parents.get_index(parent_index).map(|x| x.0);
                (node.clone(), successors(optional_parent_node, node))
            };
            for (successor, move_cost) in successors {
                let new_cost = cost + move_cost;
                let h; // heuristic(&successor)
                let n; // index for successor
                let node;
                match self.parents.entry(successor) {
                    Vacant(e) => {
                        h = heuristic(e.key());
                        n = e.index();
                        node = e.key().clone();
                        e.insert((index, new_cost));
                    }
                    Occupied(mut e) => {
                        // Also covers closed nodes: they are only reopened on a strict
                        // improvement.
                        if e.get().1 > new_cost {
                            h = heuristic(e.key());
                            n = e.index();
                            node = e.key().clone();
                            e.insert((index, new_cost));
                        } else {
                            continue;
                        }
                    }
                }

                observer.observe(&SearchEvent::Discovered {
                    node: node.clone(),
                    parent: current.clone(),
                    cost: new_cost,
                    estimated_cost: new_cost + h,
                    reopened: self.closed.contains(&n),
                });
                self.to_see.push(SmallestCostHolder {
                    estimated_cost: new_cost + h,
                    cost: new_cost,
                    node,
                    index: n,
                });
            }
        }
        info!("Frontier exhausted after {} expansions", self.expansions);
        observer.observe(&SearchEvent::Exhausted {
            expansions: self.expansions,
        });
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::RecordingObserver;

    /// Small weighted digraph on integer nodes.
    fn edges(node: u32) -> Vec<(u32, i64)> {
        match node {
            0 => vec![(1, 4), (2, 1)],
            1 => vec![(3, 1)],
            2 => vec![(1, 1), (3, 5)],
            _ => vec![],
        }
    }

    #[test]
    fn finds_cheapest_route() {
        let mut ct: SearchContext<u32, i64> = SearchContext::new();
        let result = ct
            .astar_jps(
                &0,
                |_, node| edges(*node),
                |_| 0,
                |node| *node == 3,
                None,
                &mut (),
            )
            .unwrap();
        assert_eq!(result, Some((vec![0, 2, 1, 3], 3)));
    }

    #[test]
    fn start_is_goal() {
        let mut ct: SearchContext<u32, i64> = SearchContext::new();
        let result = ct
            .astar_jps(&7, |_, _| Vec::new(), |_| 0, |n| *n == 7, None, &mut ())
            .unwrap();
        assert_eq!(result, Some((vec![7], 0)));
        assert_eq!(ct.expansions(), 0);
    }

    #[test]
    fn exhausted_frontier_yields_none() {
        let mut ct: SearchContext<u32, i64> = SearchContext::new();
        let mut observer = RecordingObserver::new();
        let result = ct
            .astar_jps(
                &0,
                |_, node| edges(*node),
                |_| 0,
                |node| *node == 9,
                None,
                &mut observer,
            )
            .unwrap();
        assert_eq!(result, None);
        let mut closed: Vec<u32> = ct.closed_nodes().copied().collect();
        closed.sort();
        assert_eq!(closed, vec![0, 1, 2, 3]);
        assert_eq!(
            observer.events.last(),
            Some(&SearchEvent::Exhausted { expansions: 4 })
        );
    }

    #[test]
    fn improved_nodes_are_repushed_and_stale_entries_skipped() {
        let mut ct: SearchContext<u32, i64> = SearchContext::new();
        let mut observer = RecordingObserver::new();
        ct.astar_jps(
            &0,
            |_, node| edges(*node),
            |_| 0,
            |node| *node == 3,
            None,
            &mut observer,
        )
        .unwrap();
        // Node 1 is first found at cost 4 and then at cost 2 through node 2, but only
        // expanded once.
        assert_eq!(observer.expanded().filter(|n| **n == 1).count(), 1);
        assert_eq!(ct.cost_of(&1), Some(2));
    }

    #[test]
    fn ties_pop_smaller_node_first() {
        let mut ct: SearchContext<u32, i64> = SearchContext::new();
        let mut observer = RecordingObserver::new();
        ct.astar_jps(
            &0,
            |_, node| if *node == 0 { vec![(5, 1), (3, 1), (4, 1)] } else { vec![] },
            |_| 0,
            |_| false,
            None,
            &mut observer,
        )
        .unwrap();
        let order: Vec<u32> = observer.expanded().copied().collect();
        assert_eq!(order, vec![0, 3, 4, 5]);
    }

    #[test]
    fn budget_is_enforced() {
        let mut ct: SearchContext<u32, i64> = SearchContext::new();
        let result = ct.astar_jps(
            &0,
            |_, node| vec![(node + 1, 1)],
            |_| 0,
            |_| false,
            Some(10),
            &mut (),
        );
        assert_eq!(result, Err(SearchError::BudgetExhausted { limit: 10 }));
        assert_eq!(ct.expansions(), 10);
    }

    #[test]
    fn successors_see_their_parent() {
        let mut ct: SearchContext<u32, i64> = SearchContext::new();
        let mut seen = Vec::new();
        ct.astar_jps(
            &0,
            |parent, node| {
                seen.push((parent.copied(), *node));
                if *node < 2 {
                    vec![(node + 1, 1)]
                } else {
                    vec![]
                }
            },
            |_| 0,
            |_| false,
            None,
            &mut (),
        )
        .unwrap();
        assert_eq!(seen, vec![(None, 0), (Some(0), 1), (Some(1), 2)]);
    }
}
