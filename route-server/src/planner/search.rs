//! Cheapest-route search.
//!
//! A Dijkstra search over `(node, active line)` states. Carrying the line in
//! the state is what lets staying on a line be cheaper than changing, while
//! still allowing the same node to be settled once per line it is reached on.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use ordered_float::OrderedFloat;
use tracing::debug;

use crate::domain::{Mode, NodeId};
use crate::network::{LookupError, NetworkView};

use super::config::CostConfig;
use super::itinerary::{RouteOutcome, Step, assemble};
use super::neighbors::NeighborGenerator;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A node referenced by the request or the network does not exist
    #[error(transparent)]
    Network(#[from] LookupError),

    /// Cost configuration would produce invalid leg costs
    #[error("invalid cost configuration: {0}")]
    InvalidConfig(String),

    /// Search explored more states than allowed
    #[error("search gave up after {expansions} expansions")]
    BudgetExhausted { expansions: usize },

    /// Predecessor table does not lead back to the origin
    #[error("route reconstruction failed at node {0}")]
    BrokenChain(NodeId),
}

/// A position in the search: a node, plus the line being ridden if the node
/// was reached by a line ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchState {
    pub node: NodeId,
    pub line: Option<NodeId>,
}

impl SearchState {
    /// At `node`, not on any line.
    pub fn at(node: NodeId) -> Self {
        Self { node, line: None }
    }

    /// At `node`, having arrived on `line`.
    pub fn riding(node: NodeId, line: NodeId) -> Self {
        Self {
            node,
            line: Some(line),
        }
    }
}

/// Frontier entry ordered so that `BinaryHeap` pops the cheapest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    cost: OrderedFloat<f64>,
    state: SearchState,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The settled end of a successful search.
struct SearchTree {
    terminal: SearchState,
    cost: f64,
    came_from: HashMap<SearchState, Step>,
}

/// Route planner over a network view.
pub struct Planner<'a, N: NetworkView + ?Sized> {
    network: &'a N,
    config: &'a CostConfig,
}

impl<'a, N: NetworkView + ?Sized> Planner<'a, N> {
    /// Create a new planner.
    pub fn new(network: &'a N, config: &'a CostConfig) -> Self {
        Self { network, config }
    }

    /// Find the cheapest route from `origin` to `destination`.
    ///
    /// Returns [`RouteOutcome::AlreadyThere`] without searching when the two
    /// are the same node, and [`RouteOutcome::NoRoute`] when the destination
    /// cannot be reached with the enabled modes.
    pub fn route(&self, origin: NodeId, destination: NodeId) -> Result<RouteOutcome, SearchError> {
        if origin == destination {
            return Ok(RouteOutcome::AlreadyThere);
        }

        self.config.validate()?;
        self.network.node(origin)?;
        self.network.node(destination)?;

        let start = SearchState::at(origin);
        let Some(tree) = self.search(start, destination)? else {
            return Ok(RouteOutcome::NoRoute);
        };

        let itinerary = assemble(self.network, start, tree.terminal, tree.cost, &tree.came_from)?;
        Ok(RouteOutcome::Found(itinerary))
    }

    fn search(
        &self,
        start: SearchState,
        destination: NodeId,
    ) -> Result<Option<SearchTree>, SearchError> {
        let generator = NeighborGenerator::new(self.network, self.config);

        let mut best: HashMap<SearchState, f64> = HashMap::new();
        let mut came_from: HashMap<SearchState, Step> = HashMap::new();
        let mut settled: HashSet<SearchState> = HashSet::new();
        let mut frontier = BinaryHeap::new();

        best.insert(start, 0.0);
        frontier.push(QueueEntry {
            cost: OrderedFloat(0.0),
            state: start,
        });

        if self.config.allows(Mode::SpawnWarp) {
            for warp in self.network.spawn_warps() {
                let state = SearchState::at(warp.i);
                let cost = self.config.change_cost;
                if best.get(&state).is_some_and(|&known| known <= cost) {
                    continue;
                }
                best.insert(state, cost);
                came_from.insert(
                    state,
                    Step {
                        from: start,
                        label: Some(format!("Take spawn warp to {}", warp.name)),
                    },
                );
                frontier.push(QueueEntry {
                    cost: OrderedFloat(cost),
                    state,
                });
            }
        }

        let mut expansions = 0;

        while let Some(QueueEntry { cost, state }) = frontier.pop() {
            if !settled.insert(state) {
                continue;
            }

            if state.node == destination {
                debug!(
                    origin = %start.node,
                    destination = %destination,
                    expansions,
                    cost = cost.0,
                    "route found"
                );
                return Ok(Some(SearchTree {
                    terminal: state,
                    cost: cost.0,
                    came_from,
                }));
            }

            if let Some(max) = self.config.max_expansions {
                if expansions >= max {
                    debug!(origin = %start.node, destination = %destination, max, "search budget exhausted");
                    return Err(SearchError::BudgetExhausted { expansions });
                }
            }
            expansions += 1;

            for leg in generator.expand(state)? {
                if settled.contains(&leg.to) {
                    continue;
                }
                let next_cost = cost.0 + leg.cost;
                if best.get(&leg.to).is_some_and(|&known| known <= next_cost) {
                    continue;
                }
                best.insert(leg.to, next_cost);
                came_from.insert(
                    leg.to,
                    Step {
                        from: state,
                        label: leg.label,
                    },
                );
                frontier.push(QueueEntry {
                    cost: OrderedFloat(next_cost),
                    state: leg.to,
                });
            }
        }

        debug!(origin = %start.node, destination = %destination, expansions, "no route");
        Ok(None)
    }
}

/// Find the cheapest route between two nodes of `network`.
///
/// Shorthand for [`Planner::new`] followed by [`Planner::route`].
pub fn find_route<N: NetworkView + ?Sized>(
    network: &N,
    origin: NodeId,
    destination: NodeId,
    config: &CostConfig,
) -> Result<RouteOutcome, SearchError> {
    Planner::new(network, config).route(origin, destination)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
