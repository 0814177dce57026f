//! Route planner.
//!
//! This module answers "what is the cheapest way from here to there?" over a
//! transit network that mixes flights, bus, rail and sea lines, walking and
//! spawn warps.
//!
//! The search is Dijkstra over `(node, active line)` states, so that riding
//! through a stop on the same line avoids the change penalty. Edges are
//! produced on demand by the neighbor generator rather than stored.

mod config;
mod itinerary;
mod neighbors;
mod search;

pub use config::{CostConfig, UNKNOWN_DISTANCE_SECS};
pub use itinerary::{ALREADY_THERE, Itinerary, NO_ROUTE, RouteOutcome};
pub use neighbors::{Leg, NeighborGenerator};
pub use search::{Planner, SearchError, SearchState, find_route};
