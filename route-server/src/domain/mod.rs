//! Domain types for the transit route planner.
//!
//! This module contains the typed model of the transit network: node kinds,
//! identifiers, line connections and transport modes. The network itself is
//! never mutated once loaded, so these types are plain data.

mod connection;
mod display;
mod id;
mod mode;
mod node;

pub use connection::{Connection, Direction};
pub use display::{display_name, join_names};
pub use id::{InvalidNodeId, NodeId};
pub use mode::{FlightMode, InvalidMode, LineMode, Mode, ModeSet};
pub use node::{
    Airport, Company, Coordinates, Flight, Gate, Line, Location, Node, NodeKind, Proximity,
    SpawnWarp, Stop, Town,
};
