//! Transit network nodes.
//!
//! A [`Node`] is a closed sum over every kind of thing the dataset
//! describes. Edges are not stored separately: they live in the fields of
//! the node kinds (proximity, shared facilities, gates, flights and line
//! connections) and are interpreted by the planner's neighbor generator.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::display::{display_name, join_names};
use super::{Connection, FlightMode, LineMode, NodeId};

/// Planar block coordinates `(x, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
    pub x: f64,
    pub z: f64,
}

impl Coordinates {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Straight-line distance in blocks.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([x, z]: [f64; 2]) -> Self {
        Self { x, z }
    }
}

impl From<Coordinates> for [f64; 2] {
    fn from(c: Coordinates) -> Self {
        [c.x, c.z]
    }
}

/// A proximity link to a nearby located node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    /// Straight-line distance in blocks.
    pub distance: f64,
    /// Whether the link was entered by hand rather than computed. Carried
    /// for the wire format only; the planner treats both kinds alike.
    #[serde(default)]
    pub explicit: bool,
}

/// Fields shared by every node that has a physical location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub proximity: BTreeMap<NodeId, Proximity>,
    #[serde(default)]
    pub shared_facility: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub i: NodeId,
    pub code: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub gates: Vec<NodeId>,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub i: NodeId,
    #[serde(default)]
    pub code: Option<String>,
    pub airport: NodeId,
    #[serde(default)]
    pub flights: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub i: NodeId,
    #[serde(default)]
    pub codes: Vec<String>,
    pub airline: NodeId,
    #[serde(default)]
    pub gates: Vec<NodeId>,
    #[serde(default)]
    pub mode: FlightMode,
}

/// An operator: airline, bus, rail or sea company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub i: NodeId,
    pub name: String,
}

/// A bus, rail or sea line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub i: NodeId,
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    pub company: NodeId,
    #[serde(default)]
    pub mode: LineMode,
}

/// A bus stop, rail station or sea stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub i: NodeId,
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub company: NodeId,
    #[serde(default)]
    pub connections: BTreeMap<NodeId, Vec<Connection>>,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Town {
    pub i: NodeId,
    pub name: String,
    #[serde(default)]
    pub rank: String,
    #[serde(flatten)]
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnWarp {
    pub i: NodeId,
    pub name: String,
    /// Dataset's warp category. Carried for the wire format only.
    #[serde(default)]
    pub warp_type: Option<String>,
    #[serde(flatten)]
    pub location: Location,
}

impl Airport {
    /// `"Names (CODE)"`, names joined by `/`.
    pub fn display(&self) -> String {
        let names = join_names(&self.names);
        display_name(std::slice::from_ref(&self.code), names.as_deref())
    }
}

impl Line {
    pub fn display(&self) -> String {
        display_name(std::slice::from_ref(&self.code), self.name.as_deref())
    }
}

impl Stop {
    pub fn display(&self) -> String {
        display_name(&self.codes, self.name.as_deref())
    }
}

/// The kind of a node, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    AirAirport,
    AirGate,
    AirFlight,
    AirAirline,
    BusCompany,
    BusLine,
    BusStop,
    RailCompany,
    RailLine,
    RailStation,
    SeaCompany,
    SeaLine,
    SeaStop,
    Town,
    SpawnWarp,
}

impl NodeKind {
    /// The dataset's type tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::AirAirport => "AirAirport",
            NodeKind::AirGate => "AirGate",
            NodeKind::AirFlight => "AirFlight",
            NodeKind::AirAirline => "AirAirline",
            NodeKind::BusCompany => "BusCompany",
            NodeKind::BusLine => "BusLine",
            NodeKind::BusStop => "BusStop",
            NodeKind::RailCompany => "RailCompany",
            NodeKind::RailLine => "RailLine",
            NodeKind::RailStation => "RailStation",
            NodeKind::SeaCompany => "SeaCompany",
            NodeKind::SeaLine => "SeaLine",
            NodeKind::SeaStop => "SeaStop",
            NodeKind::Town => "Town",
            NodeKind::SpawnWarp => "SpawnWarp",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the transit network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    AirAirport(Airport),
    AirGate(Gate),
    AirFlight(Flight),
    AirAirline(Company),
    BusCompany(Company),
    BusLine(Line),
    BusStop(Stop),
    RailCompany(Company),
    RailLine(Line),
    RailStation(Stop),
    SeaCompany(Company),
    SeaLine(Line),
    SeaStop(Stop),
    Town(Town),
    SpawnWarp(SpawnWarp),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::AirAirport(n) => n.i,
            Node::AirGate(n) => n.i,
            Node::AirFlight(n) => n.i,
            Node::AirAirline(n) | Node::BusCompany(n) | Node::RailCompany(n) | Node::SeaCompany(n) => {
                n.i
            }
            Node::BusLine(n) | Node::RailLine(n) | Node::SeaLine(n) => n.i,
            Node::BusStop(n) | Node::RailStation(n) | Node::SeaStop(n) => n.i,
            Node::Town(n) => n.i,
            Node::SpawnWarp(n) => n.i,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::AirAirport(_) => NodeKind::AirAirport,
            Node::AirGate(_) => NodeKind::AirGate,
            Node::AirFlight(_) => NodeKind::AirFlight,
            Node::AirAirline(_) => NodeKind::AirAirline,
            Node::BusCompany(_) => NodeKind::BusCompany,
            Node::BusLine(_) => NodeKind::BusLine,
            Node::BusStop(_) => NodeKind::BusStop,
            Node::RailCompany(_) => NodeKind::RailCompany,
            Node::RailLine(_) => NodeKind::RailLine,
            Node::RailStation(_) => NodeKind::RailStation,
            Node::SeaCompany(_) => NodeKind::SeaCompany,
            Node::SeaLine(_) => NodeKind::SeaLine,
            Node::SeaStop(_) => NodeKind::SeaStop,
            Node::Town(_) => NodeKind::Town,
            Node::SpawnWarp(_) => NodeKind::SpawnWarp,
        }
    }

    /// Location data, for the kinds that have a physical location.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Node::AirAirport(n) => Some(&n.location),
            Node::BusStop(n) | Node::RailStation(n) | Node::SeaStop(n) => Some(&n.location),
            Node::Town(n) => Some(&n.location),
            Node::SpawnWarp(n) => Some(&n.location),
            _ => None,
        }
    }

    /// The operating company, for stops and lines.
    pub fn company(&self) -> Option<NodeId> {
        match self {
            Node::BusStop(n) | Node::RailStation(n) | Node::SeaStop(n) => Some(n.company),
            Node::BusLine(n) | Node::RailLine(n) | Node::SeaLine(n) => Some(n.company),
            Node::AirFlight(n) => Some(n.airline),
            _ => None,
        }
    }

    /// Human-readable form of the node.
    pub fn display(&self) -> String {
        match self {
            Node::AirAirport(n) => n.display(),
            Node::AirGate(n) => n.code.clone().unwrap_or_default(),
            Node::AirFlight(n) => display_name(&n.codes, None),
            Node::AirAirline(n) | Node::BusCompany(n) | Node::RailCompany(n) | Node::SeaCompany(n) => {
                n.name.clone()
            }
            Node::BusLine(n) | Node::RailLine(n) | Node::SeaLine(n) => n.display(),
            Node::BusStop(n) | Node::RailStation(n) | Node::SeaStop(n) => n.display(),
            Node::Town(n) => n.name.clone(),
            Node::SpawnWarp(n) => n.name.clone(),
        }
    }
}
