//! Immutable network snapshot and the typed lookup interface.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{
    Airport, Company, Coordinates, Flight, Gate, Line, Node, NodeId, SpawnWarp, Stop,
};

use super::error::{LookupError, NetworkError};

/// Read-only typed access to a transit network.
///
/// This abstraction allows the planner to run over any data provider; the
/// typed accessors fail with [`LookupError`] when the id is absent or names
/// a node of another kind.
pub trait NetworkView {
    /// Look up any node.
    fn node(&self, id: NodeId) -> Result<&Node, LookupError>;

    /// All spawn-warp nodes.
    fn spawn_warps(&self) -> Vec<&SpawnWarp>;

    fn airport(&self, id: NodeId) -> Result<&Airport, LookupError> {
        match lookup(self, id, "AirAirport")? {
            Node::AirAirport(airport) => Ok(airport),
            other => Err(wrong_kind(id, "AirAirport", other)),
        }
    }

    fn gate(&self, id: NodeId) -> Result<&Gate, LookupError> {
        match lookup(self, id, "AirGate")? {
            Node::AirGate(gate) => Ok(gate),
            other => Err(wrong_kind(id, "AirGate", other)),
        }
    }

    fn flight(&self, id: NodeId) -> Result<&Flight, LookupError> {
        match lookup(self, id, "AirFlight")? {
            Node::AirFlight(flight) => Ok(flight),
            other => Err(wrong_kind(id, "AirFlight", other)),
        }
    }

    fn bus_stop(&self, id: NodeId) -> Result<&Stop, LookupError> {
        match lookup(self, id, "BusStop")? {
            Node::BusStop(stop) => Ok(stop),
            other => Err(wrong_kind(id, "BusStop", other)),
        }
    }

    fn rail_station(&self, id: NodeId) -> Result<&Stop, LookupError> {
        match lookup(self, id, "RailStation")? {
            Node::RailStation(stop) => Ok(stop),
            other => Err(wrong_kind(id, "RailStation", other)),
        }
    }

    fn sea_stop(&self, id: NodeId) -> Result<&Stop, LookupError> {
        match lookup(self, id, "SeaStop")? {
            Node::SeaStop(stop) => Ok(stop),
            other => Err(wrong_kind(id, "SeaStop", other)),
        }
    }

    /// A bus, rail or sea line.
    fn line(&self, id: NodeId) -> Result<&Line, LookupError> {
        match lookup(self, id, "line")? {
            Node::BusLine(line) | Node::RailLine(line) | Node::SeaLine(line) => Ok(line),
            other => Err(wrong_kind(id, "line", other)),
        }
    }

    /// An airline, bus, rail or sea company.
    fn company(&self, id: NodeId) -> Result<&Company, LookupError> {
        match lookup(self, id, "company")? {
            Node::AirAirline(company)
            | Node::BusCompany(company)
            | Node::RailCompany(company)
            | Node::SeaCompany(company) => Ok(company),
            other => Err(wrong_kind(id, "company", other)),
        }
    }

    /// Known coordinates of a node.
    ///
    /// Gates have no location of their own and resolve through their
    /// airport. Kinds without a location yield `None`.
    fn coordinates(&self, id: NodeId) -> Result<Option<Coordinates>, LookupError> {
        match self.node(id)? {
            Node::AirGate(gate) => Ok(self.airport(gate.airport)?.location.coordinates),
            node => Ok(node.location().and_then(|l| l.coordinates)),
        }
    }
}

fn lookup<'a, N: NetworkView + ?Sized>(
    network: &'a N,
    id: NodeId,
    expected: &'static str,
) -> Result<&'a Node, LookupError> {
    network.node(id).map_err(|_| LookupError::NotFound { id, expected })
}

fn wrong_kind(id: NodeId, expected: &'static str, found: &Node) -> LookupError {
    LookupError::WrongKind {
        id,
        expected,
        found: found.kind(),
    }
}

/// The dataset document as served by the data source.
#[derive(Debug, Deserialize)]
struct Dataset {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    version: Option<u32>,
    nodes: Vec<Node>,
}

/// A loaded, validated transit network.
///
/// Snapshots are never mutated; a refresh builds a new one.
#[derive(Debug)]
pub struct NetworkSnapshot {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    spawn_warps: Vec<usize>,
    timestamp: Option<String>,
    version: Option<u32>,
    loaded_at: DateTime<Utc>,
}

impl NetworkSnapshot {
    /// Build a snapshot from a list of nodes.
    ///
    /// Fails if two nodes share an identifier.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self, NetworkError> {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut spawn_warps = Vec::new();

        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id(), pos).is_some() {
                return Err(NetworkError::DuplicateId(node.id()));
            }
            if matches!(node, Node::SpawnWarp(_)) {
                spawn_warps.push(pos);
            }
        }

        Ok(Self {
            nodes,
            index,
            spawn_warps,
            timestamp: None,
            version: None,
            loaded_at: Utc::now(),
        })
    }

    /// Parse a dataset document.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let dataset: Dataset = serde_json::from_str(json).map_err(|e| NetworkError::Json {
            message: e.to_string(),
        })?;

        let mut snapshot = Self::from_nodes(dataset.nodes)?;
        snapshot.timestamp = dataset.timestamp;
        snapshot.version = dataset.version;
        Ok(snapshot)
    }

    /// All nodes, in dataset order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The dataset's own generation timestamp, if it carries one.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// When this snapshot was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl NetworkView for NetworkSnapshot {
    fn node(&self, id: NodeId) -> Result<&Node, LookupError> {
        self.index
            .get(&id)
            .map(|&pos| &self.nodes[pos])
            .ok_or(LookupError::NotFound {
                id,
                expected: "node",
            })
    }

    fn spawn_warps(&self) -> Vec<&SpawnWarp> {
        self.spawn_warps
            .iter()
            .filter_map(|&pos| match &self.nodes[pos] {
                Node::SpawnWarp(warp) => Some(warp),
                _ => None,
            })
            .collect()
    }
}
