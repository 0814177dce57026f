//! Line connections between stops.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Direction metadata for a connection.
///
/// `direction` names the endpoint the connection runs towards. A one-way
/// connection therefore only permits arrival at `direction`, never
/// departure from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    #[serde(default)]
    pub one_way: bool,
    pub direction: NodeId,
    #[serde(default)]
    pub forward_label: Option<String>,
    #[serde(default)]
    pub backward_label: Option<String>,
}

/// One line serving a pair of adjacent stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub line: NodeId,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl Connection {
    /// Creates an undirected connection on `line`.
    pub fn new(line: NodeId) -> Self {
        Self {
            line,
            direction: None,
        }
    }

    /// Creates a connection with direction metadata.
    pub fn directed(line: NodeId, direction: Direction) -> Self {
        Self {
            line,
            direction: Some(direction),
        }
    }

    /// Whether this connection may be ridden when departing from `from`.
    pub fn departs_from(&self, from: NodeId) -> bool {
        !matches!(&self.direction, Some(d) if d.one_way && d.direction == from)
    }

    /// The direction label that applies when departing from `from`.
    ///
    /// Travelling away from the recorded endpoint uses the backward label,
    /// anything else uses the forward label. Empty labels are ignored.
    pub fn label_from(&self, from: NodeId) -> Option<&str> {
        let direction = self.direction.as_ref()?;
        let label = if direction.direction == from {
            direction.backward_label.as_deref()
        } else {
            direction.forward_label.as_deref()
        };
        label.filter(|l| !l.is_empty())
    }
}
