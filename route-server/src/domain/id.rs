//! Node identifier type.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid node identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid node id {input:?}: {reason}")]
pub struct InvalidNodeId {
    input: String,
    reason: &'static str,
}

/// Identifier of a node in the transit network.
///
/// Identifiers are unique across the whole network regardless of the kind
/// of node they name, so a `NodeId` alone is enough to look a node up.
///
/// # Examples
///
/// ```
/// use route_server::domain::NodeId;
///
/// let id: NodeId = "42".parse().unwrap();
/// assert_eq!(id, NodeId(42));
/// assert_eq!(id.to_string(), "42");
///
/// assert!("".parse::<NodeId>().is_err());
/// assert!("-1".parse::<NodeId>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl FromStr for NodeId {
    type Err = InvalidNodeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidNodeId {
                input: s.to_string(),
                reason: "must not be empty",
            });
        }
        trimmed.parse::<u32>().map(NodeId).map_err(|_| InvalidNodeId {
            input: s.to_string(),
            reason: "must be a non-negative integer",
        })
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

/// Accepts both numbers and decimal strings.
///
/// The dataset uses numbers for ids in value position and strings for ids
/// used as JSON object keys. Buffered (internally tagged) deserialization
/// also hands keys over as strings, so both must be accepted everywhere.
impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeIdVisitor)
    }
}

struct NodeIdVisitor;

impl Visitor<'_> for NodeIdVisitor {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a node id as an unsigned integer or a decimal string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<NodeId, E> {
        u32::try_from(v)
            .map(NodeId)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<NodeId, E> {
        u32::try_from(v)
            .map(NodeId)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<NodeId, E> {
        v.parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
