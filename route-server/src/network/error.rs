//! Network data error types.

use std::path::PathBuf;

use crate::domain::{NodeId, NodeKind};

/// A node lookup that failed.
///
/// A dangling identifier means the dataset (or the caller) referenced a node
/// that does not exist, so any route computed past it would be wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No node has this identifier
    #[error("node {id} not found (expected {expected})")]
    NotFound { id: NodeId, expected: &'static str },

    /// The node exists but is of another kind
    #[error("node {id} is a {found}, expected {expected}")]
    WrongKind {
        id: NodeId,
        expected: &'static str,
        found: NodeKind,
    },
}

impl LookupError {
    /// The identifier that failed to resolve.
    pub fn id(&self) -> NodeId {
        match self {
            LookupError::NotFound { id, .. } | LookupError::WrongKind { id, .. } => *id,
        }
    }
}

/// Errors that can occur while loading the network dataset.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Data source returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the dataset JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a dataset file
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two nodes share an identifier
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = LookupError::NotFound {
            id: NodeId(4),
            expected: "AirGate",
        };
        assert_eq!(err.to_string(), "node 4 not found (expected AirGate)");
        assert_eq!(err.id(), NodeId(4));

        let err = LookupError::WrongKind {
            id: NodeId(5),
            expected: "BusLine",
            found: NodeKind::Town,
        };
        assert_eq!(err.to_string(), "node 5 is a Town, expected BusLine");

        let err = NetworkError::DuplicateId(NodeId(9));
        assert_eq!(err.to_string(), "duplicate node id 9");

        let err = NetworkError::Api {
            status: 404,
            message: "gone".to_string(),
        };
        assert_eq!(err.to_string(), "API error 404: gone");
    }
}
