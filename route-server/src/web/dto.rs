//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidMode, InvalidNodeId, ModeSet, NodeId};
use crate::planner::{CostConfig, RouteOutcome};

/// Query parameters of a route request.
///
/// Cost parameters left out fall back to the server defaults; `modes` is a
/// comma-separated list and enables every mode when absent.
#[derive(Debug, Default, Deserialize)]
pub struct RouteRequest {
    /// Origin node id
    pub from: String,

    /// Destination node id
    pub to: String,

    /// Enabled modes, e.g. `bus,rail,warp`
    pub modes: Option<String>,

    pub flying_speed: Option<f64>,
    pub traincarts_speed: Option<f64>,
    pub cart_speed: Option<f64>,
    pub warp_cost: Option<f64>,
    pub change_cost: Option<f64>,
}

impl RouteRequest {
    /// Parse the origin and destination ids.
    pub fn endpoints(&self) -> Result<(NodeId, NodeId), InvalidNodeId> {
        Ok((self.from.parse()?, self.to.parse()?))
    }

    /// The cost configuration for this request, starting from `defaults`.
    pub fn cost_config(&self, defaults: &CostConfig) -> Result<CostConfig, InvalidMode> {
        let mut config = defaults.clone();
        if let Some(modes) = &self.modes {
            config.modes = modes.parse::<ModeSet>()?;
        }
        if let Some(speed) = self.flying_speed {
            config.flying_speed = speed;
        }
        if let Some(speed) = self.traincarts_speed {
            config.traincarts_speed = speed;
        }
        if let Some(speed) = self.cart_speed {
            config.cart_speed = speed;
        }
        if let Some(cost) = self.warp_cost {
            config.warp_cost = cost;
        }
        if let Some(cost) = self.change_cost {
            config.change_cost = cost;
        }
        Ok(config)
    }
}

/// Result of a route request.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// `found`, `no_route` or `already_there`
    pub outcome: &'static str,

    /// Display lines: legs, summary and warnings
    pub lines: Vec<String>,

    /// Rounded travel time, when a route was found
    pub total_seconds: Option<u64>,
}

impl RouteResponse {
    pub fn from_outcome(outcome: &RouteOutcome) -> Self {
        Self {
            outcome: outcome.as_str(),
            lines: outcome.lines(),
            total_seconds: outcome.itinerary().map(|i| i.total_seconds()),
        }
    }
}

/// A selectable endpoint.
#[derive(Debug, Serialize)]
pub struct NodeResult {
    pub id: NodeId,
    pub label: String,
}

/// Response listing the selectable endpoints.
#[derive(Debug, Serialize)]
pub struct NodeListResponse {
    pub nodes: Vec<NodeResult>,

    /// Dataset timestamp, if the source provides one
    pub timestamp: Option<String>,

    /// When the server loaded the current snapshot (RFC 3339)
    pub loaded_at: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
