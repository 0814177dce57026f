//! Application state for the web layer.

use std::sync::Arc;

use crate::network::SharedNetwork;
use crate::planner::CostConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Current network snapshot, refreshed in the background
    pub network: SharedNetwork,

    /// Cost parameters used when a request leaves them out
    pub defaults: Arc<CostConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: SharedNetwork, defaults: CostConfig) -> Self {
        Self {
            network,
            defaults: Arc::new(defaults),
        }
    }
}
