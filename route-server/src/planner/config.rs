//! Cost configuration for the route planner.

use crate::domain::{Mode, ModeSet};

use super::search::SearchError;

/// Travel time, in seconds, assumed for a ride between two points when
/// either end has no known coordinates.
pub const UNKNOWN_DISTANCE_SECS: f64 = 300.0;

/// Cost model parameters for one search.
///
/// All costs are in seconds and all speeds in blocks per second. A search
/// captures its configuration by value, so changing a configuration only
/// ever affects searches started afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CostConfig {
    /// Speed for flying or walking over proximity links.
    pub flying_speed: f64,

    /// Speed of traincarts and vehicle lines, and of traincarts planes.
    pub traincarts_speed: f64,

    /// Speed of cart lines.
    pub cart_speed: f64,

    /// Flat cost of a warp ride (bus, sea, warp rail lines, warp planes).
    pub warp_cost: f64,

    /// Flat cost of changing: between facilities, between gates, and
    /// between two different lines.
    pub change_cost: f64,

    /// Modes that legs may use.
    pub modes: ModeSet,

    /// Maximum number of states to expand before giving up.
    /// `None` means unbounded.
    pub max_expansions: Option<usize>,
}

impl CostConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        flying_speed: f64,
        traincarts_speed: f64,
        cart_speed: f64,
        warp_cost: f64,
        change_cost: f64,
        modes: ModeSet,
    ) -> Self {
        Self {
            flying_speed,
            traincarts_speed,
            cart_speed,
            warp_cost,
            change_cost,
            modes,
            ..Self::default()
        }
    }

    /// Returns a copy with a different set of modes.
    pub fn with_modes(mut self, modes: ModeSet) -> Self {
        self.modes = modes;
        self
    }

    /// Returns a copy with a different expansion budget.
    pub fn with_max_expansions(mut self, max_expansions: Option<usize>) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Whether `mode` is enabled.
    pub fn allows(&self, mode: Mode) -> bool {
        self.modes.contains(mode)
    }

    /// Whether every mode in `modes` is enabled.
    pub fn allows_all(&self, modes: &[Mode]) -> bool {
        self.modes.contains_all(modes)
    }

    /// Seconds to cover `distance` blocks at `speed`, or the fixed fallback
    /// when the distance is unknown.
    pub fn travel_secs(distance: Option<f64>, speed: f64) -> f64 {
        match distance {
            Some(d) => d / speed,
            None => UNKNOWN_DISTANCE_SECS,
        }
    }

    /// Check that every leg cost derived from this configuration is finite
    /// and non-negative.
    pub fn validate(&self) -> Result<(), SearchError> {
        let speeds = [
            ("flying_speed", self.flying_speed),
            ("traincarts_speed", self.traincarts_speed),
            ("cart_speed", self.cart_speed),
        ];
        for (name, speed) in speeds {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(SearchError::InvalidConfig(format!(
                    "{name} must be a positive number, got {speed}"
                )));
            }
        }

        let costs = [("warp_cost", self.warp_cost), ("change_cost", self.change_cost)];
        for (name, cost) in costs {
            if !cost.is_finite() || cost < 0.0 {
                return Err(SearchError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {cost}"
                )));
            }
        }

        Ok(())
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            flying_speed: 8.0,
            traincarts_speed: 10.0,
            cart_speed: 8.0,
            warp_cost: 10.0,
            change_cost: 10.0,
            modes: ModeSet::all(),
            max_expansions: Some(1_000_000),
        }
    }
}
