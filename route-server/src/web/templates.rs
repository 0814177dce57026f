//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Mode;
use crate::network::CatalogEntry;
use crate::planner::{CostConfig, RouteOutcome};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub nodes: Vec<CatalogEntry>,
    pub modes: Vec<ModeOption>,
    pub defaults: CostDefaultsView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Route result fragment.
#[derive(Template)]
#[template(path = "route_result.html")]
pub struct RouteResultTemplate {
    pub route: RouteView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A mode checkbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

impl ModeOption {
    /// One checkbox per mode, checked when enabled in `config`.
    pub fn all(config: &CostConfig) -> Vec<Self> {
        Mode::ALL
            .into_iter()
            .map(|mode| ModeOption {
                value: mode.as_str(),
                label: mode.label(),
                checked: config.allows(mode),
            })
            .collect()
    }
}

/// Default cost parameters, pre-filled in the form.
#[derive(Debug, Clone, PartialEq)]
pub struct CostDefaultsView {
    pub flying_speed: f64,
    pub traincarts_speed: f64,
    pub cart_speed: f64,
    pub warp_cost: f64,
    pub change_cost: f64,
}

impl CostDefaultsView {
    pub fn from_config(config: &CostConfig) -> Self {
        Self {
            flying_speed: config.flying_speed,
            traincarts_speed: config.traincarts_speed,
            cart_speed: config.cart_speed,
            warp_cost: config.warp_cost,
            change_cost: config.change_cost,
        }
    }
}

/// Route outcome view model for templates.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteView {
    /// Message shown instead of legs when there is no itinerary.
    pub message: Option<String>,
    pub legs: Vec<String>,
    pub summary: Option<String>,
    pub warnings: Vec<String>,
}

impl RouteView {
    pub fn from_outcome(outcome: &RouteOutcome) -> Self {
        match outcome.itinerary() {
            Some(itinerary) => Self {
                message: None,
                legs: itinerary.legs().to_vec(),
                summary: Some(itinerary.summary()),
                warnings: itinerary.warnings().to_vec(),
            },
            None => Self {
                message: outcome.lines().into_iter().next(),
                legs: Vec::new(),
                summary: None,
                warnings: Vec::new(),
            },
        }
    }
}
