//! Itinerary assembly and rendering.

use std::collections::HashMap;

use serde::Serialize;

use crate::network::NetworkView;

use super::search::{SearchError, SearchState};

pub const ALREADY_THERE: &str = "Already there";
pub const NO_ROUTE: &str = "No route found";

/// How a state was first reached on the cheapest known path.
#[derive(Debug, Clone)]
pub(crate) struct Step {
    pub from: SearchState,
    pub label: Option<String>,
}

/// A found route, ready to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    legs: Vec<String>,
    total_cost: f64,
    warnings: Vec<String>,
}

impl Itinerary {
    /// Leg descriptions in travel order.
    pub fn legs(&self) -> &[String] {
        &self.legs
    }

    /// Exact accumulated cost in seconds.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Total cost rounded to whole seconds.
    pub fn total_seconds(&self) -> u64 {
        self.total_cost.round() as u64
    }

    /// Notes about endpoints whose travel times are estimates.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// The travel time line, e.g. `Estimated travel time: 75s (1m 15s)`.
    pub fn summary(&self) -> String {
        let secs = self.total_seconds();
        if secs < 60 {
            format!("Estimated travel time: {secs}s")
        } else {
            format!("Estimated travel time: {secs}s ({})", format_duration(secs))
        }
    }

    /// Legs, then the summary, then any warnings.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.legs.clone();
        lines.push(self.summary());
        lines.extend(self.warnings.iter().cloned());
        lines
    }
}

/// Result of a route request.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Origin and destination are the same node.
    AlreadyThere,
    /// No sequence of enabled legs reaches the destination.
    NoRoute,
    Found(Itinerary),
}

impl RouteOutcome {
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            RouteOutcome::Found(itinerary) => Some(itinerary),
            _ => None,
        }
    }

    /// Short machine-readable name of the outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteOutcome::AlreadyThere => "already_there",
            RouteOutcome::NoRoute => "no_route",
            RouteOutcome::Found(_) => "found",
        }
    }

    /// The outcome as display lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            RouteOutcome::AlreadyThere => vec![ALREADY_THERE.to_string()],
            RouteOutcome::NoRoute => vec![NO_ROUTE.to_string()],
            RouteOutcome::Found(itinerary) => itinerary.lines(),
        }
    }
}

/// `1m 15s`, or `1h 2m 5s` from an hour up.
fn format_duration(secs: u64) -> String {
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else {
        format!("{minutes}m {seconds}s")
    }
}

/// Walk the predecessor table from `terminal` back to `origin` and build the
/// itinerary.
pub(crate) fn assemble<N: NetworkView + ?Sized>(
    network: &N,
    origin: SearchState,
    terminal: SearchState,
    total_cost: f64,
    came_from: &HashMap<SearchState, Step>,
) -> Result<Itinerary, SearchError> {
    let mut legs = Vec::new();
    let mut current = terminal;

    // A valid chain visits each recorded state at most once.
    let mut remaining = came_from.len();
    while current != origin {
        let step = came_from
            .get(&current)
            .filter(|_| remaining > 0)
            .ok_or(SearchError::BrokenChain(current.node))?;
        if let Some(label) = &step.label {
            legs.push(label.clone());
        }
        current = step.from;
        remaining -= 1;
    }
    legs.reverse();

    let mut warnings = Vec::new();
    for (role, id) in [("origin", origin.node), ("destination", terminal.node)] {
        if network.coordinates(id)?.is_none() {
            let node = network.node(id)?;
            warnings.push(format!(
                "Warning: the {role} {} {} has no known coordinates, so travel times are estimated",
                node.kind(),
                node.display()
            ));
        }
    }

    Ok(Itinerary {
        legs,
        total_cost,
        warnings,
    })
}
