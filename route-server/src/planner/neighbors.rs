//! Neighbor generation.
//!
//! The transit graph is never materialized: edges are read on demand from
//! the fields of each node. This module is the one place that decides what
//! those fields mean as moves, how much each move costs and how it reads in
//! an itinerary.

use crate::domain::{Airport, Coordinates, FlightMode, Gate, LineMode, Location, Mode, Node, Stop};
use crate::network::{LookupError, NetworkView};

use super::config::CostConfig;
use super::search::SearchState;

/// A move out of a search state.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub to: SearchState,
    /// Incremental cost in seconds, never negative for a valid config.
    pub cost: f64,
    /// Itinerary line, or `None` for steps with nothing to tell the user.
    pub label: Option<String>,
}

impl Leg {
    fn new(to: SearchState, cost: f64, label: Option<String>) -> Self {
        Self { to, cost, label }
    }
}

/// Which family of stops a line ride belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineNetwork {
    Bus,
    Rail,
    Sea,
}

impl LineNetwork {
    fn mode(self) -> Mode {
        match self {
            LineNetwork::Bus => Mode::Bus,
            LineNetwork::Rail => Mode::Rail,
            LineNetwork::Sea => Mode::Sea,
        }
    }
}

/// Produces the legs leaving a search state.
pub struct NeighborGenerator<'a, N: NetworkView + ?Sized> {
    network: &'a N,
    config: &'a CostConfig,
}

impl<'a, N: NetworkView + ?Sized> NeighborGenerator<'a, N> {
    pub fn new(network: &'a N, config: &'a CostConfig) -> Self {
        Self { network, config }
    }

    /// All legs out of `state`.
    ///
    /// Any identifier that does not resolve is an error; the network is
    /// expected to be internally consistent and a dangling reference means
    /// the dataset is broken.
    pub fn expand(&self, state: SearchState) -> Result<Vec<Leg>, LookupError> {
        let node = self.network.node(state.node)?;
        let mut legs = Vec::new();

        if let Some(location) = node.location() {
            self.proximity_legs(location, &mut legs)?;
            self.shared_facility_legs(location, &mut legs)?;
        }

        match node {
            Node::AirAirport(airport) => self.airport_legs(airport, &mut legs)?,
            Node::AirGate(gate) => self.gate_legs(gate, &mut legs)?,
            Node::BusStop(stop) => self.line_legs(state, stop, LineNetwork::Bus, &mut legs)?,
            Node::RailStation(stop) => {
                self.line_legs(state, stop, LineNetwork::Rail, &mut legs)?
            }
            Node::SeaStop(stop) => self.line_legs(state, stop, LineNetwork::Sea, &mut legs)?,
            _ => {}
        }

        Ok(legs)
    }

    fn proximity_legs(&self, location: &Location, legs: &mut Vec<Leg>) -> Result<(), LookupError> {
        for (&id, proximity) in &location.proximity {
            let target = self.network.node(id)?;
            // Negative distances in the data are treated as zero.
            let distance = proximity.distance.max(0.0);
            let cost = distance / self.config.flying_speed + self.config.change_cost;
            let label = format!(
                "Fly/walk {} blocks to {} {}",
                distance.round(),
                target.kind(),
                target.display()
            );
            legs.push(Leg::new(SearchState::at(id), cost, Some(label)));
        }
        Ok(())
    }

    fn shared_facility_legs(
        &self,
        location: &Location,
        legs: &mut Vec<Leg>,
    ) -> Result<(), LookupError> {
        for &id in &location.shared_facility {
            let target = self.network.node(id)?;
            let label = match target.company() {
                Some(company) => format!(
                    "Change to {} {} {}",
                    target.kind(),
                    self.network.company(company)?.name,
                    target.display()
                ),
                None => format!("Change to {} {}", target.kind(), target.display()),
            };
            legs.push(Leg::new(SearchState::at(id), self.config.change_cost, Some(label)));
        }
        Ok(())
    }

    fn airport_legs(&self, airport: &Airport, legs: &mut Vec<Leg>) -> Result<(), LookupError> {
        for &id in &airport.gates {
            let gate = self.network.gate(id)?;
            legs.push(Leg::new(SearchState::at(id), self.config.change_cost, go_to_gate(gate)));
        }
        Ok(())
    }

    fn gate_legs(&self, gate: &Gate, legs: &mut Vec<Leg>) -> Result<(), LookupError> {
        legs.push(Leg::new(SearchState::at(gate.airport), 0.0, None));

        let airport = self.network.airport(gate.airport)?;
        for &id in airport.gates.iter().filter(|&&id| id != gate.i) {
            let sibling = self.network.gate(id)?;
            legs.push(Leg::new(SearchState::at(id), self.config.change_cost, go_to_gate(sibling)));
        }

        if !self.config.allows(Mode::Air) {
            return Ok(());
        }

        let boarding = match &gate.code {
            Some(code) => format!("At gate {code}, take"),
            None => "Take".to_string(),
        };
        let boarding_cost = if gate.code.is_none() {
            self.config.change_cost
        } else {
            0.0
        };
        let here = airport.location.coordinates;

        for &flight_id in &gate.flights {
            let flight = self.network.flight(flight_id)?;
            if !self.config.allows(flight.mode.required_mode()) {
                continue;
            }
            let airline = self.network.company(flight.airline)?;
            let codes = flight.codes.join("/");

            for &id in flight.gates.iter().filter(|&&id| id != gate.i) {
                let arrival = self.network.gate(id)?;
                let destination = self.network.airport(arrival.airport)?;
                let flight_cost = match flight.mode {
                    FlightMode::WarpPlane => self.config.warp_cost,
                    FlightMode::TraincartsPlane => CostConfig::travel_secs(
                        distance(here, destination.location.coordinates),
                        self.config.traincarts_speed,
                    ),
                };
                let arrival_gate = arrival
                    .code
                    .as_ref()
                    .map(|code| format!(" (gate {code})"))
                    .unwrap_or_default();
                let label = format!(
                    "{boarding} {} {codes} to {}{arrival_gate}",
                    airline.name,
                    destination.display()
                );
                legs.push(Leg::new(
                    SearchState::at(id),
                    boarding_cost + flight_cost,
                    Some(label),
                ));
            }
        }
        Ok(())
    }

    fn line_legs(
        &self,
        state: SearchState,
        stop: &Stop,
        network: LineNetwork,
        legs: &mut Vec<Leg>,
    ) -> Result<(), LookupError> {
        if !self.config.allows(network.mode()) {
            return Ok(());
        }
        if network != LineNetwork::Rail && !self.config.allows(Mode::Warp) {
            return Ok(());
        }

        for (&next_id, connections) in &stop.connections {
            let next = match network {
                LineNetwork::Bus => self.network.bus_stop(next_id)?,
                LineNetwork::Rail => self.network.rail_station(next_id)?,
                LineNetwork::Sea => self.network.sea_stop(next_id)?,
            };
            let ride_distance = distance(stop.location.coordinates, next.location.coordinates);

            for connection in connections {
                if !connection.departs_from(stop.i) {
                    continue;
                }
                let line = self.network.line(connection.line)?;

                let ride_cost = match (network, line.mode) {
                    (LineNetwork::Bus | LineNetwork::Sea, _) => self.config.warp_cost,
                    (LineNetwork::Rail, LineMode::Warp | LineMode::Other) => {
                        if !self.config.allows(Mode::Warp) {
                            continue;
                        }
                        self.config.warp_cost
                    }
                    (LineNetwork::Rail, LineMode::Traincarts | LineMode::Vehicles) => {
                        if !self.config.allows(line.mode.required_mode()) {
                            continue;
                        }
                        CostConfig::travel_secs(ride_distance, self.config.traincarts_speed)
                    }
                    (LineNetwork::Rail, LineMode::Cart) => {
                        if !self.config.allows(Mode::Cart) {
                            continue;
                        }
                        CostConfig::travel_secs(ride_distance, self.config.cart_speed)
                    }
                };
                let change_cost = match state.line {
                    Some(active) if active != line.i => self.config.change_cost,
                    _ => 0.0,
                };

                let company = self.network.company(line.company)?;
                let direction = connection
                    .label_from(stop.i)
                    .map(|label| format!("({label}) "))
                    .unwrap_or_default();
                let label = format!(
                    "Take {} {} {direction}to {}",
                    company.name,
                    line.display(),
                    next.display()
                );

                legs.push(Leg::new(
                    SearchState::riding(next_id, line.i),
                    ride_cost + change_cost,
                    Some(label),
                ));
            }
        }
        Ok(())
    }
}

fn go_to_gate(gate: &Gate) -> Option<String> {
    gate.code.as_ref().map(|code| format!("Go to gate {code}"))
}

fn distance(from: Option<Coordinates>, to: Option<Coordinates>) -> Option<f64> {
    Some(from?.distance_to(&to?))
}
