//! Selectable route endpoints.
//!
//! Only places a traveller can start or finish at are listed: airports,
//! stops and stations, towns and spawn warps. Gates, flights, lines and
//! companies are reachable during search but never offered as endpoints.

use serde::Serialize;

use crate::domain::{Node, NodeId};

use super::error::LookupError;
use super::snapshot::{NetworkSnapshot, NetworkView};

/// One selectable endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: NodeId,
    pub label: String,
}

/// List the selectable endpoints of a network, sorted by label.
///
/// Fails if a stop references a company that does not exist.
pub fn catalog(network: &NetworkSnapshot) -> Result<Vec<CatalogEntry>, LookupError> {
    let mut entries = Vec::new();

    for node in network.nodes() {
        let label = match node {
            Node::AirAirport(airport) => airport.display(),
            Node::BusStop(stop) | Node::RailStation(stop) | Node::SeaStop(stop) => {
                let company = network.company(stop.company)?;
                format!("[{}] {}", company.name, node.display())
            }
            Node::Town(town) if town.rank.is_empty() => town.name.clone(),
            Node::Town(town) => format!("{} ({})", town.name, town.rank),
            Node::SpawnWarp(warp) => warp.name.clone(),
            _ => continue,
        };

        entries.push(CatalogEntry {
            id: node.id(),
            label: format!("{} {}", node.kind(), label),
        });
    }

    entries.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
    Ok(entries)
}
