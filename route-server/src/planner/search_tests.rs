//! Scenario tests for the route search.

use super::*;
use crate::domain::ModeSet;
use crate::network::NetworkSnapshot;
use crate::planner::itinerary::Itinerary;
use serde_json::{Map, Value, json};

fn company(kind: &str, i: u32, name: &str) -> Value {
    json!({"type": kind, "i": i, "name": name})
}

fn line(kind: &str, i: u32, code: &str, company: u32, mode: &str) -> Value {
    json!({"type": kind, "i": i, "code": code, "company": company, "mode": mode})
}

/// A stop at `(x, 0)` with connections given as `(neighbor, line)` pairs.
fn stop(kind: &str, i: u32, code: &str, company: u32, x: f64, connections: &[(u32, u32)]) -> Value {
    let mut map = Map::new();
    for &(neighbor, line) in connections {
        let entry = map
            .entry(neighbor.to_string())
            .or_insert_with(|| Value::Array(vec![]));
        if let Value::Array(list) = entry {
            list.push(json!({"line": line}));
        }
    }
    json!({
        "type": kind,
        "i": i,
        "codes": [code],
        "company": company,
        "coordinates": [x, 0.0],
        "connections": map,
    })
}

fn network(nodes: Vec<Value>) -> NetworkSnapshot {
    NetworkSnapshot::from_json(&json!({ "nodes": nodes }).to_string()).unwrap()
}

fn found(outcome: RouteOutcome) -> Itinerary {
    match outcome {
        RouteOutcome::Found(itinerary) => itinerary,
        other => panic!("expected a route, got {other:?}"),
    }
}

fn bus_config() -> CostConfig {
    let mut config = CostConfig::default().with_modes("bus,warp".parse().unwrap());
    config.warp_cost = 10.0;
    config.change_cost = 15.0;
    config
}

#[test]
fn single_bus_ride() {
    let network = network(vec![
        company("BusCompany", 1, "Metro"),
        line("BusLine", 2, "L", 1, "warp"),
        stop("BusStop", 3, "A", 1, 0.0, &[(4, 2)]),
        stop("BusStop", 4, "B", 1, 100.0, &[(3, 2)]),
    ]);

    let outcome = find_route(&network, NodeId(3), NodeId(4), &bus_config()).unwrap();
    assert_eq!(
        outcome.lines(),
        vec!["Take Metro L to B", "Estimated travel time: 10s"]
    );
    assert_eq!(found(outcome).total_cost(), 10.0);
}

#[test]
fn staying_on_a_line_beats_changing() {
    let network = network(vec![
        company("BusCompany", 1, "Metro"),
        line("BusLine", 2, "L", 1, "warp"),
        line("BusLine", 3, "M", 1, "warp"),
        stop("BusStop", 10, "A", 1, 0.0, &[(11, 2), (11, 3)]),
        stop("BusStop", 11, "B", 1, 10.0, &[(12, 2)]),
        stop("BusStop", 12, "C", 1, 20.0, &[]),
    ]);

    let itinerary = found(find_route(&network, NodeId(10), NodeId(12), &bus_config()).unwrap());
    assert_eq!(itinerary.legs(), ["Take Metro L to B", "Take Metro L to C"]);
    assert_eq!(itinerary.total_cost(), 20.0);
}

#[test]
fn cheaper_competing_line_still_loses_to_continuity() {
    let network = network(vec![
        company("RailCompany", 1, "Intra"),
        line("RailLine", 2, "L", 1, "traincarts"),
        line("RailLine", 3, "M", 1, "warp"),
        stop("RailStation", 10, "A", 1, 0.0, &[(11, 2), (11, 3)]),
        stop("RailStation", 11, "B", 1, 100.0, &[(12, 2)]),
        stop("RailStation", 12, "C", 1, 200.0, &[]),
    ]);
    let mut config = CostConfig::default();
    config.warp_cost = 5.0;
    config.change_cost = 15.0;

    // M reaches B for 5s but changing back to L costs 15s more than staying.
    let itinerary = found(find_route(&network, NodeId(10), NodeId(12), &config).unwrap());
    assert_eq!(itinerary.legs(), ["Take Intra L to B", "Take Intra L to C"]);
    assert_eq!(itinerary.total_cost(), 20.0);
}

#[test]
fn change_penalty_applies_between_lines() {
    let network = network(vec![
        company("BusCompany", 1, "Metro"),
        line("BusLine", 2, "L", 1, "warp"),
        line("BusLine", 3, "M", 1, "warp"),
        stop("BusStop", 10, "A", 1, 0.0, &[(11, 2)]),
        stop("BusStop", 11, "B", 1, 10.0, &[(12, 3)]),
        stop("BusStop", 12, "C", 1, 20.0, &[]),
    ]);

    let itinerary = found(find_route(&network, NodeId(10), NodeId(12), &bus_config()).unwrap());
    assert_eq!(itinerary.legs(), ["Take Metro L to B", "Take Metro M to C"]);
    assert_eq!(itinerary.total_cost(), 10.0 + 10.0 + 15.0);
}

#[test]
fn one_way_connection_is_respected() {
    let network = network(vec![
        company("SeaCompany", 1, "Ferries"),
        line("SeaLine", 2, "F", 1, "warp"),
        json!({
            "type": "SeaStop", "i": 3, "codes": ["A"], "company": 1, "coordinates": [0, 0],
            "connections": {"4": [{"line": 2, "direction": {"direction": 4, "one_way": true}}]}
        }),
        json!({
            "type": "SeaStop", "i": 4, "codes": ["B"], "company": 1, "coordinates": [50, 0],
            "connections": {"3": [{"line": 2, "direction": {"direction": 4, "one_way": true}}]}
        }),
    ]);
    let config = CostConfig::default();

    assert!(matches!(
        find_route(&network, NodeId(3), NodeId(4), &config).unwrap(),
        RouteOutcome::Found(_)
    ));
    assert_eq!(
        find_route(&network, NodeId(4), NodeId(3), &config).unwrap(),
        RouteOutcome::NoRoute
    );
}

#[test]
fn disabling_a_mode_removes_routes_that_need_it() {
    let network = network(vec![
        company("RailCompany", 1, "Intra"),
        line("RailLine", 2, "R1", 1, "traincarts"),
        stop("RailStation", 3, "A", 1, 0.0, &[(4, 2)]),
        stop("RailStation", 4, "B", 1, 300.0, &[]),
    ]);

    let itinerary = found(
        find_route(&network, NodeId(3), NodeId(4), &CostConfig::default()).unwrap(),
    );
    assert_eq!(itinerary.total_cost(), 30.0);

    for disabled in [Mode::Rail, Mode::Traincarts] {
        let config = CostConfig::default().with_modes(ModeSet::all().without(disabled));
        assert_eq!(
            find_route(&network, NodeId(3), NodeId(4), &config).unwrap(),
            RouteOutcome::NoRoute,
            "route should need {disabled}"
        );
    }
}

#[test]
fn same_origin_and_destination_skips_search() {
    let network = network(vec![]);
    let outcome = find_route(&network, NodeId(999), NodeId(999), &CostConfig::default()).unwrap();
    assert_eq!(outcome, RouteOutcome::AlreadyThere);
    assert_eq!(outcome.lines(), vec!["Already there"]);
}

#[test]
fn isolated_destination_is_unreachable() {
    let network = network(vec![
        json!({"type": "Town", "i": 1, "name": "Lakeside", "coordinates": [0, 0]}),
        json!({"type": "Town", "i": 2, "name": "Island", "coordinates": [10, 0]}),
    ]);
    let outcome = find_route(&network, NodeId(1), NodeId(2), &CostConfig::default()).unwrap();
    assert_eq!(outcome.lines(), vec!["No route found"]);
}

#[test]
fn shared_facility_costs_exactly_change_cost() {
    let network = network(vec![
        company("BusCompany", 1, "Metro"),
        company("RailCompany", 2, "Intra"),
        json!({"type": "BusStop", "i": 3, "codes": ["X"], "company": 1,
               "coordinates": [0, 0], "shared_facility": [4]}),
        json!({"type": "RailStation", "i": 4, "codes": ["Y"], "company": 2,
               "coordinates": [100000, 0], "shared_facility": [3]}),
    ]);

    let itinerary = found(
        find_route(&network, NodeId(3), NodeId(4), &CostConfig::default()).unwrap(),
    );
    assert_eq!(itinerary.total_cost(), 10.0);
    assert_eq!(itinerary.legs(), ["Change to RailStation Intra Y"]);
}

#[test]
fn missing_identifier_is_fatal() {
    let network = network(vec![json!({"type": "Town", "i": 1, "name": "Lakeside"})]);
    let err = find_route(&network, NodeId(1), NodeId(42), &CostConfig::default()).unwrap_err();
    assert!(matches!(err, SearchError::Network(LookupError::NotFound { id: NodeId(42), .. })));

    let dangling = network_with_dangling_proximity();
    let err = find_route(&dangling, NodeId(1), NodeId(2), &CostConfig::default()).unwrap_err();
    assert_eq!(
        err,
        SearchError::Network(LookupError::NotFound {
            id: NodeId(77),
            expected: "node"
        })
    );
}

fn network_with_dangling_proximity() -> NetworkSnapshot {
    network(vec![
        json!({"type": "Town", "i": 1, "name": "A", "proximity": {"77": {"distance": 5.0}}}),
        json!({"type": "Town", "i": 2, "name": "B"}),
    ])
}

#[test]
fn invalid_config_is_rejected() {
    let network = network(vec![
        json!({"type": "Town", "i": 1, "name": "A"}),
        json!({"type": "Town", "i": 2, "name": "B"}),
    ]);
    let mut config = CostConfig::default();
    config.flying_speed = 0.0;
    assert!(matches!(
        find_route(&network, NodeId(1), NodeId(2), &config),
        Err(SearchError::InvalidConfig(_))
    ));
}

#[test]
fn expansion_budget_is_enforced() {
    let network = network(vec![
        company("BusCompany", 1, "Metro"),
        line("BusLine", 2, "L", 1, "warp"),
        stop("BusStop", 10, "A", 1, 0.0, &[(11, 2)]),
        stop("BusStop", 11, "B", 1, 10.0, &[(12, 2)]),
        stop("BusStop", 12, "C", 1, 20.0, &[(13, 2)]),
        stop("BusStop", 13, "D", 1, 30.0, &[]),
    ]);

    let tight = bus_config().with_max_expansions(Some(2));
    assert_eq!(
        find_route(&network, NodeId(10), NodeId(13), &tight).unwrap_err(),
        SearchError::BudgetExhausted { expansions: 2 }
    );

    let enough = bus_config().with_max_expansions(Some(3));
    assert!(find_route(&network, NodeId(10), NodeId(13), &enough).is_ok());
}

#[test]
fn endpoints_without_coordinates_produce_warnings() {
    let network = network(vec![
        json!({"type": "Town", "i": 1, "name": "Lakeside", "proximity": {"2": {"distance": 80.0}}}),
        json!({"type": "Town", "i": 2, "name": "Hillcrest", "coordinates": [80, 0]}),
    ]);

    let lines = find_route(&network, NodeId(1), NodeId(2), &CostConfig::default())
        .unwrap()
        .lines();
    assert_eq!(lines[0], "Fly/walk 80 blocks to Town Hillcrest");
    assert_eq!(lines[1], "Estimated travel time: 20s");
    assert_eq!(lines.len(), 3);
    assert!(lines[2].starts_with("Warning: the origin Town Lakeside"));
}

#[test]
fn flight_between_airports() {
    let network = network(vec![
        company("AirAirline", 1, "MoulinAir"),
        json!({"type": "AirAirport", "i": 2, "code": "PCE", "names": ["Pearl"],
               "gates": [4], "coordinates": [0, 0]}),
        json!({"type": "AirAirport", "i": 3, "code": "DBI", "names": ["Deadbush"],
               "gates": [5], "coordinates": [0, 2000]}),
        json!({"type": "AirGate", "i": 4, "code": "A1", "airport": 2, "flights": [6]}),
        json!({"type": "AirGate", "i": 5, "code": "B2", "airport": 3, "flights": [6]}),
        json!({"type": "AirFlight", "i": 6, "codes": ["MA1"], "airline": 1,
               "gates": [4, 5], "mode": "warp plane"}),
    ]);

    let itinerary = found(
        find_route(&network, NodeId(2), NodeId(3), &CostConfig::default()).unwrap(),
    );
    assert_eq!(
        itinerary.legs(),
        [
            "Go to gate A1",
            "At gate A1, take MoulinAir MA1 to Deadbush (DBI) (gate B2)",
        ]
    );
    // Gate, flight, then the free step from the arrival gate to its airport.
    assert_eq!(itinerary.total_cost(), 20.0);
    assert!(itinerary.warnings().is_empty());
}

fn spawn_network() -> NetworkSnapshot {
    network(vec![
        json!({"type": "Town", "i": 1, "name": "Lakeside", "coordinates": [5000, 5000]}),
        json!({"type": "SpawnWarp", "i": 2, "name": "Central Spawn", "coordinates": [0, 0],
               "proximity": {"3": {"distance": 40.0}}}),
        json!({"type": "Town", "i": 3, "name": "Hillcrest", "coordinates": [40, 0]}),
    ])
}

#[test]
fn spawn_warps_are_seeded() {
    let network = spawn_network();
    let itinerary = found(
        find_route(&network, NodeId(1), NodeId(3), &CostConfig::default()).unwrap(),
    );
    assert_eq!(
        itinerary.legs(),
        [
            "Take spawn warp to Central Spawn",
            "Fly/walk 40 blocks to Town Hillcrest",
        ]
    );
    assert_eq!(itinerary.total_cost(), 10.0 + 40.0 / 8.0 + 10.0);
}

#[test]
fn spawn_warps_need_their_mode() {
    let network = spawn_network();
    let config = CostConfig::default().with_modes(ModeSet::all().without(Mode::SpawnWarp));
    assert_eq!(
        find_route(&network, NodeId(1), NodeId(3), &config).unwrap(),
        RouteOutcome::NoRoute
    );
}

#[test]
fn repeated_searches_agree() {
    let network = network(vec![
        company("BusCompany", 1, "Metro"),
        line("BusLine", 2, "L", 1, "warp"),
        line("BusLine", 3, "M", 1, "warp"),
        stop("BusStop", 10, "A", 1, 0.0, &[(11, 2), (11, 3), (12, 3)]),
        stop("BusStop", 11, "B", 1, 10.0, &[(13, 2), (13, 3)]),
        stop("BusStop", 12, "C", 1, 20.0, &[(13, 3)]),
        stop("BusStop", 13, "D", 1, 30.0, &[]),
    ]);
    let config = bus_config();

    let first = find_route(&network, NodeId(10), NodeId(13), &config).unwrap();
    for _ in 0..10 {
        assert_eq!(find_route(&network, NodeId(10), NodeId(13), &config).unwrap(), first);
    }
}

#[test]
fn planner_runs_over_a_trait_object() {
    let network = spawn_network();
    let view: &dyn NetworkView = &network;
    let config = CostConfig::default();
    let outcome = Planner::new(view, &config).route(NodeId(1), NodeId(3)).unwrap();
    assert!(outcome.itinerary().is_some());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const LINE_MODES: [&str; 4] = ["warp", "traincarts", "vehicles", "cart"];

    /// A rail network of `xs.len()` stations on up to four lines.
    fn rail_network(xs: &[f64], edges: &[(usize, usize, usize)]) -> NetworkSnapshot {
        let mut nodes = vec![company("RailCompany", 1, "Intra")];
        for (k, mode) in LINE_MODES.iter().enumerate() {
            nodes.push(line("RailLine", 2 + k as u32, &format!("R{k}"), 1, mode));
        }
        for (k, &x) in xs.iter().enumerate() {
            let connections: Vec<(u32, u32)> = edges
                .iter()
                .filter(|(from, to, _)| *from == k && *to < xs.len() && to != from)
                .map(|&(_, to, l)| (10 + to as u32, 2 + l as u32))
                .collect();
            nodes.push(stop("RailStation", 10 + k as u32, &format!("S{k}"), 1, x, &connections));
        }
        network(nodes)
    }

    proptest! {
        #[test]
        fn routes_are_non_negative_and_deterministic(
            xs in prop::collection::vec(-1000.0f64..1000.0, 2..8),
            edges in prop::collection::vec((0usize..8, 0usize..8, 0usize..4), 0..20),
            change_cost in 0.0f64..50.0,
        ) {
            let network = rail_network(&xs, &edges);
            let mut config = CostConfig::default();
            config.change_cost = change_cost;
            let last = NodeId(10 + xs.len() as u32 - 1);

            let first = find_route(&network, NodeId(10), last, &config).unwrap();
            let second = find_route(&network, NodeId(10), last, &config).unwrap();
            prop_assert_eq!(&first, &second);

            if let Some(itinerary) = first.itinerary() {
                prop_assert!(itinerary.total_cost() >= 0.0);
                prop_assert!(!itinerary.legs().is_empty());
            }
        }

        #[test]
        fn direct_ride_bounds_the_cost(x in 1.0f64..5000.0) {
            let network = rail_network(&[0.0, x], &[(0, 1, 1)]);
            let config = CostConfig::default();

            let itinerary = match find_route(&network, NodeId(10), NodeId(11), &config).unwrap() {
                RouteOutcome::Found(itinerary) => itinerary,
                other => return Err(TestCaseError::fail(format!("no route: {other:?}"))),
            };
            prop_assert!((itinerary.total_cost() - x / config.traincarts_speed).abs() < 1e-9);
        }
    }
}
