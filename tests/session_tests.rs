//! Session setup against the in-memory road network

use green_wave::simulation::{
    start_session, RoadClass, RoadGraphProvider, RoadNetwork, RoutingProvider, SessionStart,
    SignalPolicy, SimConfig, Waypoint,
};

const ORIGIN: Waypoint = Waypoint {
    lat: 30.7150,
    lon: 76.7600,
};
const BLOCK: f64 = 0.002;

fn grid_point(row: usize, col: usize) -> Waypoint {
    Waypoint::new(ORIGIN.lat + row as f64 * BLOCK, ORIGIN.lon + col as f64 * BLOCK)
}

#[test]
fn test_grid_city_structure() {
    let network = RoadNetwork::grid_city(ORIGIN, 3, BLOCK);
    assert_eq!(network.junction_count(), 9);
    assert_eq!(network.road_count(), 12);

    let junctions = network.junctions();
    let degrees: Vec<usize> = junctions.iter().map(|j| j.degree).collect();
    assert_eq!(degrees.iter().filter(|d| **d == 4).count(), 1);
    assert_eq!(degrees.iter().filter(|d| **d == 3).count(), 4);
    assert_eq!(degrees.iter().filter(|d| **d == 2).count(), 4);
    assert!(junctions.iter().all(|j| j.road_classes.len() == j.degree));
}

#[test]
fn test_route_follows_grid() {
    let network = RoadNetwork::grid_city(ORIGIN, 4, BLOCK);
    // Slightly off-grid coordinates snap to the nearest junctions
    let start = Waypoint::new(grid_point(0, 0).lat + 0.0001, grid_point(0, 0).lon);
    let route = network.route(start, grid_point(3, 0)).unwrap();

    assert_eq!(route.len(), 4);
    assert_eq!(route[0], grid_point(0, 0));
    assert_eq!(route[3], grid_point(3, 0));
}

#[test]
fn test_route_picks_shortest_path() {
    let network = RoadNetwork::grid_city(ORIGIN, 4, BLOCK);
    let route = network.route(grid_point(0, 0), grid_point(2, 3)).unwrap();
    // Manhattan distance of five blocks means six junctions
    assert_eq!(route.len(), 6);
}

#[test]
fn test_disconnected_network_is_unreachable() {
    let mut network = RoadNetwork::new();
    let a = network.add_junction(grid_point(0, 0));
    let b = network.add_junction(grid_point(0, 1));
    let c = network.add_junction(grid_point(5, 5));
    network.add_road(a, b, RoadClass::Residential).unwrap();
    assert!(network.add_road(a, a, RoadClass::Residential).is_err());

    assert!(network.route(grid_point(0, 0), grid_point(5, 5)).is_none());
    assert!(network.find_path(a, c).is_none());

    let outcome = start_session(
        &network,
        &network,
        grid_point(0, 0),
        grid_point(5, 5),
        SimConfig::with_seed(3),
    )
    .unwrap();
    assert!(matches!(outcome, SessionStart::Unreachable));
}

#[test]
fn test_empty_network_is_unreachable() {
    let network = RoadNetwork::new();
    let outcome = start_session(
        &network,
        &network,
        grid_point(0, 0),
        grid_point(1, 1),
        SimConfig::default(),
    )
    .unwrap();
    assert!(matches!(outcome, SessionStart::Unreachable));
}

#[test]
fn test_invalid_config_is_an_error() {
    let network = RoadNetwork::grid_city(ORIGIN, 3, BLOCK);
    let config = SimConfig {
        spacing_m: 0.0,
        ..SimConfig::default()
    };
    assert!(start_session(&network, &network, grid_point(0, 0), grid_point(2, 2), config).is_err());
}

#[test]
fn test_signal_policies_on_grid() {
    // 5x5 grid: nine interior junctions, five of them on the middle row or column
    let network = RoadNetwork::grid_city(ORIGIN, 5, BLOCK);

    let count = |policy| {
        let config = SimConfig {
            signal_policy: policy,
            ..SimConfig::with_seed(11)
        };
        match start_session(&network, &network, grid_point(0, 0), grid_point(4, 4), config).unwrap() {
            SessionStart::Started { state, .. } => state.signals.len(),
            SessionStart::Unreachable => panic!("grid should be connected"),
        }
    };

    assert_eq!(count(SignalPolicy::AllJunctions), 9);
    assert_eq!(count(SignalPolicy::MajorJunctions), 5);
    assert_eq!(count(SignalPolicy::NamedIntersections), 5);
}

#[test]
fn test_session_runs_to_destination() {
    let network = RoadNetwork::grid_city(ORIGIN, 6, BLOCK);
    let outcome = start_session(
        &network,
        &network,
        grid_point(0, 2),
        grid_point(5, 2),
        SimConfig::with_seed(5),
    )
    .unwrap();

    let SessionStart::Started { controller, mut state } = outcome else {
        panic!("route should exist");
    };
    assert_eq!(controller.path().points()[0], grid_point(0, 2));
    assert_eq!(*controller.path().points().last().unwrap(), grid_point(5, 2));

    let mut previous = 0;
    while !state.is_completed() {
        let (next, snapshot) = controller.tick(state);
        assert!(snapshot.index >= previous);
        if snapshot.waiting {
            assert_eq!(snapshot.index, previous);
        }
        assert!(next.signals.signals().iter().all(|s| s.timer() < 60));
        previous = snapshot.index;
        state = next;
        assert!(state.tick < 2000, "session should finish");
    }
    assert_eq!(state.vehicle.index, controller.path().len() - 1);
}

#[test]
fn test_seeded_sessions_match() {
    let network = RoadNetwork::grid_city(ORIGIN, 5, BLOCK);
    let run = || match start_session(
        &network,
        &network,
        grid_point(0, 0),
        grid_point(4, 4),
        SimConfig::with_seed(99),
    )
    .unwrap()
    {
        SessionStart::Started { controller, mut state } => {
            let mut snapshots = Vec::new();
            for _ in 0..50 {
                let (next, snapshot) = controller.tick(state);
                snapshots.push(snapshot);
                state = next;
            }
            snapshots
        }
        SessionStart::Unreachable => panic!("grid should be connected"),
    };

    assert_eq!(run(), run());
}
