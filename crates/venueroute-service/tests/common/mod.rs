//! Shared state and server fixtures for service integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use venueroute_lib::{Graph, RoutingConfig, Venue};
use venueroute_service::{router, AppState};

/// A venue where A-B is steep, so wheelchair users cannot reach C.
pub const LINE_VENUE: &str = r#"{
    "name": "line",
    "nodes": [
        {"id": "A", "lat": 0.0, "lng": 0.0, "category": "entry"},
        {"id": "B", "lat": 10.0, "lng": 0.0, "category": "path"},
        {"id": "C", "lat": 20.0, "lng": 0.0, "category": "exit"}
    ],
    "edges": [
        {"from": "A", "to": "B", "distance": 10.0, "accessible": false},
        {"from": "B", "to": "C", "distance": 10.0}
    ]
}"#;

/// Coordinates of nodes in the bundled sample venue.
pub mod sample {
    pub const ENTRY_MAIN: (f64, f64) = (30.2690, -97.7710);
    pub const STAGE_TMOBILE: (f64, f64) = (30.2650, -97.7750);
    pub const MEDICAL_TENT: (f64, f64) = (30.2680, -97.7730);
    pub const EXIT_SOUTH: (f64, f64) = (30.2640, -97.7760);
}

pub fn sample_state() -> AppState {
    AppState::load(None, RoutingConfig::default()).expect("sample venue loads")
}

pub fn line_state() -> AppState {
    let venue = Venue::from_json_str(LINE_VENUE).expect("line venue parses");
    let graph = Graph::build(&venue).expect("line venue is valid");
    AppState::from_components(graph, RoutingConfig::default())
}

pub fn empty_state() -> AppState {
    AppState::from_components(Graph::default(), RoutingConfig::default())
}

pub fn server(state: AppState) -> TestServer {
    TestServer::new(router(state)).expect("test server starts")
}
