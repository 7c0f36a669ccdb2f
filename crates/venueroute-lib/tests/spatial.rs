mod common;

use common::{coordinate_of, edge, node, sample_graph};
use venueroute_lib::{
    nearest_node, nearest_nodes, plan_route, resolve_nearest, Category, Coordinate, Error, Graph,
    NeighbourQuery, RouteRequest, RoutingConfig, Venue,
};

/// Two nodes far apart on a huge coordinate scale.
fn wide_graph() -> Graph {
    let venue = Venue {
        name: Some("wide".to_string()),
        nodes: vec![
            node("far", 0.0, 0.0, Category::Entry),
            node("near", 1.9e200, 0.0, Category::Exit),
        ],
        edges: vec![edge("far", "near", 10.0, true, 0.0)],
    };
    Graph::build(&venue).expect("wide venue is valid")
}

/// Nodes near the top of the representable range, far from any negative query.
fn edge_of_range_graph() -> Graph {
    let venue = Venue {
        name: None,
        nodes: vec![
            node("upper", 1.0e308, 0.0, Category::Entry),
            node("top", 1.5e308, 0.0, Category::Exit),
        ],
        edges: vec![edge("upper", "top", 10.0, true, 0.0)],
    };
    Graph::build(&venue).expect("venue is valid")
}

#[test]
fn every_node_resolves_to_itself() {
    let graph = sample_graph();
    for node in graph.nodes() {
        let resolved = resolve_nearest(&graph, node.lat, node.lng).expect("non-empty graph");
        assert_eq!(resolved, node.id);
    }
}

#[test]
fn far_away_point_still_resolves() {
    let graph = sample_graph();
    // No coverage radius: a point kilometres away snaps to the closest node.
    let resolved = resolve_nearest(&graph, 0.0, 0.0).expect("non-empty graph");
    assert!(graph.node(&resolved).is_some());
}

#[test]
fn nearest_landmarks_are_ordered_by_distance() {
    let graph = sample_graph();
    let origin = coordinate_of(&graph, "entry_main");

    let results = nearest_nodes(
        &graph,
        origin,
        &NeighbourQuery::nearest(3).with_categories([Category::Medical, Category::Exit]),
    );
    assert!(!results.is_empty());
    assert!(results.len() <= 3);
    assert!(results
        .windows(2)
        .all(|pair| pair[0].distance <= pair[1].distance));
    assert!(results
        .iter()
        .all(|n| matches!(n.node.category, Category::Medical | Category::Exit)));
}

#[test]
fn zero_radius_only_matches_exact_position() {
    let graph = sample_graph();
    let at = coordinate_of(&graph, "food_court");

    let results = nearest_nodes(&graph, at, &NeighbourQuery::within_radius(5, 0.0));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].node.id, "food_court");
    assert_eq!(results[0].distance, 0.0);

    let nowhere = nearest_nodes(
        &graph,
        Coordinate::new(at.lat + 1.0, at.lng),
        &NeighbourQuery::within_radius(5, 0.0),
    );
    assert!(nowhere.is_empty());
}

#[test]
fn large_finite_coordinates_resolve_to_the_closest_node() {
    let graph = wide_graph();

    let resolved = resolve_nearest(&graph, 2e200, 0.0).expect("distance is representable");
    assert_eq!(resolved, "near");

    let request = RouteRequest::to_point(Coordinate::new(2e200, 0.0), Coordinate::new(0.0, 0.0));
    let plan = plan_route(&graph, &RoutingConfig::default(), &request).expect("valid query");
    assert_eq!(plan.start, "near");
    let ids: Vec<_> = plan.steps.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "far"]);
}

#[test]
fn unrepresentable_distance_is_an_invalid_coordinate() {
    let graph = edge_of_range_graph();

    let err = resolve_nearest(&graph, -1.0e308, 0.0).unwrap_err();
    assert!(matches!(err, Error::InvalidCoordinate { .. }));
    assert!(err.is_invalid_query());

    let request = RouteRequest::to_category(Coordinate::new(-1.0e308, 0.0), Category::Exit);
    let err = plan_route(&graph, &RoutingConfig::default(), &request).unwrap_err();
    assert!(matches!(err, Error::InvalidCoordinate { .. }));
}

#[test]
fn nan_point_is_rejected_by_the_locator() {
    let graph = sample_graph();
    assert!(matches!(
        nearest_node(&graph, Coordinate::new(f64::NAN, -97.77)),
        Err(Error::InvalidCoordinate { .. })
    ));
}
