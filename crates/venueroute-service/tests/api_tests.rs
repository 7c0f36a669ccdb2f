//! HTTP API tests for the venue routing service.

mod common;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};

use common::{empty_state, line_state, sample, sample_state, server};

fn route_ids(body: &Value) -> Vec<String> {
    body["route"]
        .as_array()
        .expect("route array")
        .iter()
        .map(|node| node["id"].as_str().expect("node id").to_string())
        .collect()
}

fn assert_problem(body: &Value, status: u16) {
    assert_eq!(body["status"], status);
    assert!(body["type"].as_str().is_some());
    assert!(body["detail"].as_str().is_some());
}

// =============================================================================
// POST /api/v1/safe-route
// =============================================================================

#[tokio::test]
async fn closest_exit_routes_through_the_medical_tent() {
    let server = server(sample_state());
    let (lat, lng) = sample::ENTRY_MAIN;

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({"start_lat": lat, "start_lng": lng, "closest_exit": true}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        route_ids(&body),
        vec!["entry_main", "path_1", "medical_tent", "path_2", "path_3", "exit_south"]
    );
    assert_eq!(body["hops"], 5);
    assert_eq!(body["distance"].as_f64(), Some(870.0));
}

#[tokio::test]
async fn wheelchair_route_avoids_the_steep_path() {
    let server = server(sample_state());
    let (start_lat, start_lng) = sample::STAGE_TMOBILE;
    let (end_lat, end_lng) = sample::EXIT_SOUTH;

    let walking: Value = server
        .post("/api/v1/safe-route")
        .json(&json!({
            "start_lat": start_lat, "start_lng": start_lng,
            "end_lat": end_lat, "end_lng": end_lng
        }))
        .await
        .json();
    assert_eq!(
        route_ids(&walking),
        vec!["stage_tmobile", "path_steep", "exit_south"]
    );

    let wheelchair: Value = server
        .post("/api/v1/safe-route")
        .json(&json!({
            "start_lat": start_lat, "start_lng": start_lng,
            "end_lat": end_lat, "end_lng": end_lng,
            "prefer_wheelchair": true
        }))
        .await
        .json();
    assert_eq!(
        route_ids(&wheelchair),
        vec!["stage_tmobile", "path_3", "exit_south"]
    );
    assert_eq!(wheelchair["distance"].as_f64(), Some(400.0));
}

#[tokio::test]
async fn target_category_selects_nearest_medical_point() {
    let server = server(sample_state());
    let (lat, lng) = sample::ENTRY_MAIN;

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({
            "start_lat": lat, "start_lng": lng,
            "closest_exit": true,
            "target_category": "medical"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        route_ids(&body),
        vec!["entry_main", "path_1", "medical_tent"]
    );
    assert_eq!(body["distance"].as_f64(), Some(300.0));
}

#[tokio::test]
async fn unreachable_destination_returns_empty_route() {
    let server = server(line_state());

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({
            "start_lat": 0.0, "start_lng": 0.0,
            "end_lat": 20.0, "end_lng": 0.0,
            "prefer_wheelchair": true
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["route"], json!([]));
    assert_eq!(body["hops"], 0);
}

#[tokio::test]
async fn inaccessible_link_is_walkable_without_wheelchair() {
    let server = server(line_state());

    let body: Value = server
        .post("/api/v1/safe-route")
        .json(&json!({
            "start_lat": 0.0, "start_lng": 0.0,
            "end_lat": 20.0, "end_lng": 0.0
        }))
        .await
        .json();

    assert_eq!(route_ids(&body), vec!["A", "B", "C"]);
    assert_eq!(body["cost"].as_f64(), Some(20.0));
}

#[tokio::test]
async fn missing_destination_is_a_bad_request() {
    let server = server(sample_state());

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({"start_lat": 30.2690, "start_lng": -97.7710}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.header("content-type"),
        HeaderValue::from_static("application/problem+json")
    );
    assert_problem(&response.json(), 400);
}

#[tokio::test]
async fn half_destination_coordinate_is_a_bad_request() {
    let server = server(sample_state());

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({"start_lat": 30.2690, "start_lng": -97.7710, "end_lat": 30.2640}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("latitude and longitude"));
}

#[tokio::test]
async fn unknown_target_category_is_a_bad_request() {
    let server = server(sample_state());

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({
            "start_lat": 30.2690, "start_lng": -97.7710,
            "target_category": "toilets"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["detail"].as_str().unwrap().contains("toilets"));
}

#[tokio::test]
async fn malformed_body_is_a_problem_document() {
    let server = server(sample_state());

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({"start_lat": "north"}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_problem(&response.json(), 400);
}

#[tokio::test]
async fn empty_venue_is_service_unavailable() {
    let server = server(empty_state());

    let response = server
        .post("/api/v1/safe-route")
        .json(&json!({
            "start_lat": 0.0, "start_lng": 0.0,
            "end_lat": 1.0, "end_lng": 1.0
        }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_problem(&response.json(), 503);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let server = server(sample_state());

    let response = server
        .post("/api/v1/safe-route")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-abc"),
        )
        .json(&json!({"start_lat": 30.2690, "start_lng": -97.7710}))
        .await;

    assert_eq!(
        response.header("x-request-id"),
        HeaderValue::from_static("trace-abc")
    );
    let body: Value = response.json();
    assert_eq!(body["instance"], "trace-abc");
}

// =============================================================================
// GET /api/v1/markers
// =============================================================================

#[tokio::test]
async fn markers_default_to_safety_landmarks() {
    let server = server(sample_state());

    let response = server.get("/api/v1/markers").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let ids: Vec<&str> = body["markers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["entry_main", "stage_amex", "stage_tmobile", "medical_tent", "exit_south"]
    );
    assert_eq!(body["count"], 5);
}

#[tokio::test]
async fn markers_filter_by_category() {
    let server = server(sample_state());

    let body: Value = server
        .get("/api/v1/markers")
        .add_query_param("categories", "food,exit")
        .await
        .json();

    assert_eq!(body["count"], 2);
    assert_eq!(body["markers"][0]["id"], "food_court");
    assert_eq!(body["markers"][1]["id"], "exit_south");
}

#[tokio::test]
async fn markers_reject_unknown_category() {
    let server = server(sample_state());

    let response = server
        .get("/api/v1/markers")
        .add_query_param("categories", "medical,bar")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_problem(&response.json(), 400);
}

// =============================================================================
// GET /api/v1/nearest
// =============================================================================

#[tokio::test]
async fn nearest_returns_exact_node_first() {
    let server = server(sample_state());
    let (lat, lng) = sample::MEDICAL_TENT;

    let response = server
        .get("/api/v1/nearest")
        .add_query_param("lat", lat)
        .add_query_param("lng", lng)
        .add_query_param("limit", 3)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 3);
    assert_eq!(body["nodes"][0]["node"]["id"], "medical_tent");
    assert_eq!(body["nodes"][0]["distance"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn nearest_rejects_zero_limit() {
    let server = server(sample_state());

    let response = server
        .get("/api/v1/nearest")
        .add_query_param("lat", 30.0)
        .add_query_param("lng", -97.0)
        .add_query_param("limit", 0)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearest_requires_coordinates() {
    let server = server(sample_state());

    let response = server.get("/api/v1/nearest").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_problem(&response.json(), 400);
}

#[tokio::test]
async fn nearest_on_empty_venue_is_service_unavailable() {
    let server = server(empty_state());

    let response = server
        .get("/api/v1/nearest")
        .add_query_param("lat", 0.0)
        .add_query_param("lng", 0.0)
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

// =============================================================================
// Health and metrics
// =============================================================================

#[tokio::test]
async fn liveness_probe_is_ok() {
    let server = server(empty_state());

    let response = server.get("/health/live").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn readiness_reports_loaded_graph() {
    let server = server(sample_state());

    let body: Value = server.get("/health/ready").await.json();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["venue"], "Zilker Park festival grounds");
    assert_eq!(body["nodes_loaded"], 10);
    assert_eq!(body["edges_loaded"], 10);
}

#[tokio::test]
async fn readiness_fails_without_nodes() {
    let server = server(empty_state());

    let response = server.get("/health/ready").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn vite_dev_origin_is_allowed_by_default() {
    let server = server(sample_state());

    let response = server
        .get("/health/live")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:5173"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header("access-control-allow-origin"),
        HeaderValue::from_static("http://localhost:5173")
    );
}

#[tokio::test]
async fn metrics_endpoint_responds() {
    let server = server(sample_state());

    let response = server.get("/metrics").await;

    response.assert_status_ok();
}
