//! Health check handlers for Kubernetes probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses for Kubernetes liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Venue name, when the description carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,

    /// Number of nodes loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes_loaded: Option<usize>,

    /// Number of undirected edges loaded (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges_loaded: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            venue: None,
            nodes_loaded: None,
            edges_loaded: None,
        }
    }

    /// Create a ready status with graph information.
    pub fn ready(
        service: &str,
        version: &str,
        venue: Option<&str>,
        nodes: usize,
        edges: usize,
    ) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            venue: venue.map(str::to_string),
            nodes_loaded: Some(nodes),
            edges_loaded: Some(edges),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            ..Self::alive(service, version)
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"venueroute-service","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once a non-empty venue graph is loaded.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    let graph = state.graph();
    if graph.is_empty() {
        let status = HealthStatus::not_ready(service, version, "no venue nodes loaded");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(
        service,
        version,
        graph.name(),
        graph.node_count(),
        graph.edge_count(),
    );
    (StatusCode::OK, Json(status)).into_response()
}
