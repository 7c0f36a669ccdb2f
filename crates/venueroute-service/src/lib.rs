//! HTTP service for accessible, crowd-aware venue routing.
//!
//! This crate provides the HTTP glue around `venueroute-lib`:
//!
//! - [`AppState`]: The venue graph and routing configuration, loaded once
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! Handlers are thin; all routing behavior lives in `venueroute-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON / query string                        │
//! │  - Validate parameters                                      │
//! │  - Call venueroute-lib APIs                                 │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![deny(warnings)]

mod handlers;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub use handlers::{markers_handler, nearest_handler, safe_route_handler};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, log_service_start, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_nodes_located, record_route_calculated,
    record_route_failed, record_route_hops, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId};
pub use problem::{
    failure_reason, from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{
    MarkersQuery, NearestQuery, SafeRouteRequest, Validate, DEFAULT_MARKER_CATEGORIES,
    MAX_NEAREST_LIMIT,
};
pub use response::{MarkersResponse, NearestResponse, SafeRouteResponse};
pub use state::{AppState, AppStateError};

/// Origins allowed when `CORS_ALLOWED_ORIGINS` is unset.
pub const DEFAULT_CORS_ORIGINS: [&str; 6] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:5000",
    "http://localhost:8000",
];

/// Build the service router with all endpoints and layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/safe-route", post(safe_route_handler))
        .route("/api/v1/markers", get(markers_handler))
        .route("/api/v1/nearest", get(nearest_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&cors_origins_from_env()))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Read allowed origins from `CORS_ALLOWED_ORIGINS` (comma separated).
pub fn cors_origins_from_env() -> Vec<String> {
    match std::env::var("CORS_ALLOWED_ORIGINS") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect(),
        _ => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
    }
}

/// CORS layer for the given origins. `*` allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderName::from_static(middleware::REQUEST_ID_HEADER),
        ])
}
