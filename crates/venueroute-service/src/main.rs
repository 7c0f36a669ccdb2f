//! Venue routing HTTP microservice.
//!
//! # Endpoints
//!
//! - `POST /api/v1/safe-route` - Accessible, crowd-aware route between two points or to a category
//! - `GET /api/v1/markers` - Landmarks of the requested categories
//! - `GET /api/v1/nearest` - Nodes closest to a coordinate
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe
//!
//! # Configuration
//!
//! - `VENUEROUTE_VENUE_PATH` - Venue description JSON (default: bundled sample venue)
//! - `VENUEROUTE_CROWD_PENALTY` - Crowd penalty coefficient (default: 5.0)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` - Disable Prometheus metrics with `false`
//! - `CORS_ALLOWED_ORIGINS` - Comma separated origins, `*` for any

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{error, info, warn};

use venueroute_lib::RoutingConfig;
use venueroute_service::{
    init_logging, init_metrics, log_service_start, router, AppState, LoggingConfig, MetricsConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service("venueroute");
    init_logging(&logging_config)?;

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let routing_config = RoutingConfig::from_env().map_err(|e| {
        error!(error = %e, "invalid routing configuration");
        e
    })?;

    let venue_path = env::var_os("VENUEROUTE_VENUE_PATH").map(PathBuf::from);
    let port: u16 = env::var("SERVICE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    info!(venue_path = ?venue_path, port = port, "starting venue routing service");

    let state = AppState::load(venue_path.as_deref(), routing_config).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log_service_start(&logging_config, &state, addr);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
