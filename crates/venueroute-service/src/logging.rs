//! Tracing setup for the service binary.
//!
//! `LOG_FORMAT=text` (or `pretty`) switches to multi-line human output;
//! anything else keeps one JSON object per event so log shippers can index
//! the `venue`, `request_id` and routing fields. `RUST_LOG` overrides the
//! configured level filter.

use std::net::SocketAddr;

use tracing_subscriber::{fmt, prelude::*, util::TryInitError, EnvFilter};

use crate::AppState;

const DEFAULT_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl LogFormat {
    /// Unknown names fall back to JSON.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Self::Text,
            _ => Self::Json,
        }
    }
}

/// Logging options read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive used when `RUST_LOG` is unset or unparsable.
    pub level: String,
    /// Reported on the startup event; `SERVICE_NAME` wins over the default.
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: DEFAULT_LEVEL.to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    /// Read `LOG_FORMAT`, `RUST_LOG` and `SERVICE_NAME`.
    pub fn from_env() -> Self {
        Self {
            format: std::env::var("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            level: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LEVEL.to_string()),
            service: std::env::var("SERVICE_NAME").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Fallback service name, applied only when none was configured.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }

    fn service_name(&self) -> &str {
        self.service.as_deref().unwrap_or(env!("CARGO_PKG_NAME"))
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true).with_span_list(false))
            .try_init(),
    }
}

/// Emit the single startup event describing what this instance serves.
pub fn log_service_start(config: &LoggingConfig, state: &AppState, addr: SocketAddr) {
    let graph = state.graph();
    tracing::info!(
        service = config.service_name(),
        version = env!("CARGO_PKG_VERSION"),
        log_format = ?config.format,
        venue = graph.name().unwrap_or("unnamed venue"),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        crowd_penalty = state.config().crowd_penalty,
        addr = %addr,
        "venue routing service starting"
    );
}
