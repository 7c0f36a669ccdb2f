//! Application state for the HTTP service.
//!
//! Handlers access the venue graph and routing configuration through the
//! shared [`AppState`]; nothing is global.

use std::path::Path;
use std::sync::Arc;

use venueroute_lib::{load_venue, Error as LibError, Graph, RoutingConfig, Venue};

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Venue description file not found.
    VenueNotFound(String),

    /// Failed to read or parse the venue description.
    VenueLoad(LibError),

    /// The venue description failed graph validation.
    InvalidVenue(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VenueNotFound(path) => write!(f, "venue description not found: {}", path),
            Self::VenueLoad(e) => write!(f, "failed to load venue description: {}", e),
            Self::InvalidVenue(e) => write!(f, "invalid venue description: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::VenueLoad(e) | Self::InvalidVenue(e) => Some(e),
            Self::VenueNotFound(_) => None,
        }
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. The graph is immutable, so handlers
/// read it without locking.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    graph: Graph,
    config: RoutingConfig,
}

impl AppState {
    /// Load application state from an optional venue file.
    ///
    /// Without a path the bundled sample venue is served.
    pub fn load(venue_path: Option<&Path>, config: RoutingConfig) -> Result<Self, AppStateError> {
        let venue = match venue_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AppStateError::VenueNotFound(path.display().to_string()));
                }
                load_venue(path).map_err(AppStateError::VenueLoad)?
            }
            None => {
                tracing::info!("no venue path configured, serving the bundled sample venue");
                Venue::sample().map_err(AppStateError::VenueLoad)?
            }
        };

        let graph = Graph::build(&venue).map_err(AppStateError::InvalidVenue)?;
        tracing::info!(
            venue = venue.display_name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            crowd_penalty = config.crowd_penalty,
            "venue graph loaded"
        );

        Ok(Self::from_components(graph, config))
    }

    /// Create application state from a pre-built graph.
    pub fn from_components(graph: Graph, config: RoutingConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { graph, config }),
        }
    }

    /// Access the loaded venue graph.
    pub fn graph(&self) -> &Graph {
        &self.inner.graph
    }

    /// Routing configuration applied to every query.
    pub fn config(&self) -> &RoutingConfig {
        &self.inner.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("venue", &self.inner.graph.name())
            .field("node_count", &self.inner.graph.node_count())
            .field("crowd_penalty", &self.inner.config.crowd_penalty)
            .finish()
    }
}
