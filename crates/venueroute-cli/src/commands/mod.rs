//! Subcommand handlers.
//!
//! `main.rs` parses arguments and loads the venue once; each module here
//! turns its arguments into a library call and renders the result.

pub mod landmarks;
pub mod nearest;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use venueroute_lib::{load_venue, Graph, RoutingConfig, Venue};

/// Load the venue at `path`, or the bundled sample venue when no path is given.
pub fn load_graph(path: Option<&Path>) -> Result<Graph> {
    let venue = match path {
        Some(path) => load_venue(path)
            .with_context(|| format!("failed to load venue from {}", path.display()))?,
        None => Venue::sample().context("failed to parse the bundled sample venue")?,
    };

    let graph = Graph::build(&venue)
        .with_context(|| format!("invalid venue description '{}'", venue.display_name()))?;
    info!(
        venue = venue.display_name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "venue graph ready"
    );
    Ok(graph)
}

/// Resolve routing configuration: an explicit flag wins over the environment.
pub fn routing_config(crowd_penalty: Option<f64>) -> Result<RoutingConfig> {
    let config = match crowd_penalty {
        Some(value) => RoutingConfig::with_crowd_penalty(value),
        None => RoutingConfig::from_env(),
    };
    config.context("invalid routing configuration")
}
