//! Venue routing library entry points.
//!
//! This crate loads a venue description, builds an immutable walking graph,
//! resolves coordinates to nodes, and plans accessible, crowd-aware routes.
//! Higher-level consumers (CLI, HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod spatial;
pub mod venue;

pub use config::{RoutingConfig, DEFAULT_CROWD_PENALTY};
pub use error::{Error, Result};
pub use graph::{build_graph, Edge, Graph, NodeIndex};
pub use output::{assemble_route, RouteLeg, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{find_route, find_route_dijkstra, PathConstraints, PathResult};
pub use routing::{
    list_landmarks, plan_route, Destination, RoutePlan, RoutePreferences, RouteRequest,
};
pub use spatial::{
    nearest_node, nearest_nodes, resolve_nearest, Coordinate, Neighbour, NeighbourQuery,
};
pub use venue::{load_venue, Category, EdgeSpec, Node, NodeId, Venue};
