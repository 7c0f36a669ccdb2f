//! Route planning entry points.
//!
//! This module provides:
//! - [`RouteRequest`] - start coordinate, destination and preferences
//! - [`RoutePlan`] - the assembled route, empty when unreachable
//! - [`plan_route`] - locate, search and assemble in one call
//! - [`list_landmarks`] - addressable points of interest for rendering
//!
//! # Example
//!
//! ```ignore
//! use venueroute_lib::{
//!     plan_route, Category, Coordinate, Graph, RouteRequest, RoutingConfig, Venue,
//! };
//!
//! let graph = Graph::build(&Venue::sample()?)?;
//! let request = RouteRequest::to_category(Coordinate::new(30.2690, -97.7710), Category::Exit)
//!     .with_wheelchair(true);
//! let plan = plan_route(&graph, &RoutingConfig::default(), &request)?;
//! println!("{} hops", plan.hop_count());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::RoutingConfig;
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeIndex};
use crate::output::{assemble_route, RouteLeg};
use crate::path::{find_route_dijkstra, PathConstraints};
use crate::spatial::{nearest_node, Coordinate};
use crate::venue::{Category, Node, NodeId};

/// Caller preferences applied to a single query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePreferences {
    /// Require every edge on the route to be wheelchair accessible.
    #[serde(default)]
    pub wheelchair: bool,
    /// Penalize high-risk edges.
    #[serde(default)]
    pub avoid_crowds: bool,
}

/// Resolved destination criterion for a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Destination {
    /// The node nearest to a coordinate.
    Point(Coordinate),
    /// Whichever node of the category is cheapest to reach.
    Category { category: Category },
}

/// High-level route planning request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub start: Coordinate,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,
    /// Takes precedence over the end coordinate when both are present.
    pub target_category: Option<Category>,
    pub preferences: RoutePreferences,
}

impl RouteRequest {
    /// Route from `start` to the node nearest `end`.
    pub fn to_point(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end_lat: Some(end.lat),
            end_lng: Some(end.lng),
            target_category: None,
            preferences: RoutePreferences::default(),
        }
    }

    /// Route from `start` to the cheapest reachable node of `category`.
    pub fn to_category(start: Coordinate, category: Category) -> Self {
        Self {
            start,
            end_lat: None,
            end_lng: None,
            target_category: Some(category),
            preferences: RoutePreferences::default(),
        }
    }

    pub fn with_wheelchair(mut self, wheelchair: bool) -> Self {
        self.preferences.wheelchair = wheelchair;
        self
    }

    pub fn with_avoid_crowds(mut self, avoid_crowds: bool) -> Self {
        self.preferences.avoid_crowds = avoid_crowds;
        self
    }

    /// Validate the query and resolve its destination criterion.
    pub fn destination(&self) -> Result<Destination> {
        self.start.validate()?;

        if let Some(category) = self.target_category {
            return Ok(Destination::Category { category });
        }

        match (self.end_lat, self.end_lng) {
            (Some(lat), Some(lng)) => Ok(Destination::Point(Coordinate::new(lat, lng).validate()?)),
            (None, None) => Err(Error::MissingDestination),
            _ => Err(Error::IncompleteCoordinate),
        }
    }
}

/// Planned route returned by the library.
///
/// An empty `steps` list means no route exists under the requested
/// constraints; `cost` and `distance` are then zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Node the start coordinate resolved to.
    pub start: NodeId,
    pub destination: Destination,
    pub preferences: RoutePreferences,
    pub steps: Vec<Node>,
    pub legs: Vec<RouteLeg>,
    pub cost: f64,
    pub distance: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Whether a route was found.
    pub fn is_found(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Node the route terminates on, if any.
    pub fn goal(&self) -> Option<&Node> {
        self.steps.last()
    }
}

/// Compute a route for the request.
///
/// Invalid queries and an empty venue are errors; an unreachable destination
/// is not, and yields a plan with no steps.
pub fn plan_route(
    graph: &Graph,
    config: &RoutingConfig,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let destination = request.destination()?;
    let config = config.validate()?;

    let start_index = nearest_node(graph, request.start)?;
    let start_id = graph.nodes()[start_index].id.clone();

    let targets = resolve_targets(graph, &destination)?;
    debug!(
        start = %start_id,
        targets = targets.len(),
        wheelchair = request.preferences.wheelchair,
        avoid_crowds = request.preferences.avoid_crowds,
        "planning route"
    );

    let mut plan = RoutePlan {
        start: start_id,
        destination,
        preferences: request.preferences,
        steps: Vec::new(),
        legs: Vec::new(),
        cost: 0.0,
        distance: 0.0,
    };

    if targets.is_empty() {
        warn!(?destination, "destination matches no venue nodes");
        return Ok(plan);
    }

    let constraints = PathConstraints::new(
        request.preferences.wheelchair,
        request.preferences.avoid_crowds,
        &config,
    );
    let path = find_route_dijkstra(graph, start_index, &targets, &constraints);

    match &path {
        Some(found) => info!(
            start = %plan.start,
            hops = found.hop_count(),
            distance = found.distance,
            cost = found.cost,
            "route found"
        ),
        None => info!(start = %plan.start, "no route under the requested constraints"),
    }

    let (steps, legs) = assemble_route(graph, path.as_ref());
    plan.steps = steps;
    plan.legs = legs;
    if let Some(found) = path {
        plan.cost = found.cost;
        plan.distance = found.distance;
    }
    Ok(plan)
}

fn resolve_targets(graph: &Graph, destination: &Destination) -> Result<Vec<NodeIndex>> {
    match destination {
        Destination::Category { category } => Ok(graph.nodes_in_category(*category)),
        Destination::Point(point) => {
            let index = nearest_node(graph, *point)?;
            Ok(vec![index])
        }
    }
}

/// Nodes whose category is in `categories`, in enumeration order.
///
/// An empty category list selects every landmark category (everything except
/// pure waypoints).
pub fn list_landmarks(graph: &Graph, categories: &[Category]) -> Vec<Node> {
    graph
        .nodes()
        .iter()
        .filter(|node| {
            if categories.is_empty() {
                node.category.is_landmark()
            } else {
                categories.contains(&node.category)
            }
        })
        .cloned()
        .collect()
}
