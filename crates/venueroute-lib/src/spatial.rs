//! Nearest-node lookup over planar venue coordinates.
//!
//! Venues are small (tens to low thousands of nodes), so every query is a
//! linear scan in enumeration order. Distances are planar Euclidean over
//! `(lat, lng)`; no geodesic correction is applied.
//!
//! Ties are always broken by enumeration order, so a replacement index (e.g. a
//! KD-tree) must reproduce that ordering to stay behaviour-compatible.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeIndex};
use crate::venue::{Category, Node, NodeId};

/// Planar position within a venue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Reject NaN and infinite components.
    pub fn validate(self) -> Result<Self> {
        if self.lat.is_finite() && self.lng.is_finite() {
            Ok(self)
        } else {
            Err(Error::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    /// Calculate the planar Euclidean distance to another coordinate.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        dlat.hypot(dlng)
    }
}

impl From<&Node> for Coordinate {
    fn from(node: &Node) -> Self {
        Self {
            lat: node.lat,
            lng: node.lng,
        }
    }
}

/// Query parameters for k-nearest searches.
#[derive(Debug, Clone, Default)]
pub struct NeighbourQuery {
    /// Maximum number of results to return.
    pub k: usize,
    /// Optional radius constraint in coordinate units.
    pub radius: Option<f64>,
    /// Restrict results to these categories; empty means any category.
    pub categories: Vec<Category>,
}

impl NeighbourQuery {
    /// Create a simple k-nearest query without constraints.
    pub fn nearest(k: usize) -> Self {
        Self {
            k,
            radius: None,
            categories: Vec::new(),
        }
    }

    /// Create a query with radius constraint.
    pub fn within_radius(k: usize, radius: f64) -> Self {
        Self {
            k,
            radius: Some(radius),
            categories: Vec::new(),
        }
    }

    /// Restrict the query to the given categories.
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    fn accepts(&self, node: &Node, distance: f64) -> bool {
        if let Some(radius) = self.radius {
            if distance > radius {
                return false;
            }
        }
        self.categories.is_empty() || self.categories.contains(&node.category)
    }
}

/// A node returned from a neighbour query together with its distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbour {
    pub node: Node,
    pub distance: f64,
}

/// Index of the node closest to `point`.
///
/// Only a strictly smaller distance replaces the current best, so the first
/// node in enumeration order wins ties. A point so far out that its distance
/// to the closest node is not representable is rejected rather than snapped
/// to an arbitrary node.
pub fn nearest_node(graph: &Graph, point: Coordinate) -> Result<NodeIndex> {
    let point = point.validate()?;
    let mut best: Option<(NodeIndex, f64)> = None;
    for (index, node) in graph.nodes().iter().enumerate() {
        let distance = point.distance_to(&Coordinate::from(node));
        match best {
            Some((_, current)) if distance >= current => {}
            _ => best = Some((index, distance)),
        }
    }

    match best {
        None => Err(Error::EmptyGraph),
        Some((_, distance)) if !distance.is_finite() => Err(Error::InvalidCoordinate {
            lat: point.lat,
            lng: point.lng,
        }),
        Some((index, _)) => Ok(index),
    }
}

/// Resolve a coordinate to the identifier of the closest node.
pub fn resolve_nearest(graph: &Graph, lat: f64, lng: f64) -> Result<NodeId> {
    let index = nearest_node(graph, Coordinate::new(lat, lng))?;
    let node = graph.node_at(index).ok_or(Error::EmptyGraph)?;
    Ok(node.id.clone())
}

/// Up to `query.k` nodes ordered by distance from `point`.
pub fn nearest_nodes(graph: &Graph, point: Coordinate, query: &NeighbourQuery) -> Vec<Neighbour> {
    let mut candidates: Vec<(NodeIndex, f64)> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(index, node)| (index, point.distance_to(&Coordinate::from(node))))
        .filter(|(index, distance)| query.accepts(&graph.nodes()[*index], *distance))
        .collect();

    candidates.sort_by(|a, b| compare_distance(a.1, b.1).then_with(|| a.0.cmp(&b.0)));
    candidates.truncate(query.k);

    candidates
        .into_iter()
        .map(|(index, distance)| Neighbour {
            node: graph.nodes()[index].clone(),
            distance,
        })
        .collect()
}

fn compare_distance(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}
