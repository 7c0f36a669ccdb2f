//! Response bodies for successful HTTP responses.

use serde::{Deserialize, Serialize};

use venueroute_lib::{Neighbour, Node, RoutePlan};

/// Body of a `POST /api/v1/safe-route` response.
///
/// `route` is empty when no route satisfies the constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeRouteResponse {
    /// Ordered node records from start to destination.
    pub route: Vec<Node>,
    pub hops: usize,
    /// Unpenalized walking distance in meters.
    pub distance: f64,
    /// Cost under the requested cost model.
    pub cost: f64,
}

impl From<RoutePlan> for SafeRouteResponse {
    fn from(plan: RoutePlan) -> Self {
        Self {
            hops: plan.hop_count(),
            distance: plan.distance,
            cost: plan.cost,
            route: plan.steps,
        }
    }
}

/// Body of a `GET /api/v1/markers` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkersResponse {
    pub count: usize,
    pub markers: Vec<Node>,
}

impl From<Vec<Node>> for MarkersResponse {
    fn from(markers: Vec<Node>) -> Self {
        Self {
            count: markers.len(),
            markers,
        }
    }
}

/// Body of a `GET /api/v1/nearest` response.
#[derive(Debug, Clone, Serialize)]
pub struct NearestResponse {
    pub count: usize,
    pub nodes: Vec<Neighbour>,
}

impl From<Vec<Neighbour>> for NearestResponse {
    fn from(nodes: Vec<Neighbour>) -> Self {
        Self {
            count: nodes.len(),
            nodes,
        }
    }
}
