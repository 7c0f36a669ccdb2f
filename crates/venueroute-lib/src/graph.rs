use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::venue::{Category, EdgeSpec, Node, Venue};

/// Position of a node in the graph's stable enumeration order.
pub type NodeIndex = usize;

/// Directed half of an undirected venue edge, as seen from one endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeIndex,
    pub distance: f64,
    pub accessible: bool,
    pub risk_factor: f64,
}

/// Read-only venue graph used by the locator and pathfinder.
///
/// Cloning is cheap; all clones share the same immutable adjacency data, so a
/// single instance can serve concurrent queries without locking.
#[derive(Debug, Clone)]
pub struct Graph {
    inner: Arc<GraphInner>,
}

#[derive(Debug, Default)]
struct GraphInner {
    name: Option<String>,
    nodes: Vec<Node>,
    index: HashMap<String, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Validate a venue description and build the symmetric adjacency list.
    pub fn build(venue: &Venue) -> Result<Self> {
        let mut index = HashMap::with_capacity(venue.nodes.len());
        for (position, node) in venue.nodes.iter().enumerate() {
            if !node.lat.is_finite() || !node.lng.is_finite() {
                return Err(Error::InvalidNodePosition {
                    id: node.id.clone(),
                    lat: node.lat,
                    lng: node.lng,
                });
            }
            if index.insert(node.id.clone(), position).is_some() {
                return Err(Error::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); venue.nodes.len()];
        for link in &venue.edges {
            validate_edge(link)?;
            let from = lookup_endpoint(&index, link, &link.from)?;
            let to = lookup_endpoint(&index, link, &link.to)?;

            adjacency[from].push(Edge {
                target: to,
                distance: link.distance,
                accessible: link.accessible,
                risk_factor: link.risk_factor,
            });
            if from != to {
                adjacency[to].push(Edge {
                    target: from,
                    distance: link.distance,
                    accessible: link.accessible,
                    risk_factor: link.risk_factor,
                });
            }
        }

        debug!(
            venue = venue.display_name(),
            nodes = venue.nodes.len(),
            edges = venue.edges.len(),
            "built venue graph"
        );

        Ok(Self {
            inner: Arc::new(GraphInner {
                name: venue.name.clone(),
                nodes: venue.nodes.clone(),
                index,
                adjacency,
                edge_count: venue.edges.len(),
            }),
        })
    }

    /// Venue name carried over from the description, if any.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn node_count(&self) -> usize {
        self.inner.nodes.len()
    }

    /// Number of undirected edges in the source description.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.inner.nodes.is_empty()
    }

    /// All nodes in stable enumeration order.
    pub fn nodes(&self) -> &[Node] {
        &self.inner.nodes
    }

    /// Resolve a node identifier to its enumeration index.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.inner.index.get(id).copied()
    }

    /// Lookup a node record by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|index| &self.inner.nodes[index])
    }

    /// Lookup a node record by enumeration index.
    pub fn node_at(&self, index: NodeIndex) -> Option<&Node> {
        self.inner.nodes.get(index)
    }

    /// Return the incident edges for a given node index.
    pub fn neighbours(&self, node: NodeIndex) -> &[Edge] {
        self.inner
            .adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Incident edges for a node identifier; empty for unknown ids.
    pub fn neighbours_of(&self, id: &str) -> &[Edge] {
        self.index_of(id)
            .map(|index| self.neighbours(index))
            .unwrap_or(&[])
    }

    /// Indices of every node in the given category, in enumeration order.
    pub fn nodes_in_category(&self, category: Category) -> Vec<NodeIndex> {
        self.inner
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.category == category)
            .map(|(index, _)| index)
            .collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            inner: Arc::new(GraphInner::default()),
        }
    }
}

/// Build the routing graph for a venue description.
pub fn build_graph(venue: &Venue) -> Result<Graph> {
    Graph::build(venue)
}

fn validate_edge(link: &EdgeSpec) -> Result<()> {
    if !link.distance.is_finite() || link.distance <= 0.0 {
        return Err(Error::InvalidDistance {
            from: link.from.clone(),
            to: link.to.clone(),
            distance: link.distance,
        });
    }
    if !(0.0..=1.0).contains(&link.risk_factor) {
        return Err(Error::InvalidRiskFactor {
            from: link.from.clone(),
            to: link.to.clone(),
            risk_factor: link.risk_factor,
        });
    }
    Ok(())
}

fn lookup_endpoint(
    index: &HashMap<String, NodeIndex>,
    link: &EdgeSpec,
    id: &str,
) -> Result<NodeIndex> {
    index.get(id).copied().ok_or_else(|| Error::UnknownNode {
        from: link.from.clone(),
        to: link.to.clone(),
        missing: id.to_string(),
    })
}
