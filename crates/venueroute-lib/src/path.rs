use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::config::{RoutingConfig, DEFAULT_CROWD_PENALTY};
use crate::graph::{Edge, Graph, NodeIndex};

/// Constraints applied during pathfinding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathConstraints {
    /// Exclude every edge that is not wheelchair accessible.
    pub wheelchair: bool,
    /// Inflate edge costs by their risk factor.
    pub avoid_crowds: bool,
    /// Coefficient applied to the risk factor when `avoid_crowds` is set.
    pub crowd_penalty: f64,
}

impl Default for PathConstraints {
    fn default() -> Self {
        Self {
            wheelchair: false,
            avoid_crowds: false,
            crowd_penalty: DEFAULT_CROWD_PENALTY,
        }
    }
}

impl PathConstraints {
    /// Build constraints from caller preferences and routing configuration.
    pub fn new(wheelchair: bool, avoid_crowds: bool, config: &RoutingConfig) -> Self {
        Self {
            wheelchair,
            avoid_crowds,
            crowd_penalty: config.crowd_penalty,
        }
    }

    /// Whether the edge may be expanded at all under these constraints.
    pub fn allows(&self, edge: &Edge) -> bool {
        !(self.wheelchair && !edge.accessible)
    }

    /// Traversal cost of an admissible edge.
    pub fn cost(&self, edge: &Edge) -> f64 {
        if self.avoid_crowds {
            edge.distance * (1.0 + edge.risk_factor * self.crowd_penalty)
        } else {
            edge.distance
        }
    }
}

/// Lowest-cost path found by the pathfinder.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Visited node indices from start to the satisfying target, inclusive.
    pub steps: Vec<NodeIndex>,
    /// Edge taken into `steps[i + 1]`; always one shorter than `steps`.
    pub legs: Vec<Edge>,
    /// Total cost under the active cost transform.
    pub cost: f64,
    /// Total unpenalized walking distance.
    pub distance: f64,
}

impl PathResult {
    /// Number of hops in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// The target node the search terminated on.
    pub fn goal(&self) -> Option<NodeIndex> {
        self.steps.last().copied()
    }
}

/// Find the shortest walking route between `start` and `goal` without
/// accessibility or crowd constraints.
pub fn find_route(graph: &Graph, start: NodeIndex, goal: NodeIndex) -> Option<PathResult> {
    find_route_dijkstra(graph, start, &[goal], &PathConstraints::default())
}

/// Run Dijkstra's algorithm from `start` until the first member of `targets`
/// is finalized.
///
/// Nodes are finalized in non-decreasing cost order, so the first finalized
/// target is the cheapest reachable target overall. Frontier ties are broken
/// by node index, making the result deterministic for a fixed graph.
pub fn find_route_dijkstra(
    graph: &Graph,
    start: NodeIndex,
    targets: &[NodeIndex],
    constraints: &PathConstraints,
) -> Option<PathResult> {
    let node_count = graph.node_count();
    if start >= node_count || targets.is_empty() {
        return None;
    }

    let mut is_target = vec![false; node_count];
    for &target in targets {
        if let Some(flag) = is_target.get_mut(target) {
            *flag = true;
        }
    }

    let mut costs = vec![f64::INFINITY; node_count];
    let mut parents: Vec<Option<(NodeIndex, usize)>> = vec![None; node_count];
    let mut finalized = vec![false; node_count];
    let mut queue = BinaryHeap::new();
    let mut expanded = 0usize;

    costs[start] = 0.0;
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current = entry.node;
        if finalized[current] {
            continue;
        }
        finalized[current] = true;
        expanded += 1;

        if is_target[current] {
            debug!(start, goal = current, expanded, "dijkstra reached target");
            return Some(reconstruct_path(graph, &parents, current, costs[current]));
        }

        for (position, edge) in graph.neighbours(current).iter().enumerate() {
            let next = edge.target;
            if finalized[next] || !constraints.allows(edge) {
                continue;
            }

            let next_cost = costs[current] + constraints.cost(edge);
            if next_cost < costs[next] {
                costs[next] = next_cost;
                parents[next] = Some((current, position));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(start, expanded, "frontier exhausted before reaching a target");
    None
}

fn reconstruct_path(
    graph: &Graph,
    parents: &[Option<(NodeIndex, usize)>],
    goal: NodeIndex,
    cost: f64,
) -> PathResult {
    let mut steps = vec![goal];
    let mut legs = Vec::new();
    let mut current = goal;
    while let Some((parent, position)) = parents[current] {
        legs.push(graph.neighbours(parent)[position].clone());
        steps.push(parent);
        current = parent;
    }
    steps.reverse();
    legs.reverse();

    let distance = legs.iter().map(|edge| edge.distance).sum();
    PathResult {
        steps,
        legs,
        cost,
        distance,
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
