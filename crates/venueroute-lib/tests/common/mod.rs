//! Shared venue fixtures for integration tests.

#![allow(dead_code)]

use venueroute_lib::{
    Category, Coordinate, EdgeSpec, Graph, NodeIndex, Node, PathConstraints, Venue,
};

pub fn node(id: &str, lat: f64, lng: f64, category: Category) -> Node {
    Node {
        id: id.to_string(),
        lat,
        lng,
        category,
    }
}

pub fn edge(from: &str, to: &str, distance: f64, accessible: bool, risk_factor: f64) -> EdgeSpec {
    EdgeSpec {
        from: from.to_string(),
        to: to.to_string(),
        distance,
        accessible,
        risk_factor,
    }
}

/// A - B - C in a line, 10 m apart, with a configurable A-B accessibility.
pub fn abc_venue(ab_accessible: bool) -> Venue {
    Venue {
        name: Some("abc".to_string()),
        nodes: vec![
            node("A", 0.0, 0.0, Category::Entry),
            node("B", 10.0, 0.0, Category::Path),
            node("C", 20.0, 0.0, Category::Exit),
        ],
        edges: vec![
            edge("A", "B", 10.0, ab_accessible, 0.0),
            edge("B", "C", 10.0, true, 0.0),
        ],
    }
}

pub fn abc_graph(ab_accessible: bool) -> Graph {
    Graph::build(&abc_venue(ab_accessible)).expect("abc venue is valid")
}

/// The bundled festival venue.
pub fn sample_graph() -> Graph {
    let venue = Venue::sample().expect("sample venue parses");
    Graph::build(&venue).expect("sample venue is valid")
}

/// Exact coordinate of a node, so the locator resolves back to it.
pub fn coordinate_of(graph: &Graph, id: &str) -> Coordinate {
    let node = graph.node(id).unwrap_or_else(|| panic!("node {id} exists"));
    Coordinate::from(node)
}

/// Small deterministic linear congruential generator for synthetic graphs.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }

    pub fn unit(&mut self) -> f64 {
        f64::from(self.below(1001)) / 1000.0
    }
}

/// Random venue with `node_count` nodes and roughly `edge_count` edges.
///
/// Every third node is an exit; some edges are inaccessible and risk factors
/// cover the full `[0, 1]` range.
pub fn synthetic_venue(seed: u64, node_count: usize, edge_count: usize) -> Venue {
    let mut rng = Lcg::new(seed);
    let nodes = (0..node_count)
        .map(|i| {
            let category = if i % 3 == 2 {
                Category::Exit
            } else {
                Category::Path
            };
            node(
                &format!("n{i}"),
                f64::from(rng.below(100)),
                f64::from(rng.below(100)),
                category,
            )
        })
        .collect();

    let edges = (0..edge_count)
        .map(|_| {
            let from = rng.below(node_count as u32);
            let to = rng.below(node_count as u32);
            edge(
                &format!("n{from}"),
                &format!("n{to}"),
                f64::from(1 + rng.below(50)),
                rng.below(4) != 0,
                rng.unit(),
            )
        })
        .collect();

    Venue {
        name: Some(format!("synthetic-{seed}")),
        nodes,
        edges,
    }
}

/// Minimum cost over every simple path from `start` to any target, found by
/// exhaustive depth-first enumeration.
pub fn brute_force_min_cost(
    graph: &Graph,
    start: NodeIndex,
    targets: &[NodeIndex],
    constraints: &PathConstraints,
) -> Option<f64> {
    let mut visited = vec![false; graph.node_count()];
    let mut best: Option<f64> = None;
    explore(graph, start, 0.0, targets, constraints, &mut visited, &mut best);
    best
}

fn explore(
    graph: &Graph,
    current: NodeIndex,
    cost: f64,
    targets: &[NodeIndex],
    constraints: &PathConstraints,
    visited: &mut [bool],
    best: &mut Option<f64>,
) {
    if targets.contains(&current) {
        if best.map_or(true, |b| cost < b) {
            *best = Some(cost);
        }
        return;
    }

    visited[current] = true;
    for edge in graph.neighbours(current) {
        if visited[edge.target] || !constraints.allows(edge) {
            continue;
        }
        explore(
            graph,
            edge.target,
            cost + constraints.cost(edge),
            targets,
            constraints,
            visited,
            best,
        );
    }
    visited[current] = false;
}

/// Cost of walking `steps` under `constraints`, choosing the cheapest
/// admissible parallel edge for each hop.
pub fn path_cost(graph: &Graph, steps: &[NodeIndex], constraints: &PathConstraints) -> f64 {
    steps
        .windows(2)
        .map(|pair| {
            graph
                .neighbours(pair[0])
                .iter()
                .filter(|edge| edge.target == pair[1] && constraints.allows(edge))
                .map(|edge| constraints.cost(edge))
                .fold(f64::INFINITY, f64::min)
        })
        .sum()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
