use std::fmt::Write;

use serde::Serialize;

use crate::graph::Graph;
use crate::path::PathResult;
use crate::routing::{Destination, RoutePlan};
use crate::venue::{Category, Node};

/// Attributes of the edge walked between two consecutive route steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteLeg {
    pub distance: f64,
    pub accessible: bool,
    pub risk_factor: f64,
}

/// Materialize the node records for a pathfinder result.
///
/// Returns empty vectors when no path was found; a partial route is never
/// produced.
pub fn assemble_route(graph: &Graph, path: Option<&PathResult>) -> (Vec<Node>, Vec<RouteLeg>) {
    let Some(path) = path else {
        return (Vec::new(), Vec::new());
    };

    let steps: Option<Vec<Node>> = path
        .steps
        .iter()
        .map(|&index| graph.node_at(index).cloned())
        .collect();
    let Some(steps) = steps else {
        return (Vec::new(), Vec::new());
    };

    let legs = path
        .legs
        .iter()
        .map(|edge| RouteLeg {
            distance: edge.distance,
            accessible: edge.accessible,
            risk_factor: edge.risk_factor,
        })
        .collect();

    (steps, legs)
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    Compact,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: String,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    /// Distance walked from the previous step.
    pub hop_distance: f64,
    /// Distance walked since the start.
    pub cumulative_distance: f64,
    /// Risk factor of the edge walked from the previous step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_factor: Option<f64>,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub found: bool,
    pub start: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub destination: Destination,
    pub wheelchair: bool,
    pub avoid_crowds: bool,
    pub hops: usize,
    pub distance: f64,
    pub cost: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a per-step summary with cumulative distances.
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let mut cumulative = 0.0;
        let steps = plan
            .steps
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let leg = index.checked_sub(1).and_then(|prev| plan.legs.get(prev));
                let hop_distance = leg.map(|leg| leg.distance).unwrap_or(0.0);
                cumulative += hop_distance;
                RouteStep {
                    index,
                    id: node.id.clone(),
                    category: node.category,
                    lat: node.lat,
                    lng: node.lng,
                    hop_distance,
                    cumulative_distance: cumulative,
                    risk_factor: leg.map(|leg| leg.risk_factor),
                }
            })
            .collect();

        Self {
            found: plan.is_found(),
            start: plan.start.clone(),
            goal: plan.goal().map(|node| node.id.clone()),
            destination: plan.destination,
            wheelchair: plan.preferences.wheelchair,
            avoid_crowds: plan.preferences.avoid_crowds,
            hops: plan.hop_count(),
            distance: plan.distance,
            cost: plan.cost,
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Compact => self.render_compact(),
        }
    }

    fn describe_destination(&self) -> String {
        match self.destination {
            Destination::Point(point) => format!("point ({:.5}, {:.5})", point.lat, point.lng),
            Destination::Category { category } => format!("nearest {category}"),
        }
    }

    fn describe_preferences(&self) -> String {
        let mut flags = Vec::new();
        if self.wheelchair {
            flags.push("wheelchair");
        }
        if self.avoid_crowds {
            flags.push("avoid crowds");
        }
        if flags.is_empty() {
            "no constraints".to_string()
        } else {
            flags.join(", ")
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        if !self.found {
            let _ = writeln!(
                buffer,
                "No route from {} to {} ({}).",
                self.start,
                self.describe_destination(),
                self.describe_preferences()
            );
            return buffer;
        }

        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.0} m, {})",
            self.start,
            self.goal.as_deref().unwrap_or("<unknown>"),
            self.hops,
            self.distance,
            self.describe_preferences()
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} [{}] +{:.0} m (total {:.0} m)",
                step.index, step.id, step.category, step.hop_distance, step.cumulative_distance
            );
        }
        buffer
    }

    fn render_compact(&self) -> String {
        if !self.found {
            return "no route\n".to_string();
        }
        let joined = self
            .steps
            .iter()
            .map(|step| step.id.as_str())
            .collect::<Vec<_>>()
            .join(" -> ");
        format!("{joined}\n")
    }
}
