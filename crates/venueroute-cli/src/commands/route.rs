//! Route command handler for computing walking routes between coordinates.

use std::io::Write;

use anyhow::{Context, Result};

use venueroute_lib::{
    plan_route, Category, Coordinate, Graph, RoutePreferences, RouteRequest, RouteSummary,
    RoutingConfig,
};

use crate::output::{render_route, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone, Default)]
pub struct RouteCommandArgs {
    /// Starting latitude.
    pub from_lat: f64,
    /// Starting longitude.
    pub from_lng: f64,
    /// Destination latitude.
    pub to_lat: Option<f64>,
    /// Destination longitude.
    pub to_lng: Option<f64>,
    /// Route to the cheapest node of this category instead of a coordinate.
    pub category: Option<Category>,
    /// Only use wheelchair accessible segments.
    pub wheelchair: bool,
    /// Penalize crowded segments.
    pub avoid_crowds: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        RouteRequest {
            start: Coordinate::new(self.from_lat, self.from_lng),
            end_lat: self.to_lat,
            end_lng: self.to_lng,
            target_category: self.category,
            preferences: RoutePreferences {
                wheelchair: self.wheelchair,
                avoid_crowds: self.avoid_crowds,
            },
        }
    }
}

/// Handle the route subcommand.
///
/// An unreachable destination is reported on stdout and is not an error.
pub fn handle_route_command<W: Write>(
    out: &mut W,
    graph: &Graph,
    config: &RoutingConfig,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let request = args.to_request();
    let plan = plan_route(graph, config, &request).context("route query rejected")?;
    let summary = RouteSummary::from_plan(&plan);
    render_route(out, &summary, format).context("failed to write route")?;
    Ok(())
}
