//! Nearest command handler: list the nodes closest to a coordinate.

use std::io::Write;

use anyhow::{Context, Result};

use venueroute_lib::{nearest_nodes, Category, Coordinate, Graph, NeighbourQuery};

use crate::output::{render_neighbours, OutputFormat};
use crate::terminal::ColorPalette;

/// Default number of nodes returned by `nearest`.
pub const DEFAULT_LIMIT: usize = 5;

/// Arguments for the nearest command.
#[derive(Debug, Clone)]
pub struct NearestCommandArgs {
    pub lat: f64,
    pub lng: f64,
    /// Maximum number of nodes to list.
    pub limit: usize,
    /// Only include nodes within this planar distance.
    pub radius: Option<f64>,
    /// Only include nodes of these categories.
    pub categories: Vec<Category>,
}

impl NearestCommandArgs {
    fn to_query(&self) -> NeighbourQuery {
        let query = match self.radius {
            Some(radius) => NeighbourQuery::within_radius(self.limit, radius),
            None => NeighbourQuery::nearest(self.limit),
        };
        query.with_categories(self.categories.iter().copied())
    }
}

/// Handle the nearest subcommand.
pub fn handle_nearest_command<W: Write>(
    out: &mut W,
    graph: &Graph,
    format: OutputFormat,
    palette: ColorPalette,
    args: &NearestCommandArgs,
) -> Result<()> {
    let point = Coordinate::new(args.lat, args.lng)
        .validate()
        .context("invalid query coordinate")?;
    if graph.is_empty() {
        anyhow::bail!("venue graph is empty");
    }

    let neighbours = nearest_nodes(graph, point, &args.to_query());
    render_neighbours(out, &neighbours, format, palette).context("failed to write results")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use venueroute_lib::Venue;

    fn args() -> NearestCommandArgs {
        NearestCommandArgs {
            lat: 30.2690,
            lng: -97.7710,
            limit: DEFAULT_LIMIT,
            radius: None,
            categories: Vec::new(),
        }
    }

    fn run(args: &NearestCommandArgs) -> Result<String> {
        let graph = Graph::build(&Venue::sample().unwrap()).unwrap();
        let mut buffer = Vec::new();
        handle_nearest_command(
            &mut buffer,
            &graph,
            OutputFormat::Compact,
            ColorPalette::plain(),
            args,
        )?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn closest_node_is_listed_first() {
        let text = run(&args()).unwrap();
        assert_eq!(text.lines().count(), DEFAULT_LIMIT);
        assert_eq!(text.lines().next(), Some("entry_main"));
    }

    #[test]
    fn category_filter_limits_results() {
        let text = run(&NearestCommandArgs {
            categories: vec![Category::Exit],
            ..args()
        })
        .unwrap();
        assert_eq!(text, "exit_south\n");
    }

    #[test]
    fn nan_coordinate_is_rejected() {
        assert!(run(&NearestCommandArgs {
            lat: f64::NAN,
            ..args()
        })
        .is_err());
    }
}
