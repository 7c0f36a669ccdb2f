//! Landmarks command handler.

use std::io::Write;

use anyhow::{Context, Result};

use venueroute_lib::{list_landmarks, Category, Graph};

use crate::output::{render_landmarks, OutputFormat};
use crate::terminal::ColorPalette;

/// Handle the landmarks subcommand.
///
/// With no categories every non-waypoint node is listed.
pub fn handle_landmarks_command<W: Write>(
    out: &mut W,
    graph: &Graph,
    format: OutputFormat,
    palette: ColorPalette,
    categories: &[Category],
) -> Result<()> {
    let landmarks = list_landmarks(graph, categories);
    let venue = graph.name().unwrap_or("unnamed venue");
    render_landmarks(out, venue, &landmarks, format, palette)
        .context("failed to write landmarks")?;
    Ok(())
}
