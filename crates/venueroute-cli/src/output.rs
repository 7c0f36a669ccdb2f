//! Output formatting for command results.
//!
//! Every renderer writes to a caller-supplied sink so the same code serves
//! stdout and unit tests.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use venueroute_lib::{Neighbour, Node, RouteRenderMode, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Only the node ids along the route, joined by arrows.
    Compact,
    /// Pretty-printed JSON document.
    Json,
}

/// JSON envelope for landmark listings.
#[derive(Debug, Serialize)]
struct LandmarkListing<'a> {
    venue: &'a str,
    count: usize,
    landmarks: &'a [Node],
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    writeln!(out)
}

/// Render a planned route.
pub fn render_route<W: Write>(
    out: &mut W,
    summary: &RouteSummary,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => out.write_all(summary.render(RouteRenderMode::PlainText).as_bytes()),
        OutputFormat::Compact => out.write_all(summary.render(RouteRenderMode::Compact).as_bytes()),
        OutputFormat::Json => write_json(out, summary),
    }
}

/// Render the result of a nearest-node query.
pub fn render_neighbours<W: Write>(
    out: &mut W,
    neighbours: &[Neighbour],
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, neighbours),
        OutputFormat::Compact => {
            for neighbour in neighbours {
                writeln!(out, "{}", neighbour.node.id)?;
            }
            Ok(())
        }
        OutputFormat::Text => {
            if neighbours.is_empty() {
                return writeln!(out, "No nodes matched the query.");
            }
            for (rank, neighbour) in neighbours.iter().enumerate() {
                write!(out, "{:>2}. ", rank + 1)?;
                write_node(out, &neighbour.node, palette)?;
                writeln!(
                    out,
                    " {}distance {:.6}{}",
                    palette.gray, neighbour.distance, palette.reset
                )?;
            }
            Ok(())
        }
    }
}

/// Render a landmark listing.
pub fn render_landmarks<W: Write>(
    out: &mut W,
    venue: &str,
    landmarks: &[Node],
    format: OutputFormat,
    palette: ColorPalette,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(
            out,
            &LandmarkListing {
                venue,
                count: landmarks.len(),
                landmarks,
            },
        ),
        OutputFormat::Compact => {
            for node in landmarks {
                writeln!(out, "{}", node.id)?;
            }
            Ok(())
        }
        OutputFormat::Text => {
            writeln!(out, "{} landmarks in {}:", landmarks.len(), venue)?;
            for node in landmarks {
                write!(out, "- ")?;
                write_node(out, node, palette)?;
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn write_node<W: Write>(out: &mut W, node: &Node, palette: ColorPalette) -> io::Result<()> {
    write!(
        out,
        "{}{}{} [{}{}{}] {}({:.5}, {:.5}){}",
        palette.white_bold,
        node.id,
        palette.reset,
        palette.category(node.category),
        node.category,
        palette.reset,
        palette.gray,
        node.lat,
        node.lng,
        palette.reset
    )
}
