use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use venueroute_cli::commands::landmarks::handle_landmarks_command;
use venueroute_cli::commands::nearest::{handle_nearest_command, NearestCommandArgs, DEFAULT_LIMIT};
use venueroute_cli::commands::route::{handle_route_command, RouteCommandArgs};
use venueroute_cli::commands::{load_graph, routing_config};
use venueroute_cli::output::OutputFormat;
use venueroute_cli::terminal::ColorPalette;
use venueroute_lib::Category;

#[derive(Parser, Debug)]
#[command(author, version, about = "Accessible, crowd-aware venue route planning")]
struct Cli {
    /// Venue description (JSON). Defaults to the bundled sample venue.
    #[arg(long, global = true)]
    venue: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Crowd penalty coefficient; overrides VENUEROUTE_CROWD_PENALTY.
    #[arg(long, global = true, allow_negative_numbers = true)]
    crowd_penalty: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a walking route from a coordinate to a coordinate or category.
    Route {
        /// Starting latitude.
        #[arg(long, allow_negative_numbers = true)]
        from_lat: f64,
        /// Starting longitude.
        #[arg(long, allow_negative_numbers = true)]
        from_lng: f64,
        /// Destination latitude.
        #[arg(long, allow_negative_numbers = true, requires = "to_lng")]
        to_lat: Option<f64>,
        /// Destination longitude.
        #[arg(long, allow_negative_numbers = true, requires = "to_lat")]
        to_lng: Option<f64>,
        /// Route to the nearest reachable node of this category instead.
        #[arg(long)]
        category: Option<Category>,
        /// Only use wheelchair accessible segments.
        #[arg(long)]
        wheelchair: bool,
        /// Penalize crowded segments.
        #[arg(long)]
        avoid_crowds: bool,
    },
    /// List the nodes closest to a coordinate.
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Maximum number of nodes to list.
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        /// Only include nodes within this planar distance.
        #[arg(long)]
        radius: Option<f64>,
        /// Only include nodes of this category (repeatable).
        #[arg(long = "category")]
        categories: Vec<Category>,
    },
    /// List points of interest, all non-waypoint categories by default.
    Landmarks {
        /// Only include nodes of this category (repeatable).
        #[arg(long = "category")]
        categories: Vec<Category>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let graph = load_graph(cli.venue.as_deref())?;
    let palette = if cli.format == OutputFormat::Text {
        ColorPalette::detect()
    } else {
        ColorPalette::plain()
    };
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Route {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
            category,
            wheelchair,
            avoid_crowds,
        } => {
            let config = routing_config(cli.crowd_penalty)?;
            let args = RouteCommandArgs {
                from_lat,
                from_lng,
                to_lat,
                to_lng,
                category,
                wheelchair,
                avoid_crowds,
            };
            handle_route_command(&mut stdout, &graph, &config, cli.format, &args)
        }
        Command::Nearest {
            lat,
            lng,
            limit,
            radius,
            categories,
        } => {
            let args = NearestCommandArgs {
                lat,
                lng,
                limit,
                radius,
                categories,
            };
            handle_nearest_command(&mut stdout, &graph, cli.format, palette, &args)
        }
        Command::Landmarks { categories } => {
            handle_landmarks_command(&mut stdout, &graph, cli.format, palette, &categories)
        }
    }
}

fn init_tracing() {
    // Logs go to stderr at `warn` unless RUST_LOG says otherwise, keeping stdout parseable.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
