use std::path::PathBuf;

use catan_board_viz::board::{Board, TileCenters};
use catan_board_viz::render::{
    Placement, RenderConfig, render_board, render_settlements_detailed, vertex_table,
};
use catan_board_viz::state::State;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "visualize-board")]
#[command(about = "Draw a Catan board with settlement placements")]
struct Args {
    /// Board JSON: a list of tiles. Defaults to the built-in reference board
    #[arg(long)]
    board: Option<PathBuf>,

    /// State JSON with a `houses` map of player -> vertex ids
    #[arg(long)]
    state: Option<PathBuf>,

    /// Overview image; `.svg` writes SVG, anything else a bitmap
    #[arg(short, long, default_value = "catan_board.png")]
    output: PathBuf,

    /// Also write a per-player view to this path (needs --state)
    #[arg(long)]
    detailed: Option<PathBuf>,

    /// Hexagon circumradius in board units
    #[arg(long, default_value_t = 0.8)]
    hex_radius: f64,

    #[arg(long, default_value_t = 120.0)]
    pixels_per_unit: f64,

    /// Settlement placement: "resolved" or "exact"
    #[arg(long, default_value = "resolved")]
    placement: Placement,

    /// Fail on settlements whose position cannot be resolved
    #[arg(long)]
    strict: bool,

    /// Print every vertex with its resolved position as JSON and exit
    #[arg(long)]
    print_vertices: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    initialize_logging(args.log_level);

    let board = match &args.board {
        Some(path) => Board::load(path)?,
        None => Board::reference(),
    };
    info!(
        tiles = board.tiles().len(),
        vertices = board.vertex_count(),
        "board loaded"
    );

    let config = RenderConfig {
        hex_radius: args.hex_radius,
        pixels_per_unit: args.pixels_per_unit,
        placement: args.placement,
        strict: args.strict,
        ..RenderConfig::default()
    };
    config.validate()?;

    if args.print_vertices {
        let centers = TileCenters::for_board(&board, config.hex_radius);
        let table = vertex_table(&board, &centers, config.hex_radius);
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let state = args.state.as_ref().map(State::load).transpose()?;
    if let Some(state) = &state {
        if let Err(err) = state.validate(&board) {
            if config.strict {
                return Err(err.into());
            }
            warn!(%err, "state does not match the board");
        }
    }

    render_board(&board, state.as_ref(), &config, &args.output)?;
    println!("Board written to {}", args.output.display());

    if let Some(path) = &args.detailed {
        match &state {
            Some(state) => {
                render_settlements_detailed(&board, state, &config, path)?;
                println!("Per-player view written to {}", path.display());
            }
            None => warn!("--detailed needs --state; skipping per-player view"),
        }
    }
    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
