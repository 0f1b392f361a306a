//! Xiangqi CLI - Command-line interface
//!
//! Commands:
//! - board: Print the board after a list of moves
//! - moves: List the legal destinations of a piece
//! - play: Interactive two-player session on stdin

mod inspect;
mod play_cmd;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xiangqi")]
#[command(about = "Xiangqi rules engine")]
struct Cli {
    /// Log filter, overrides RUST_LOG (e.g. "debug", "xiangqi_core=trace")
    #[arg(long, global = true, value_name = "FILTER")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board after applying moves from the start position
    Board(inspect::BoardArgs),
    /// List legal destinations for the piece on a square
    Moves(inspect::MovesArgs),
    /// Play an interactive game on stdin
    Play,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Board(args) => inspect::run_board(args),
        Commands::Moves(args) => inspect::run_moves(args),
        Commands::Play => play_cmd::run(),
    }
}

/// Logs go to stderr so stdout stays parseable
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
