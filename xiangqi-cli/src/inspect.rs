//! Board and moves commands - inspect a position reached by a move list
//!
//! ## Architecture
//!
//! - Level 1: run_board(), run_moves() - orchestration
//! - Level 2: replay_moves() - turn-gated application through a Session
//! - Level 3: parse_move_list(), reports

use anyhow::{bail, Context, Result};
use clap::Args;
use rustc_hash::FxHashSet;
use serde::Serialize;

use xiangqi_core::{Coord, Game, Piece, Session, Step};

use crate::render::render_game;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct BoardArgs {
    /// Moves to apply from the start position, e.g. "0.6-0.5 0.3-0.4"
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Output the game as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Square of the piece to inspect
    #[arg(long, value_name = "COL.ROW")]
    pub at: Coord,

    /// Moves to apply from the start position before inspecting
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Output the destinations as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct BoardReport<'a> {
    game: &'a Game,
    history: &'a [Step],
}

#[derive(Serialize)]
struct MovesReport {
    at: String,
    piece: Piece,
    moves: Vec<String>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run_board(args: BoardArgs) -> Result<()> {
    let session = replay_moves(&args.moves)?;

    if args.json {
        let report = BoardReport {
            game: session.game(),
            history: session.history().steps(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_game(session.game(), &FxHashSet::default()));
    }

    Ok(())
}

pub fn run_moves(args: MovesArgs) -> Result<()> {
    let session = replay_moves(&args.moves)?;
    let game = session.game();

    let piece = game
        .board
        .get(args.at)
        .with_context(|| format!("No piece on {}", args.at))?;

    let destinations = game.legal_moves_from(args.at);
    let mut sorted: Vec<Coord> = destinations.iter().copied().collect();
    sorted.sort();

    tracing::info!("{} on {} has {} legal moves", piece, args.at, sorted.len());

    if args.json {
        let report = MovesReport {
            at: args.at.key(),
            piece,
            moves: sorted.iter().map(Coord::key).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_game(game, &destinations));
        let keys: Vec<String> = sorted.iter().map(Coord::key).collect();
        println!("{} on {}: {}", piece, args.at, keys.join(" "));
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - REPLAY
// ============================================================================

/// Apply a move list from the start position, respecting whose turn it is
pub fn replay_moves(text: &str) -> Result<Session> {
    let mut session = Session::new();

    for (n, (from, to)) in parse_move_list(text)?.into_iter().enumerate() {
        let turn = session.game().turn;
        if !session.select(Some(from)) {
            bail!("Move {} ({}-{}): no {} piece on {}", n + 1, from, to, turn, from);
        }
        if session.move_selected_to(to).is_none() {
            bail!("Move {} ({}-{}): illegal", n + 1, from, to);
        }
    }

    tracing::debug!("Replayed {} moves", session.history().len());
    Ok(session)
}

// ============================================================================
// LEVEL 3 - PARSING
// ============================================================================

/// Parse whitespace- or comma-separated `from-to` pairs
pub fn parse_move_list(text: &str) -> Result<Vec<(Coord, Coord)>> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| -> Result<(Coord, Coord)> {
            let (from, to) = token
                .split_once('-')
                .with_context(|| format!("Move {:?} is not of the form from-to", token))?;
            let from = from.parse::<Coord>().with_context(|| format!("Bad source in {:?}", token))?;
            let to = to.parse::<Coord>().with_context(|| format!("Bad destination in {:?}", token))?;
            Ok((from, to))
        })
        .collect()
}
