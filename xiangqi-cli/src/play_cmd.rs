//! Play command - interactive two-player session on stdin
//!
//! One command per line:
//!
//! ```text
//! select 1.7      pick a piece of the side to move
//! move 1.0        move the selected piece
//! 1.7 1.0         select and move in one go
//! undo            take back the last move
//! board           redraw
//! quit
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use xiangqi_core::{Coord, Session};

use crate::render::render_game;

const HELP: &str = "commands: select <c.r> | move <c.r> | <c.r> <c.r> | undo | board | help | quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Select(Option<Coord>),
    Move(Coord),
    SelectAndMove(Coord, Coord),
    Undo,
    Board,
    Help,
    Quit,
}

pub fn run() -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(stdin.lock(), stdout.lock())
}

/// Drive a session from `input`, writing everything to `out`
fn run_with<R: BufRead, W: Write>(input: R, mut out: W) -> Result<()> {
    let mut session = Session::new();
    tracing::info!("Starting interactive session");

    write!(out, "{}", render_game(session.game(), &session.highlighted_moves()))?;
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        execute(&mut session, command, &mut out)?;
    }

    tracing::info!("Session ended after {} moves", session.history().len());
    Ok(())
}

fn execute<W: Write>(session: &mut Session, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Select(coord) => {
            select(session, coord, out)?;
        }
        Command::Move(to) => make_move(session, to, out)?,
        Command::SelectAndMove(from, to) => {
            if select(session, Some(from), out)? {
                make_move(session, to, out)?;
            }
        }
        Command::Undo => {
            if session.history().is_empty() {
                writeln!(out, "nothing to undo")?;
            } else {
                session.go_back()?;
                write!(out, "{}", render_game(session.game(), &session.highlighted_moves()))?;
            }
        }
        Command::Board => {
            write!(out, "{}", render_game(session.game(), &session.highlighted_moves()))?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => {}
    }
    Ok(())
}

fn select<W: Write>(session: &mut Session, coord: Option<Coord>, out: &mut W) -> Result<bool> {
    if !session.select(coord) {
        let at = coord.map(|c| c.to_string()).unwrap_or_default();
        writeln!(out, "no {} piece on {}", session.game().turn, at)?;
        return Ok(false);
    }
    if coord.is_some() {
        write!(out, "{}", render_game(session.game(), &session.highlighted_moves()))?;
    }
    Ok(true)
}

fn make_move<W: Write>(session: &mut Session, to: Coord, out: &mut W) -> Result<()> {
    let from = session.selected();
    match session.move_selected_to(to) {
        Some(step) => {
            writeln!(out, "{}", step)?;
            write!(out, "{}", render_game(session.game(), &session.highlighted_moves()))?;
        }
        None => match from {
            Some(from) => writeln!(out, "illegal move {}-{}", from, to)?,
            None => writeln!(out, "select a piece first")?,
        },
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let coord = |text: &str| text.parse::<Coord>().map_err(|e| e.to_string());

    match words[..] {
        ["select" | "s", "none"] => Ok(Command::Select(None)),
        ["select" | "s", at] => Ok(Command::Select(Some(coord(at)?))),
        ["move" | "m", to] => Ok(Command::Move(coord(to)?)),
        ["undo" | "u"] => Ok(Command::Undo),
        ["board" | "b"] => Ok(Command::Board),
        ["help" | "h" | "?"] => Ok(Command::Help),
        ["quit" | "q" | "exit"] => Ok(Command::Quit),
        [from, to] => Ok(Command::SelectAndMove(coord(from)?, coord(to)?)),
        _ => Err(format!("unknown command: {}", line.trim())),
    }
}
