//! Text rendering of a game
//!
//! Glyphs are double-width, so every cell is four terminal columns:
//! `(車)` red, `[車]` black, `{車}` capturable, ` *  ` reachable, ` +  ` empty.

use std::fmt::Write;

use rustc_hash::FxHashSet;
use xiangqi_core::{Coord, Game, Piece, Side, BOARD_COLS};

pub fn render_game(game: &Game, highlights: &FxHashSet<Coord>) -> String {
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..BOARD_COLS {
        let _ = write!(out, " {}  ", col);
    }
    out.push('\n');

    for (row, cells) in game.board.rows().enumerate() {
        let _ = write!(out, "{:>2} ", row);
        for (col, cell) in cells.iter().enumerate() {
            let highlighted = highlights.contains(&Coord::new(col as i8, row as i8));
            out.push_str(&render_cell(*cell, highlighted));
        }
        out.push('\n');

        if row == 4 {
            out.push_str("   ~~~~~~~~~~~~~~~~~~ river ~~~~~~~~~~~~~~~~\n");
        }
    }

    let _ = writeln!(out, "red captured:   {}", glyphs(&game.red_captured));
    let _ = writeln!(out, "black captured: {}", glyphs(&game.black_captured));
    let _ = writeln!(out, "to move: {}", game.turn);
    out
}

fn render_cell(cell: Option<Piece>, highlighted: bool) -> String {
    match (cell, highlighted) {
        (Some(piece), true) => format!("{{{}}}", piece.glyph()),
        (Some(piece), false) => match piece.side {
            Side::Red => format!("({})", piece.glyph()),
            Side::Black => format!("[{}]", piece.glyph()),
        },
        (None, true) => " *  ".to_string(),
        (None, false) => " +  ".to_string(),
    }
}

fn glyphs(pieces: &[Piece]) -> String {
    if pieces.is_empty() {
        return "-".to_string();
    }
    pieces.iter().map(Piece::glyph).collect()
}
