//! Per-piece legal move generation

use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::coord::{Coord, Direction};
use crate::pieces::{Piece, PieceKind, Side};

// ============================================================================
// CONSTANTS
// ============================================================================

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Horse jumps grouped by the leg cell that hobbles them
const HORSE_JUMPS: [(Direction, [(i8, i8); 2]); 4] = [
    (Direction::Up, [(-1, -2), (1, -2)]),
    (Direction::Left, [(-2, -1), (-2, 1)]),
    (Direction::Right, [(2, -1), (2, 1)]),
    (Direction::Down, [(-1, 2), (1, 2)]),
];

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// Legal destinations for `piece` standing on `from`.
///
/// Destinations are clipped to the board and never hold a piece of the
/// mover's own side. Whose turn it is is not considered here.
pub fn legal_moves(piece: Piece, from: Coord, board: &Board) -> FxHashSet<Coord> {
    let mut moves = Vec::with_capacity(17);

    match piece.kind {
        PieceKind::Soldier => generate_soldier_moves(piece.side, from, &mut moves),
        PieceKind::Advisor => generate_advisor_moves(piece.side, from, &mut moves),
        PieceKind::Elephant => generate_elephant_moves(piece.side, from, &mut moves),
        PieceKind::Chariot => generate_chariot_moves(piece.side, from, board, &mut moves),
        PieceKind::Cannon => generate_cannon_moves(piece.side, from, board, &mut moves),
        PieceKind::General => generate_general_moves(piece.side, from, board, &mut moves),
        PieceKind::Horse => generate_horse_moves(from, board, &mut moves),
    }

    moves
        .into_iter()
        .filter(|&to| to.is_valid())
        .filter(|&to| board.get(to).map_or(true, |occupant| occupant.side != piece.side))
        .collect()
}

fn generate_soldier_moves(side: Side, from: Coord, moves: &mut Vec<Coord>) {
    moves.push(from.offset(0, side.forward()));

    // Sideways only once across the river
    if !side.owns_row(from.row) {
        moves.push(from.step(Direction::Left));
        moves.push(from.step(Direction::Right));
    }
}

fn generate_advisor_moves(side: Side, from: Coord, moves: &mut Vec<Coord>) {
    moves.extend(
        DIAGONALS
            .iter()
            .map(|&(dc, dr)| from.offset(dc, dr))
            .filter(|&to| side.in_palace(to)),
    );
}

// No elephant-eye check: a piece on the diagonal midpoint does not block.
fn generate_elephant_moves(side: Side, from: Coord, moves: &mut Vec<Coord>) {
    moves.extend(
        DIAGONALS
            .iter()
            .map(|&(dc, dr)| from.offset(2 * dc, 2 * dr))
            .filter(|&to| to.is_valid() && side.owns_row(to.row)),
    );
}

fn generate_chariot_moves(side: Side, from: Coord, board: &Board, moves: &mut Vec<Coord>) {
    for direction in Direction::ALL {
        let blocker = board.nearest_piece(direction, from);
        push_open_cells(from, direction, blocker.map(|(at, _)| at), moves);

        if let Some((at, occupant)) = blocker {
            if occupant.side != side {
                moves.push(at);
            }
        }
    }
}

fn generate_cannon_moves(side: Side, from: Coord, board: &Board, moves: &mut Vec<Coord>) {
    for direction in Direction::ALL {
        let screen = board.nearest_piece(direction, from);
        push_open_cells(from, direction, screen.map(|(at, _)| at), moves);

        // Capture the first piece beyond exactly one screen
        let target = screen.and_then(|(at, _)| board.nearest_piece(direction, at));
        if let Some((at, occupant)) = target {
            if occupant.side != side {
                moves.push(at);
            }
        }
    }
}

fn generate_general_moves(side: Side, from: Coord, board: &Board, moves: &mut Vec<Coord>) {
    moves.extend(
        Direction::ALL
            .iter()
            .map(|&direction| from.step(direction))
            .filter(|&to| side.in_palace(to)),
    );

    // Flying general: facing the opponent along an open file
    if let Some((at, occupant)) = board.nearest_piece(side.facing(), from) {
        if occupant.kind == PieceKind::General && occupant.side != side {
            moves.push(at);
        }
    }
}

fn generate_horse_moves(from: Coord, board: &Board, moves: &mut Vec<Coord>) {
    for (leg, jumps) in HORSE_JUMPS {
        if board.is_occupied(from.step(leg)) {
            continue; // Hobbled
        }
        moves.extend(jumps.iter().map(|&(dc, dr)| from.offset(dc, dr)));
    }
}

/// Empty cells from the neighbor of `from` up to (not including) `blocker`,
/// or to the board edge when nothing blocks.
fn push_open_cells(from: Coord, direction: Direction, blocker: Option<Coord>, moves: &mut Vec<Coord>) {
    let mut current = from.step(direction);
    while current.is_valid() && Some(current) != blocker {
        moves.push(current);
        current = current.step(direction);
    }
}

// ============================================================================
// TESTS
// ============================================================================
