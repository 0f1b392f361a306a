//! Board grid, starting layout and ray casting

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Direction, BOARD_COLS, BOARD_ROWS};
use crate::pieces::{Piece, PieceKind, Side};

const COLS: usize = BOARD_COLS as usize;
const ROWS: usize = BOARD_ROWS as usize;

/// Back rank from column 0 to 8
const BACK_RANK: [PieceKind; COLS] = [
    PieceKind::Chariot,
    PieceKind::Horse,
    PieceKind::Elephant,
    PieceKind::Advisor,
    PieceKind::General,
    PieceKind::Advisor,
    PieceKind::Elephant,
    PieceKind::Horse,
    PieceKind::Chariot,
];

const CANNON_COLS: [i8; 2] = [1, 7];
const SOLDIER_COLS: [i8; 5] = [0, 2, 4, 6, 8];

/// 10x9 row-major grid, at most one piece per cell
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn empty() -> Self {
        Self {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Standard starting layout: Black on rows 0-3, Red mirrored on rows 6-9
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for side in [Side::Red, Side::Black] {
            // Rows counted from the side's own back rank
            let rank = |n: i8| match side {
                Side::Red => BOARD_ROWS - 1 - n,
                Side::Black => n,
            };

            for (col, &kind) in BACK_RANK.iter().enumerate() {
                board.place(Coord::new(col as i8, rank(0)), Piece::new(side, kind));
            }
            for col in CANNON_COLS {
                board.place(Coord::new(col, rank(2)), Piece::new(side, PieceKind::Cannon));
            }
            for col in SOLDIER_COLS {
                board.place(Coord::new(col, rank(3)), Piece::new(side, PieceKind::Soldier));
            }
        }

        board
    }

    /// Build a board from explicit placements (later entries overwrite earlier ones)
    pub fn from_pieces(pieces: &[(Coord, Piece)]) -> Self {
        let mut board = Self::empty();
        for &(coord, piece) in pieces {
            board.place(coord, piece);
        }
        board
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Piece at coord; `None` for empty or off-board cells
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        if !coord.is_valid() {
            return None;
        }
        self.cells[coord.row as usize][coord.col as usize]
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.get(coord).is_some()
    }

    /// Iterate pieces in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |coord| self.get(coord).map(|piece| (coord, piece)))
    }

    /// Rows from 0 (Black's back rank) to 9
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Piece>; COLS]> + '_ {
        self.cells.iter()
    }

    pub fn count(&self, side: Side) -> usize {
        self.pieces().filter(|(_, p)| p.side == side).count()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Place a piece, returning whatever occupied the cell.
    ///
    /// # Panics
    ///
    /// Panics if `coord` is off the board.
    pub fn place(&mut self, coord: Coord, piece: Piece) -> Option<Piece> {
        assert!(coord.is_valid(), "placing piece off the board at {}", coord);
        self.cells[coord.row as usize][coord.col as usize].replace(piece)
    }

    /// Remove and return the piece at coord (no-op off the board)
    pub fn take(&mut self, coord: Coord) -> Option<Piece> {
        if !coord.is_valid() {
            return None;
        }
        self.cells[coord.row as usize][coord.col as usize].take()
    }

    // ========================================================================
    // RAY CASTING
    // ========================================================================

    /// First occupied cell scanning from the neighbor of `from` in `direction`.
    /// `from` itself is never inspected.
    pub fn nearest_piece(&self, direction: Direction, from: Coord) -> Option<(Coord, Piece)> {
        let mut current = from.step(direction);
        while current.is_valid() {
            if let Some(piece) = self.get(current) {
                return Some((current, piece));
            }
            current = current.step(direction);
        }
        None
    }
}

/// Standard starting board
pub fn initialize_board() -> Board {
    Board::initial()
}
