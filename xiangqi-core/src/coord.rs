//! Board coordinates and the `"{col}.{row}"` key codec

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoordError;

/// Number of columns (files)
pub const BOARD_COLS: i8 = 9;

/// Number of rows (ranks); row 0 is Black's back rank
pub const BOARD_ROWS: i8 = 10;

/// A board intersection. Ordered by column, then row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub col: i8,
    pub row: i8,
}

impl Coord {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        (0..BOARD_COLS).contains(&self.col) && (0..BOARD_ROWS).contains(&self.row)
    }

    /// Coordinate shifted by (dcol, drow); may be off the board
    pub fn offset(&self, dcol: i8, drow: i8) -> Coord {
        Coord::new(self.col + dcol, self.row + drow)
    }

    /// Adjacent coordinate in a direction; may be off the board
    pub fn step(&self, direction: Direction) -> Coord {
        let (dcol, drow) = direction.vector();
        self.offset(dcol, drow)
    }

    /// Canonical string key
    pub fn key(&self) -> String {
        encode(self.col, self.row)
    }

    /// All 90 on-board coordinates in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_ROWS).flat_map(|row| (0..BOARD_COLS).map(move |col| Coord::new(col, row)))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.col, self.row)
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let (col, row) = key
            .trim()
            .split_once('.')
            .ok_or_else(|| CoordError::Malformed(key.to_string()))?;
        let not_a_number = |_| CoordError::NotANumber { key: key.to_string() };
        let col: i64 = col.parse().map_err(not_a_number)?;
        let row: i64 = row.parse().map_err(not_a_number)?;

        if !(0..BOARD_COLS as i64).contains(&col) || !(0..BOARD_ROWS as i64).contains(&row) {
            return Err(CoordError::OutOfBounds { col, row });
        }
        Ok(Coord::new(col as i8, row as i8))
    }
}

/// Encode a (column, row) pair as its canonical key. No range validation.
pub fn encode(col: i8, row: i8) -> String {
    format!("{}.{}", col, row)
}

/// Decode a canonical key produced by [`encode`].
///
/// # Panics
///
/// Panics on a malformed or off-board key. Keys only ever come from
/// [`encode`], so this is a caller bug; parse untrusted text with
/// `str::parse::<Coord>` instead.
pub fn decode(key: &str) -> Coord {
    key.parse()
        .unwrap_or_else(|e| panic!("invalid coordinate key {:?}: {}", key, e))
}

/// Orthogonal scan directions. `Up` decreases the row index (toward Black).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// (dcol, drow) for one step
    pub fn vector(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
