//! Piece type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Direction};

/// Player side. Red moves first and starts on rows 6-9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Black,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// Row delta of one step toward the opponent's camp
    pub fn forward(self) -> i8 {
        match self {
            Side::Red => -1,
            Side::Black => 1,
        }
    }

    /// Direction facing the opponent's camp
    pub fn facing(self) -> Direction {
        match self {
            Side::Red => Direction::Up,
            Side::Black => Direction::Down,
        }
    }

    /// Whether `row` lies in this side's own half (before the river)
    pub fn owns_row(self, row: i8) -> bool {
        match self {
            Side::Red => (5..=9).contains(&row),
            Side::Black => (0..=4).contains(&row),
        }
    }

    /// Whether `coord` lies in this side's palace (columns 3-5, back three rows)
    pub fn in_palace(self, coord: Coord) -> bool {
        let rows = match self {
            Side::Red => 7..=9,
            Side::Black => 0..=2,
        };
        (3..=5).contains(&coord.col) && rows.contains(&coord.row)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Red => f.write_str("red"),
            Side::Black => f.write_str("black"),
        }
    }
}

/// Piece kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Soldier,
    Cannon,
    /// Rook-like slider
    Chariot,
    /// Knight-like jumper, blocked by an adjacent piece
    Horse,
    /// Two-step diagonal, confined to its own half
    Elephant,
    /// One-step diagonal, confined to the palace
    Advisor,
    General,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Soldier,
        PieceKind::Cannon,
        PieceKind::Chariot,
        PieceKind::Horse,
        PieceKind::Elephant,
        PieceKind::Advisor,
        PieceKind::General,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Soldier => "soldier",
            PieceKind::Cannon => "cannon",
            PieceKind::Chariot => "chariot",
            PieceKind::Horse => "horse",
            PieceKind::Elephant => "elephant",
            PieceKind::Advisor => "advisor",
            PieceKind::General => "general",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the kind name, also accepting the legacy aliases
/// (tesla, knight, bishop, minister).
impl FromStr for PieceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "soldier" => Ok(PieceKind::Soldier),
            "cannon" => Ok(PieceKind::Cannon),
            "chariot" | "tesla" => Ok(PieceKind::Chariot),
            "horse" | "knight" => Ok(PieceKind::Horse),
            "elephant" | "bishop" => Ok(PieceKind::Elephant),
            "advisor" | "minister" => Ok(PieceKind::Advisor),
            "general" => Ok(PieceKind::General),
            _ => Err(format!("Unknown piece kind: {}", s)),
        }
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(side: Side, kind: PieceKind) -> Self {
        Self { side, kind }
    }

    pub fn glyph(&self) -> char {
        display_glyph(self.kind, self.side)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side, self.kind)
    }
}

/// Traditional glyph for a piece. General, elephant and soldier differ by side.
pub fn display_glyph(kind: PieceKind, side: Side) -> char {
    match (kind, side) {
        (PieceKind::General, Side::Red) => '帥',
        (PieceKind::General, Side::Black) => '將',
        (PieceKind::Advisor, _) => '士',
        (PieceKind::Elephant, Side::Red) => '相',
        (PieceKind::Elephant, Side::Black) => '象',
        (PieceKind::Horse, _) => '馬',
        (PieceKind::Chariot, _) => '車',
        (PieceKind::Cannon, _) => '砲',
        (PieceKind::Soldier, Side::Red) => '兵',
        (PieceKind::Soldier, Side::Black) => '卒',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs() {
        assert_eq!(display_glyph(PieceKind::General, Side::Red), '帥');
        assert_eq!(display_glyph(PieceKind::General, Side::Black), '將');
        assert_eq!(display_glyph(PieceKind::Soldier, Side::Black), '卒');
        assert_eq!(Piece::new(Side::Red, PieceKind::Elephant).glyph(), '相');

        // Only general, elephant and soldier differ by side
        for kind in PieceKind::ALL {
            let differs = display_glyph(kind, Side::Red) != display_glyph(kind, Side::Black);
            let expected = matches!(
                kind,
                PieceKind::General | PieceKind::Elephant | PieceKind::Soldier
            );
            assert_eq!(differs, expected, "{}", kind);
        }
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!("TESLA".parse::<PieceKind>(), Ok(PieceKind::Chariot));
        assert_eq!("knight".parse::<PieceKind>(), Ok(PieceKind::Horse));
        assert_eq!("bishop".parse::<PieceKind>(), Ok(PieceKind::Elephant));
        assert_eq!("minister".parse::<PieceKind>(), Ok(PieceKind::Advisor));
        assert!("queen".parse::<PieceKind>().is_err());
        for kind in PieceKind::ALL {
            assert_eq!(kind.name().parse::<PieceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_palace_and_halves() {
        assert!(Side::Red.in_palace(Coord::new(4, 9)));
        assert!(Side::Red.in_palace(Coord::new(3, 7)));
        assert!(!Side::Red.in_palace(Coord::new(4, 6)));
        assert!(!Side::Red.in_palace(Coord::new(2, 8)));
        assert!(Side::Black.in_palace(Coord::new(5, 2)));
        assert!(!Side::Black.in_palace(Coord::new(5, 3)));

        assert!(Side::Red.owns_row(5));
        assert!(!Side::Red.owns_row(4));
        assert!(Side::Black.owns_row(0));
        assert!(!Side::Black.owns_row(5));
    }
}
