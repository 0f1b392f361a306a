//! Xiangqi Core - Rules engine
//!
//! This crate provides the core game logic for Xiangqi (Chinese chess):
//! - Board geometry (9x10 grid, string coordinate keys)
//! - Piece types and display glyphs
//! - Per-piece legal move generation
//! - Move application, captures, turn switching and replay-based undo
//! - A caller-owned session with turn-gated selection

pub mod board;
pub mod coord;
pub mod error;
pub mod game;
pub mod pieces;
pub mod rules;
pub mod session;

// Re-exports for convenient access
pub use board::{initialize_board, Board};
pub use coord::{decode, encode, Coord, Direction, BOARD_COLS, BOARD_ROWS};
pub use error::{CoordError, RulesError};
pub use game::{apply_move, undo_last_move, Game, Step, StepHistory};
pub use pieces::{display_glyph, Piece, PieceKind, Side};
pub use rules::legal_moves;
pub use session::Session;
