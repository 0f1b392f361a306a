//! Game state, move application and replay-based undo

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::coord::Coord;
use crate::error::RulesError;
use crate::pieces::{Piece, Side};
use crate::rules::legal_moves;

// ============================================================================
// CORE TYPES
// ============================================================================

/// One applied move, recorded for undo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub piece: Piece,
    pub from: Coord,
    pub to: Coord,
    /// Piece removed from `to`, if any. Informational: undo replays instead.
    #[serde(default)]
    pub captured: Option<Piece>,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.piece, self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " x {}", captured)?;
        }
        Ok(())
    }
}

/// Game state (mutated in place by its single owner)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Side to move
    pub turn: Side,
    pub board: Board,
    /// Black pieces captured by Red, in capture order
    pub red_captured: Vec<Piece>,
    /// Red pieces captured by Black, in capture order
    pub black_captured: Vec<Piece>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position, Red to move
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Side::Red)
    }

    /// Game from an arbitrary position with empty captured lists
    pub fn from_board(board: Board, turn: Side) -> Self {
        Self {
            turn,
            board,
            red_captured: Vec::new(),
            black_captured: Vec::new(),
        }
    }

    /// Pieces captured by `side`
    pub fn captured_by(&self, side: Side) -> &[Piece] {
        match side {
            Side::Red => &self.red_captured,
            Side::Black => &self.black_captured,
        }
    }

    /// Legal destinations for whatever stands on `from` (empty if nothing)
    pub fn legal_moves_from(&self, from: Coord) -> FxHashSet<Coord> {
        match self.board.get(from) {
            Some(piece) => legal_moves(piece, from, &self.board),
            None => Default::default(),
        }
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Move the piece on `from` to `to` if that is legal.
    ///
    /// On success the capture (if any) is recorded for the mover, the turn
    /// flips and the step is returned. Otherwise nothing changes and `None`
    /// is returned. The side to move is not checked against the piece.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Option<Step> {
        let piece = match self.board.get(from) {
            Some(p) => p,
            None => {
                tracing::trace!(%from, %to, "no piece to move");
                return None;
            }
        };

        if !legal_moves(piece, from, &self.board).contains(&to) {
            tracing::trace!(%piece, %from, %to, "illegal move rejected");
            return None;
        }

        self.board.take(from).expect("No piece at from position");
        let captured = self.board.place(to, piece);

        if let Some(captured) = captured {
            tracing::debug!(%piece, %captured, at = %to, "capture");
            match piece.side {
                Side::Red => self.red_captured.push(captured),
                Side::Black => self.black_captured.push(captured),
            }
        }

        self.turn = self.turn.opponent();

        let step = Step { piece, from, to, captured };
        tracing::debug!(%step, turn = %self.turn, "move applied");
        Some(step)
    }
}

/// Free-function form of [`Game::apply_move`]
pub fn apply_move(from: Coord, to: Coord, game: &mut Game) -> Option<Step> {
    game.apply_move(from, to)
}

// ============================================================================
// HISTORY
// ============================================================================

/// Ordered record of applied steps, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepHistory {
    steps: Vec<Step>,
}

impl StepHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Rebuild the game by applying `steps` to the starting position
    pub fn replay(steps: &[Step]) -> Result<Game, RulesError> {
        let mut game = Game::new();
        for (index, step) in steps.iter().enumerate() {
            let diverged = || RulesError::ReplayDiverged { index, step: *step };
            if game.board.get(step.from) != Some(step.piece) {
                return Err(diverged());
            }
            game.apply_move(step.from, step.to).ok_or_else(diverged)?;
        }
        tracing::debug!(steps = steps.len(), "history replayed");
        Ok(game)
    }

    /// Drop the last step and return the game as it stood before it.
    /// Captured lists and turn are rebuilt by the replay as well.
    pub fn undo(&mut self) -> Result<Game, RulesError> {
        let undone = self.steps.pop();
        match Self::replay(&self.steps) {
            Ok(game) => {
                if let Some(step) = undone {
                    tracing::debug!(%step, "step undone");
                }
                Ok(game)
            }
            Err(e) => {
                // Leave the history as it was on failure
                self.steps.extend(undone);
                Err(e)
            }
        }
    }
}

impl From<Vec<Step>> for StepHistory {
    fn from(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

/// Board as it stood before the last step of `history`
pub fn undo_last_move(history: &[Step]) -> Result<Board, RulesError> {
    let remaining = history.len().saturating_sub(1);
    StepHistory::replay(&history[..remaining]).map(|game| game.board)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceKind;

    fn c(col: i8, row: i8) -> Coord {
        Coord::new(col, row)
    }

    #[test]
    fn test_game_creation() {
        let game = Game::new();
        assert_eq!(game.turn, Side::Red);
        assert_eq!(game.board, Board::initial());
        assert!(game.red_captured.is_empty());
        assert!(game.black_captured.is_empty());
    }

    #[test]
    fn test_apply_legal_move() {
        let mut game = Game::new();
        let step = game.apply_move(c(0, 6), c(0, 5)).expect("soldier advance is legal");

        assert_eq!(step.piece, Piece::new(Side::Red, PieceKind::Soldier));
        assert_eq!(step.captured, None);
        assert_eq!(game.turn, Side::Black);
        assert_eq!(game.board.get(c(0, 6)), None);
        assert_eq!(game.board.get(c(0, 5)), Some(step.piece));
    }

    #[test]
    fn test_rejected_moves_change_nothing() {
        let mut game = Game::new();
        let before = game.clone();

        // Empty source
        assert_eq!(game.apply_move(c(0, 5), c(0, 4)), None);
        // Illegal destination
        assert_eq!(game.apply_move(c(0, 6), c(1, 6)), None);
        // Self-capture
        assert_eq!(game.apply_move(c(0, 9), c(0, 6)), None);
        // Off the board
        assert_eq!(game.apply_move(c(0, 6), c(0, -1)), None);

        assert_eq!(game, before);
    }

    #[test]
    fn test_off_turn_piece_is_not_rejected() {
        let mut game = Game::new();
        let step = game.apply_move(c(0, 3), c(0, 4));
        assert!(step.is_some());
        // Turn flips even though Black moved out of turn
        assert_eq!(game.turn, Side::Black);
    }

    #[test]
    fn test_capture_accounting() {
        let mut game = Game::new();
        // Red cannon takes the black horse over the black cannon screen
        let step = game.apply_move(c(1, 7), c(1, 0)).expect("cannon capture");
        assert_eq!(step.captured, Some(Piece::new(Side::Black, PieceKind::Horse)));
        assert_eq!(game.red_captured, vec![Piece::new(Side::Black, PieceKind::Horse)]);
        assert!(game.black_captured.is_empty());
        assert_eq!(game.board.get(c(1, 0)), Some(Piece::new(Side::Red, PieceKind::Cannon)));
        assert_eq!(game.board.count(Side::Black), 15);

        // Black chariot recaptures
        game.apply_move(c(0, 0), c(1, 0)).expect("chariot recapture");
        assert_eq!(game.black_captured, vec![Piece::new(Side::Red, PieceKind::Cannon)]);
        assert_eq!(game.captured_by(Side::Black).len(), 1);
        assert_eq!(game.turn, Side::Red);
    }

    #[test]
    fn test_replay_and_undo() {
        let mut game = Game::new();
        let mut history = StepHistory::new();
        history.push(game.apply_move(c(1, 7), c(1, 0)).expect("cannon capture"));
        history.push(game.apply_move(c(0, 0), c(1, 0)).expect("chariot recapture"));
        let before_last = {
            let mut g = Game::new();
            g.apply_move(c(1, 7), c(1, 0));
            g
        };

        assert_eq!(StepHistory::replay(history.steps()), Ok(game.clone()));
        assert_eq!(undo_last_move(history.steps()), Ok(before_last.board.clone()));

        let undone = history.undo().expect("undo replays");
        assert_eq!(undone, before_last);
        assert_eq!(history.len(), 1);

        let undone = history.undo().expect("undo replays");
        assert_eq!(undone, Game::new());
        assert!(history.is_empty());

        // Nothing left to undo
        assert_eq!(history.undo(), Ok(Game::new()));
    }

    #[test]
    fn test_replay_diverged() {
        let forged = Step {
            piece: Piece::new(Side::Red, PieceKind::Chariot),
            from: c(0, 9),
            to: c(0, 5),
            captured: None,
        };
        let mut history = StepHistory::from(vec![forged, forged]);
        assert_eq!(
            StepHistory::replay(history.steps()),
            Err(RulesError::ReplayDiverged { index: 0, step: forged })
        );
        assert!(history.undo().is_err());
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_replay_rejects_wrong_piece() {
        let forged = Step {
            piece: Piece::new(Side::Red, PieceKind::Chariot),
            from: c(0, 6),
            to: c(0, 5),
            captured: None,
        };
        assert!(StepHistory::replay(&[forged]).is_err());
    }

    #[test]
    fn test_history_json_without_captured_field() {
        let json = r#"[{"piece":{"side":"Red","kind":"Soldier"},"from":{"col":0,"row":6},"to":{"col":0,"row":5}}]"#;
        let history: StepHistory = serde_json::from_str(json).expect("history parses");
        assert_eq!(history.len(), 1);
        assert_eq!(history.steps()[0].captured, None);

        let game = StepHistory::replay(history.steps()).expect("replays");
        assert_eq!(game.turn, Side::Black);
    }

    #[test]
    fn test_step_display() {
        let mut game = Game::new();
        let step = game.apply_move(c(1, 7), c(1, 0)).expect("cannon capture");
        assert_eq!(step.to_string(), "red cannon 1.7-1.0 x black horse");
    }
}
