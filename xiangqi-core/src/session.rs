//! Caller-owned play session: selection, step history and undo
//!
//! The session is the only place that enforces whose turn it is: a piece
//! may be selected only by the side to move. `Game::apply_move` itself
//! accepts any piece.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::RulesError;
use crate::game::{Game, Step, StepHistory};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    game: Game,
    selected: Option<Coord>,
    history: StepHistory,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn history(&self) -> &StepHistory {
        &self.history
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Legal destinations of the selected piece, for move markers
    pub fn highlighted_moves(&self) -> FxHashSet<Coord> {
        match self.selected {
            Some(at) => self.game.legal_moves_from(at),
            None => FxHashSet::default(),
        }
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    /// Select a square, or clear the selection with `None`.
    ///
    /// A square is accepted only if it holds a piece of the side to move;
    /// otherwise the current selection is kept and `false` is returned.
    pub fn select(&mut self, coord: Option<Coord>) -> bool {
        if let Some(at) = coord {
            let owner = self.game.board.get(at).map(|p| p.side);
            if owner != Some(self.game.turn) {
                tracing::trace!(%at, turn = %self.game.turn, "selection refused");
                return false;
            }
        }
        self.selected = coord;
        true
    }

    /// Move the selected piece to `to`. The selection is cleared either way.
    pub fn move_selected_to(&mut self, to: Coord) -> Option<Step> {
        let from = self.selected.take()?;
        let step = self.game.apply_move(from, to)?;
        self.history.push(step);
        Some(step)
    }

    /// Undo the last step by replaying the rest of the history
    pub fn go_back(&mut self) -> Result<(), RulesError> {
        self.game = self.history.undo()?;
        self.selected = None;
        Ok(())
    }
}
