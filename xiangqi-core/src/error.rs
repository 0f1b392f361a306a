//! Error types for the rules engine
//!
//! Rejected moves are not errors: they surface as `None` or an empty set.

use thiserror::Error;

use crate::game::Step;

/// Failure to parse a `"{col}.{row}"` coordinate key
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CoordError {
    #[error("coordinate key {0:?} is not of the form \"col.row\"")]
    Malformed(String),
    #[error("coordinate key {key:?} has a non-numeric component")]
    NotANumber { key: String },
    #[error("coordinate {col}.{row} is off the 9x10 board")]
    OutOfBounds { col: i64, row: i64 },
}

/// Failure while rebuilding a game from its step history
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("step {index} ({step}) does not replay on the reconstructed board")]
    ReplayDiverged { index: usize, step: Step },
}
