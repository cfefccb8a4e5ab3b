//! Error types for store and game operations.

use thiserror::Error;

/// Errors returned by the game store primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No game with this identifier exists.
    #[error("game not found")]
    NotFound,
    /// The record changed between the read and the attempted write.
    #[error("game record was modified concurrently")]
    Conflict,
    /// The replacement record belongs to another game or would undo a
    /// one-way change (a claimed seat, readiness, or a finished game).
    #[error("invalid game record transition")]
    InvalidTransition,
}

/// Errors that can occur when reading a game or applying a roll or hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No game with this identifier exists.
    #[error("game not found")]
    NotFound,
    /// The game is still waiting for a second player.
    #[error("game is waiting for a second player to join")]
    NotReady,
    /// The game has already been won.
    #[error("game is already over")]
    GameOver,
    /// The last roll was a 1, so the turn has already passed.
    #[error("turn has already ended after rolling a 1")]
    TurnAlreadyEnded,
    /// There are no turn points to bank.
    #[error("nothing to bank; roll at least once before holding")]
    NothingToBank,
    /// The record kept changing underneath the operation until the retry
    /// budget ran out. The caller may try again.
    #[error("game is under heavy contention; try again")]
    Contended,
    /// The store refused the updated record.
    #[error("invalid game record transition")]
    InvalidTransition,
}

impl ActionError {
    /// Returns `true` for failures that may succeed if simply retried.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Contended)
    }
}

impl From<StoreError> for ActionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::Conflict => Self::Contended,
            StoreError::InvalidTransition => Self::InvalidTransition,
        }
    }
}

/// A string could not be parsed as a game identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid game id")]
pub struct ParseGameIdError;

/// A seat index other than 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("seat index {0} is out of range")]
pub struct InvalidSeat(pub u8);

/// A string that names no known action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown action; expected `roll` or `hold`")]
pub struct ParseActionError;
