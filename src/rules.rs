//! Pig turn rules as pure functions over [`GameState`].
//!
//! Nothing here touches storage or randomness: a roll takes the die face as
//! an argument, and every function returns a new state or a rejection.

use core::fmt;
use core::str::FromStr;

use crate::die::{MAX_FACE, MIN_FACE};
use crate::error::{ActionError, ParseActionError};
use crate::state::GameState;

/// The die face that busts a turn.
pub const BUST_FACE: u8 = 1;

/// A gameplay action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Action {
    /// Roll the die and add the face to the turn total.
    Roll,
    /// Bank the turn total and pass the turn.
    Hold,
}

impl Action {
    /// Returns the lowercase name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Roll => "roll",
            Self::Hold => "hold",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "roll" => Ok(Self::Roll),
            "hold" => Ok(Self::Hold),
            _ => Err(ParseActionError),
        }
    }
}

/// Checks that the game accepts gameplay actions at all.
///
/// # Errors
///
/// Returns [`ActionError::NotReady`] before the second player has joined and
/// [`ActionError::GameOver`] once the game has been won.
pub const fn ensure_playable(state: &GameState) -> Result<(), ActionError> {
    if !state.ready {
        return Err(ActionError::NotReady);
    }
    if state.over {
        return Err(ActionError::GameOver);
    }
    Ok(())
}

/// Applies a roll showing `face` to `state`.
///
/// A [`BUST_FACE`] wipes the turn total and passes the turn; any other face
/// is added to the turn total. Faces outside `1..=6` are clamped into range.
///
/// # Errors
///
/// Returns an error if the game is not ready or already over.
pub const fn roll(state: &GameState, face: u8) -> Result<GameState, ActionError> {
    if let Err(err) = ensure_playable(state) {
        return Err(err);
    }

    let face = if face < MIN_FACE {
        MIN_FACE
    } else if face > MAX_FACE {
        MAX_FACE
    } else {
        face
    };

    let mut next = *state;
    next.last_roll = Some(face);
    if face == BUST_FACE {
        next.turn_total = 0;
        next.current_player = state.current_player.other();
    } else {
        next.turn_total = state.turn_total.saturating_add(face as u32);
    }
    Ok(next)
}

/// Banks the turn total for the current player.
///
/// Reaching or exceeding `winning_score` ends the game with the current
/// player as winner; otherwise the turn passes.
///
/// # Errors
///
/// Returns an error if the game is not ready or already over, if the last
/// roll busted the turn, or if there is nothing to bank.
pub const fn hold(state: &GameState, winning_score: u32) -> Result<GameState, ActionError> {
    if let Err(err) = ensure_playable(state) {
        return Err(err);
    }
    if matches!(state.last_roll, Some(BUST_FACE)) {
        return Err(ActionError::TurnAlreadyEnded);
    }
    if state.turn_total == 0 {
        return Err(ActionError::NothingToBank);
    }

    let seat = state.current_player;
    let mut next = *state;
    next.scores[seat.index()] = state.scores[seat.index()].saturating_add(state.turn_total);
    next.turn_total = 0;
    next.last_roll = None;

    if next.scores[seat.index()] >= winning_score {
        next.over = true;
        next.winner = Some(seat);
    } else {
        next.current_player = seat.other();
    }
    Ok(next)
}

/// Applies `action` to `state`, drawing a face from `draw` only for a roll
/// that passes its preconditions.
///
/// # Errors
///
/// Returns the rejection from [`roll`] or [`hold`].
pub fn apply(
    state: &GameState,
    action: Action,
    winning_score: u32,
    draw: impl FnOnce() -> u8,
) -> Result<GameState, ActionError> {
    match action {
        Action::Roll => {
            ensure_playable(state)?;
            roll(state, draw())
        }
        Action::Hold => hold(state, winning_score),
    }
}
