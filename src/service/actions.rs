use tracing::{debug, info, instrument};

use crate::error::ActionError;
use crate::rules::{self, Action};
use crate::state::{GameId, GameState};

use super::PigService;

impl PigService {
    /// Rolls the die for the player whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the game does not exist, is waiting for a second
    /// player, or is already over.
    pub fn roll(&self, game_id: GameId) -> Result<GameState, ActionError> {
        self.apply(game_id, Action::Roll)
    }

    /// Banks the current turn total and passes the turn, or ends the game
    /// if the banked score reaches the winning score.
    ///
    /// # Errors
    ///
    /// Returns an error if the game does not exist, is waiting for a second
    /// player, is already over, the last roll busted, or the turn total is
    /// zero.
    pub fn hold(&self, game_id: GameId) -> Result<GameState, ActionError> {
        self.apply(game_id, Action::Hold)
    }

    /// Applies a roll or hold atomically.
    ///
    /// A roll draws one face from the die, after its preconditions pass, and
    /// keeps that face if the update has to be retried.
    ///
    /// # Errors
    ///
    /// Returns the rejection from the turn rules, [`ActionError::NotFound`]
    /// for an unknown game, or [`ActionError::Contended`] if the retry
    /// budget runs out.
    #[instrument(skip(self, game_id), fields(game_id = %game_id))]
    pub fn apply(&self, game_id: GameId, action: Action) -> Result<GameState, ActionError> {
        let winning_score = self.options.winning_score;
        let mut face = None;

        let result = self.update(game_id, |record| {
            let next = rules::apply(&record.state(), action, winning_score, || {
                *face.get_or_insert_with(|| self.die.roll())
            })?;
            Ok(record.with_state(next))
        });

        let state = match result {
            Ok(record) => record.state(),
            Err(err) => {
                debug!(%err, "action rejected");
                return Err(err);
            }
        };

        debug!(
            face,
            turn_total = state.turn_total(),
            scores = ?state.scores(),
            current_player = %state.current_player(),
            "action applied"
        );
        if let Some(winner) = state.winner() {
            info!(%winner, scores = ?state.scores(), "game over");
        }
        Ok(state)
    }
}
