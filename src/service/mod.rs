//! The game service: matchmaking and turn actions over a shared store.

use alloc::boxed::Box;
use alloc::sync::Arc;
use tracing::{debug, warn};

use crate::die::{DieSource, SeededDie};
use crate::error::{ActionError, StoreError};
use crate::options::GameOptions;
use crate::state::{GameId, GameRecord, GameState};
use crate::store::GameStore;

mod actions;
mod matchmaker;

pub use matchmaker::Seating;

/// Entry point for a transport layer: seats players and applies their rolls
/// and holds.
///
/// The service is `Sync`; share one instance (for example behind an `Arc`)
/// between all request handlers. Each service owns or shares a
/// [`GameStore`], so separate services built with [`PigService::new`] never
/// see each other's games.
pub struct PigService {
    /// Game records.
    store: Arc<GameStore>,
    /// Die used for every roll.
    die: Box<dyn DieSource>,
    /// Game options.
    options: GameOptions,
}

impl PigService {
    /// Creates a service with its own store and a seeded die.
    ///
    /// # Example
    ///
    /// ```
    /// use pigrs::{GameOptions, PigService, Seat};
    ///
    /// let service = PigService::new(GameOptions::default(), 42);
    /// let host = service.start_or_join();
    /// let guest = service.start_or_join();
    /// assert_eq!(host.game_id, guest.game_id);
    /// assert_eq!(guest.seat, Seat::Second);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        Self::with_die(options, seed, SeededDie::new(seed.wrapping_add(1)))
    }

    /// Creates a service with its own store and the given die.
    #[must_use]
    pub fn with_die(options: GameOptions, seed: u64, die: impl DieSource + 'static) -> Self {
        Self::with_store(options, Arc::new(GameStore::new(seed)), die)
    }

    /// Creates a service over an existing store.
    #[must_use]
    pub fn with_store(
        options: GameOptions,
        store: Arc<GameStore>,
        die: impl DieSource + 'static,
    ) -> Self {
        Self {
            store,
            die: Box::new(die),
            options,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    /// Returns the game options.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current state of a game.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotFound`] if the game does not exist.
    pub fn state(&self, game_id: GameId) -> Result<GameState, ActionError> {
        Ok(self.store.get(game_id)?.state())
    }

    /// Reads the record, runs `transition` on it, and swaps the result in.
    ///
    /// A conflicting write re-reads and re-runs `transition`, at most
    /// `max_retries` extra times.
    fn update<F>(&self, game_id: GameId, mut transition: F) -> Result<GameRecord, ActionError>
    where
        F: FnMut(&GameRecord) -> Result<GameRecord, ActionError>,
    {
        for attempt in 0..=self.options.max_retries {
            let current = self.store.get(game_id)?;
            let next = transition(&current)?;
            match self.store.compare_and_swap(game_id, &current, next) {
                Ok(()) => return Ok(next),
                Err(StoreError::Conflict) => {
                    debug!(%game_id, attempt, "lost update race, retrying");
                }
                Err(err @ (StoreError::NotFound | StoreError::InvalidTransition)) => {
                    return Err(err.into());
                }
            }
        }

        warn!(
            %game_id,
            retries = self.options.max_retries,
            "retry budget exhausted"
        );
        Err(ActionError::Contended)
    }
}
