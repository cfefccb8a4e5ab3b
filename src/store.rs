//! Concurrent storage of game records.
//!
//! The store maps each [`GameId`] to its own lock. The map lock is only held
//! for writing while a new game is inserted; reads and compare-and-swap
//! updates lock just the record they touch, so games never contend with each
//! other. Games waiting for an opponent are also queued oldest first, so
//! matchmaking does not scan the whole map.

use alloc::collections::VecDeque;
use alloc::sync::Arc;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::state::{GameId, GameRecord, GameSummary};
use crate::sync::{Mutex, RwLock};

type Slot = Arc<Mutex<GameRecord>>;

/// Authoritative, thread-safe mapping from game identifier to game record.
///
/// All mutation of an existing record goes through
/// [`compare_and_swap`](Self::compare_and_swap).
pub struct GameStore {
    /// Game records, each behind its own lock.
    games: RwLock<HashMap<GameId, Slot>>,
    /// Games that may still have an open seat, oldest first. Entries whose
    /// seat has since been claimed are dropped lazily.
    open: Mutex<VecDeque<GameId>>,
    /// Generator for new game identifiers.
    rng: Mutex<ChaCha8Rng>,
}

impl GameStore {
    /// Creates an empty store whose identifiers are drawn from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            open: Mutex::new(VecDeque::new()),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn next_id(&self) -> GameId {
        let mut bytes = [0u8; 16];
        self.rng.lock().fill_bytes(&mut bytes);
        GameId::from_random_bytes(bytes)
    }

    fn slot(&self, game_id: GameId) -> Option<Slot> {
        self.games.read().get(&game_id).cloned()
    }

    /// Creates a new game with only seat 0 claimed.
    ///
    /// The identifier is never one already in the store.
    pub fn create(&self) -> (GameId, GameRecord) {
        let mut games = self.games.write();
        let game_id = loop {
            let candidate = self.next_id();
            if !games.contains_key(&candidate) {
                break candidate;
            }
        };

        let record = GameRecord::new(game_id);
        games.insert(game_id, Arc::new(Mutex::new(record)));
        drop(games);
        self.open.lock().push_back(game_id);

        info!(%game_id, "created game");
        (game_id, record)
    }

    /// Returns the current record of a game.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the game does not exist.
    pub fn get(&self, game_id: GameId) -> Result<GameRecord, StoreError> {
        let slot = self.slot(game_id).ok_or(StoreError::NotFound)?;
        let record = *slot.lock();
        Ok(record)
    }

    /// Returns the longest-waiting game that still has an open seat, if any.
    ///
    /// Two callers may be handed the same game; only one of them can claim it
    /// through [`compare_and_swap`](Self::compare_and_swap). Each game leaves
    /// the queue once, so the cost is amortized constant.
    #[must_use]
    pub fn find_open_seat(&self) -> Option<GameId> {
        let mut open = self.open.lock();
        while let Some(&game_id) = open.front() {
            let still_open = self
                .slot(game_id)
                .is_some_and(|slot| slot.lock().is_open());
            if still_open {
                return Some(game_id);
            }
            open.pop_front();
        }
        None
    }

    /// Replaces the record of `game_id` with `new` if it still equals
    /// `expected`.
    ///
    /// A successful swap is visible to every later [`get`](Self::get).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidTransition`] if `new` belongs to another
    /// game or is not a legal successor of the stored record (see
    /// [`GameRecord::permits`]), [`StoreError::NotFound`] if the game does
    /// not exist, and [`StoreError::Conflict`] if the record no longer
    /// matches `expected`.
    pub fn compare_and_swap(
        &self,
        game_id: GameId,
        expected: &GameRecord,
        new: GameRecord,
    ) -> Result<(), StoreError> {
        if new.state().game_id() != game_id {
            return Err(StoreError::InvalidTransition);
        }

        let slot = self.slot(game_id).ok_or(StoreError::NotFound)?;
        let mut current = slot.lock();
        if *current != *expected {
            drop(current);
            debug!(%game_id, "compare-and-swap conflict");
            return Err(StoreError::Conflict);
        }
        if !current.permits(&new) {
            drop(current);
            debug!(%game_id, "rejected invalid record transition");
            return Err(StoreError::InvalidTransition);
        }

        *current = new;
        Ok(())
    }

    /// Returns the number of stored games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    /// Returns whether the store holds no games.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }

    /// Returns a summary of every stored game, ordered by identifier.
    #[must_use]
    pub fn summaries(&self) -> Vec<GameSummary> {
        let mut summaries: Vec<GameSummary> = self
            .games
            .read()
            .values()
            .map(|slot| slot.lock().summary())
            .collect();
        summaries.sort_unstable_by_key(|summary| summary.game_id);
        summaries
    }
}
