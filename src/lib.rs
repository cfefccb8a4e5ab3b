//! A two-player Pig dice game engine with matchmaking and a concurrent game
//! store.
//!
//! The crate provides a [`PigService`] that seats players into games,
//! applies their rolls and holds atomically, and serves the current
//! [`GameState`] of any game. The turn rules live in [`rules`] as pure
//! functions, and the [`GameStore`] holds every game behind per-record
//! compare-and-swap.
//!
//! # Example
//!
//! ```
//! use pigrs::{FixedDie, GameOptions, PigService, Seat};
//!
//! let service = PigService::with_die(GameOptions::default(), 7, FixedDie::new([5, 1]));
//! let game = service.start_or_join().game_id;
//! service.start_or_join();
//!
//! let state = service.roll(game).unwrap();
//! assert_eq!(state.turn_total(), 5);
//!
//! let state = service.hold(game).unwrap();
//! assert_eq!(state.score(Seat::First), 5);
//! assert_eq!(state.current_player(), Seat::Second);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod die;
pub mod error;
pub mod options;
pub mod rules;
pub mod service;
pub mod state;
pub mod store;
mod sync;

// Re-export main types
pub use die::{DieSource, FixedDie, SeededDie};
pub use error::{ActionError, InvalidSeat, ParseActionError, ParseGameIdError, StoreError};
pub use options::{DEFAULT_MAX_RETRIES, DEFAULT_WINNING_SCORE, GameOptions, PLAYER_COUNT};
pub use rules::Action;
pub use service::{PigService, Seating};
pub use state::{GameId, GameRecord, GameState, GameSummary, Phase, Seat};
pub use store::GameStore;
