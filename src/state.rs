//! Game identifiers, seats, and the game state value.

use core::fmt;
use core::str::FromStr;

use uuid::Uuid;

use crate::error::{InvalidSeat, ParseGameIdError};
use crate::options::PLAYER_COUNT;

/// Opaque, unique identifier of a game.
///
/// Formats and parses as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct GameId(Uuid);

impl GameId {
    /// Builds an identifier from its 128-bit value.
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Returns the 128-bit value of the identifier.
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    pub(crate) const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for GameId {
    type Err = ParseGameIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self).map_err(|_| ParseGameIdError)
    }
}

/// One of the two player slots in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "u8", try_from = "u8")
)]
pub enum Seat {
    /// Seat 0, held by the player who created the game. Moves first.
    First,
    /// Seat 1, held by the player who joined the game.
    Second,
}

impl Seat {
    /// Returns the seat index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Returns the opposing seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.index() as Self
    }
}

impl TryFrom<u8> for Seat {
    type Error = InvalidSeat;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::First),
            1 => Ok(Self::Second),
            other => Err(InvalidSeat(other)),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Named lifecycle stage of a game, derived from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Phase {
    /// Only the creator holds a seat.
    WaitingForOpponent,
    /// Both seats are taken and nothing has been rolled yet.
    Ready,
    /// Play has started.
    InProgress,
    /// A player has won. No further actions are accepted.
    Over,
}

/// Snapshot of a single game.
///
/// This is a value: every transition produces a new `GameState` rather than
/// modifying one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub(crate) game_id: GameId,
    #[cfg_attr(feature = "serde", serde(rename = "current_player_index"))]
    pub(crate) current_player: Seat,
    pub(crate) scores: [u32; PLAYER_COUNT],
    pub(crate) turn_total: u32,
    pub(crate) last_roll: Option<u8>,
    #[cfg_attr(feature = "serde", serde(rename = "ready_to_start"))]
    pub(crate) ready: bool,
    #[cfg_attr(feature = "serde", serde(rename = "is_game_over"))]
    pub(crate) over: bool,
    #[cfg_attr(feature = "serde", serde(rename = "winner_player_index"))]
    pub(crate) winner: Option<Seat>,
}

impl GameState {
    /// Creates the state of a freshly created game: seat 0 to move, no
    /// points, and not ready until a second player joins.
    #[must_use]
    pub const fn new(game_id: GameId) -> Self {
        Self {
            game_id,
            current_player: Seat::First,
            scores: [0; PLAYER_COUNT],
            turn_total: 0,
            last_roll: None,
            ready: false,
            over: false,
            winner: None,
        }
    }

    /// Returns the game identifier.
    #[must_use]
    pub const fn game_id(&self) -> GameId {
        self.game_id
    }

    /// Returns the seat whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> Seat {
        self.current_player
    }

    /// Returns the banked scores, indexed by seat.
    #[must_use]
    pub const fn scores(&self) -> [u32; PLAYER_COUNT] {
        self.scores
    }

    /// Returns the banked score of one seat.
    #[must_use]
    pub const fn score(&self, seat: Seat) -> u32 {
        self.scores[seat.index()]
    }

    /// Returns the points accumulated in the current turn.
    #[must_use]
    pub const fn turn_total(&self) -> u32 {
        self.turn_total
    }

    /// Returns the most recent roll, if the turn has one.
    #[must_use]
    pub const fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    /// Returns whether both seats are taken.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns whether the game has been won.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over
    }

    /// Returns the winning seat once the game is over.
    #[must_use]
    pub const fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Returns the lifecycle stage of the game.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if !self.ready {
            Phase::WaitingForOpponent
        } else if self.over {
            Phase::Over
        } else if self.scores[0] == 0
            && self.scores[1] == 0
            && self.turn_total == 0
            && self.last_roll.is_none()
        {
            Phase::Ready
        } else {
            Phase::InProgress
        }
    }
}

/// The unit the store holds: a game state plus how many seats are claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameRecord {
    state: GameState,
    seat_count: u8,
}

impl GameRecord {
    /// Creates the record of a new game with only the creator seated.
    #[must_use]
    pub const fn new(game_id: GameId) -> Self {
        Self {
            state: GameState::new(game_id),
            seat_count: 1,
        }
    }

    /// Returns the game state.
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns how many seats have been claimed (1 or 2).
    #[must_use]
    pub const fn seat_count(&self) -> u8 {
        self.seat_count
    }

    /// Returns whether a second player may still join.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.seat_count == 1 && !self.state.over
    }

    /// Returns this record with the second seat claimed and the game ready
    /// to play, or `None` if the game is not open.
    #[must_use]
    pub const fn with_second_player(&self) -> Option<Self> {
        if !self.is_open() {
            return None;
        }

        let mut state = self.state;
        state.ready = true;
        Some(Self {
            state,
            seat_count: 2,
        })
    }

    /// Returns this record with its state replaced.
    #[must_use]
    pub const fn with_state(&self, state: GameState) -> Self {
        Self {
            state,
            seat_count: self.seat_count,
        }
    }

    /// Returns whether `next` may replace this record: same game, no seat
    /// given back, readiness matching the seats, no score lowered and a
    /// finished game left untouched.
    #[must_use]
    pub fn permits(&self, next: &Self) -> bool {
        let (current, new) = (&self.state, &next.state);
        let seats_kept = next.seat_count >= self.seat_count && next.seat_count <= 2;
        let scores_kept = new.scores[0] >= current.scores[0] && new.scores[1] >= current.scores[1];

        new.game_id == current.game_id
            && seats_kept
            && new.ready == (next.seat_count == 2)
            && (!current.over || new == current)
            && scores_kept
    }

    /// Returns a listing row for this record.
    #[must_use]
    pub const fn summary(&self) -> GameSummary {
        GameSummary {
            game_id: self.state.game_id,
            seat_count: self.seat_count,
            phase: self.state.phase(),
            scores: self.state.scores,
        }
    }
}

/// Overview of one stored game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSummary {
    /// The game identifier.
    pub game_id: GameId,
    /// Number of claimed seats.
    pub seat_count: u8,
    /// Lifecycle stage.
    pub phase: Phase,
    /// Banked scores, indexed by seat.
    pub scores: [u32; PLAYER_COUNT],
}
