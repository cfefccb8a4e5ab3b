//! Game configuration options.

/// Number of seats in every game.
pub const PLAYER_COUNT: usize = 2;

/// Score a player must reach or exceed to win, unless configured otherwise.
pub const DEFAULT_WINNING_SCORE: u32 = 100;

/// Extra attempts an operation makes after losing a compare-and-swap race.
pub const DEFAULT_MAX_RETRIES: u32 = 16;

/// Configuration options for a Pig game service.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use pigrs::GameOptions;
///
/// let options = GameOptions::default()
///     .with_winning_score(50)
///     .with_max_retries(4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameOptions {
    /// Score that ends the game when reached or exceeded on a hold.
    pub winning_score: u32,
    /// Bound on retries after a compare-and-swap conflict.
    pub max_retries: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            winning_score: DEFAULT_WINNING_SCORE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl GameOptions {
    /// Sets the winning score.
    ///
    /// A score of 0 would end every game on the first hold, so it falls back
    /// to [`DEFAULT_WINNING_SCORE`].
    ///
    /// # Example
    ///
    /// ```
    /// use pigrs::{GameOptions, DEFAULT_WINNING_SCORE};
    ///
    /// let options = GameOptions::default().with_winning_score(50);
    /// assert_eq!(options.winning_score, 50);
    ///
    /// let options = GameOptions::default().with_winning_score(0);
    /// assert_eq!(options.winning_score, DEFAULT_WINNING_SCORE);
    /// ```
    #[must_use]
    pub const fn with_winning_score(mut self, score: u32) -> Self {
        self.winning_score = if score == 0 {
            DEFAULT_WINNING_SCORE
        } else {
            score
        };
        self
    }

    /// Sets the compare-and-swap retry budget.
    ///
    /// # Example
    ///
    /// ```
    /// use pigrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_max_retries(0);
    /// assert_eq!(options.max_retries, 0);
    /// ```
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}
