use tracing::{debug, info, instrument};

use crate::error::StoreError;
use crate::state::{GameId, Seat};

use super::PigService;

/// Where [`PigService::start_or_join`] seated a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seating {
    /// The game the player belongs to.
    pub game_id: GameId,
    /// The player's seat in that game.
    #[cfg_attr(feature = "serde", serde(rename = "player_id"))]
    pub seat: Seat,
}

impl PigService {
    /// Seats a player: joins a game waiting for an opponent as seat 1, or
    /// creates a new game as seat 0 when none is waiting.
    ///
    /// This never fails. Losing a race for an open seat searches again; once
    /// the retry budget is spent the player gets a fresh game instead.
    #[instrument(skip(self))]
    pub fn start_or_join(&self) -> Seating {
        self.seat_player(|game_id| self.claim_second_seat(game_id))
    }

    fn seat_player<F>(&self, mut claim: F) -> Seating
    where
        F: FnMut(GameId) -> Result<(), StoreError>,
    {
        for attempt in 0..=self.options.max_retries {
            let Some(game_id) = self.store.find_open_seat() else {
                break;
            };

            match claim(game_id) {
                Ok(()) => {
                    info!(%game_id, "second player joined");
                    return Seating {
                        game_id,
                        seat: Seat::Second,
                    };
                }
                Err(err) => debug!(%game_id, attempt, %err, "could not claim open seat"),
            }
        }

        let (game_id, _) = self.store.create();
        Seating {
            game_id,
            seat: Seat::First,
        }
    }

    fn claim_second_seat(&self, game_id: GameId) -> Result<(), StoreError> {
        let current = self.store.get(game_id)?;
        let joined = current
            .with_second_player()
            .ok_or(StoreError::Conflict)?;
        self.store.compare_and_swap(game_id, &current, joined)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::options::GameOptions;
    use crate::service::PigService;
    use crate::state::Seat;

    #[test]
    fn losing_every_race_falls_back_to_new_game() {
        let service = PigService::new(GameOptions::default().with_max_retries(3), 1);
        let waiting = service.start_or_join().game_id;

        let mut attempts = 0;
        let seating = service.seat_player(|game_id| {
            assert_eq!(game_id, waiting);
            attempts += 1;
            Err(StoreError::Conflict)
        });

        assert_eq!(attempts, 4);
        assert_ne!(seating.game_id, waiting);
        assert_eq!(seating.seat, Seat::First);
        assert!(service.store().get(waiting).unwrap().is_open());
        assert_eq!(service.store().len(), 2);
    }

    #[test]
    fn race_lost_once_then_won_joins_waiting_game() {
        let service = PigService::new(GameOptions::default(), 1);
        let waiting = service.start_or_join().game_id;

        let mut lost = false;
        let seating = service.seat_player(|game_id| {
            if lost {
                service.claim_second_seat(game_id)
            } else {
                lost = true;
                Err(StoreError::Conflict)
            }
        });

        assert_eq!(seating.game_id, waiting);
        assert_eq!(seating.seat, Seat::Second);
        assert_eq!(service.store().len(), 1);
    }
}
