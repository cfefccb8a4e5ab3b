//! Turn rule tests.

use pigrs::rules::{self, Action};
use pigrs::{
    ActionError, DieSource, GameId, GameRecord, GameState, ParseActionError, Phase, Seat,
    SeededDie,
};

const WIN: u32 = 100;

fn ready_state() -> GameState {
    GameRecord::new(GameId::from_u128(1))
        .with_second_player()
        .unwrap()
        .state()
}

fn roll_all(state: GameState, faces: &[u8]) -> GameState {
    faces
        .iter()
        .fold(state, |state, &face| rules::roll(&state, face).unwrap())
}

#[test]
fn actions_rejected_until_second_player_joins() {
    let state = GameState::new(GameId::from_u128(1));
    assert_eq!(state.phase(), Phase::WaitingForOpponent);

    assert_eq!(rules::roll(&state, 4).unwrap_err(), ActionError::NotReady);
    assert_eq!(rules::hold(&state, WIN).unwrap_err(), ActionError::NotReady);
}

#[test]
fn roll_adds_face_and_keeps_turn() {
    let state = ready_state();
    assert_eq!(state.phase(), Phase::Ready);

    let next = rules::roll(&state, 4).unwrap();
    assert_eq!(next.turn_total(), 4);
    assert_eq!(next.last_roll(), Some(4));
    assert_eq!(next.current_player(), Seat::First);
    assert_eq!(next.scores(), [0, 0]);
    assert_eq!(next.phase(), Phase::InProgress);

    let next = rules::roll(&next, 6).unwrap();
    assert_eq!(next.turn_total(), 10);
    assert_eq!(next.last_roll(), Some(6));
    assert_eq!(next.current_player(), Seat::First);
}

#[test]
fn rolling_one_busts_regardless_of_turn_total() {
    for faces in [&[][..], &[2][..], &[6, 6, 6, 5][..]] {
        let before = roll_all(ready_state(), faces);
        let after = rules::roll(&before, 1).unwrap();

        assert_eq!(after.turn_total(), 0);
        assert_eq!(after.current_player(), before.current_player().other());
        assert_eq!(after.last_roll(), Some(1));
        assert_eq!(after.scores(), before.scores());
    }
}

#[test]
fn hold_rejections() {
    let fresh = ready_state();
    assert_eq!(
        rules::hold(&fresh, WIN).unwrap_err(),
        ActionError::NothingToBank
    );

    let busted = roll_all(fresh, &[5, 1]);
    assert_eq!(
        rules::hold(&busted, WIN).unwrap_err(),
        ActionError::TurnAlreadyEnded
    );
}

#[test]
fn hold_banks_turn_total_and_passes_turn() {
    let state = roll_all(ready_state(), &[3, 4]);
    let held = rules::hold(&state, WIN).unwrap();

    assert_eq!(held.scores(), [7, 0]);
    assert_eq!(held.turn_total(), 0);
    assert_eq!(held.last_roll(), None);
    assert_eq!(held.current_player(), Seat::Second);
    assert!(!held.is_over());

    let state = roll_all(held, &[6, 2]);
    let held = rules::hold(&state, WIN).unwrap();
    assert_eq!(held.scores(), [7, 8]);
    assert_eq!(held.current_player(), Seat::First);
}

#[test]
fn reaching_winning_score_ends_game() {
    let mut faces = vec![6; 15];
    faces.extend([5, 2]);
    let state = roll_all(ready_state(), &faces);
    let state = rules::hold(&state, WIN).unwrap();
    assert_eq!(state.scores(), [97, 0]);

    let state = roll_all(state, &[1, 3]);
    assert_eq!(state.current_player(), Seat::First);
    assert_eq!(state.turn_total(), 3);

    let over = rules::hold(&state, WIN).unwrap();
    assert_eq!(over.scores(), [100, 0]);
    assert!(over.is_over());
    assert_eq!(over.winner(), Some(Seat::First));
    assert_eq!(over.current_player(), Seat::First);
    assert_eq!(over.turn_total(), 0);
    assert_eq!(over.last_roll(), None);
    assert_eq!(over.phase(), Phase::Over);

    assert_eq!(rules::roll(&over, 4).unwrap_err(), ActionError::GameOver);
    assert_eq!(rules::hold(&over, WIN).unwrap_err(), ActionError::GameOver);
}

#[test]
fn apply_draws_only_for_playable_roll() {
    let mut draws = 0;
    let waiting = GameState::new(GameId::from_u128(2));
    let err = rules::apply(&waiting, Action::Roll, WIN, || {
        draws += 1;
        4
    })
    .unwrap_err();
    assert_eq!(err, ActionError::NotReady);
    assert_eq!(draws, 0);

    let next = rules::apply(&ready_state(), Action::Roll, WIN, || {
        draws += 1;
        4
    })
    .unwrap();
    assert_eq!(next.turn_total(), 4);
    assert_eq!(draws, 1);

    let held = rules::apply(&next, Action::Hold, WIN, || unreachable!()).unwrap();
    assert_eq!(held.scores(), [4, 0]);
}

#[test]
fn action_names_round_trip() {
    assert_eq!("roll".parse::<Action>(), Ok(Action::Roll));
    assert_eq!("hold".parse::<Action>(), Ok(Action::Hold));
    assert_eq!("bank".parse::<Action>(), Err(ParseActionError));
    assert_eq!(Action::Hold.to_string(), "hold");
}

#[test]
fn seeded_game_keeps_invariants_until_someone_wins() {
    let die = SeededDie::new(2024);
    let mut state = ready_state();
    let mut previous = state.scores();

    for _ in 0..10_000 {
        if state.is_over() {
            break;
        }

        state = if state.turn_total() >= 20 {
            rules::hold(&state, WIN).unwrap()
        } else {
            rules::roll(&state, die.roll()).unwrap()
        };

        let scores = state.scores();
        assert!(scores[0] >= previous[0] && scores[1] >= previous[1]);
        previous = scores;

        if let Some(roll) = state.last_roll() {
            assert!((1..=6).contains(&roll));
        }
        if state.is_over() {
            let winner = state.winner().unwrap();
            assert!(state.score(winner) >= WIN);
            assert_eq!(state.turn_total(), 0);
            assert_eq!(state.last_roll(), None);
        } else {
            assert!(scores.iter().all(|&score| score < WIN));
            assert_eq!(state.winner(), None);
        }
    }

    assert!(state.is_over());
}

#[test]
fn out_of_range_faces_are_clamped() {
    let low = rules::roll(&ready_state(), 0).unwrap();
    assert_eq!(low.last_roll(), Some(1));
    assert_eq!(low.turn_total(), 0);
    assert_eq!(low.current_player(), Seat::Second);

    let high = rules::roll(&ready_state(), 200).unwrap();
    assert_eq!(high.last_roll(), Some(6));
    assert_eq!(high.turn_total(), 6);
}
