//! Hot-seat Pig in the terminal. Set `RUST_LOG=pigrs=debug` to watch the
//! engine's logs.

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use pigrs::{Action, ActionError, GameOptions, GameState, PigService, Seat};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Pig CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let service = PigService::new(GameOptions::default(), seed);

    let host = service.start_or_join();
    let guest = service.start_or_join();
    let game_id = host.game_id;
    println!("Game {game_id}: seat {} vs seat {}", host.seat, guest.seat);

    loop {
        let Ok(state) = service.state(game_id) else {
            println!("Game vanished.");
            break;
        };
        print_table(&state, service.options().winning_score);

        if let Some(winner) = state.winner() {
            println!("{} wins!", colorize(&player_label(winner), "32"));
            break;
        }

        let prompt = format!(
            "{} [r]oll or [h]old: ",
            player_label(state.current_player())
        );
        let action = match prompt_line(&prompt).as_str() {
            "r" | "roll" => Action::Roll,
            "h" | "hold" => Action::Hold,
            "q" | "quit" => {
                println!("Goodbye.");
                break;
            }
            _ => {
                println!("Unknown action.");
                continue;
            }
        };

        match service.apply(game_id, action) {
            Ok(next) => report(action, &state, &next),
            Err(err @ (ActionError::NothingToBank | ActionError::TurnAlreadyEnded)) => {
                println!("{}", colorize(&err.to_string(), "33"));
            }
            Err(err) => {
                println!("Error: {err}");
                break;
            }
        }
    }
}

fn report(action: Action, before: &GameState, after: &GameState) {
    let player = player_label(before.current_player());
    match (action, after.last_roll()) {
        (Action::Roll, Some(1)) => println!(
            "{player} rolled a {} and loses {} points.",
            colorize("1", "31"),
            before.turn_total()
        ),
        (Action::Roll, Some(face)) => println!("{player} rolled a {face}."),
        _ => println!(
            "{player} banks {} points.",
            after.score(before.current_player()) - before.score(before.current_player())
        ),
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => return "q".to_string(),
        Ok(_) => {}
    }
    input.trim().to_lowercase()
}

fn print_table(state: &GameState, winning_score: u32) {
    println!("\nFirst to {winning_score}");
    for seat in [Seat::First, Seat::Second] {
        let marker = if seat == state.current_player() && !state.is_over() {
            "*"
        } else {
            " "
        };
        println!("{marker} {}: {}", player_label(seat), state.score(seat));
    }
    if !state.is_over() {
        println!("  Turn total: {}", state.turn_total());
    }
    println!();
}

fn player_label(seat: Seat) -> String {
    format!("Player {}", seat.index() + 1)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
