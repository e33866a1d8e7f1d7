//! Random playout runner.
//!
//! Plays seeded random games through the full game state machine, tallies
//! results, and checks that undoing every move returns to the start.
//!
//! Usage:
//! `cargo run --release --bin random_playout -- [games] [max_plies] [seed]`

use std::env;
use std::time::Instant;

use aula_chess::game::game::{Game, InputOutcome};
use aula_chess::game::game_result::GameResult;
use aula_chess::game_state::chess_rules::PROMOTION_CHOICES;
use aula_chess::move_generation::legal_move_generator::legal_moves;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

#[derive(Debug, Default)]
struct PlayoutStats {
    games: u32,
    checkmates: u32,
    stalemates: u32,
    unfinished: u32,
    plies: u64,
    undo_mismatches: u32,
}

/// Play one random game. Returns the number of completed moves.
fn play_random_game(game: &mut Game, rng: &mut StdRng, max_plies: usize) -> usize {
    let mut played = 0;
    while played < max_plies && game.is_active() {
        let board = *game.board();
        let moves = legal_moves(&board, board.side_to_move);
        let Some(&(piece, dest)) = moves.choose(rng) else {
            break;
        };
        let Some(from) = board.piece(piece).map(|p| p.square) else {
            break;
        };

        game.click(from);
        let outcome = match game.click(dest) {
            InputOutcome::AwaitingPromotion => {
                let kind = PROMOTION_CHOICES
                    .choose(rng)
                    .copied()
                    .unwrap_or(PROMOTION_CHOICES[0]);
                game.choose_promotion(kind)
            }
            other => other,
        };
        if !matches!(outcome, InputOutcome::Moved(_)) {
            eprintln!("unexpected outcome {outcome:?} after {played} plies");
            break;
        }
        played += 1;
    }
    played
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let games: u32 = parse_arg(&args, 1, 100u32);
    let max_plies: usize = parse_arg(&args, 2, 300usize);
    let seed: u64 = parse_arg(&args, 3, 1u64);

    println!(
        "Random playouts: games={} max_plies={} seed={}",
        games, max_plies, seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let mut stats = PlayoutStats::default();
    let started = Instant::now();

    for _ in 0..games {
        let mut game = Game::default();
        let initial = *game.history().initial();
        let played = play_random_game(&mut game, &mut rng, max_plies);

        stats.games += 1;
        stats.plies += played as u64;
        match game.result() {
            Some(GameResult::Checkmate { .. }) => stats.checkmates += 1,
            Some(GameResult::Stalemate) => stats.stalemates += 1,
            _ => stats.unfinished += 1,
        }

        // Only an active game accepts undo.
        if game.is_active() {
            while game.undo() == InputOutcome::Undone {}
            if game.snapshot() != initial {
                stats.undo_mismatches += 1;
            }
        }
    }

    let elapsed_ms = started.elapsed().as_millis();
    println!("{:#?}", stats);
    println!(
        "avg_plies={:.1} total_ms={} ms_per_game={:.2}",
        stats.plies as f64 / f64::from(stats.games.max(1)),
        elapsed_ms,
        elapsed_ms as f64 / f64::from(stats.games.max(1))
    );

    if stats.undo_mismatches > 0 {
        std::process::exit(1);
    }
}
