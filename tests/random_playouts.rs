use minimax_chess::check::{is_check, is_checkmate, is_stalemate};
use minimax_chess::move_generator::candidate_moves;
use minimax_chess::{Board, Game, GameOutcome};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const MAX_PLIES: usize = 60;

/// Commit a random move the game accepts, `false` when none exists
fn play_random_move(game: &mut Game, rng: &mut StdRng) -> bool {
    let mut moves = candidate_moves(game.board(), game.move_log(), game.turn());
    moves.shuffle(rng);
    moves
        .into_iter()
        .any(|(from, to)| game.make_move(from, to, None).is_ok())
}

#[test]
fn committed_moves_never_leave_the_mover_in_check() {
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..MAX_PLIES {
            let mover = game.turn();
            if !play_random_move(&mut game, &mut rng) {
                break;
            }
            assert!(
                !is_check(game.board(), game.move_log(), mover),
                "seed {}: {} left its king in check",
                seed,
                mover
            );
            if game.outcome().is_some() {
                break;
            }
        }
    }
}

#[test]
fn terminal_predicates_are_consistent_and_pure() {
    for seed in 10..14 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::new();

        for _ in 0..MAX_PLIES {
            let before: Board = game.board().clone();
            let side = game.turn();
            let mate = is_checkmate(game.board(), game.move_log(), side);
            let stale = is_stalemate(game.board(), game.move_log(), side);
            let check = is_check(game.board(), game.move_log(), side);

            assert!(!mate || check, "seed {}: mate without check", seed);
            assert!(!(stale && check), "seed {}: stalemate while in check", seed);
            assert_eq!(game.board(), &before);
            for (a, b) in game.board().pieces().zip(before.pieces()) {
                assert_eq!(a, b);
            }

            if mate || stale || game.outcome() == Some(GameOutcome::ThreefoldRepetition) {
                break;
            }
            assert!(play_random_move(&mut game, &mut rng), "seed {}: no move yet not terminal", seed);
        }
    }
}

#[test]
fn move_log_and_history_stay_in_step() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = Game::new();
    for _ in 0..30 {
        if !play_random_move(&mut game, &mut rng) {
            break;
        }
        assert_eq!(game.history().len(), game.move_log().len() + 1);
        assert!(game.history().snapshots().last().unwrap() == game.board());
    }
}
