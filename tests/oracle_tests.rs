//! Opponent oracle tests.
//!
//! These tests verify the oracle boundary end to end:
//! - Every oracle answers legal moves or `NO_MOVE`
//! - Corrupt board bytes are rejected, not searched
//! - Full episodes against each oracle finish within the turn limit

use microscope::core::{Board, EnvConfig, GameRng, Side};
use microscope::oracle::{consult, FirstLegalOracle, MinimaxOracle, Oracle, RandomOracle, NO_MOVE};
use microscope::rules::{apply, is_legal, legal_action_mask};
use microscope::session::GameSession;
use microscope::ActionId;

fn oracles() -> Vec<Box<dyn Oracle>> {
    vec![
        Box::new(FirstLegalOracle),
        Box::new(RandomOracle::new(3)),
        Box::new(MinimaxOracle::new()),
    ]
}

/// Random opening followed by a few random moves.
fn midgame(seed: u64) -> (Board, Side) {
    let mut rng = GameRng::new(seed);
    let mut board = Board::random_start(&mut rng);
    let mut side = Side::Blue;
    for _ in 0..8 {
        let mask = legal_action_mask(&board, side);
        if let Some(action) = mask.iter().nth(rng.gen_range_usize(0..mask.count().max(1))) {
            apply(&mut board, action, side).unwrap();
        }
        side = side.opponent();
    }
    (board, side)
}

// =============================================================================
// Boundary
// =============================================================================

#[test]
fn test_oracles_answer_legal_moves() {
    for mut oracle in oracles() {
        for seed in 0..6 {
            let (board, side) = midgame(seed);
            let raw = oracle.find_best_move(&board.to_bytes(), 2, side);

            if legal_action_mask(&board, side).is_empty() {
                assert_eq!(raw, NO_MOVE, "{} answered on a blocked board", oracle.name());
            } else {
                let action = ActionId::new(raw).unwrap();
                assert!(is_legal(&board, action, side), "{} answered {raw}", oracle.name());
            }
        }
    }
}

#[test]
fn test_oracles_reject_corrupt_bytes() {
    let mut bytes = Board::starting().to_bytes();
    // Both channels set on one cell.
    bytes[10] = 1;
    bytes[11] = 1;

    for mut oracle in oracles() {
        assert_eq!(oracle.find_best_move(&bytes, 1, Side::Blue), NO_MOVE);
    }
}

#[test]
fn test_consult_round_trips_through_bytes() {
    let mut oracle = MinimaxOracle::new();
    let board = Board::starting();

    let action = consult(&mut oracle, &board, 1, Side::Blue).unwrap();
    assert!(is_legal(&board, action, Side::Blue));
}

#[test]
fn test_minimax_is_deterministic() {
    let (board, side) = midgame(9);
    let a = MinimaxOracle::new().find_best_move(&board.to_bytes(), 2, side);
    let b = MinimaxOracle::new().find_best_move(&board.to_bytes(), 2, side);
    assert_eq!(a, b);
}

#[test]
fn test_deeper_search_visits_more_positions() {
    let board = Board::starting();
    let mut shallow = MinimaxOracle::new();
    let mut deep = MinimaxOracle::new();

    shallow.find_best_move(&board.to_bytes(), 1, Side::Blue);
    deep.find_best_move(&board.to_bytes(), 2, Side::Blue);
    assert!(deep.nodes_searched() > shallow.nodes_searched());
}

// =============================================================================
// Full episodes
// =============================================================================

#[test]
fn test_episodes_against_each_oracle_finish() {
    for (index, oracle) in oracles().into_iter().enumerate() {
        let config = EnvConfig::default().with_turn_limit(60).with_opponent_depth(1);
        let mut session = GameSession::new(config).with_opponent(oracle);
        let mut rng = GameRng::new(index as u64);

        let mut steps = 0;
        loop {
            let mask = session.action_mask();
            let raw = match mask.count() {
                0 => 0,
                count => mask.iter().nth(rng.gen_range_usize(0..count)).unwrap().raw(),
            };
            let result = session.step(raw).unwrap();
            assert!(!result.info.illegal_action);
            assert!(result.observation.turn_count <= 61);
            steps += 1;
            if result.done() {
                break;
            }
            assert!(steps < 200, "episode did not finish");
        }
    }
}
