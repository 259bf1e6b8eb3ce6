//! Baseline oracles that do not search.

use crate::core::{BoardBytes, GameRng, Side};
use crate::rules::legal_action_mask;

use super::{decode_board, Oracle, NO_MOVE};

/// Plays the lowest legal action id.
///
/// Deterministic and cheap; useful as a scripted training opponent.
#[derive(Clone, Debug, Default)]
pub struct FirstLegalOracle;

impl Oracle for FirstLegalOracle {
    fn find_best_move(&mut self, board: &BoardBytes, _depth: u32, side: Side) -> u32 {
        decode_board(self.name(), board)
            .and_then(|board| legal_action_mask(&board, side).first())
            .map_or(NO_MOVE, |action| action.raw())
    }

    fn name(&self) -> &'static str {
        "first-legal"
    }
}

/// Mixed into a session seed so the opponent's stream differs from the
/// stream that draws openings.
const SESSION_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Uniform random opponent.
///
/// Selects uniformly from legal actions using its own seeded stream.
#[derive(Clone, Debug)]
pub struct RandomOracle {
    rng: GameRng,
}

impl RandomOracle {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Opponent for a session seeded with `session_seed`, drawing from a
    /// separate stream.
    #[must_use]
    pub fn for_session(session_seed: u64) -> Self {
        Self::new(session_seed ^ SESSION_STREAM_SALT)
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl Oracle for RandomOracle {
    fn find_best_move(&mut self, board: &BoardBytes, _depth: u32, side: Side) -> u32 {
        let Some(board) = decode_board(self.name(), board) else {
            return NO_MOVE;
        };
        let mask = legal_action_mask(&board, side);
        let count = mask.count();
        if count == 0 {
            return NO_MOVE;
        }
        let pick = self.rng.gen_range_usize(0..count);
        let answer = mask.iter().nth(pick).map_or(NO_MOVE, |action| action.raw());
        answer
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
