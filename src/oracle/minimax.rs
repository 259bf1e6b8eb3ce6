//! Depth-limited alpha-beta search.
//!
//! Leaves are scored by cell difference from the searching side's point of
//! view. Finished games score `±WIN_SCORE`, adjusted by the remaining depth so
//! that faster wins and slower losses are preferred. A side without a legal
//! move passes, as it does in a session.
//!
//! Answers are memoized per `(board bytes, depth, side)`: training loops
//! query the same early positions over and over.

use rustc_hash::FxHashMap;

use crate::core::{ActionId, Board, BoardBytes, Side};
use crate::rules::{apply, game_result, legal_action_mask, GameResult};

use super::{decode_board, Oracle, NO_MOVE};

/// Score of a won game before depth adjustment.
pub const WIN_SCORE: i32 = 1000;

const INFINITY: i32 = i32::MAX / 2;

/// Alpha-beta minimax oracle with a result cache.
#[derive(Clone, Debug)]
pub struct MinimaxOracle {
    cache: FxHashMap<(BoardBytes, u32, Side), u32>,
    max_cache_entries: usize,
    nodes: u64,
}

impl Default for MinimaxOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MinimaxOracle {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: FxHashMap::default(),
            max_cache_entries: 100_000,
            nodes: 0,
        }
    }

    /// Bound the memo table; it is cleared when full.
    #[must_use]
    pub fn with_max_cache_entries(mut self, entries: usize) -> Self {
        self.max_cache_entries = entries;
        self
    }

    /// Positions visited since creation.
    #[must_use]
    pub fn nodes_searched(&self) -> u64 {
        self.nodes
    }

    #[must_use]
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Best move for `side` searching `depth` plies (at least one), with its
    /// score. Ties go to the lowest action id. `None` when `side` cannot move.
    pub fn best_move(&mut self, board: &Board, depth: u32, side: Side) -> Option<(ActionId, i32)> {
        let depth = depth.max(1);
        let mut best: Option<(ActionId, i32)> = None;
        let mut alpha = -INFINITY;

        for action in legal_action_mask(board, side).iter() {
            let mut child = *board;
            if apply(&mut child, action, side).is_none() {
                continue;
            }
            let score = self.alpha_beta(&child, depth - 1, side.opponent(), side, alpha, INFINITY);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((action, score));
                alpha = alpha.max(score);
            }
        }
        best
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        to_move: Side,
        root: Side,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if let Some((result, _)) = game_result(board) {
            return match result {
                GameResult::Winner(side) if side == root => WIN_SCORE + depth as i32,
                GameResult::Winner(_) => -WIN_SCORE - depth as i32,
                GameResult::Draw => 0,
            };
        }
        if depth == 0 {
            return board.material(root);
        }

        let mask = legal_action_mask(board, to_move);
        if mask.is_empty() {
            return self.alpha_beta(board, depth - 1, to_move.opponent(), root, alpha, beta);
        }

        let maximizing = to_move == root;
        let mut value = if maximizing { -INFINITY } else { INFINITY };

        for action in mask.iter() {
            let mut child = *board;
            if apply(&mut child, action, to_move).is_none() {
                continue;
            }
            let score = self.alpha_beta(&child, depth - 1, to_move.opponent(), root, alpha, beta);
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if alpha >= beta {
                break;
            }
        }
        value
    }
}

impl Oracle for MinimaxOracle {
    fn find_best_move(&mut self, bytes: &BoardBytes, depth: u32, side: Side) -> u32 {
        let key = (*bytes, depth, side);
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }

        let Some(board) = decode_board(self.name(), bytes) else {
            return NO_MOVE;
        };
        let answer = self
            .best_move(&board, depth, side)
            .map_or(NO_MOVE, |(action, _)| action.raw());

        if self.cache.len() >= self.max_cache_entries {
            self.cache.clear();
        }
        self.cache.insert(key, answer);
        answer
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
