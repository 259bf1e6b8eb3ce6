//! Terminal detection and rewards.
//!
//! Terminal conditions are checked in a fixed order:
//!
//! 1. Neither side can move: stalemate, decided on cell count.
//! 2. The perspective side has no cells: loss.
//! 3. The opposing side has no cells: win.
//!
//! Stalemate comes first because a side can run out of moves while still
//! holding cells.

use serde::{Deserialize, Serialize};

use crate::core::{Board, RewardConfig, Side};

use super::engine::has_legal_action;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Side),
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Neither side had a legal move.
    Stalemate,
    /// One side lost every cell.
    Elimination,
}

/// Reward and termination for one side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub reward: f32,
    pub terminated: bool,
    pub result: Option<GameResult>,
    pub reason: Option<Termination>,
}

impl Evaluation {
    fn ongoing() -> Self {
        Self {
            reward: 0.0,
            terminated: false,
            result: None,
            reason: None,
        }
    }

    fn finished(reward: f32, result: GameResult, reason: Termination) -> Self {
        Self {
            reward,
            terminated: true,
            result: Some(result),
            reason: Some(reason),
        }
    }
}

/// Decide whether the game is over, independent of perspective.
#[must_use]
pub fn game_result(board: &Board) -> Option<(GameResult, Termination)> {
    let counts = board.counts();

    if !has_legal_action(board, Side::Blue) && !has_legal_action(board, Side::Green) {
        let result = match counts[Side::Blue].cmp(&counts[Side::Green]) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::Blue),
            std::cmp::Ordering::Less => GameResult::Winner(Side::Green),
            std::cmp::Ordering::Equal => GameResult::Draw,
        };
        return Some((result, Termination::Stalemate));
    }

    for side in Side::ALL {
        if counts[side] == 0 {
            return Some((GameResult::Winner(side.opponent()), Termination::Elimination));
        }
    }
    None
}

/// Reward and termination for `perspective` on `board`.
///
/// Non-terminal positions get a zero reward; per-turn shaping is added by
/// the session, which knows the turn count.
#[must_use]
pub fn evaluate(board: &Board, perspective: Side, rewards: &RewardConfig) -> Evaluation {
    let Some((result, reason)) = game_result(board) else {
        return Evaluation::ongoing();
    };

    let reward = match (reason, result) {
        (Termination::Stalemate, GameResult::Draw) => rewards.stalemate_draw,
        (Termination::Stalemate, r) if r.is_winner(perspective) => rewards.stalemate_win,
        (Termination::Stalemate, _) => rewards.stalemate_loss,
        (Termination::Elimination, r) if r.is_winner(perspective) => rewards.elimination_win,
        (Termination::Elimination, _) => rewards.elimination_loss,
    };
    Evaluation::finished(reward, result, reason)
}
