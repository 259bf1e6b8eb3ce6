//! Values handed back to the caller after `reset` and `step`.

use serde::{Deserialize, Serialize};

use crate::core::{ActionId, Board, Side};
use crate::rules::{GameResult, Termination};

/// Immutable snapshot of the session after a transition.
///
/// Holds a copy of the board, so callers may keep it across steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub board: Board,
    /// Side to move next.
    pub turn: Side,
    /// Completed half-moves since reset.
    pub turn_count: u32,
}

/// Diagnostics for a single step, the equivalent of a gym `info` dict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    /// The caller's action was applied.
    pub applied: bool,

    /// The caller's action was rejected while legal actions existed.
    pub illegal_action: bool,

    /// The caller's side had no legal action and passed.
    pub passed: bool,

    /// Opposing pieces converted by the caller's move.
    pub converted: usize,

    /// Reply played by the session's opponent, if any.
    pub opponent_action: Option<ActionId>,

    /// The opponent had no usable move and passed.
    pub opponent_passed: bool,

    /// Final result when the episode terminated.
    pub result: Option<GameResult>,

    /// Why the episode terminated, when it ended by the rules.
    pub reason: Option<Termination>,
}

/// Output of `GameSession::step`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: StepInfo,
}

impl StepResult {
    /// The episode has ended, either by the rules or by the turn limit.
    #[must_use]
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}
