//! Error types for input validation at the engine boundary.
//!
//! Rule violations during play are not errors: an illegal move is reported to
//! the caller through the reward signal. These types cover malformed input
//! only (bad ids, bad coordinates, corrupt wire bytes, misuse of a finished
//! session).

use thiserror::Error;

use super::action::ACTION_COUNT;
use super::board::BOARD_BYTES;

/// A raw action id or move coordinate that cannot be represented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action id {0} is outside [0, {max})", max = ACTION_COUNT)]
    OutOfRange(u32),

    #[error("coordinate ({x}, {y}) is off the board")]
    OffBoard { x: i32, y: i32 },

    #[error("displacement ({dx}, {dy}) does not fit the 5x5 move window")]
    DisplacementTooLarge { dx: i32, dy: i32 },
}

/// A board wire encoding that does not describe a valid board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected {expected} board bytes, got {0}", expected = BOARD_BYTES)]
    WrongLength(usize),

    #[error("byte {index} has value {value}; channels must be 0 or 1")]
    InvalidByte { index: usize, value: u8 },

    #[error("cell ({x}, {y}) is marked as both Blue and Green")]
    ConflictingCell { x: usize, y: usize },
}

/// An environment configuration that cannot drive a session.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("turn limit must be at least 1")]
    ZeroTurnLimit,

    #[error("fixed start probability {0} is outside [0, 1]")]
    InvalidProbability(f64),
}

/// Misuse of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("episode is over; call reset() before stepping again")]
    Terminated,
}
