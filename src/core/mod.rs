//! Core engine types: sides, board, action codec, masks, RNG, configuration.
//!
//! Everything here is plain data. Game rules live in `rules`; turn handling
//! lives in `session`.

pub mod action;
pub mod board;
pub mod config;
pub mod error;
pub mod mask;
pub mod rng;
pub mod side;

pub use action::{decode, encode, ActionId, Move, MoveKind, ACTION_COUNT, MOVES_PER_PIECE};
pub use board::{Board, BoardBytes, Cell, Coord, BOARD_BYTES, BOARD_CELLS, BOARD_SIZE};
pub use config::{EnvConfig, RewardConfig};
pub use error::{ActionError, BoardError, ConfigError, SessionError};
pub use mask::ActionMask;
pub use rng::{GameRng, GameRngState};
pub use side::{Side, SideMap};
