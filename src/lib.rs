//! # microscope
//!
//! A Microscope (Ataxx-style) capture game engine exposed as a reinforcement
//! learning environment.
//!
//! Two sides, Blue and Green, move pieces on a 7×7 board. A piece either
//! clones to an adjacent empty cell or relocates up to two cells away; the
//! destination then converts every adjacent opposing piece.
//!
//! ## Design Principles
//!
//! 1. **Fixed action space**: every move is one of 1225 integer ids
//!    (49 source cells × 25 displacements), with a legal-action mask for
//!    masked policy heads.
//!
//! 2. **Cheap copies**: `Board` is a `Copy` value, so search and observation
//!    snapshots never alias live state.
//!
//! 3. **Narrow oracle boundary**: opponents see only the 98-byte board
//!    encoding, the search depth and the side to move.
//!
//! ## Modules
//!
//! - `core`: board, sides, action codec, masks, RNG, configuration, errors
//! - `rules`: move legality, application, terminal evaluation
//! - `session`: the reset/step environment
//! - `oracle`: first-legal, random and minimax opponents
//!
//! ## Example
//!
//! ```
//! use microscope::{encode, EnvConfig, GameSession, Side};
//!
//! let mut session = GameSession::new(EnvConfig::default());
//! let action = encode(0, 0, 1, 1).unwrap();
//! let result = session.step(action.raw()).unwrap();
//!
//! assert_eq!(result.observation.turn, Side::Green);
//! assert_eq!(result.observation.board.count(Side::Blue), 3);
//! ```

pub mod core;
pub mod oracle;
pub mod rules;
pub mod session;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    decode, encode, ActionError, ActionId, ActionMask, Board, BoardBytes, BoardError, Cell,
    ConfigError, Coord, EnvConfig, GameRng, GameRngState, Move, MoveKind, RewardConfig,
    SessionError, Side, SideMap, ACTION_COUNT, BOARD_BYTES, BOARD_CELLS, BOARD_SIZE,
};

pub use crate::rules::{
    apply, evaluate, game_result, has_legal_action, is_legal, legal_action_mask, Evaluation,
    GameResult, MoveOutcome, Termination,
};

pub use crate::session::{GameSession, Observation, SessionState, StepInfo, StepResult};

pub use crate::oracle::{
    consult, FirstLegalOracle, MinimaxOracle, Oracle, RandomOracle, NO_MOVE,
};
