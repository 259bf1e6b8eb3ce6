//! Game rules for Microscope.
//!
//! - `engine`: legality, move application, legal-action masks
//! - `outcome`: terminal detection and rewards
//!
//! All functions are pure over a `Board` and a `Side`; nothing here tracks
//! whose turn it is.

pub mod engine;
pub mod outcome;

pub use engine::{apply, has_legal_action, is_legal, legal_action_mask, MoveOutcome};
pub use outcome::{evaluate, game_result, Evaluation, GameResult, Termination};
