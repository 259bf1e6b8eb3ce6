//! Opponent oracles.
//!
//! An oracle recommends a move for a side. The boundary is deliberately
//! narrow and matches what an external move-search library exposes:
//!
//! ```text
//! find_best_move(board_bytes, search_depth, side) -> action id
//! ```
//!
//! `board_bytes` is the 98-byte wire encoding from [`Board::to_bytes`]. The
//! oracle answers [`NO_MOVE`] when it has nothing to play. Answers are never
//! trusted: [`consult`] validates the id and its legality before anything is
//! applied.
//!
//! ## Implementations
//!
//! - [`FirstLegalOracle`]: lowest legal action id
//! - [`RandomOracle`]: uniform over legal actions, seeded
//! - [`MinimaxOracle`]: depth-limited alpha-beta on cell difference

pub mod minimax;
pub mod simple;

pub use minimax::MinimaxOracle;
pub use simple::{FirstLegalOracle, RandomOracle};

use crate::core::{ActionId, Board, BoardBytes, Side, ACTION_COUNT};
use crate::rules::is_legal;

/// Sentinel answer for "no move available".
pub const NO_MOVE: u32 = ACTION_COUNT as u32;

/// A move recommender behind the binary board boundary.
pub trait Oracle: Send {
    /// Recommend an action id for `side`, or [`NO_MOVE`].
    fn find_best_move(&mut self, board: &BoardBytes, depth: u32, side: Side) -> u32;

    /// Short name used in log records.
    fn name(&self) -> &'static str;
}

/// Ask `oracle` for a move and validate the answer.
///
/// Returns `None` when the oracle has no move or answers with an id that is
/// out of range or illegal on `board`; the latter two are logged.
pub fn consult(oracle: &mut dyn Oracle, board: &Board, depth: u32, side: Side) -> Option<ActionId> {
    let raw = oracle.find_best_move(&board.to_bytes(), depth, side);
    if raw == NO_MOVE {
        log::debug!("{}: no move for {side}", oracle.name());
        return None;
    }

    let action = match ActionId::new(raw) {
        Ok(action) => action,
        Err(err) => {
            log::warn!("{}: discarding answer for {side}: {err}", oracle.name());
            return None;
        }
    };

    if !is_legal(board, action, side) {
        log::warn!(
            "{}: discarding illegal answer {} ({}) for {side}",
            oracle.name(),
            action,
            action.decode()
        );
        return None;
    }
    Some(action)
}

/// Decode wire bytes inside an oracle, logging corrupt input.
fn decode_board(name: &str, bytes: &BoardBytes) -> Option<Board> {
    match Board::from_bytes(bytes) {
        Ok(board) => Some(board),
        Err(err) => {
            log::warn!("{name}: rejecting board: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encode;

    /// Answers a fixed raw id regardless of the board.
    struct Fixed(u32);

    impl Oracle for Fixed {
        fn find_best_move(&mut self, _board: &BoardBytes, _depth: u32, _side: Side) -> u32 {
            self.0
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_consult_accepts_legal_answer() {
        let board = Board::starting();
        let action = encode(6, 0, 5, 1).unwrap();
        let mut oracle = Fixed(action.raw());

        assert_eq!(consult(&mut oracle, &board, 1, Side::Green), Some(action));
    }

    #[test]
    fn test_consult_rejects_bad_answers() {
        let board = Board::starting();

        assert_eq!(consult(&mut Fixed(NO_MOVE), &board, 1, Side::Green), None);
        assert_eq!(consult(&mut Fixed(5000), &board, 1, Side::Green), None);
        // Blue's piece, asked for Green.
        let blue_move = encode(0, 0, 1, 1).unwrap().raw();
        assert_eq!(consult(&mut Fixed(blue_move), &board, 1, Side::Green), None);
    }

    #[test]
    fn test_decode_board_rejects_corrupt_bytes() {
        let mut bytes = Board::starting().to_bytes();
        bytes[0] = 1;
        assert!(decode_board("test", &bytes).is_none());
        assert!(decode_board("test", &Board::starting().to_bytes()).is_some());
    }
}
