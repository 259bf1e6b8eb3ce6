//! Action codec and oracle functions for Python.

use std::cell::RefCell;

use pyo3::prelude::*;

use crate::core::{decode, encode, Board, Side};
use crate::oracle::{MinimaxOracle, Oracle};

use super::value_error;

thread_local! {
    /// Per-thread search so repeated queries hit the memo table without
    /// serializing callers on other threads.
    static SEARCH: RefCell<MinimaxOracle> = RefCell::new(MinimaxOracle::new());
}

/// Encode a move as an action id.
///
/// Raises `ValueError` when a cell is off the board or the displacement
/// exceeds two.
#[pyfunction]
pub fn encode_action(from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> PyResult<u32> {
    encode(from_x, from_y, to_x, to_y)
        .map(|action| action.raw())
        .map_err(value_error)
}

/// Decode an action id into `(from_x, from_y, to_x, to_y, is_relocate)`.
///
/// The destination may lie off the board.
#[pyfunction]
pub fn decode_action(action: u32) -> PyResult<(i32, i32, i32, i32, bool)> {
    decode(action).map_err(value_error)
}

/// Best move for a side on a 98-byte board, or `NO_MOVE`.
///
/// # Arguments
/// - board: wire bytes, row-major, `[green, blue]` per cell
/// - depth: search depth in plies
/// - turn_blue: search for Blue when true, Green otherwise
#[pyfunction]
#[pyo3(signature = (board, depth = 3, turn_blue = true))]
pub fn find_best_move(py: Python<'_>, board: &[u8], depth: u32, turn_blue: bool) -> PyResult<u32> {
    let bytes = Board::from_bytes(board).map_err(value_error)?.to_bytes();
    let side = Side::from_blue_flag(turn_blue);

    let best = py.allow_threads(|| {
        SEARCH.with(|search| search.borrow_mut().find_best_move(&bytes, depth, side))
    });
    Ok(best)
}
