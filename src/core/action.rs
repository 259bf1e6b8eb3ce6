//! Action ids and the move codec.
//!
//! Every move is a flat id in `[0, 1225)`:
//!
//! - `id / 25` is the source cell, `y * 7 + x`
//! - `id % 25` is the displacement inside a 5×5 window, `(dy + 2) * 5 + (dx + 2)`
//!
//! Moves to an adjacent cell are clones (the source stays occupied). Moves at
//! Chebyshev distance 2 relocate the piece and vacate the source.
//!
//! Decoding is total: a displacement that leaves the board still decodes, and
//! the rules engine rejects it later.

use serde::{Deserialize, Serialize};

use super::board::{Coord, BOARD_CELLS};
use super::error::ActionError;

/// Displacements per source cell (5×5 window).
pub const MOVES_PER_PIECE: usize = 25;

/// Size of the action space.
pub const ACTION_COUNT: usize = BOARD_CELLS * MOVES_PER_PIECE;

const WINDOW_RADIUS: i32 = 2;
const WINDOW_WIDTH: i32 = 2 * WINDOW_RADIUS + 1;

/// A validated action id in `[0, ACTION_COUNT)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(u16);

impl ActionId {
    /// Validate a raw id.
    pub fn new(raw: u32) -> Result<Self, ActionError> {
        if (raw as usize) < ACTION_COUNT {
            Ok(Self(raw as u16))
        } else {
            Err(ActionError::OutOfRange(raw))
        }
    }

    /// Id for an index already known to be in range (mask iteration).
    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index < ACTION_COUNT);
        Self(index as u16)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0 as u32
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every id in the action space, ascending.
    pub fn all() -> impl Iterator<Item = ActionId> {
        (0..ACTION_COUNT).map(Self::from_index)
    }

    /// Decode into source, destination and kind.
    #[must_use]
    pub fn decode(self) -> Move {
        let piece = self.index() / MOVES_PER_PIECE;
        let window = (self.index() % MOVES_PER_PIECE) as i32;
        let from = Coord::from_index(piece);
        let dx = window % WINDOW_WIDTH - WINDOW_RADIUS;
        let dy = window / WINDOW_WIDTH - WINDOW_RADIUS;

        Move {
            from,
            to_x: from.x as i32 + dx,
            to_y: from.y as i32 + dy,
            kind: MoveKind::for_displacement(dx, dy),
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for ActionId {
    type Error = ActionError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

/// Whether the moving piece is duplicated or relocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// Adjacent move; the source keeps its piece.
    Clone,
    /// Distance-2 move; the source is vacated.
    Relocate,
}

impl MoveKind {
    #[must_use]
    pub fn for_displacement(dx: i32, dy: i32) -> Self {
        if dx.abs() == WINDOW_RADIUS || dy.abs() == WINDOW_RADIUS {
            MoveKind::Relocate
        } else {
            MoveKind::Clone
        }
    }

    #[must_use]
    pub const fn is_relocate(self) -> bool {
        matches!(self, MoveKind::Relocate)
    }
}

/// A decoded move. The destination may lie off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to_x: i32,
    pub to_y: i32,
    pub kind: MoveKind,
}

impl Move {
    /// The destination, if it is on the board.
    #[must_use]
    pub fn destination(&self) -> Option<Coord> {
        Coord::try_new(self.to_x, self.to_y)
    }

    /// `(from_x, from_y, to_x, to_y, is_relocate)`.
    #[must_use]
    pub fn as_tuple(&self) -> (i32, i32, i32, i32, bool) {
        (
            self.from.x as i32,
            self.from.y as i32,
            self.to_x,
            self.to_y,
            self.kind.is_relocate(),
        )
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => [{}, {}]", self.from, self.to_x, self.to_y)
    }
}

/// Encode a move between two on-board cells.
///
/// Both cells must be on the board and the displacement must fit the 5×5
/// window.
pub fn encode(from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> Result<ActionId, ActionError> {
    let from = Coord::try_new(from_x, from_y).ok_or(ActionError::OffBoard { x: from_x, y: from_y })?;
    Coord::try_new(to_x, to_y).ok_or(ActionError::OffBoard { x: to_x, y: to_y })?;

    let (dx, dy) = (to_x - from_x, to_y - from_y);
    if dx.abs() > WINDOW_RADIUS || dy.abs() > WINDOW_RADIUS {
        return Err(ActionError::DisplacementTooLarge { dx, dy });
    }

    let window = (dy + WINDOW_RADIUS) * WINDOW_WIDTH + (dx + WINDOW_RADIUS);
    Ok(ActionId::from_index(
        from.index() * MOVES_PER_PIECE + window as usize,
    ))
}

/// Decode a raw id into `(from_x, from_y, to_x, to_y, is_relocate)`.
pub fn decode(raw: u32) -> Result<(i32, i32, i32, i32, bool), ActionError> {
    Ok(ActionId::new(raw)?.decode().as_tuple())
}
