//! Move legality, application, and legal-action masks.
//!
//! A move is legal when the source holds one of the mover's pieces and the
//! destination is an empty on-board cell. Applying a move places a piece on
//! the destination (vacating the source for a relocate) and converts every
//! opposing piece adjacent to the destination. Conversion does not chain.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActionId, ActionMask, Board, Cell, Coord, MoveKind, Side, MOVES_PER_PIECE};

/// Result of a successfully applied move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub action: ActionId,
    pub from: Coord,
    pub to: Coord,
    pub kind: MoveKind,
    /// Opposing pieces flipped to the mover, at most 8.
    pub converted: SmallVec<[Coord; 8]>,
}

/// Check whether `side` may play `action` on `board`.
#[must_use]
pub fn is_legal(board: &Board, action: ActionId, side: Side) -> bool {
    let mv = action.decode();
    if board.get(mv.from) != Cell::from(side) {
        return false;
    }
    mv.destination().is_some_and(|to| board.get(to).is_empty())
}

/// Apply `action` for `side`.
///
/// Returns `None` and leaves the board untouched when the move is illegal.
pub fn apply(board: &mut Board, action: ActionId, side: Side) -> Option<MoveOutcome> {
    if !is_legal(board, action, side) {
        return None;
    }

    let mv = action.decode();
    let to = mv.destination()?;
    let own = Cell::from(side);
    let theirs = Cell::from(side.opponent());

    if mv.kind.is_relocate() {
        board.set(mv.from, Cell::Empty);
    }
    board.set(to, own);

    let mut converted = SmallVec::new();
    for at in to.neighbours() {
        if board.get(at) == theirs {
            board.set(at, own);
            converted.push(at);
        }
    }

    Some(MoveOutcome {
        action,
        from: mv.from,
        to,
        kind: mv.kind,
        converted,
    })
}

/// Every legal action for `side`, as a bitset over the action space.
#[must_use]
pub fn legal_action_mask(board: &Board, side: Side) -> ActionMask {
    let mut mask = ActionMask::new();
    for from in board.pieces(side) {
        let base = from.index() * MOVES_PER_PIECE;
        for window in 0..MOVES_PER_PIECE {
            let action = ActionId::from_index(base + window);
            let legal = action
                .decode()
                .destination()
                .is_some_and(|to| board.get(to).is_empty());
            if legal {
                mask.insert(action);
            }
        }
    }
    mask
}

/// Whether `side` has at least one legal action.
#[must_use]
pub fn has_legal_action(board: &Board, side: Side) -> bool {
    board.pieces(side).any(|from| {
        from.neighbours()
            .chain(ring_two(from))
            .any(|to| board.get(to).is_empty())
    })
}

/// On-board cells at Chebyshev distance exactly 2.
fn ring_two(center: Coord) -> impl Iterator<Item = Coord> {
    let (x, y) = (center.x as i32, center.y as i32);
    (-2..=2)
        .flat_map(move |dy| (-2..=2).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy): &(i32, i32)| dx.abs() == 2 || dy.abs() == 2)
        .filter_map(move |(dx, dy)| Coord::try_new(x + dx, y + dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encode;

    fn mv(fx: i32, fy: i32, tx: i32, ty: i32) -> ActionId {
        encode(fx, fy, tx, ty).unwrap()
    }

    #[test]
    fn test_clone_keeps_source() {
        let mut board = Board::starting();
        let outcome = apply(&mut board, mv(0, 0, 1, 1), Side::Blue).unwrap();

        assert_eq!(outcome.kind, MoveKind::Clone);
        assert_eq!(board.get(Coord { x: 0, y: 0 }), Cell::Blue);
        assert_eq!(board.get(Coord { x: 1, y: 1 }), Cell::Blue);
        assert_eq!(board.count(Side::Blue), 3);
        assert!(outcome.converted.is_empty());
    }

    #[test]
    fn test_relocate_vacates_source() {
        let mut board = Board::starting();
        let outcome = apply(&mut board, mv(0, 0, 2, 0), Side::Blue).unwrap();

        assert_eq!(outcome.kind, MoveKind::Relocate);
        assert_eq!(board.get(Coord { x: 0, y: 0 }), Cell::Empty);
        assert_eq!(board.get(Coord { x: 2, y: 0 }), Cell::Blue);
        assert_eq!(board.count(Side::Blue), 2);
        assert!(outcome.converted.is_empty());
    }

    #[test]
    fn test_conversion_is_single_ring() {
        let mut board = Board::from_rows([
            "B . G . . . .",
            ". . G G . . .",
            ". . . . G . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
        ]);
        let outcome = apply(&mut board, mv(0, 0, 1, 1), Side::Blue).unwrap();

        // (2,0) and (2,1) touch (1,1); (3,1) and (4,2) do not.
        assert_eq!(outcome.converted.len(), 2);
        assert_eq!(board.get(Coord { x: 2, y: 0 }), Cell::Blue);
        assert_eq!(board.get(Coord { x: 2, y: 1 }), Cell::Blue);
        assert_eq!(board.get(Coord { x: 3, y: 1 }), Cell::Green);
        assert_eq!(board.get(Coord { x: 4, y: 2 }), Cell::Green);
    }

    #[test]
    fn test_illegal_leaves_board_untouched() {
        let mut board = Board::starting();
        let before = board;

        // Wrong owner.
        assert!(apply(&mut board, mv(6, 0, 5, 0), Side::Blue).is_none());
        // Empty source.
        assert!(apply(&mut board, mv(3, 3, 3, 4), Side::Blue).is_none());
        // Off-board destination.
        assert!(apply(&mut board, ActionId::new(0).unwrap(), Side::Blue).is_none());
        // Null displacement lands on an occupied cell.
        assert!(apply(&mut board, mv(0, 0, 0, 0), Side::Blue).is_none());

        assert_eq!(board, before);
    }

    #[test]
    fn test_occupied_destination() {
        let mut board = Board::from_rows([
            "B G . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
            ". . . . . . .",
        ]);
        assert!(!is_legal(&board, mv(0, 0, 1, 0), Side::Blue));
        assert!(apply(&mut board, mv(0, 0, 1, 0), Side::Blue).is_none());
    }

    #[test]
    fn test_starting_mask() {
        let board = Board::starting();
        let mask = legal_action_mask(&board, Side::Blue);

        // Each corner piece reaches 8 cells within its 5×5 window.
        assert_eq!(mask.count(), 16);
        assert!(mask.contains(mv(0, 0, 1, 1)));
        assert!(mask.contains(mv(0, 0, 2, 2)));
        assert!(!mask.contains(mv(6, 0, 5, 0)));
        assert!(has_legal_action(&board, Side::Blue));
    }

    #[test]
    fn test_mask_matches_is_legal() {
        let board = Board::from_rows([
            "B G . . . . .",
            "G B . . . . .",
            ". . . G . . .",
            ". . . . B . .",
            ". . . . . . .",
            ". . . . . . G",
            ". . . . . G B",
        ]);
        for side in Side::ALL {
            let mask = legal_action_mask(&board, side);
            for action in ActionId::all() {
                assert_eq!(mask.contains(action), is_legal(&board, action, side));
            }
            assert_eq!(mask.any(), has_legal_action(&board, side));
        }
    }

    #[test]
    fn test_blocked_side() {
        let mut board = Board::empty();
        for (at, _) in Board::empty().cells() {
            board.set(at, Cell::Green);
        }
        board.set(Coord { x: 3, y: 3 }, Cell::Blue);

        assert!(legal_action_mask(&board, Side::Blue).is_empty());
        assert!(!has_legal_action(&board, Side::Blue));
        assert!(!has_legal_action(&board, Side::Green));
    }
}
