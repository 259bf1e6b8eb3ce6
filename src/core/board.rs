//! The 7×7 Microscope board.
//!
//! Cells are stored row-major as `cells[y][x]`. Each cell is a three-state
//! tag, so a cell can never be owned by both sides at once.
//!
//! ## Wire format
//!
//! The external move-search boundary exchanges boards as [`BOARD_BYTES`]
//! bytes: row-major, two channels per cell in the order `[green, blue]`,
//! each channel `0` or `1`.

use serde::{Deserialize, Serialize};

use super::error::BoardError;
use super::rng::GameRng;
use super::side::{Side, SideMap};

/// Board width and height.
pub const BOARD_SIZE: usize = 7;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Length of the binary board encoding.
pub const BOARD_BYTES: usize = BOARD_CELLS * 2;

/// Binary board encoding exchanged with move oracles.
pub type BoardBytes = [u8; BOARD_BYTES];

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Blue,
    Green,
}

impl Cell {
    /// The side owning this cell, if any.
    #[must_use]
    pub const fn owner(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Blue => Some(Side::Blue),
            Cell::Green => Some(Side::Green),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Two-channel wire form `[green, blue]`.
    #[must_use]
    pub const fn channels(self) -> [u8; 2] {
        match self {
            Cell::Empty => [0, 0],
            Cell::Green => [1, 0],
            Cell::Blue => [0, 1],
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Blue => 'B',
            Cell::Green => 'G',
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Blue => Cell::Blue,
            Side::Green => Cell::Green,
        }
    }
}

/// An on-board coordinate. `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    /// Build a coordinate, returning `None` when it falls off the board.
    #[must_use]
    pub fn try_new(x: i32, y: i32) -> Option<Self> {
        let size = BOARD_SIZE as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self { x: x as u8, y: y as u8 })
        } else {
            None
        }
    }

    /// Coordinate for a row-major cell index (`y * 7 + x`).
    ///
    /// # Panics
    ///
    /// Panics if `index >= BOARD_CELLS`.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        assert!(index < BOARD_CELLS, "cell index {index} out of range");
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }

    /// Row-major cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    /// On-board cells within Chebyshev distance 1, excluding `self`.
    pub fn neighbours(self) -> impl Iterator<Item = Coord> {
        let (x, y) = (self.x as i32, self.y as i32);
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| Coord::try_new(x + dx, y + dy))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// A 7×7 grid of cells.
///
/// `Board` is `Copy`: snapshots handed to callers never alias the board a
/// session keeps mutating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// A board with every cell empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixed four-corner opening: Blue at (0,0) and (6,6), Green at
    /// (0,6) and (6,0).
    #[must_use]
    pub fn starting() -> Self {
        let last = BOARD_SIZE as u8 - 1;
        let mut board = Self::empty();
        board.set(Coord { x: 0, y: 0 }, Cell::Blue);
        board.set(Coord { x: last, y: last }, Cell::Blue);
        board.set(Coord { x: 0, y: last }, Cell::Green);
        board.set(Coord { x: last, y: 0 }, Cell::Green);
        board
    }

    /// Two Blue and two Green pieces on four distinct random cells.
    #[must_use]
    pub fn random_start(rng: &mut GameRng) -> Self {
        let mut board = Self::empty();
        let pieces = [Cell::Green, Cell::Blue, Cell::Green, Cell::Blue];
        for (index, cell) in rng.sample_indices(BOARD_CELLS, pieces.len()).into_iter().zip(pieces) {
            board.set(Coord::from_index(index), cell);
        }
        board
    }

    /// Build a board from rows of symbols (`B`, `G`, `.`), top row first.
    ///
    /// Intended for tests and fixtures.
    ///
    /// # Panics
    ///
    /// Panics on a wrong row count, a wrong row length, or an unknown symbol.
    #[must_use]
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (y, row) in rows.iter().enumerate() {
            let symbols: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(symbols.len(), BOARD_SIZE, "row {y} must have {BOARD_SIZE} cells");
            for (x, symbol) in symbols.into_iter().enumerate() {
                let cell = match symbol {
                    'B' => Cell::Blue,
                    'G' => Cell::Green,
                    '.' => Cell::Empty,
                    other => panic!("unknown board symbol {other:?}"),
                };
                board.cells[y][x] = cell;
            }
        }
        board
    }

    #[must_use]
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.y as usize][at.x as usize]
    }

    pub fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.y as usize][at.x as usize] = cell;
    }

    /// Iterate over (coordinate, cell) pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        (0..BOARD_CELLS).map(move |i| {
            let at = Coord::from_index(i);
            (at, self.get(at))
        })
    }

    /// Coordinates of every piece owned by `side`.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Coord> + '_ {
        let cell = Cell::from(side);
        self.cells().filter(move |&(_, c)| c == cell).map(|(at, _)| at)
    }

    /// Number of cells owned by `side`.
    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        let cell = Cell::from(side);
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Piece counts for both sides.
    #[must_use]
    pub fn counts(&self) -> SideMap<usize> {
        SideMap::new(|side| self.count(side))
    }

    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_empty()).count()
    }

    /// Total occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        BOARD_CELLS - self.count_empty()
    }

    /// `count(side) - count(side.opponent())`.
    #[must_use]
    pub fn material(&self, side: Side) -> i32 {
        self.count(side) as i32 - self.count(side.opponent()) as i32
    }

    /// Encode into the oracle wire format.
    #[must_use]
    pub fn to_bytes(&self) -> BoardBytes {
        let mut bytes = [0u8; BOARD_BYTES];
        for (at, cell) in self.cells() {
            let offset = at.index() * 2;
            bytes[offset..offset + 2].copy_from_slice(&cell.channels());
        }
        bytes
    }

    /// Decode the oracle wire format.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BoardError> {
        if bytes.len() != BOARD_BYTES {
            return Err(BoardError::WrongLength(bytes.len()));
        }
        if let Some(index) = bytes.iter().position(|&b| b > 1) {
            return Err(BoardError::InvalidByte {
                index,
                value: bytes[index],
            });
        }

        let mut board = Self::empty();
        for (index, pair) in bytes.chunks_exact(2).enumerate() {
            let at = Coord::from_index(index);
            let cell = match (pair[0], pair[1]) {
                (0, 0) => Cell::Empty,
                (1, 0) => Cell::Green,
                (0, 1) => Cell::Blue,
                _ => {
                    return Err(BoardError::ConflictingCell {
                        x: at.x as usize,
                        y: at.y as usize,
                    })
                }
            };
            board.set(at, cell);
        }
        Ok(board)
    }
}

impl std::fmt::Display for Board {
    /// Terminal preview: one row per line, `B`/`G`/`.` per cell, with column
    /// and row labels.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " ")?;
        for x in 0..BOARD_SIZE {
            write!(f, " {x}")?;
        }
        writeln!(f)?;
        for (y, row) in self.cells.iter().enumerate() {
            write!(f, "{y}")?;
            for cell in row {
                write!(f, " {}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
