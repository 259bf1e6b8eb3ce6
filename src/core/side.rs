//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The two colours of Microscope. Blue always moves first.
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, used for piece counts and other
//! per-colour tallies.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Blue,
    Green,
}

impl Side {
    /// Both sides in turn order.
    pub const ALL: [Side; 2] = [Side::Blue, Side::Green];

    /// The side that moves first.
    pub const FIRST: Side = Side::Blue;

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Side {
        match self {
            Side::Blue => Side::Green,
            Side::Green => Side::Blue,
        }
    }

    /// Slot index (Blue = 0, Green = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Green => 1,
        }
    }

    /// Boolean turn flag used by external callers (`true` = Blue).
    #[must_use]
    pub const fn is_blue(self) -> bool {
        matches!(self, Side::Blue)
    }

    /// Inverse of [`Side::is_blue`].
    #[must_use]
    pub const fn from_blue_flag(blue: bool) -> Side {
        if blue {
            Side::Blue
        } else {
            Side::Green
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Blue => write!(f, "Blue"),
            Side::Green => write!(f, "Green"),
        }
    }
}

/// Per-side data with O(1) access.
///
/// ```
/// use microscope::core::{Side, SideMap};
///
/// let mut pieces: SideMap<u32> = SideMap::with_value(2);
/// pieces[Side::Green] += 1;
///
/// assert_eq!(pieces[Side::Blue], 2);
/// assert_eq!(pieces[Side::Green], 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Blue), factory(Side::Green)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        &self.data[side.index()]
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        &mut self.data[side.index()]
    }
}
