//! Fixed-size bitset over the action space.

use serde::{Deserialize, Serialize};

use super::action::{ActionId, ACTION_COUNT};

const WORDS: usize = ACTION_COUNT.div_ceil(64);

/// One bit per action id, same indexing as [`ActionId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMask {
    words: [u64; WORDS],
}

impl Default for ActionMask {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionMask {
    /// An empty mask.
    #[must_use]
    pub const fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    pub fn insert(&mut self, action: ActionId) {
        let i = action.index();
        self.words[i / 64] |= 1u64 << (i % 64);
    }

    #[must_use]
    pub fn contains(&self, action: ActionId) -> bool {
        let i = action.index();
        self.words[i / 64] & (1u64 << (i % 64)) != 0
    }

    /// Number of set bits.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    #[must_use]
    pub fn any(&self) -> bool {
        !self.is_empty()
    }

    /// The lowest set action id.
    #[must_use]
    pub fn first(&self) -> Option<ActionId> {
        self.iter().next()
    }

    /// Set action ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some(ActionId::from_index(w * 64 + bit))
            })
        })
    }

    /// Dense boolean form, index = action id.
    #[must_use]
    pub fn to_bools(&self) -> Vec<bool> {
        ActionId::all().map(|a| self.contains(a)).collect()
    }
}

impl FromIterator<ActionId> for ActionMask {
    fn from_iter<I: IntoIterator<Item = ActionId>>(iter: I) -> Self {
        let mut mask = Self::new();
        for action in iter {
            mask.insert(action);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> ActionId {
        ActionId::new(raw).unwrap()
    }

    #[test]
    fn test_empty() {
        let mask = ActionMask::new();
        assert!(mask.is_empty());
        assert!(!mask.any());
        assert_eq!(mask.count(), 0);
        assert_eq!(mask.first(), None);
        assert_eq!(mask.to_bools().len(), ACTION_COUNT);
    }

    #[test]
    fn test_insert_and_iterate() {
        let mask: ActionMask = [id(1224), id(0), id(63), id(64), id(700)].into_iter().collect();

        assert_eq!(mask.count(), 5);
        assert!(mask.contains(id(63)));
        assert!(mask.contains(id(64)));
        assert!(!mask.contains(id(65)));
        assert_eq!(mask.first(), Some(id(0)));

        let ids: Vec<u32> = mask.iter().map(ActionId::raw).collect();
        assert_eq!(ids, vec![0, 63, 64, 700, 1224]);
    }

    #[test]
    fn test_to_bools() {
        let mask: ActionMask = [id(3), id(1000)].into_iter().collect();
        let bools = mask.to_bools();

        assert!(bools[3]);
        assert!(bools[1000]);
        assert_eq!(bools.iter().filter(|&&b| b).count(), 2);
    }
}
