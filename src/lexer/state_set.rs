// src/lexer/state_set.rs
// Dense bitset over interned state ids. Closures, the accept set and the
// active set of a scan are all `StateSet`s.

use std::fmt;

/// Arena index of an interned state label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub u32);

impl StateId {
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Default)]
pub struct StateSet {
    words: Vec<u64>,
}

impl StateSet {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    #[inline]
    fn locate(id: StateId) -> (usize, u64) {
        (id.idx() / 64, 1u64 << (id.0 % 64))
    }

    /// Returns true if `id` was not present before.
    pub fn insert(&mut self, id: StateId) -> bool {
        let (w, bit) = Self::locate(id);
        if w >= self.words.len() {
            self.words.resize(w + 1, 0);
        }
        let fresh = self.words[w] & bit == 0;
        self.words[w] |= bit;
        fresh
    }

    pub fn contains(&self, id: StateId) -> bool {
        let (w, bit) = Self::locate(id);
        self.words.get(w).is_some_and(|&word| word & bit != 0)
    }

    /// In-place union. Returns true if `self` grew.
    pub fn union_with(&mut self, other: &StateSet) -> bool {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        let mut grew = false;
        for (mine, &theirs) in self.words.iter_mut().zip(other.words.iter()) {
            let merged = *mine | theirs;
            grew |= merged != *mine;
            *mine = merged;
        }
        grew
    }

    pub fn intersection(&self, other: &StateSet) -> StateSet {
        let words = self
            .words
            .iter()
            .zip(other.words.iter())
            .map(|(a, b)| a & b)
            .collect();
        StateSet { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let tz = bits.trailing_zeros();
                bits &= bits - 1;
                Some(StateId(w as u32 * 64 + tz))
            })
        })
    }
}

// Trailing zero words are not significant.
impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        let n = self.words.len().max(other.words.len());
        (0..n).all(|i| self.words.get(i).unwrap_or(&0) == other.words.get(i).unwrap_or(&0))
    }
}

impl Eq for StateSet {}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut s = StateSet::new();
        for id in iter {
            s.insert(id);
        }
        s
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|id| id.0)).finish()
    }
}
