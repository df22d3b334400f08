//! The pool of spendable entries.
//!
//! Entries live in fixed slots and a Fenwick (binary indexed) tree counts the
//! live slots, so picking the k-th live entry and removing an entry are both
//! O(log n). Removing an entry never shifts the others, which keeps slot
//! indices stable for the lifetime of the pool and iteration order equal to
//! insertion order.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SelectionError;
use crate::traits::DrawSource;
use crate::types::{Entry, EntryId};

/// A set of spendable entries with unique identifiers.
///
/// Phases take a `Pool` by value and hand back the shrunken pool, so a caller
/// that keeps its own copy still holds the pristine original.
#[derive(Clone, Debug, Default)]
pub struct Pool {
    slots: Vec<Option<Entry>>,
    /// 1-indexed Fenwick tree over slot occupancy (`tree[0]` unused).
    tree: Vec<usize>,
    live: usize,
    total: u128,
}

impl Pool {
    /// Build a pool, rejecting duplicate identifiers.
    pub fn new(entries: Vec<Entry>) -> Result<Self, SelectionError> {
        let mut seen: HashSet<EntryId> = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(SelectionError::DuplicateEntry(entry.id.to_string()));
            }
        }

        let n = entries.len();
        let mut tree = vec![1usize; n + 1];
        tree[0] = 0;
        for i in 1..=n {
            let parent = i + lowbit(i);
            if parent <= n {
                tree[parent] += tree[i];
            }
        }

        let total = entries.iter().map(|e| e.value as u128).sum();
        Ok(Self {
            slots: entries.into_iter().map(Some).collect(),
            tree,
            live: n,
            total,
        })
    }

    /// Number of entries still in the pool.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Sum of the values of all entries still in the pool.
    pub fn total_value(&self) -> u128 {
        self.total
    }

    /// Whether an entry with this identifier is still in the pool. O(n).
    pub fn contains(&self, id: &EntryId) -> bool {
        self.iter().any(|e| &e.id == id)
    }

    /// Remaining entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.slots.iter().flatten()
    }

    /// Remaining entries paired with their slot index, in insertion order.
    pub fn iter_slots(&self) -> impl Iterator<Item = (usize, &Entry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, e)| e.as_ref().map(|e| (slot, e)))
    }

    /// Remaining entries in insertion order, copied out.
    pub fn entries(&self) -> Vec<Entry> {
        self.iter().copied().collect()
    }

    /// Entry held by `slot`, if it has not been taken.
    pub fn get(&self, slot: usize) -> Option<&Entry> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Uniformly pick a live slot using exactly one draw.
    ///
    /// The pool is left untouched; follow up with [`take`](Self::take) to
    /// consume the entry. Returns `None` without drawing when the pool is empty.
    pub fn sample<D: DrawSource + ?Sized>(&self, draws: &mut D) -> Option<usize> {
        if self.live == 0 {
            return None;
        }
        let k = draws.draw_index(self.live);
        // Clamp misbehaving sources so the lookup stays in range.
        Some(self.kth_live(k.min(self.live - 1)))
    }

    /// Remove and return the entry in `slot`.
    pub fn take(&mut self, slot: usize) -> Option<Entry> {
        let entry = self.slots.get_mut(slot)?.take()?;
        let n = self.slots.len();
        let mut i = slot + 1;
        while i <= n {
            self.tree[i] -= 1;
            i += lowbit(i);
        }
        self.live -= 1;
        self.total -= entry.value as u128;
        Some(entry)
    }

    /// Draw one entry uniformly at random without replacement.
    ///
    /// Consumes the pool and returns the drawn entry with the remaining pool,
    /// or `None` when the pool is empty.
    pub fn draw<D: DrawSource + ?Sized>(mut self, draws: &mut D) -> Option<(Entry, Pool)> {
        let slot = self.sample(draws)?;
        let entry = self.take(slot)?;
        Some((entry, self))
    }

    /// Slot index of the live entry with 0-based rank `k`.
    fn kth_live(&self, k: usize) -> usize {
        let n = self.slots.len();
        let mut pos = 0usize;
        let mut remaining = k + 1;
        let mut step: usize = if n == 0 { 0 } else { 1 << (usize::BITS - 1 - n.leading_zeros()) };
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] < remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        // `pos + 1` is the 1-based slot; convert back to 0-based.
        pos
    }
}

fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl PartialEq for Pool {
    fn eq(&self, other: &Self) -> bool {
        self.live == other.live && self.iter().eq(other.iter())
    }
}

impl Eq for Pool {}

impl Serialize for Pool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for Pool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Pool::new(entries).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hash256;
    use proptest::prelude::*;

    /// Replays a fixed list of indices, wrapping each into range.
    struct Script(Vec<usize>, usize);

    impl DrawSource for Script {
        fn draw_index(&mut self, len: usize) -> usize {
            let v = self.0[self.1 % self.0.len()];
            self.1 += 1;
            v % len
        }
    }

    fn entry(i: u64, value: u64) -> Entry {
        Entry::new(EntryId::new(Hash256([i as u8; 32]), i), value)
    }

    fn pool_of(values: &[u64]) -> Pool {
        Pool::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| entry(i as u64, v))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_duplicates() {
        let err = Pool::new(vec![entry(1, 10), entry(1, 20)]).unwrap_err();
        assert!(matches!(err, SelectionError::DuplicateEntry(_)));
    }

    #[test]
    fn empty_pool_samples_nothing() {
        let pool = Pool::default();
        let mut draws = Script(vec![0], 0);
        assert!(pool.sample(&mut draws).is_none());
        assert_eq!(draws.1, 0, "no draw consumed on an empty pool");
        assert!(pool.draw(&mut draws).is_none());
    }

    #[test]
    fn totals_track_removals() {
        let mut pool = pool_of(&[10, 20, 30]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.total_value(), 60);

        let taken = pool.take(1).unwrap();
        assert_eq!(taken.value, 20);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.total_value(), 40);
        assert!(pool.take(1).is_none(), "slot already taken");
        assert!(!pool.contains(&taken.id));
    }

    #[test]
    fn sample_skips_taken_slots() {
        let mut pool = pool_of(&[1, 2, 3, 4, 5]);
        pool.take(0);
        pool.take(2);
        // Live slots are now 1, 3, 4.
        let mut draws = Script(vec![0, 1, 2], 0);
        assert_eq!(pool.sample(&mut draws), Some(1));
        assert_eq!(pool.sample(&mut draws), Some(3));
        assert_eq!(pool.sample(&mut draws), Some(4));
    }

    #[test]
    fn sample_leaves_pool_unchanged() {
        let pool = pool_of(&[7, 8, 9]);
        let before = pool.clone();
        let mut draws = Script(vec![2], 0);
        let slot = pool.sample(&mut draws).unwrap();
        assert_eq!(pool.get(slot).unwrap().value, 9);
        assert_eq!(pool, before);
    }

    #[test]
    fn draw_returns_shrunk_pool() {
        let pool = pool_of(&[5, 6]);
        let mut draws = Script(vec![1], 0);
        let (drawn, rest) = pool.clone().draw(&mut draws).unwrap();
        assert_eq!(drawn.value, 6);
        assert_eq!(rest.len(), 1);
        assert_eq!(pool.len(), 2, "original copy is untouched");
    }

    #[test]
    fn equality_ignores_removed_slots() {
        let mut a = pool_of(&[1, 2, 3]);
        a.take(1);
        let b = Pool::new(vec![entry(0, 1), entry(2, 3)]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip_keeps_remaining_entries() {
        let mut pool = pool_of(&[11, 22, 33]);
        pool.take(0);
        let json = serde_json::to_string(&pool).unwrap();
        let back: Pool = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pool);
        assert_eq!(back.total_value(), 55);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn draining_visits_every_entry_once(
            values in proptest::collection::vec(0u64..1_000, 1..64),
            picks in proptest::collection::vec(any::<usize>(), 1..16),
        ) {
            let mut pool = pool_of(&values);
            let mut draws = Script(picks, 0);
            let mut seen = HashSet::new();
            while let Some((e, rest)) = pool.draw(&mut draws) {
                prop_assert!(seen.insert(e.id));
                pool = rest;
            }
            prop_assert_eq!(seen.len(), values.len());
        }
    }
}
