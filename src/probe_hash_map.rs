//! ProbeHashMap: public surface over the probing core, with a debug
//! reentrancy frame around every entry point that runs user code.

use crate::raw_table::RawTable;
use crate::reentrancy::Reentrancy;
use crate::slot::Slot;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Failure surfaced by read-only keyed access.
#[derive(Debug)]
pub enum AccessError {
    /// The queried key is not present in the table.
    AbsentKey,
}

/// A map over one contiguous slot array, resolving collisions by
/// linear probing and erasing entries without tombstones.
///
/// `insert` is first-write-wins: a key that is already present keeps
/// its stored value. Iteration order is physical slot order and is not
/// stable across growth or erase.
pub struct ProbeHashMap<K, V, S = RandomState> {
    raw: RawTable<K, V, S>,
    reentrancy: Reentrancy,
}

impl<K, V> ProbeHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ProbeHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ProbeHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            raw: RawTable::with_hasher(hasher),
            reentrancy: Reentrancy::new(),
        }
    }

    /// The hash state injected at construction.
    pub fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    /// Total slot count, occupied or not. Zero until the first
    /// insertion; afterwards always more than four times `len`.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Insert `key` -> `value` if the key is absent, growing the table
    /// first when the occupancy check requires it (also for a key that
    /// turns out to be present). Returns whether a new entry was
    /// placed; a present key keeps its stored value and the given pair
    /// is dropped.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let _frame = self.reentrancy.enter();
        self.raw.insert(key, value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _frame = self.reentrancy.enter();
        self.raw.contains(q)
    }

    /// Locate `q`'s entry.
    pub fn find<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _frame = self.reentrancy.enter();
        self.raw.find(q)
    }

    /// Locate `q`'s entry with exclusive access to the value. The key
    /// stays shared; mutating it would detach it from its probe
    /// position.
    pub fn find_mut<Q>(&mut self, q: &Q) -> Option<(&K, &mut V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _frame = self.reentrancy.enter();
        self.raw.find_mut(q)
    }

    /// Read-only keyed access; never mutates the table. Checking with
    /// [`find`](Self::find) first avoids the error path.
    pub fn get<Q>(&self, q: &Q) -> Result<&V, AccessError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _frame = self.reentrancy.enter();
        self.raw.get(q).ok_or(AccessError::AbsentKey)
    }

    /// Keyed access that lazily creates the entry: if `key` is absent,
    /// `default` runs exactly once and its result is inserted first.
    /// A present key is looked up without a growth check.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let _frame = self.reentrancy.enter();
        self.raw.get_or_insert_with(key, default)
    }

    /// [`get_or_insert_with`](Self::get_or_insert_with) over
    /// `V::default`.
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let _frame = self.reentrancy.enter();
        self.raw.get_or_insert_with(key, V::default)
    }

    /// Erase `q`'s entry and return its value; erasing an absent key is
    /// a no-op. Never shrinks or reallocates the slot array, but may
    /// relocate other entries of the same probe run.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _frame = self.reentrancy.enter();
        self.raw.remove(q)
    }

    /// Drop every entry; capacity is retained.
    pub fn clear(&mut self) {
        let _frame = self.reentrancy.enter();
        self.raw.clear();
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.raw.slots().iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.raw.slots_mut().iter_mut(),
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_probe_invariant(&self) {
        self.raw.assert_probe_invariant();
    }
}

impl<K, V, S> Clone for ProbeHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            reentrancy: Reentrancy::new(),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for ProbeHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts every pair in encountered order; pairs whose key is
    /// already present are dropped (first write wins).
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbeHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ProbeHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

/// Iterator over shared entries, in physical slot order.
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Slot::pair)
    }
}

/// Iterator over entries with exclusive values, in physical slot order.
pub struct IterMut<'a, K, V> {
    slots: core::slice::IterMut<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Slot::pair_mut)
    }
}

/// Consuming iterator over owned pairs, in physical slot order.
pub struct IntoIter<K, V> {
    slots: std::vec::IntoIter<Slot<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Slot::into_pair)
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbeHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        Iter {
            slots: self.raw.slots().iter(),
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ProbeHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> {
        IterMut {
            slots: self.raw.slots_mut().iter_mut(),
        }
    }
}

impl<K, V, S> IntoIterator for ProbeHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            slots: self.raw.into_slots().into_iter(),
        }
    }
}
