//! RawTable: the probing core. Owns the slot array, the live count and
//! the injected hasher; implements lookup, placement, growth and the
//! tombstone-free deletion sweep. No guards here; the public layer
//! wraps every entry point.

use crate::slot::Slot;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter;
use core::mem;

#[derive(Clone)]
pub(crate) struct RawTable<K, V, S> {
    slots: Vec<Slot<K, V>>,
    len: usize,
    hasher: S,
}

impl<K, V, S> RawTable<K, V, S> {
    pub(crate) fn with_hasher(hasher: S) -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            hasher,
        }
    }

    pub(crate) fn hasher(&self) -> &S {
        &self.hasher
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slots(&self) -> &[Slot<K, V>] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot<K, V>] {
        &mut self.slots
    }

    pub(crate) fn into_slots(self) -> Vec<Slot<K, V>> {
        self.slots
    }

    /// Empty every slot; capacity is retained.
    pub(crate) fn clear(&mut self) {
        self.len = 0;
        for slot in &mut self.slots {
            let _ = slot.clear();
        }
    }
}

impl<K, V, S> RawTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// First index of the probe sequence for `q`. Capacity must be
    /// nonzero.
    fn probe_start<Q>(&self, q: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(q) % self.slots.len() as u64) as usize
    }

    /// Next index of a probe sequence, wrapping at capacity.
    fn next_slot(&self, ind: usize) -> usize {
        let ind = ind + 1;
        if ind == self.slots.len() {
            0
        } else {
            ind
        }
    }

    /// Scan the probe sequence of `q` until its slot or the first empty
    /// slot. Terminates because occupancy is kept below 1/4, so every
    /// probe sequence contains an empty slot.
    fn lookup<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.slots.is_empty() {
            return None;
        }
        let mut ind = self.probe_start(q);
        loop {
            match self.slots[ind].key() {
                Some(k) if k.borrow() == q => return Some(ind),
                Some(_) => ind = self.next_slot(ind),
                None => return None,
            }
        }
    }

    /// Probe for `key` after the growth check has run: `Ok` holds the
    /// slot already storing the key, `Err` the first empty slot of its
    /// sequence.
    fn find_or_insert_slot(&self, key: &K) -> Result<usize, usize> {
        debug_assert!(self.len < self.slots.len());
        let mut ind = self.probe_start(key);
        loop {
            match self.slots[ind].key() {
                Some(k) if k == key => return Ok(ind),
                Some(_) => ind = self.next_slot(ind),
                None => return Err(ind),
            }
        }
    }

    /// Growth check followed by the probe-and-place step shared by all
    /// insertion paths (public insert, lazy keyed access, growth
    /// rebuild, deletion repair). Returns the index of the slot holding
    /// the key and whether a new entry was placed; a present key keeps
    /// its stored value and the given pair is dropped.
    fn insert_inner(&mut self, key: K, value: V) -> (usize, bool) {
        if (self.len + 1) * 4 >= self.slots.len() {
            self.reallocate((self.len + 1) * 8);
        }
        match self.find_or_insert_slot(&key) {
            Ok(ind) => (ind, false),
            Err(ind) => {
                self.slots[ind].fill(key, value);
                self.len += 1;
                (ind, true)
            }
        }
    }

    /// Replace the slot array with a fresh one of `capacity` slots and
    /// reinsert every stored pair. The growth check cannot fire again
    /// during the rebuild: `capacity` is eight times the entry count
    /// while the check needs four times as many slots as entries.
    fn reallocate(&mut self, capacity: usize) {
        let old = mem::replace(
            &mut self.slots,
            iter::repeat_with(Slot::empty).take(capacity).collect(),
        );
        self.len = 0;
        for slot in old {
            if let Some((key, value)) = slot.into_pair() {
                self.insert_inner(key, value);
            }
        }
    }

    pub(crate) fn insert(&mut self, key: K, value: V) -> bool {
        self.insert_inner(key, value).1
    }

    pub(crate) fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.lookup(q).is_some()
    }

    pub(crate) fn find<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let ind = self.lookup(q)?;
        self.slots[ind].pair()
    }

    pub(crate) fn find_mut<Q>(&mut self, q: &Q) -> Option<(&K, &mut V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let ind = self.lookup(q)?;
        self.slots[ind].pair_mut()
    }

    pub(crate) fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let ind = self.lookup(q)?;
        self.slots[ind].value()
    }

    pub(crate) fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let ind = match self.lookup(&key) {
            Some(ind) => ind,
            None => self.insert_inner(key, default()).0,
        };
        self.slots[ind].value_mut().expect("located slot is occupied")
    }

    /// Remove `q`'s entry, then repair the probe runs it anchored. No
    /// tombstone is written: the contiguous occupied run after the
    /// cleared slot is lifted out and reinserted, so every surviving
    /// key stays reachable from its own probe start. The count only
    /// decreases before the reinsertions, so growth never fires
    /// mid-repair and no slot array reallocation occurs here.
    pub(crate) fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let ind = self.lookup(q)?;
        let (_key, value) = self.slots[ind].clear().expect("located slot is occupied");
        self.len -= 1;

        let mut displaced = Vec::new();
        let mut cursor = self.next_slot(ind);
        while let Some(pair) = self.slots[cursor].clear() {
            self.len -= 1;
            displaced.push(pair);
            cursor = self.next_slot(cursor);
        }
        for (k, v) in displaced {
            self.insert_inner(k, v);
        }
        Some(value)
    }

    /// Walk every occupied slot's probe sequence and assert it reaches
    /// the slot before any empty one, and that `len` matches the number
    /// of occupied slots.
    #[cfg(test)]
    pub(crate) fn assert_probe_invariant(&self) {
        let mut occupied = 0;
        for ind in 0..self.slots.len() {
            if let Some(key) = self.slots[ind].key() {
                occupied += 1;
                let mut cur = self.probe_start(key);
                while cur != ind {
                    assert!(
                        self.slots[cur].is_occupied(),
                        "empty slot {cur} interrupts the probe run of the key in slot {ind}"
                    );
                    cur = self.next_slot(cur);
                }
            }
        }
        assert_eq!(occupied, self.len, "len must equal the occupied slot count");
    }
}
