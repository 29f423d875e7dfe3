// Public-surface property tests for ProbeHashMap. The in-crate suite
// additionally checks the probe invariant through internal access;
// here the table is exercised strictly through its API against a
// std::collections::HashMap model.

use probe_hashmap::ProbeHashMap;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

// Property: first-write-wins over an arbitrary insert sequence; the
// stored value for each key is the first one offered, and len() counts
// distinct keys.
proptest! {
    #[test]
    fn prop_first_write_wins(pairs in prop::collection::vec((0u8..16, any::<i32>()), 0..100)) {
        let mut sut: ProbeHashMap<u8, i32> = ProbeHashMap::new();
        let mut model: HashMap<u8, i32> = HashMap::new();

        for (k, v) in pairs {
            sut.insert(k, v);
            model.entry(k).or_insert(v);
        }

        prop_assert_eq!(sut.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(sut.find(k).map(|(_, fv)| *fv), Some(*v));
        }
    }
}

// Property: after erasing an arbitrary subset, every survivor remains
// reachable with its value and every victim reports absence.
proptest! {
    #[test]
    fn prop_survivors_stay_reachable(
        keys in prop::collection::btree_set(any::<u64>(), 1..200),
        seed in any::<u64>(),
    ) {
        let mut sut: ProbeHashMap<u64, u64> = ProbeHashMap::new();
        for &k in &keys {
            sut.insert(k, k.wrapping_mul(3));
        }

        let (victims, survivors): (BTreeSet<u64>, BTreeSet<u64>) =
            keys.iter().partition(|&&k| (k ^ seed) % 3 == 0);

        let capacity_before = sut.capacity();
        for k in &victims {
            prop_assert_eq!(sut.remove(k), Some(k.wrapping_mul(3)));
        }
        prop_assert_eq!(sut.capacity(), capacity_before, "erase must not reallocate");
        prop_assert_eq!(sut.len(), survivors.len());

        for k in &victims {
            prop_assert!(sut.find(k).is_none());
        }
        for k in &survivors {
            prop_assert_eq!(sut.find(k).map(|(_, v)| *v), Some(k.wrapping_mul(3)));
        }
    }
}

// Property: accounting. len() equals distinct keys successfully
// inserted minus keys successfully erased, for arbitrary interleaved
// sequences over a small key space.
proptest! {
    #[test]
    fn prop_len_accounting(ops in prop::collection::vec((any::<bool>(), 0u8..8, any::<i32>()), 0..120)) {
        let mut sut: ProbeHashMap<u8, i32> = ProbeHashMap::new();
        let mut model: HashMap<u8, i32> = HashMap::new();

        for (is_insert, k, v) in ops {
            if is_insert {
                let inserted = sut.insert(k, v);
                prop_assert_eq!(inserted, !model.contains_key(&k));
                model.entry(k).or_insert(v);
            } else {
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
        }

        let got: BTreeSet<u8> = sut.iter().map(|(k, _)| *k).collect();
        let expected: BTreeSet<u8> = model.keys().copied().collect();
        prop_assert_eq!(got, expected);
    }
}
