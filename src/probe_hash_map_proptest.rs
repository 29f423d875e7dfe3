#![cfg(test)]

// Property tests for ProbeHashMap kept inside the crate so the probe
// invariant can be checked through internal access after every step.

use crate::probe_hash_map::{AccessError, ProbeHashMap};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cell::Cell;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::BuildHasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to
// earlier keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Find(usize),
    Get(usize),
    Contains(String),
    OrInsert(usize, i32),
    Iterate,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Find),
            2 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::OrInsert(i, v)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives a ProbeHashMap and a std::collections::HashMap model through
// the same operations. The model is adapted to first-write-wins with
// `entry(k).or_insert(v)`. After every step:
// - len/is_empty parity with the model;
// - the probe invariant holds for every occupied slot;
// - capacity never decreases (growth only, no shrink-on-erase).
fn run_scenario<S>(
    mut sut: ProbeHashMap<Key, i32, S>,
    pool: &[String],
    ops: &[OpI],
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut prev_capacity = 0usize;

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, *i);
                let was_present = model.contains_key(&k);
                let inserted = sut.insert(k.clone(), *v);
                prop_assert_eq!(inserted, !was_present, "insert reports placement");
                model.entry(k).or_insert(*v);
            }
            OpI::Remove(i) => {
                let k = key_from(pool, *i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
            }
            OpI::Find(i) => {
                let k = key_from(pool, *i);
                let found = sut.find(&k).map(|(fk, fv)| (fk.clone(), *fv));
                let expected = model.get_key_value(&k).map(|(mk, mv)| (mk.clone(), *mv));
                prop_assert_eq!(found, expected);
            }
            OpI::Get(i) => {
                let k = key_from(pool, *i);
                match sut.get(&k) {
                    Ok(v) => prop_assert_eq!(Some(*v), model.get(&k).copied()),
                    Err(AccessError::AbsentKey) => prop_assert!(!model.contains_key(&k)),
                }
            }
            OpI::Contains(s) => {
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == *s);
                prop_assert_eq!(has, has_model);
            }
            OpI::OrInsert(i, v) => {
                let k = key_from(pool, *i);
                let was_present = model.contains_key(&k);
                let calls = Cell::new(0);
                let got = *sut.get_or_insert_with(k.clone(), || {
                    calls.set(calls.get() + 1);
                    *v
                });
                let expected = *model.entry(k).or_insert(*v);
                prop_assert_eq!(got, expected);
                prop_assert_eq!(calls.get(), if was_present { 0 } else { 1 });
            }
            OpI::Iterate => {
                let listed: Vec<Key> = sut.iter().map(|(k, _)| k.clone()).collect();
                let s_keys: BTreeSet<Key> = listed.iter().cloned().collect();
                let m_keys: BTreeSet<Key> = model.keys().cloned().collect();
                prop_assert_eq!(listed.len(), s_keys.len(), "each key exactly once");
                prop_assert_eq!(s_keys, m_keys);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        sut.assert_probe_invariant();
        prop_assert!(
            sut.capacity() >= prev_capacity,
            "capacity must never shrink"
        );
        prev_capacity = sut.capacity();
    }
    Ok(())
}

// Property: state-machine equivalence against the model under the
// default hash state.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(ProbeHashMap::new(), &pool, &ops)?;
    }
}

// Collision variant: a constant hasher funnels every key into one
// probe cluster, stressing run repair on erase and duplicate detection
// by equality alone.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl std::hash::BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl std::hash::Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(ProbeHashMap::with_hasher(ConstBuildHasher), &pool, &ops)?;
    }
}
