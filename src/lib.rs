//! probe-hashmap: A single-threaded map over one contiguous slot array,
//! resolving collisions by linear probing and deleting entries without
//! tombstones.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep every entry in one flat array of nullable slots so that
//!   lookup, insert and erase are short forward scans, and so the whole
//!   structure can be reasoned about through a single probe invariant.
//! - Layers:
//!   - Slot<K, V>: a nullable storage cell, either empty or holding one
//!     key-value pair. Owns its payload; all four assignment transitions
//!     (empty/occupied on either side) are well defined.
//!   - RawTable<K, V, S>: the probing core. Owns `Vec<Slot<K, V>>`, a
//!     live entry count, and an injected `BuildHasher`; implements
//!     probing, growth, and the deletion repair sweep on top of the
//!     slot layer, with no guards of its own.
//!   - ProbeHashMap<K, V, S>: public API. Wraps RawTable and opens the
//!     reentrancy frame around every entry point that can run user
//!     `Hash`/`Eq` code.
//!
//! Probe invariant
//! - For every key present, scanning its probe sequence
//!   `(hash(k) + i) % capacity` from `i = 0` reaches the key's slot
//!   before any empty slot. Lookup therefore stops at the first empty
//!   slot, with no tombstone markers anywhere. Erase preserves the
//!   invariant by lifting out the contiguous occupied run that follows
//!   the cleared slot and reinserting it.
//!
//! Growth policy
//! - Before an entry is placed, if `(len + 1) * 4 >= capacity` the table
//!   reallocates to `(len + 1) * 8` slots and reinserts every pair, so
//!   occupancy stays below 1/4 and probe runs stay short. Capacity never
//!   shrinks, and erase never reallocates.
//!
//! Insert contract
//! - `insert` is first-write-wins: inserting a key that is already
//!   present keeps the stored value and reports `false`. Replacement
//!   goes through `find_mut`, or `remove` followed by `insert`.
//!
//! Constraints
//! - Single-threaded: no atomics, no internal synchronization.
//! - User code (`K: Eq/Hash`, the injected hasher) runs during probing,
//!   growth and the repair sweep; if it panics mid-rebuild the table may
//!   be left inconsistent. A debug-only reentrancy guard panics on
//!   nested entry while internals are transiently inconsistent; release
//!   builds compile it away.
//! - References and iterators borrow the table, so any operation that
//!   can relocate entries (growing insert, erase) is statically excluded
//!   while they live.
//!
//! Notes and non-goals
//! - Iteration order is physical slot order, not insertion order, and is
//!   not stable across growth or erase.
//! - No persistence, no separate chaining, no shrink-on-erase.
//! - Public API surface is `ProbeHashMap`, its iterators, and
//!   `AccessError`; the slot layer is an implementation detail.

mod probe_hash_map;
mod probe_hash_map_proptest;
mod raw_table;
mod reentrancy;
mod slot;

// Public surface
pub use probe_hash_map::{AccessError, IntoIter, Iter, IterMut, ProbeHashMap};
