//! Slot: nullable storage cell holding at most one key-value pair.
//!
//! The table's array is `Vec<Slot<K, V>>`; a slot is either empty or
//! occupied and owns its payload outright. Construction and destruction
//! of pairs happen only through `fill` and `clear`, so every state
//! transition an assignment could produce (empty or occupied on either
//! side) is well defined by the underlying `Option`.

#[derive(Clone, Debug)]
pub(crate) struct Slot<K, V>(Option<(K, V)>);

impl<K, V> Slot<K, V> {
    pub(crate) fn empty() -> Self {
        Slot(None)
    }

    pub(crate) fn is_occupied(&self) -> bool {
        self.0.is_some()
    }

    /// Construct a pair in place. The slot must be empty; filling an
    /// occupied slot would silently drop a live entry.
    pub(crate) fn fill(&mut self, key: K, value: V) {
        debug_assert!(self.0.is_none(), "fill called on an occupied slot");
        self.0 = Some((key, value));
    }

    /// Destructive reset: returns the pair if one was stored. Clearing
    /// an already empty slot is a no-op yielding `None`.
    pub(crate) fn clear(&mut self) -> Option<(K, V)> {
        self.0.take()
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.0.as_ref().map(|(k, _)| k)
    }

    pub(crate) fn pair(&self) -> Option<(&K, &V)> {
        self.0.as_ref().map(|(k, v)| (k, v))
    }

    /// Shared key, exclusive value. Keys are immutable while stored;
    /// mutating one would desynchronize it from its probe position.
    pub(crate) fn pair_mut(&mut self) -> Option<(&K, &mut V)> {
        self.0.as_mut().map(|(k, v)| (&*k, v))
    }

    pub(crate) fn value(&self) -> Option<&V> {
        self.0.as_ref().map(|(_, v)| v)
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.0.as_mut().map(|(_, v)| v)
    }

    pub(crate) fn into_pair(self) -> Option<(K, V)> {
        self.0
    }
}
