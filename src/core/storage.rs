use crate::error::PhysicsError;
use crate::Result;
use slotmap::{Key, SlotMap};

/// Generation-checked storage for one kind of engine object
///
/// A removed slot bumps its generation, so a key issued before the removal
/// never resolves again.
pub struct Arena<K: Key, T> {
    kind: &'static str,
    items: SlotMap<K, T>,
}

impl<K: Key, T> Arena<K, T> {
    /// Creates an empty arena; `kind` names the objects in error messages
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            items: SlotMap::with_key(),
        }
    }

    /// Adds an item and returns its key
    pub fn insert(&mut self, item: T) -> K {
        self.items.insert(item)
    }

    /// Gets an item, failing with `InvalidHandle` for stale or unknown keys
    pub fn get(&self, key: K) -> Result<&T> {
        self.items.get(key).ok_or_else(|| self.invalid(key))
    }

    /// Gets a mutable item, failing with `InvalidHandle` for stale or unknown keys
    pub fn get_mut(&mut self, key: K) -> Result<&mut T> {
        let kind = self.kind;
        self.items
            .get_mut(key)
            .ok_or_else(|| PhysicsError::InvalidHandle { kind, handle: key.data().as_ffi() })
    }

    /// Removes an item, failing with `InvalidHandle` if it is already gone
    pub fn remove(&mut self, key: K) -> Result<T> {
        let kind = self.kind;
        self.items
            .remove(key)
            .ok_or(PhysicsError::InvalidHandle { kind, handle: key.data().as_ffi() })
    }

    pub fn contains(&self, key: K) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.items.iter()
    }

    fn invalid(&self, key: K) -> PhysicsError {
        PhysicsError::InvalidHandle {
            kind: self.kind,
            handle: key.data().as_ffi(),
        }
    }
}
