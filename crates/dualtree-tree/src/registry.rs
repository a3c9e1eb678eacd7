//! Generation-checked arena holding the items of one folder pair.
//!
//! Every item lives in a slot. A handle ([`ObjectId`]) records the slot index
//! and the slot's generation at insertion time; removing an item bumps the
//! generation, so every handle captured before the removal stops resolving.
//! Freed slots are reused for new items. A slot is retired instead of reused
//! once its generation reaches `u32::MAX`, so generations never wrap. At most
//! `u32::MAX + 1` slots exist per arena; exceeding that panics.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::TreeError;

static NEXT_TREE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifier of one folder pair's arena, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(u32);

impl TreeId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Weak handle to an item.
///
/// Handles are plain values: they never keep an item alive and may outlive
/// it. Resolve them through [`BaseFolderPair::resolve`] or
/// [`FolderComparison::resolve`].
///
/// [`BaseFolderPair::resolve`]: crate::BaseFolderPair::resolve
/// [`FolderComparison::resolve`]: crate::FolderComparison::resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    tree: TreeId,
    index: u32,
    generation: u32,
}

impl ObjectId {
    /// The folder pair this handle was issued by.
    pub fn tree(&self) -> TreeId {
        self.tree
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}v{}", self.tree, self.index, self.generation)
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Not synchronized: one thread at a time.
pub(crate) struct Registry<T> {
    tree: TreeId,
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            tree: TreeId::next(),
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    pub(crate) fn tree_id(&self) -> TreeId {
        self.tree
    }

    /// Number of live items.
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn insert(&mut self, value: T) -> ObjectId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            debug_assert!(slot.value.is_none());
            slot.value = Some(value);
            return ObjectId {
                tree: self.tree,
                index,
                generation: slot.generation,
            };
        }

        // Colliding indices would alias live items, so running out is fatal.
        let Ok(index) = u32::try_from(self.slots.len()) else {
            panic!("item arena exhausted: more than {} slots", u32::MAX);
        };
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        ObjectId {
            tree: self.tree,
            index,
            generation: 0,
        }
    }

    /// Remove an item, invalidating every handle to it.
    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<T> {
        if id.tree != self.tree {
            return None;
        }
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        // A slot whose generation cannot be bumped any further is retired.
        if let Some(next) = slot.generation.checked_add(1) {
            slot.generation = next;
            self.free.push(id.index);
        }
        self.live -= 1;
        Some(value)
    }

    pub(crate) fn get(&self, id: ObjectId) -> Option<&T> {
        self.lookup(id).ok()
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut T> {
        if id.tree != self.tree {
            return None;
        }
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub(crate) fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Like [`get`](Self::get), but tells apart foreign and stale handles.
    pub(crate) fn lookup(&self, id: ObjectId) -> Result<&T, TreeError> {
        if id.tree != self.tree {
            return Err(TreeError::ForeignHandle {
                id,
                tree: self.tree,
            });
        }
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
            .ok_or(TreeError::StaleHandle { id })
    }
}

impl<T> Index<ObjectId> for Registry<T> {
    type Output = T;

    fn index(&self, id: ObjectId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("invalid object id {id}"),
        }
    }
}

impl<T> IndexMut<ObjectId> for Registry<T> {
    fn index_mut(&mut self, id: ObjectId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("invalid object id {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut registry = Registry::new();
        let a = registry.insert("a");
        let b = registry.insert("b");

        assert_eq!(registry.get(a), Some(&"a"));
        assert_eq!(registry[b], "b");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_removed_handle_is_stale() {
        let mut registry = Registry::new();
        let a = registry.insert(1);

        assert_eq!(registry.remove(a), Some(1));
        assert!(registry.get(a).is_none());
        assert!(matches!(registry.lookup(a), Err(TreeError::StaleHandle { .. })));
        assert_eq!(registry.remove(a), None);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_reused_slot_does_not_revive_old_handle() {
        let mut registry = Registry::new();
        let old = registry.insert(1);
        registry.remove(old);

        let new = registry.insert(2);
        assert_ne!(old, new);
        assert!(registry.get(old).is_none());
        assert_eq!(registry.get(new), Some(&2));
    }

    #[test]
    fn test_exhausted_generation_retires_slot() {
        let mut registry = Registry::new();
        let first = registry.insert(1);
        registry.remove(first);
        registry.slots[0].generation = u32::MAX;

        let last = registry.insert(2);
        assert_eq!((last.index, last.generation), (0, u32::MAX));
        assert_eq!(registry.remove(last), Some(2));
        assert!(registry.free.is_empty());
        assert!(matches!(registry.lookup(last), Err(TreeError::StaleHandle { .. })));

        let fresh = registry.insert(3);
        assert_eq!(fresh.index, 1);
        assert!(registry.get(last).is_none());
        assert!(registry.get(first).is_none());
        assert_eq!(registry.get(fresh), Some(&3));
    }

    #[test]
    fn test_foreign_handle() {
        let mut first = Registry::new();
        let second: Registry<i32> = Registry::new();
        let id = first.insert(1);

        assert_ne!(first.tree_id(), second.tree_id());
        assert!(second.get(id).is_none());
        assert!(matches!(second.lookup(id), Err(TreeError::ForeignHandle { .. })));
    }
}
