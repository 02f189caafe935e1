//! Slot storage for chain entries and tree nodes.
//!
//! Linked structures keep [`NodeId`]s instead of references, so a parent and
//! its child can point at each other without any ownership question: the
//! arena owns every node, the structures only hold indices.

use std::{
    fmt,
    mem,
    ops::{Index, IndexMut},
};

/// Stable handle to a node stored in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// Position of the slot backing this id
    const fn slot(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single arena slot
#[derive(Debug, Clone)]
enum Slot<T> {
    /// Slot holding a live node
    Occupied(T),
    /// Free slot, linked into the free list
    Vacant {
        /// Next free slot, if any
        next_free: Option<NodeId>,
    },
}

/// Node storage with a free list; freed slots are reused by later allocations.
#[derive(Debug, Clone)]
pub(crate) struct Arena<T> {
    /// All slots ever allocated
    slots: Vec<Slot<T>>,
    /// Head of the free list
    free_head: Option<NodeId>,
    /// Number of occupied slots
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Creates an empty arena
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new(), free_head: None, len: 0 }
    }

    /// Creates an empty arena with room for `capacity` nodes
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { slots: Vec::with_capacity(capacity), free_head: None, len: 0 }
    }

    /// Number of live nodes
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` and returns its id, reusing a freed slot when possible
    pub(crate) fn alloc(&mut self, value: T) -> NodeId {
        self.len = self.len.saturating_add(1);
        if let Some(id) = self.free_head {
            if let Some(slot) = self.slots.get_mut(id.slot()) {
                if let Slot::Vacant { next_free } = *slot {
                    self.free_head = next_free;
                    *slot = Slot::Occupied(value);
                    return id;
                }
            }
        }
        self.free_head = None;
        let id = NodeId(self.slots.len());
        self.slots.push(Slot::Occupied(value));
        id
    }

    /// Releases the node behind `id`, returning it. Returns `None` for an id that is not live.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.slot())?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let previous = mem::replace(slot, Slot::Vacant { next_free: self.free_head });
        self.free_head = Some(id);
        self.len = self.len.saturating_sub(1);
        match previous {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Returns the node behind `id`, if it is live
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.slot()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the node behind `id` mutably, if it is live
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.slot()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Drops every node
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

// A dangling id means a linked structure lost track of its own nodes.
impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    #[allow(clippy::panic)]
    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("dangling node id {id}"),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    #[allow(clippy::panic)]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("dangling node id {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena[b], "b");
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = Arena::with_capacity(4);
        let a = arena.alloc(1);
        let b = arena.alloc(2);

        assert_eq!(arena.free(a), Some(1));
        assert_eq!(arena.free(a), None);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.len(), 1);

        let c = arena.alloc(3);
        assert_eq!(c, a);
        assert_eq!(arena[c], 3);
        assert_eq!(arena[b], 2);
    }

    #[test]
    fn test_free_list_is_lifo() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..4).map(|i| arena.alloc(i)).collect();
        for &id in &ids {
            arena.free(id);
        }
        assert_eq!(arena.len(), 0);

        let reused: Vec<_> = (0..4).map(|i| arena.alloc(i)).collect();
        let mut expected = ids.clone();
        expected.reverse();
        assert_eq!(reused, expected);
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(a), None);
    }

    #[test]
    #[should_panic(expected = "dangling node id")]
    fn test_index_on_freed_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.free(a);
        let _value = arena[a];
    }
}
