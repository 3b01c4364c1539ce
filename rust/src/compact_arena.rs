//! Slot arena that owns every tree node.
//!
//! Nodes are addressed by `NodeId` instead of references, so splits and
//! merges move ids between parents rather than aliasing nodes. Released
//! slots go on a free list and are reused by the next allocation.

use std::convert::TryFrom;
use std::ops::{Index, IndexMut};

pub type NodeId = u32;
pub const NULL_NODE: NodeId = u32::MAX;

/// Occupancy snapshot of a compact arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactArenaStats {
    pub total_slots: usize,
    pub allocated_count: usize,
    pub free_count: usize,
}

/// Arena storing `T` directly in a `Vec<T>` with a free list and an
/// allocation mask.
#[derive(Debug)]
pub struct CompactArena<T> {
    storage: Vec<T>,
    free_list: Vec<usize>,
    allocated_mask: Vec<bool>,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
        }
    }

    /// Allocate a new item in the arena and return its ID
    #[inline]
    pub fn allocate(&mut self, item: T) -> NodeId {
        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            free_index
        } else {
            let index = self.storage.len();
            self.storage.push(item);
            self.allocated_mask.push(true);
            index
        };

        NodeId::try_from(index).expect("Index should fit in NodeId")
    }

    #[inline]
    fn slot(&self, id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }
        let index = usize::try_from(id).ok()?;
        if self.allocated_mask.get(index).copied().unwrap_or(false) {
            Some(index)
        } else {
            None
        }
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.slot(id).map(|index| &self.storage[index])
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    /// IDs of all allocated slots, in slot order.
    pub fn allocated_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.allocated_mask
            .iter()
            .enumerate()
            .filter(|(_, allocated)| **allocated)
            .map(|(index, _)| index as NodeId)
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        CompactArenaStats {
            total_slots: self.storage.len(),
            allocated_count: self.len(),
            free_count: self.free_list.len(),
        }
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.storage.len() - self.free_list.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the arena
    pub fn clear(&mut self) {
        self.storage.clear();
        self.allocated_mask.clear();
        self.free_list.clear();
    }
}

impl<T: Default> CompactArena<T> {
    /// Release a slot and hand its contents back to the caller.
    #[inline]
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let index = self.slot(id)?;
        self.allocated_mask[index] = false;
        self.free_list.push(index);
        Some(std::mem::take(&mut self.storage[index]))
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for CompactArena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &T {
        match self.slot(id) {
            Some(index) => &self.storage[index],
            None => panic!("arena slot {} is not allocated", id),
        }
    }
}

impl<T> IndexMut<NodeId> for CompactArena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.slot(id) {
            Some(index) => &mut self.storage[index],
            None => panic!("arena slot {} is not allocated", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_arena_basic_operations() {
        let mut arena = CompactArena::new();

        let id1 = arena.allocate(42);
        let id2 = arena.allocate(84);
        let id3 = arena.allocate(126);

        assert_eq!(arena.get(id1), Some(&42));
        assert_eq!(arena[id2], 84);
        assert_eq!(arena.get(id3), Some(&126));

        assert!(arena.contains(id1));
        assert!(!arena.contains(NULL_NODE));

        let stats = arena.stats();
        assert_eq!(stats.allocated_count, 3);
        assert_eq!(stats.free_count, 0);
        assert_eq!(stats.total_slots, 3);
    }

    #[test]
    fn test_deallocate_reuses_slot() {
        let mut arena: CompactArena<i32> = CompactArena::new();

        let id1 = arena.allocate(42);
        let id2 = arena.allocate(84);

        assert_eq!(arena.deallocate(id1), Some(42));
        assert!(!arena.contains(id1));
        assert_eq!(arena.deallocate(id1), None);
        assert_eq!(arena.len(), 1);

        let id3 = arena.allocate(168);
        assert_eq!(id3, id1);
        assert_eq!(arena[id3], 168);
        assert_eq!(arena[id2], 84);
        assert_eq!(arena.stats().free_count, 0);
        assert_eq!(arena.allocated_ids().collect::<Vec<_>>(), vec![id1, id2]);
    }

    #[test]
    fn test_index_mut_and_clear() {
        let mut arena = CompactArena::new();
        let id = arena.allocate(vec![1, 2]);
        arena[id].push(3);
        assert_eq!(arena[id], vec![1, 2, 3]);

        arena.clear();
        assert!(arena.is_empty());
        assert!(arena.get(id).is_none());
    }

    #[test]
    #[should_panic(expected = "arena slot 0 is not allocated")]
    fn test_index_on_released_slot_panics() {
        let mut arena: CompactArena<i32> = CompactArena::new();
        let id = arena.allocate(7);
        arena.deallocate(id);
        let _value: i32 = arena[id];
    }
}
