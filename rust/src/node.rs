//! Node-level operations for TreeNode.
//!
//! Everything here touches a single node (or a node and a detached sibling).
//! The tree-level algorithms in `insert_operations` and `delete_operations`
//! decide when to call them and keep the parent in step.

use crate::types::{Key, NodeId, TreeNode};

impl TreeNode {
    // ============================================================================
    // ACCESSORS
    // ============================================================================

    /// Keys held by this node, in non-decreasing order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Child ids; empty for leaves.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Returns the number of keys in this node.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if this node holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Key at `index`, if any.
    pub fn key_at(&self, index: usize) -> Option<Key> {
        self.keys.get(index).copied()
    }

    /// First (smallest) key of this node.
    pub fn first_key(&self) -> Option<Key> {
        self.keys.first().copied()
    }

    /// Last (largest) key of this node.
    pub fn last_key(&self) -> Option<Key> {
        self.keys.last().copied()
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns true if this node holds `2t - 1` keys and must be split
    /// before anything descends into it for insertion.
    pub fn is_full(&self, degree: usize) -> bool {
        self.keys.len() >= 2 * degree - 1
    }

    /// Returns true if this node can give up a key and stay at or above
    /// `t - 1` keys.
    pub fn can_donate(&self, degree: usize) -> bool {
        self.keys.len() >= degree
    }

    // ============================================================================
    // SEARCH HELPERS
    // ============================================================================

    /// Smallest index `i` with `keys[i] >= key`, or `len()` if every key is
    /// smaller.
    #[inline]
    pub fn find_key_index(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k < key)
    }

    /// Smallest index `i` with `keys[i] > key`: the slot after any copies of
    /// `key` already in this node. Insertion places keys and descends here.
    #[inline]
    pub fn find_insert_index(&self, key: Key) -> usize {
        self.keys.partition_point(|&k| k <= key)
    }

    /// Returns true if `keys[index] == key`.
    #[inline]
    pub fn has_key_at(&self, index: usize, key: Key) -> bool {
        self.keys.get(index) == Some(&key)
    }

    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Place `key` at its sorted position in a leaf, after any equal keys.
    pub(crate) fn insert_key(&mut self, key: Key) {
        let index = self.find_insert_index(key);
        self.keys.insert(index, key);
    }

    /// Split a full node around its median at `t - 1`.
    ///
    /// Afterwards `self` keeps the `t - 1` keys (and `t` children) before the
    /// median. Returns the median and a new sibling holding the `t - 1` keys
    /// (and `t` children) after it.
    pub(crate) fn split_at_median(&mut self, degree: usize) -> (Key, TreeNode) {
        debug_assert_eq!(self.keys.len(), 2 * degree - 1);

        let right_keys = self.keys.split_off(degree);
        let median = self
            .keys
            .pop()
            .expect("full node always has a median key");
        let right_children = if self.leaf {
            Vec::new()
        } else {
            self.children.split_off(degree)
        };

        let sibling = TreeNode {
            keys: right_keys,
            children: right_children,
            leaf: self.leaf,
        };
        (median, sibling)
    }

    // ============================================================================
    // DELETE OPERATIONS
    // ============================================================================

    /// Remove the key at `index`, shifting later keys left.
    pub(crate) fn remove_key_at(&mut self, index: usize) -> Key {
        self.keys.remove(index)
    }

    // ============================================================================
    // BORROWING AND MERGING HELPERS
    // ============================================================================

    /// Take the last key (and last child, if internal). Used when this node
    /// is the left sibling lending to its right neighbour.
    pub(crate) fn borrow_last(&mut self) -> Option<(Key, Option<NodeId>)> {
        let key = self.keys.pop()?;
        let child = if self.leaf { None } else { self.children.pop() };
        Some((key, child))
    }

    /// Take the first key (and first child, if internal). Used when this node
    /// is the right sibling lending to its left neighbour.
    pub(crate) fn borrow_first(&mut self) -> Option<(Key, Option<NodeId>)> {
        if self.keys.is_empty() {
            return None;
        }
        let key = self.keys.remove(0);
        let child = if self.leaf {
            None
        } else {
            Some(self.children.remove(0))
        };
        Some((key, child))
    }

    /// Prepend the separator coming down from the parent and, for internal
    /// nodes, the child moved over from the left sibling.
    pub(crate) fn accept_from_left(&mut self, separator: Key, moved_child: Option<NodeId>) {
        self.keys.insert(0, separator);
        if let Some(child) = moved_child {
            self.children.insert(0, child);
        }
    }

    /// Append the separator coming down from the parent and, for internal
    /// nodes, the child moved over from the right sibling.
    pub(crate) fn accept_from_right(&mut self, separator: Key, moved_child: Option<NodeId>) {
        self.keys.push(separator);
        if let Some(child) = moved_child {
            self.children.push(child);
        }
    }

    /// Absorb the separator and all of `right`'s keys and children.
    pub(crate) fn merge_from(&mut self, separator: Key, mut right: TreeNode) {
        self.keys.push(separator);
        self.keys.append(&mut right.keys);
        self.children.append(&mut right.children);
    }
}
