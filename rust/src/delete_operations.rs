//! DELETE operations for BTree.
//!
//! Deletion makes sure every child it steps into holds at least `t` keys
//! (borrowing from a sibling or merging first), so removing one key further
//! down can never leave a node below `t - 1`. The root is the only node
//! allowed to run empty; it is collapsed once the descent finishes.

use crate::error::{BTreeError, ModifyResult};
use crate::types::{BTree, Key, NodeId};
use tracing::{debug, instrument, trace};

impl BTree {
    /// Remove one copy of a key from the tree.
    ///
    /// # Returns
    ///
    /// `true` if the key was present and one copy has been removed. An absent key is
    /// not an error: the tree is left unchanged, a diagnostic is logged and
    /// `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1);
    /// assert!(tree.delete(1));
    /// assert!(!tree.delete(1));
    /// assert!(tree.is_empty());
    /// ```
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, key: Key) -> bool {
        // An absent key would still trigger fills on the way down; look first
        // so a miss leaves the structure untouched.
        if !self.contains(key) {
            debug!(key, "key not found in tree, nothing deleted");
            return false;
        }

        let removed = self.delete_from(self.root, key);
        self.collapse_root_if_needed();
        removed
    }

    /// Remove with invariant checks before and after the mutation.
    ///
    /// Returns `KeyNotFound` if the key is absent.
    pub fn try_delete(&mut self, key: Key) -> ModifyResult<()> {
        self.check_invariants_detailed()
            .map_err(|e| BTreeError::data_integrity("Before delete", &e.to_string()))?;

        if !self.delete(key) {
            return Err(BTreeError::KeyNotFound);
        }

        self.check_invariants_detailed()
            .map_err(|e| BTreeError::data_integrity("After delete", &e.to_string()))?;
        Ok(())
    }

    // ============================================================================
    // HELPERS FOR DELETE OPERATIONS
    // ============================================================================

    /// Delete `key` from the subtree rooted at `node_id`.
    ///
    /// Every non-root node this is called on holds at least `t` keys.
    fn delete_from(&mut self, node_id: NodeId, key: Key) -> bool {
        let node = &self.arena[node_id];
        let index = node.find_key_index(key);

        if node.has_key_at(index, key) {
            if node.leaf {
                self.remove_from_leaf(node_id, index);
            } else {
                self.remove_from_internal(node_id, index);
            }
            return true;
        }

        if node.leaf {
            debug!(key, node_id, "key not found in tree");
            return false;
        }

        let child_index = self.fill(node_id, index);
        let child = self.arena[node_id].children[child_index];
        self.delete_from(child, key)
    }

    fn remove_from_leaf(&mut self, node_id: NodeId, index: usize) {
        let key = self.arena[node_id].remove_key_at(index);
        trace!(node_id, index, key, "removed key from leaf");
    }

    /// Remove `keys[index]` from an internal node by replacing it with its
    /// predecessor or successor, or by merging the two children around it.
    fn remove_from_internal(&mut self, node_id: NodeId, index: usize) {
        let (key, left, right) = {
            let node = &self.arena[node_id];
            (node.keys[index], node.children[index], node.children[index + 1])
        };

        if self.arena[left].can_donate(self.degree) {
            let predecessor = self.predecessor_key(left);
            self.arena[node_id].keys[index] = predecessor;
            trace!(node_id, key, predecessor, "replaced key with predecessor");
            self.delete_from(left, predecessor);
        } else if self.arena[right].can_donate(self.degree) {
            let successor = self.successor_key(right);
            self.arena[node_id].keys[index] = successor;
            trace!(node_id, key, successor, "replaced key with successor");
            self.delete_from(right, successor);
        } else {
            self.merge_children(node_id, index);
            self.delete_from(left, key);
        }
    }

    /// Make sure `children[index]` holds at least `t` keys before the
    /// descent steps into it.
    ///
    /// Returns the index the child ends up at: a merge into the left
    /// sibling moves it one slot left.
    fn fill(&mut self, node_id: NodeId, index: usize) -> usize {
        let node = &self.arena[node_id];
        let child = node.children[index];
        if self.arena[child].can_donate(self.degree) {
            return index;
        }

        let key_count = node.keys.len();
        if index > 0 && self.arena[node.children[index - 1]].can_donate(self.degree) {
            self.borrow_from_prev(node_id, index);
            index
        } else if index < key_count
            && self.arena[node.children[index + 1]].can_donate(self.degree)
        {
            self.borrow_from_next(node_id, index);
            index
        } else if index < key_count {
            self.merge_children(node_id, index);
            index
        } else {
            self.merge_children(node_id, index - 1);
            index - 1
        }
    }

    /// Rotate right through the parent: the separator at `keys[index - 1]`
    /// drops to the front of `children[index]` and the left sibling's last
    /// key takes its place.
    fn borrow_from_prev(&mut self, node_id: NodeId, index: usize) {
        let (child, sibling) = {
            let node = &self.arena[node_id];
            (node.children[index], node.children[index - 1])
        };

        let Some((moved_key, moved_child)) = self.arena[sibling].borrow_last() else {
            return;
        };
        let separator = std::mem::replace(&mut self.arena[node_id].keys[index - 1], moved_key);
        self.arena[child].accept_from_left(separator, moved_child);

        trace!(node_id, index, sibling, child, "borrowed from previous sibling");
    }

    /// Rotate left through the parent: the separator at `keys[index]` is
    /// appended to `children[index]` and the right sibling's first key takes
    /// its place.
    fn borrow_from_next(&mut self, node_id: NodeId, index: usize) {
        let (child, sibling) = {
            let node = &self.arena[node_id];
            (node.children[index], node.children[index + 1])
        };

        let Some((moved_key, moved_child)) = self.arena[sibling].borrow_first() else {
            return;
        };
        let separator = std::mem::replace(&mut self.arena[node_id].keys[index], moved_key);
        self.arena[child].accept_from_right(separator, moved_child);

        trace!(node_id, index, sibling, child, "borrowed from next sibling");
    }

    /// Fold `children[index + 1]` and the separator `keys[index]` into
    /// `children[index]`. The right node's slot is released.
    pub(crate) fn merge_children(&mut self, node_id: NodeId, index: usize) {
        let (separator, left, right) = {
            let node = &mut self.arena[node_id];
            let separator = node.keys.remove(index);
            let right = node.children.remove(index + 1);
            (separator, node.children[index], right)
        };

        let Some(right_node) = self.arena.deallocate(right) else {
            panic!("merge of node {} with unallocated sibling {}", left, right);
        };
        self.arena[left].merge_from(separator, right_node);

        trace!(node_id, index, left, right, separator, "merged children");
    }

    /// Replace an empty internal root with its only child. An empty leaf
    /// root stays as the empty tree.
    fn collapse_root_if_needed(&mut self) {
        let root = &self.arena[self.root];
        if !root.keys.is_empty() || root.leaf {
            return;
        }

        let old_root = self.root;
        let new_root = root.children[0];
        self.root = new_root;
        self.arena.deallocate(old_root);
        debug!(old_root, new_root, "root collapsed, tree shrank by one level");
    }
}
