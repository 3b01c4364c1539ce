//! INSERT operations for BTree.
//!
//! Insertion splits full nodes on the way down, so the leaf that finally
//! receives the key always has room and nothing has to be repaired on the
//! way back up.

use crate::error::{BTreeError, ModifyResult};
use crate::types::{BTree, Key, NodeId, TreeNode};
use tracing::{debug, instrument, trace};

impl BTree {
    /// Insert a key into the tree.
    ///
    /// Insertion always succeeds. A key that is already present is stored
    /// again, after the existing copies, and counts once more in `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(5);
    /// tree.insert(5);
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, key: Key) {
        if self.arena[self.root].is_full(self.degree) {
            self.grow_root();
        }
        self.insert_non_full(self.root, key);
    }

    /// Insert with invariant checks before and after the mutation.
    pub fn try_insert(&mut self, key: Key) -> ModifyResult<()> {
        self.check_invariants_detailed()
            .map_err(|e| BTreeError::data_integrity("Before insert", &e.to_string()))?;

        self.insert(key);

        self.check_invariants_detailed()
            .map_err(|e| BTreeError::data_integrity("After insert", &e.to_string()))
    }

    // ============================================================================
    // HELPERS FOR INSERT OPERATIONS
    // ============================================================================

    /// Put a fresh root above the full old root and split the old root
    /// under it. This is the only place the tree gets taller.
    fn grow_root(&mut self) {
        let old_root = self.root;
        let new_root = self.arena.allocate(TreeNode::new_root_above(old_root));
        self.root = new_root;
        self.split_child(new_root, 0);
        debug!(old_root, new_root, "root split, tree grew by one level");
    }

    /// Descend from `node_id`, which must not be full, splitting any full
    /// child before stepping into it, and place `key` in the leaf reached.
    fn insert_non_full(&mut self, node_id: NodeId, key: Key) {
        let mut current = node_id;

        loop {
            let node = &mut self.arena[current];
            if node.leaf {
                node.insert_key(key);
                return;
            }

            let mut index = node.find_insert_index(key);
            let child = node.children[index];

            if self.arena[child].is_full(self.degree) {
                self.split_child(current, index);
                if key > self.arena[current].keys[index] {
                    index += 1;
                }
            }

            current = self.arena[current].children[index];
        }
    }

    /// Split the full child at `parent.children[index]`.
    ///
    /// The child's median moves up into `parent.keys[index]` and a new right
    /// sibling is linked in at `parent.children[index + 1]`. Both halves end
    /// with `t - 1` keys.
    pub(crate) fn split_child(&mut self, parent_id: NodeId, index: usize) {
        let full_child = self.arena[parent_id].children[index];
        let (median, sibling) = self.arena[full_child].split_at_median(self.degree);
        let sibling_id = self.arena.allocate(sibling);

        let parent = &mut self.arena[parent_id];
        parent.keys.insert(index, median);
        parent.children.insert(index + 1, sibling_id);

        trace!(parent_id, index, full_child, sibling_id, median, "split child");
    }
}
