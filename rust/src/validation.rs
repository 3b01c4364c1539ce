//! Validation and debugging utilities for BTree.
//!
//! This module contains invariant checking and the traversal helpers tests
//! use to compare tree contents and shape.

use crate::error::{BTreeError, BTreeResult, TreeResult};
use crate::types::{BTree, Key, NodeId};

/// State threaded through one invariant walk.
struct WalkState {
    leaf_depth: Option<usize>,
    visited: Vec<bool>,
    reachable: usize,
}

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl BTree {
    /// Check if the tree maintains B-tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies key counts against the degree bounds, child counts,
    /// non-decreasing key order inside and across nodes, equal leaf depth, and that every
    /// allocated arena slot is owned by exactly one parent.
    pub fn check_invariants_detailed(&self) -> BTreeResult<()> {
        let root = self.arena.get(self.root).ok_or_else(|| {
            BTreeError::arena_error("Root lookup", &format!("root {} is not allocated", self.root))
        })?;
        if !root.leaf && root.keys.is_empty() {
            return Err(BTreeError::data_integrity(
                "Root",
                "internal root holds no keys",
            ));
        }

        let slots = self.arena.stats().total_slots;
        let mut state = WalkState {
            leaf_depth: None,
            visited: vec![false; slots],
            reachable: 0,
        };
        self.check_node_invariants(self.root, None, None, 0, &mut state)?;

        self.check_arena_tree_consistency(&state)
    }

    /// Same checks as `check_invariants_detailed`, under the name callers
    /// reach for after a batch of mutations.
    pub fn validate(&self) -> BTreeResult<()> {
        self.check_invariants_detailed()
    }

    /// Check that every allocated node was reached from the root.
    fn check_arena_tree_consistency(&self, state: &WalkState) -> TreeResult<()> {
        let allocated = self.arena.len();
        if state.reachable != allocated {
            let leaked: Vec<NodeId> = self
                .arena
                .allocated_ids()
                .filter(|&id| !state.visited[id as usize])
                .collect();
            return Err(BTreeError::arena_error(
                "Reachability check",
                &format!(
                    "{} in tree vs {} in arena, unreachable {:?}",
                    state.reachable, allocated, leaked
                ),
            ));
        }
        Ok(())
    }

    /// Recursively check invariants for a node and its children.
    ///
    /// `min_key` and `max_key` are inclusive bounds inherited from the
    /// separators above the node. Copies of a key may sit on both sides of
    /// an equal separator.
    fn check_node_invariants(
        &self,
        node_id: NodeId,
        min_key: Option<Key>,
        max_key: Option<Key>,
        depth: usize,
        state: &mut WalkState,
    ) -> TreeResult<()> {
        let context = format!("Node {}", node_id);
        let node = self.arena.get(node_id).ok_or_else(|| {
            BTreeError::arena_error("Child lookup", &format!("node {} is not allocated", node_id))
        })?;

        // Ownership: each node is reached through exactly one parent
        let slot = node_id as usize;
        if state.visited[slot] {
            return Err(BTreeError::arena_error(
                "Ownership check",
                &format!("node {} is referenced more than once", node_id),
            ));
        }
        state.visited[slot] = true;
        state.reachable += 1;

        let is_root = node_id == self.root;
        if node.keys.len() > self.max_keys() {
            return Err(BTreeError::data_integrity(
                &context,
                &format!("{} keys exceeds maximum {}", node.keys.len(), self.max_keys()),
            ));
        }
        if !is_root && node.keys.len() < self.min_keys() {
            return Err(BTreeError::data_integrity(
                &context,
                &format!("{} keys below minimum {}", node.keys.len(), self.min_keys()),
            ));
        }

        for pair in node.keys.windows(2) {
            if pair[0] > pair[1] {
                return Err(BTreeError::data_integrity(
                    &context,
                    &format!("keys out of order: {:?}", node.keys),
                ));
            }
        }
        if let (Some(min), Some(first)) = (min_key, node.first_key()) {
            if first < min {
                return Err(BTreeError::data_integrity(
                    &context,
                    &format!("key {} below separator {}", first, min),
                ));
            }
        }
        if let (Some(max), Some(last)) = (max_key, node.last_key()) {
            if last > max {
                return Err(BTreeError::data_integrity(
                    &context,
                    &format!("key {} above separator {}", last, max),
                ));
            }
        }

        if node.leaf {
            if !node.children.is_empty() {
                return Err(BTreeError::data_integrity(&context, "leaf has children"));
            }
            return match state.leaf_depth {
                None => {
                    state.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(BTreeError::data_integrity(
                    &context,
                    &format!("leaf at depth {} but other leaves at depth {}", depth, expected),
                )),
            };
        }

        if node.children.len() != node.keys.len() + 1 {
            return Err(BTreeError::data_integrity(
                &context,
                &format!(
                    "{} keys but {} children",
                    node.keys.len(),
                    node.children.len()
                ),
            ));
        }

        for (i, &child) in node.children.iter().enumerate() {
            let child_min = if i == 0 { min_key } else { Some(node.keys[i - 1]) };
            let child_max = if i == node.keys.len() { max_key } else { Some(node.keys[i]) };
            self.check_node_invariants(child, child_min, child_max, depth + 1, state)?;
        }
        Ok(())
    }

    // ============================================================================
    // DEBUGGING AND TESTING UTILITIES
    // ============================================================================

    /// All keys in non-decreasing order (in-order traversal), one entry per
    /// stored copy.
    pub fn keys_in_order(&self) -> Vec<Key> {
        let mut keys = Vec::new();
        self.collect_in_order(self.root, &mut keys);
        keys
    }

    fn collect_in_order(&self, node_id: NodeId, keys: &mut Vec<Key>) {
        let Some(node) = self.arena.get(node_id) else {
            return;
        };
        if node.leaf {
            keys.extend_from_slice(&node.keys);
            return;
        }
        for (i, &child) in node.children.iter().enumerate() {
            self.collect_in_order(child, keys);
            if let Some(&key) = node.keys.get(i) {
                keys.push(key);
            }
        }
    }

    /// Keys of every node grouped by level, left to right.
    ///
    /// Two trees with equal output have the same shape and contents.
    pub fn keys_by_level(&self) -> Vec<Vec<Vec<Key>>> {
        let mut levels = Vec::new();
        let mut frontier = vec![self.root];

        while !frontier.is_empty() {
            let mut level = Vec::with_capacity(frontier.len());
            let mut next = Vec::new();
            for id in frontier {
                if let Some(node) = self.arena.get(id) {
                    level.push(node.keys.clone());
                    next.extend_from_slice(&node.children);
                }
            }
            levels.push(level);
            frontier = next;
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TreeNode;

    fn tree_with(degree: usize, keys: &[Key]) -> BTree {
        let mut tree = BTree::new(degree).unwrap();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    #[test]
    fn test_valid_trees_pass() {
        assert!(BTree::new(2).unwrap().check_invariants());
        let tree = tree_with(3, &(0..200).rev().collect::<Vec<_>>());
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_keys_in_order_and_by_level() {
        let tree = tree_with(3, &[10, 20, 5, 6, 12, 30, 7, 17]);
        assert_eq!(tree.keys_in_order(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
        assert_eq!(
            tree.keys_by_level(),
            vec![vec![vec![10]], vec![vec![5, 6, 7], vec![12, 17, 20, 30]]]
        );
    }

    #[test]
    fn test_detects_underfull_node() {
        let mut tree = tree_with(2, &[1, 2, 3, 4]);
        let child = tree.arena[tree.root].children[0];
        tree.arena[child].keys.clear();
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.is_integrity_error());
        assert!(err.to_string().contains("below minimum"));
    }

    #[test]
    fn test_detects_unsorted_keys() {
        let mut tree = tree_with(3, &[1, 2, 3]);
        tree.arena[tree.root].keys = vec![3, 1, 2];
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_detects_separator_violation() {
        let mut tree = tree_with(2, &[1, 2, 3, 4]);
        let right = tree.arena[tree.root].children[1];
        tree.arena[right].keys[0] = 0;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.to_string().contains("below separator"));
    }

    #[test]
    fn test_equal_keys_across_separator_pass() {
        let mut tree = tree_with(2, &[1, 2, 3, 4]);
        let root = tree.root;
        let (left, right) = (tree.arena[root].children[0], tree.arena[root].children[1]);
        tree.arena[left].keys = vec![1, 2];
        tree.arena[right].keys = vec![2, 2];
        assert_eq!(tree.validate(), Ok(()));

        tree.arena[right].keys = vec![2, 1];
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_detects_uneven_leaf_depth() {
        let mut tree = tree_with(2, &[1, 2, 3, 4]);
        // Turn the right leaf into an internal node over two fresh leaves.
        let right = tree.arena[tree.root].children[1];
        let a = tree.arena.allocate(TreeNode { keys: vec![2], children: vec![], leaf: true });
        let b = tree.arena.allocate(TreeNode { keys: vec![5], children: vec![], leaf: true });
        tree.arena[right] = TreeNode { keys: vec![4], children: vec![a, b], leaf: false };
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(err.is_integrity_error());
    }

    #[test]
    fn test_detects_shared_child() {
        let mut tree = tree_with(2, &[1, 2, 3, 4]);
        let root = tree.root;
        let left = tree.arena[root].children[0];
        tree.arena[root].children[1] = left;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(matches!(err, BTreeError::ArenaError(_) | BTreeError::DataIntegrity(_)));
    }

    #[test]
    fn test_detects_leaked_node() {
        let mut tree = tree_with(2, &[1, 2]);
        tree.arena.allocate(TreeNode::new_leaf());
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(matches!(err, BTreeError::ArenaError(_)));
        assert!(err.to_string().contains("unreachable"));
    }
}
