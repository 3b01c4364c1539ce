//! Tree structure management operations for BTree.
//!
//! Size queries, clearing, node counting, and tree statistics.

use crate::types::{BTree, NodeId, TreeNode};

// ============================================================================
// TREE STRUCTURE OPERATIONS
// ============================================================================

impl BTree {
    /// Minimum degree `t` the tree was built with.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Maximum number of keys any node may hold (`2t - 1`).
    pub fn max_keys(&self) -> usize {
        2 * self.degree - 1
    }

    /// Minimum number of keys every non-root node must hold (`t - 1`).
    pub fn min_keys(&self) -> usize {
        self.degree - 1
    }

    /// Id of the current root node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len_recursive(self.root)
    }

    /// Recursively count keys with proper arena access.
    fn len_recursive(&self, node_id: NodeId) -> usize {
        self.arena
            .get(node_id)
            .map(|node| {
                node.keys.len()
                    + node
                        .children
                        .iter()
                        .map(|&child| self.len_recursive(child))
                        .sum::<usize>()
            })
            .unwrap_or(0)
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.arena
            .get(self.root)
            .map(|root| root.leaf && root.keys.is_empty())
            .unwrap_or(true)
    }

    /// Number of levels, counting the root. An empty tree has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.arena.get(self.root);
        while let Some(node) = current {
            if node.leaf {
                break;
            }
            height += 1;
            current = node.children.first().and_then(|&child| self.arena.get(child));
        }
        height
    }

    /// Returns true if the root is a leaf node.
    pub fn is_leaf_root(&self) -> bool {
        self.arena.get(self.root).map(|root| root.leaf).unwrap_or(true)
    }

    /// Count the nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        self.count_nodes_recursive(self.root).0
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn leaf_count(&self) -> usize {
        self.count_nodes_recursive(self.root).1
    }

    /// Recursively count `(all nodes, leaves)` under `node_id`.
    fn count_nodes_recursive(&self, node_id: NodeId) -> (usize, usize) {
        match self.arena.get(node_id) {
            Some(node) if node.leaf => (1, 1),
            Some(node) => node
                .children
                .iter()
                .map(|&child| self.count_nodes_recursive(child))
                .fold((1, 0), |(nodes, leaves), (n, l)| (nodes + n, leaves + l)),
            None => (0, 0),
        }
    }

    /// Remove every key, leaving an empty leaf root.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = self.arena.allocate(TreeNode::new_leaf());
    }
}
