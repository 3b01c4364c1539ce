//! GET operations for BTree.
//!
//! Read-only lookups: key search and resolution of node handles returned by
//! a search.

use crate::error::{BTreeError, KeyResult};
use crate::types::{BTree, Key, NodeId, SearchHit, TreeNode};

impl BTree {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Locate `key` in the tree.
    ///
    /// # Returns
    ///
    /// The node holding the key and its position inside that node, or `None`
    /// if the key is not present. With several copies stored, the first one
    /// met on the way down is reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(7);
    /// let hit = tree.search(7).unwrap();
    /// assert_eq!(tree.key_at(hit), Some(7));
    /// assert!(tree.search(8).is_none());
    /// ```
    pub fn search(&self, key: Key) -> Option<SearchHit> {
        let mut current = self.root;

        loop {
            let node = self.arena.get(current)?;
            let index = node.find_key_index(key);

            if node.has_key_at(index, key) {
                return Some(SearchHit {
                    node: current,
                    index,
                });
            }
            if node.leaf {
                return None;
            }
            current = *node.children.get(index)?;
        }
    }

    /// Check if key exists in the tree.
    ///
    /// ```
    /// use btree::BTree;
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1);
    /// assert!(tree.contains(1));
    /// assert!(!tree.contains(2));
    /// ```
    pub fn contains(&self, key: Key) -> bool {
        self.search(key).is_some()
    }

    /// Locate `key`, returning `KeyNotFound` if it is absent.
    ///
    /// ```
    /// use btree::{BTree, BTreeError};
    ///
    /// let mut tree = BTree::new(2).unwrap();
    /// tree.insert(1);
    /// assert!(tree.search_item(1).is_ok());
    /// assert_eq!(tree.search_item(2), Err(BTreeError::KeyNotFound));
    /// ```
    pub fn search_item(&self, key: Key) -> KeyResult<SearchHit> {
        self.search(key).ok_or(BTreeError::KeyNotFound)
    }

    /// Resolve a node id to the node it names.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id)
    }

    /// Key a search hit points at. `None` if the hit is stale.
    pub fn key_at(&self, hit: SearchHit) -> Option<Key> {
        self.node(hit.node).and_then(|node| node.key_at(hit.index))
    }

    // ============================================================================
    // NAVIGATION HELPERS
    // ============================================================================

    /// Largest key in the subtree rooted at `node_id`: follow the rightmost
    /// child down to a leaf.
    pub(crate) fn predecessor_key(&self, node_id: NodeId) -> Key {
        let mut current = &self.arena[node_id];
        while !current.leaf {
            current = &self.arena[current.children[current.children.len() - 1]];
        }
        current.keys[current.keys.len() - 1]
    }

    /// Smallest key in the subtree rooted at `node_id`: follow the leftmost
    /// child down to a leaf.
    pub(crate) fn successor_key(&self, node_id: NodeId) -> Key {
        let mut current = &self.arena[node_id];
        while !current.leaf {
            current = &self.arena[current.children[0]];
        }
        current.keys[0]
    }

    /// Smallest key stored in the tree.
    pub fn min_key(&self) -> Option<Key> {
        if self.is_empty() {
            None
        } else {
            Some(self.successor_key(self.root))
        }
    }

    /// Largest key stored in the tree.
    pub fn max_key(&self) -> Option<Key> {
        if self.is_empty() {
            None
        } else {
            Some(self.predecessor_key(self.root))
        }
    }
}
