//! Construction and initialization logic for BTree and nodes.
//!
//! This module contains degree validation, arena initialization, and the
//! default implementations.

use crate::compact_arena::CompactArena;
use crate::error::{BTreeError, BTreeResult, InitResult};
use crate::types::{BTree, NodeId, TreeNode, DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE};

impl BTree {
    /// Create a B-tree with the given minimum degree.
    ///
    /// # Arguments
    ///
    /// * `degree` - Minimum degree `t`, between `MIN_DEGREE` and
    ///   `MAX_DEGREE`. Non-root nodes hold between `t - 1` and `2t - 1` keys.
    ///
    /// # Returns
    ///
    /// Returns `Ok(BTree)` holding an empty leaf root, or
    /// `Err(BTreeError::InvalidDegree)` if `degree` is out of range. The
    /// degree is never clamped.
    ///
    /// # Examples
    ///
    /// ```
    /// use btree::BTree;
    ///
    /// let tree = BTree::new(2).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(BTree::new(1).is_err());
    /// ```
    pub fn new(degree: usize) -> InitResult<Self> {
        validation::validate_degree(degree)?;

        let mut arena = CompactArena::new();
        let root = arena.allocate(TreeNode::new_leaf());

        Ok(Self {
            degree,
            root,
            arena,
        })
    }

    /// Create a B-tree with `DEFAULT_DEGREE`.
    ///
    /// ```
    /// use btree::{BTree, DEFAULT_DEGREE};
    ///
    /// let tree = BTree::with_default_degree().unwrap();
    /// assert_eq!(tree.degree(), DEFAULT_DEGREE);
    /// ```
    pub fn with_default_degree() -> InitResult<Self> {
        Self::new(DEFAULT_DEGREE)
    }
}

impl TreeNode {
    /// Creates an empty leaf node.
    pub fn new_leaf() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
            leaf: true,
        }
    }

    /// Creates a key-less internal node whose only child is `child`.
    ///
    /// Used when the root grows: the old root becomes child 0 and is split
    /// immediately afterwards.
    pub(crate) fn new_root_above(child: NodeId) -> Self {
        Self {
            keys: Vec::new(),
            children: vec![child],
            leaf: false,
        }
    }
}

impl Default for BTree {
    /// Create a B-tree with the default degree.
    fn default() -> Self {
        Self::with_default_degree().unwrap()
    }
}

/// Validation utilities for construction
pub mod validation {
    use super::*;

    /// Validate that a degree is usable for a B-tree.
    ///
    /// ```
    /// use btree::construction::validation::validate_degree;
    ///
    /// assert!(validate_degree(2).is_ok());
    /// assert!(validate_degree(1).is_err());
    /// assert!(validate_degree(usize::MAX).is_err());
    /// ```
    pub fn validate_degree(degree: usize) -> BTreeResult<()> {
        if !(MIN_DEGREE..=MAX_DEGREE).contains(&degree) {
            Err(BTreeError::invalid_degree(degree, MIN_DEGREE, MAX_DEGREE))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btree_construction() {
        let tree = BTree::new(4).unwrap();
        assert_eq!(tree.degree, 4);
        let root = &tree.arena[tree.root];
        assert!(root.leaf);
        assert!(root.keys.is_empty());
        assert_eq!(tree.arena.len(), 1);
    }

    #[test]
    fn test_btree_invalid_degree() {
        for degree in [0, 1] {
            let err = BTree::new(degree).unwrap_err();
            assert!(err.is_degree_error());
            assert_eq!(err, BTreeError::invalid_degree(degree, MIN_DEGREE, MAX_DEGREE));
        }
    }

    #[test]
    fn test_btree_degree_too_large() {
        for degree in [MAX_DEGREE + 1, usize::MAX] {
            let err = BTree::new(degree).unwrap_err();
            assert!(err.is_degree_error());
        }

        let mut tree = BTree::new(MAX_DEGREE).unwrap();
        tree.insert(1);
        assert!(tree.contains(1));
        assert_eq!(tree.max_keys(), usize::MAX - 2);
    }

    #[test]
    fn test_btree_default() {
        let tree = BTree::default();
        assert_eq!(tree.degree, DEFAULT_DEGREE);
        assert!(tree.arena[tree.root].leaf);

        let explicit = BTree::with_default_degree().unwrap();
        assert_eq!(explicit.degree, BTree::new(DEFAULT_DEGREE).unwrap().degree);
        assert_eq!(explicit.arena.len(), 1);
    }

    #[test]
    fn test_new_root_above() {
        let node = TreeNode::new_root_above(7);
        assert!(!node.leaf);
        assert!(node.keys.is_empty());
        assert_eq!(node.children, vec![7]);
    }

    #[test]
    fn test_validation() {
        assert!(validation::validate_degree(2).is_ok());
        assert!(validation::validate_degree(64).is_ok());
        assert!(validation::validate_degree(1).is_err());
        assert!(validation::validate_degree(MAX_DEGREE).is_ok());
        assert!(validation::validate_degree(MAX_DEGREE + 1).is_err());
    }
}
