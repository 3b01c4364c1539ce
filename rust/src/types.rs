//! Core types and data structures for BTree.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the B-tree implementation.

use crate::compact_arena::CompactArena;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest minimum degree a tree may be built with.
pub const MIN_DEGREE: usize = 2;

/// Largest minimum degree a tree may be built with; `2t` must fit in a
/// `usize`.
pub const MAX_DEGREE: usize = usize::MAX / 2;

/// Minimum degree used by `BTree::with_default_degree` and `Default`.
pub const DEFAULT_DEGREE: usize = 3;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Key type stored in the tree.
pub type Key = i64;

/// Node ID type for arena-based allocation
pub use crate::compact_arena::{NodeId, NULL_NODE};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// In-memory B-tree of integer keys.
///
/// Every node except the root holds between `t - 1` and `2t - 1` keys, where
/// `t` is the minimum degree fixed at construction. Keys live in both
/// internal nodes and leaves; all leaves sit at the same depth.
///
/// # Examples
///
/// ```
/// use btree::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for key in [10, 20, 5, 6, 12, 30, 7, 17] {
///     tree.insert(key);
/// }
///
/// assert!(tree.contains(12));
/// assert!(tree.delete(12));
/// assert!(!tree.contains(12));
/// assert_eq!(tree.len(), 7);
/// ```
///
/// # Performance Characteristics
///
/// - **Search**: O(t log_t n)
/// - **Insertion**: O(t log_t n)
/// - **Deletion**: O(t log_t n)
#[derive(Debug)]
pub struct BTree {
    /// Minimum degree `t`.
    pub(crate) degree: usize,
    /// The root node of the tree. An empty leaf root means an empty tree.
    pub(crate) root: NodeId,
    /// Arena that owns every node reachable from `root`.
    pub(crate) arena: CompactArena<TreeNode>,
}

/// A single B-tree node.
///
/// Leaves carry no children. An internal node with `k` keys carries exactly
/// `k + 1` child ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// Sorted list of keys.
    pub(crate) keys: Vec<Key>,
    /// Child node ids; empty for leaves.
    pub(crate) children: Vec<NodeId>,
    /// Fixed at creation.
    pub(crate) leaf: bool,
}

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Location of a key found by `BTree::search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchHit {
    /// Node holding the key.
    pub node: NodeId,
    /// Position of the key inside the node.
    pub index: usize,
}
