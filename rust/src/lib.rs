//! In-memory B-tree of integer keys.
//!
//! The tree supports search, insertion and deletion while keeping every
//! non-root node between `t - 1` and `2t - 1` keys for a minimum degree `t`
//! chosen at construction. Nodes live in an arena and refer to their
//! children by id.
//!
//! ```
//! use btree::BTree;
//!
//! let mut tree = BTree::new(2).unwrap();
//! for key in [10, 20, 5, 6, 12, 30, 40, 15, 26, 18, 500, 19] {
//!     tree.insert(key);
//! }
//! tree.delete(500);
//!
//! assert!(tree.search(500).is_none());
//! assert!(tree.search(26).is_some());
//! assert!(tree.check_invariants());
//! ```

mod compact_arena;
pub mod construction;
mod delete_operations;
mod display;
mod error;
mod get_operations;
mod insert_operations;
mod node;
mod tree_structure;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use error::{BTreeError, BTreeResult, InitResult, KeyResult, ModifyResult};
pub use types::{
    BTree, Key, NodeId, SearchHit, TreeNode, DEFAULT_DEGREE, MAX_DEGREE, MIN_DEGREE,
    NULL_NODE,
};

impl BTree {
    /// Occupancy statistics of the node arena.
    pub fn arena_stats(&self) -> CompactArenaStats {
        self.arena.stats()
    }
}
