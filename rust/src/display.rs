//! Text rendering of a BTree.
//!
//! One line per node, depth-first, with box-drawing connectors:
//!
//! ```text
//! B-tree (degree 3):
//! Internal: [10]
//! ├── Leaf: [5, 6, 7]
//! └── Leaf: [12, 17, 20, 30]
//! ```

use std::fmt;

use termtree::Tree;

use crate::types::{BTree, NodeId};

impl BTree {
    /// Build a `termtree` view of the subtree rooted at `node_id`.
    fn render_node(&self, node_id: NodeId) -> Tree<String> {
        let Some(node) = self.arena.get(node_id) else {
            return Tree::new(format!("<missing node {}>", node_id));
        };
        let kind = if node.leaf { "Leaf" } else { "Internal" };
        Tree::new(format!("{}: {:?}", kind, node.keys))
            .with_leaves(node.children.iter().map(|&child| self.render_node(child)))
    }

    /// Print the tree structure to stdout.
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for BTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "B-tree (degree {}):", self.degree)?;
        write!(f, "{}", self.render_node(self.root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_tree() {
        let tree = BTree::new(2).unwrap();
        assert_eq!(tree.to_string(), "B-tree (degree 2):\nLeaf: []\n");
    }

    #[test]
    fn test_render_two_levels() {
        let mut tree = BTree::new(3).unwrap();
        for key in [10, 20, 5, 6, 12, 30, 7, 17] {
            tree.insert(key);
        }
        let rendered = tree.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "B-tree (degree 3):");
        assert_eq!(lines[1], "Internal: [10]");
        assert!(lines[2].ends_with("Leaf: [5, 6, 7]"));
        assert!(lines[3].ends_with("Leaf: [12, 17, 20, 30]"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_indents_by_depth() {
        let mut tree = BTree::new(2).unwrap();
        for key in 1..=10 {
            tree.insert(key);
        }
        assert_eq!(tree.height(), 3);
        let rendered = tree.to_string();
        let deepest = rendered
            .lines()
            .filter(|line| line.contains("Leaf"))
            .map(|line| line.find("Leaf").unwrap_or(0))
            .min()
            .unwrap();
        let internal_child = rendered
            .lines()
            .skip(2)
            .find(|line| line.contains("Internal"))
            .map(|line| line.find("Internal").unwrap_or(0))
            .unwrap();
        assert!(deepest > internal_child);
    }
}
