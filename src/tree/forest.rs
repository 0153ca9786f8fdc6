//! Forest container and index-path navigation.
//!
//! Nodes are addressed by index paths: the child index at each depth,
//! starting at the top-level nodes. `&[]` addresses the placeholder root and
//! never resolves to a node.

use serde::Serialize;

use super::node::TreeNode;

/// Top-level collection of tree nodes with no common root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<TreeNode>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn from_roots(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    /// Top-level nodes in discovery order
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Maximum number of segments from a top-level node to a leaf
    pub fn depth(&self) -> usize {
        self.roots.iter().map(|r| r.height()).max().unwrap_or(0)
    }

    /// Total number of nodes in the forest
    pub fn node_count(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }

    pub fn leaf_count(&self) -> usize {
        self.roots.iter().map(|r| r.leaf_count()).sum()
    }

    /// Names of all leaves, depth first in discovery order
    pub fn leaf_names(&self) -> Vec<String> {
        self.roots.iter().flat_map(|r| r.leaf_names()).collect()
    }

    /// Resolve an index path to a node
    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get(*first)?;
        for idx in rest {
            node = node.children.get(*idx)?;
        }
        Some(node)
    }

    /// Resolve an index path to a mutable node
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for idx in rest {
            node = node.children.get_mut(*idx)?;
        }
        Some(node)
    }

    /// Index path of the first node (depth first) whose full path equals `full_path`
    pub fn find(&self, full_path: &str) -> Option<Vec<usize>> {
        fn walk(nodes: &[TreeNode], target: &str, path: &mut Vec<usize>) -> bool {
            for (i, node) in nodes.iter().enumerate() {
                path.push(i);
                if node.full_path == target || walk(&node.children, target, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(&self.roots, full_path, &mut path).then_some(path)
    }

    /// Expand every node
    pub fn expand_all(&mut self) {
        for root in &mut self.roots {
            root.set_expanded_recursive(true);
        }
    }

    /// Collapse every node
    pub fn collapse_all(&mut self) {
        for root in &mut self.roots {
            root.set_expanded_recursive(false);
        }
    }

    /// Deep equality of labels, paths, names and child order
    pub fn same_structure(&self, other: &Forest) -> bool {
        self.roots.len() == other.roots.len()
            && self
                .roots
                .iter()
                .zip(&other.roots)
                .all(|(a, b)| a.same_structure(b))
    }
}
