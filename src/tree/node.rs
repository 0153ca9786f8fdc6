//! TreeNode data structure.

use serde::Serialize;

/// One path segment at one depth of the forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Segment text shown in the view
    pub label: String,
    /// Accumulated path from the root down to this node
    pub full_path: String,
    /// Child nodes in discovery order (empty for leaf nodes)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
    /// The discovered name this node terminates, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the node is expanded in the view
    #[serde(skip)]
    pub expanded: bool,
}

impl TreeNode {
    /// Create a new grouping node
    pub fn new(label: impl Into<String>, full_path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            full_path: full_path.into(),
            children: Vec::new(),
            name: None,
            expanded: false,
        }
    }

    /// Create a node that terminates `name`
    pub fn terminal(
        label: impl Into<String>,
        full_path: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let mut node = Self::new(label, full_path);
        node.name = Some(name.into());
        node
    }

    /// Check if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Add a child node
    pub fn add_child(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    /// Most recently appended child
    pub fn last_child(&self) -> Option<&TreeNode> {
        self.children.last()
    }

    /// Get count of leaf nodes in this subtree
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(|c| c.leaf_count()).sum()
        }
    }

    /// Number of levels below and including this node
    pub fn height(&self) -> usize {
        1 + self.children.iter().map(|c| c.height()).max().unwrap_or(0)
    }

    /// Names of all leaves, depth first
    pub fn leaf_names(&self) -> Vec<String> {
        if self.is_leaf() {
            self.name.clone().into_iter().collect()
        } else {
            self.children.iter().flat_map(|c| c.leaf_names()).collect()
        }
    }

    /// Expand this node
    pub fn expand(&mut self) {
        self.expanded = true;
    }

    /// Collapse this node
    pub fn collapse(&mut self) {
        self.expanded = false;
    }

    /// Set expansion for this node and its whole subtree
    pub fn set_expanded_recursive(&mut self, expanded: bool) {
        self.expanded = expanded;
        for child in &mut self.children {
            child.set_expanded_recursive(expanded);
        }
    }

    /// Compare label, path, name and child order, ignoring view state
    pub fn same_structure(&self, other: &TreeNode) -> bool {
        self.label == other.label
            && self.full_path == other.full_path
            && self.name == other.name
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_structure(b))
    }
}
