//! Leaf selection rules
//!
//! Only leaves represent nodes that can be reconfigured. Grouping nodes are
//! namespace labels and selecting one is rejected.

use crate::tree::{Forest, TreeNode};

/// Result of a selection attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A leaf was selected; carries its fully-qualified name
    Selected(String),
    /// Grouping node or unresolvable position
    Rejected,
}

impl SelectionOutcome {
    pub fn name(&self) -> Option<&str> {
        match self {
            SelectionOutcome::Selected(name) => Some(name),
            SelectionOutcome::Rejected => None,
        }
    }
}

/// Whether `node` can be selected: it has no children
pub fn is_selectable(node: &TreeNode) -> bool {
    node.is_leaf()
}

/// Attempt to select the node at `path`
pub fn select(forest: &Forest, path: &[usize]) -> SelectionOutcome {
    let Some(node) = forest.node_at(path) else {
        log::debug!("select: no node at {:?}", path);
        return SelectionOutcome::Rejected;
    };

    if !is_selectable(node) {
        log::debug!(
            "select: '{}' has {} children, not a terminal node",
            node.full_path,
            node.children.len()
        );
        return SelectionOutcome::Rejected;
    }

    // Leaves always terminate a name; the path is a fallback for hand-built trees
    let name = node.name.clone().unwrap_or_else(|| node.full_path.clone());
    log::debug!("select: node_name_selected={}", name);
    SelectionOutcome::Selected(name)
}
