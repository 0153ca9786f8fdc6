//! Tree construction from discovered names.
//!
//! Each name is walked segment by segment. At every depth the segment is
//! compared with the most recently appended sibling under the current parent;
//! a match is descended into, anything else becomes a new child. Sorted input
//! therefore collapses shared prefixes, unsorted input may repeat a branch.

use serde::{Deserialize, Serialize};

use crate::error::SelectorResult;
use crate::name::{self, Name, DEFAULT_SEPARATOR};

use super::forest::Forest;
use super::node::TreeNode;

/// How a new segment is matched against existing siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Compare only against the last appended sibling
    #[default]
    Adjacent,
    /// Compare against every sibling
    Global,
}

/// Builds a [`Forest`] from hierarchical names
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    separator: char,
    merge: MergePolicy,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            merge: MergePolicy::default(),
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn merge(mut self, merge: MergePolicy) -> Self {
        self.merge = merge;
        self
    }

    pub fn separator_char(&self) -> char {
        self.separator
    }

    /// Parse and insert every name in order.
    ///
    /// All names are validated before any node is created, so a malformed
    /// name leaves nothing half built.
    pub fn build<I, S>(&self, names: I) -> SelectorResult<Forest>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = name::parse_all(names, self.separator)?;
        Ok(self.build_parsed(&parsed))
    }

    /// Insert already parsed names in order
    pub fn build_parsed(&self, names: &[Name]) -> Forest {
        let mut forest = Forest::new();
        let total = names.len();

        for (i, name) in names.iter().enumerate() {
            log::info!("loading #{}/{} node={}", i + 1, total, name);
            self.insert(forest.roots_mut(), name, 0);
        }

        forest
    }

    fn insert(&self, siblings: &mut Vec<TreeNode>, name: &Name, depth: usize) {
        let segment = &name.segments()[depth];

        let existing = match self.merge {
            MergePolicy::Adjacent => siblings
                .last()
                .filter(|prev| prev.label == *segment)
                .map(|_| siblings.len() - 1),
            MergePolicy::Global => siblings.iter().position(|s| s.label == *segment),
        };

        log::debug!(
            "insert segment={} prev={} depth={} merged={}",
            segment,
            siblings.last().map(|s| s.label.as_str()).unwrap_or(""),
            depth,
            existing.is_some()
        );

        let idx = match existing {
            Some(idx) => idx,
            None => {
                siblings.push(TreeNode::new(segment.clone(), name.prefix_path(depth)));
                siblings.len() - 1
            }
        };

        let node = &mut siblings[idx];
        if depth + 1 < name.depth() {
            self.insert(&mut node.children, name, depth + 1);
        } else if node.name.is_none() {
            node.name = Some(name.as_str().to_string());
        }
    }
}

/// Build a forest with the default separator and adjacent merging
pub fn build<I, S>(names: I) -> SelectorResult<Forest>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    TreeBuilder::new().build(names)
}
