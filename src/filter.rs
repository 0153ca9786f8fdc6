//! Text filtering of the node tree
//!
//! A pattern is a case-insensitive regular expression searched anywhere in
//! the candidate. Visibility propagates upwards: a node stays visible when it
//! matches or when any of its descendants does, so the path to every match
//! remains reachable.

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{SelectorError, SelectorResult};
use crate::tree::{Forest, TreeNode};

/// Which text of a node the pattern is tested against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FilterTarget {
    /// The segment label
    #[default]
    Label,
    /// The accumulated path from the root
    #[serde(alias = "full_path")]
    Path,
}

/// A compiled, case-insensitive filter pattern
#[derive(Debug, Clone)]
pub struct TextFilter {
    pattern: String,
    regex: Option<Regex>,
}

impl TextFilter {
    /// Compile `pattern` strictly
    pub fn new(pattern: &str) -> SelectorResult<Self> {
        if pattern.is_empty() {
            return Ok(Self::match_all());
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| SelectorError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
        })
    }

    /// Compile `pattern`, treating it as literal text if it is not a valid regex.
    ///
    /// Used for live typing where `camera[` is an unfinished pattern rather
    /// than an error.
    pub fn lenient(pattern: &str) -> Self {
        match Self::new(pattern) {
            Ok(filter) => filter,
            Err(err) => {
                log::debug!("filter falls back to literal text: {}", err);
                let regex = RegexBuilder::new(&regex::escape(pattern))
                    .case_insensitive(true)
                    .build()
                    .ok();
                Self {
                    pattern: pattern.to_string(),
                    regex,
                }
            }
        }
    }

    /// A filter that accepts everything
    pub fn match_all() -> Self {
        Self {
            pattern: String::new(),
            regex: None,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether this filter hides anything at all
    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(candidate),
            None => true,
        }
    }

    fn node_matches(&self, node: &TreeNode, target: FilterTarget) -> bool {
        match target {
            FilterTarget::Label => self.is_match(&node.label),
            FilterTarget::Path => self.is_match(&node.full_path),
        }
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::match_all()
    }
}

/// Case-insensitive regular expression search of `pattern` in `candidate`
pub fn matches(pattern: &str, candidate: &str) -> bool {
    TextFilter::lenient(pattern).is_match(candidate)
}

/// Index paths of the nodes that remain visible under a filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    visible: HashSet<Vec<usize>>,
    all: bool,
}

impl Visibility {
    /// Everything visible
    pub fn all() -> Self {
        Self {
            visible: HashSet::new(),
            all: true,
        }
    }

    /// Evaluate `filter` over the forest without touching it
    pub fn compute(forest: &Forest, filter: &TextFilter, target: FilterTarget) -> Self {
        if !filter.is_active() {
            return Self::all();
        }

        fn walk(
            nodes: &[TreeNode],
            filter: &TextFilter,
            target: FilterTarget,
            path: &mut Vec<usize>,
            visible: &mut HashSet<Vec<usize>>,
        ) -> bool {
            let mut any = false;
            for (i, node) in nodes.iter().enumerate() {
                path.push(i);
                let below = walk(&node.children, filter, target, path, visible);
                if below || filter.node_matches(node, target) {
                    visible.insert(path.clone());
                    any = true;
                }
                path.pop();
            }
            any
        }

        let mut visible = HashSet::new();
        walk(
            forest.roots(),
            filter,
            target,
            &mut Vec::new(),
            &mut visible,
        );
        Self {
            visible,
            all: false,
        }
    }

    pub fn is_visible(&self, path: &[usize]) -> bool {
        self.all || self.visible.contains(path)
    }

    /// Whether the filter is hiding nothing
    pub fn shows_all(&self) -> bool {
        self.all
    }

    /// Number of visible nodes, `None` when everything is visible
    pub fn visible_count(&self) -> Option<usize> {
        (!self.all).then_some(self.visible.len())
    }
}
