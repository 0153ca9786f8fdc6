//! NodeSelectorPanel state management and event handling.
//!
//! The panel owns everything the view needs: the forest, the previous
//! discovery result, the filter and its derived visibility, the cursor and
//! the current selection. Every user interaction arrives as a
//! [`PanelEvent`] through [`NodeSelectorPanel::handle`].

use crate::config::Config;
use crate::error::SelectorResult;
use crate::filter::{FilterTarget, TextFilter, Visibility};
use crate::selection::{self, SelectionOutcome};
use crate::source::NameSource;
use crate::tree::{Forest, TreeBuilder, TreeNode};

use super::render::{render_help_bar, render_status_bar, render_tree_node};

/// A flattened representation of a visible tree node for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedNode {
    /// Index path in the forest
    pub path: Vec<usize>,
    /// Depth level (0 = top-level node)
    pub depth: usize,
    /// Display label
    pub label: String,
    /// Accumulated path from the root
    pub full_path: String,
    /// Whether this node is shown expanded
    pub expanded: bool,
    /// Whether this node has children
    pub has_children: bool,
    /// Leaf count for this subtree
    pub leaf_count: usize,
    /// Whether this node is the current selection
    pub selected: bool,
}

/// Discrete input handled by the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// Discard the tree and rediscover
    Refresh,
    /// New filter text typed by the user
    FilterChanged(String),
    /// Move cursor up
    CursorUp,
    /// Move cursor down
    CursorDown,
    /// Expand node under the cursor
    Expand,
    /// Collapse node under the cursor
    Collapse,
    ExpandAll,
    CollapseAll,
    /// Select the node under the cursor
    Activate,
    /// Select the node at an index path
    Select(Vec<usize>),
    /// Host is closing the panel
    Close,
}

/// Outward events emitted by the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutput {
    /// A leaf was selected; carries its fully-qualified name
    NodeSelected(String),
}

/// What a refresh found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshReport {
    /// Names returned by the source
    pub name_count: usize,
    /// Whether they differ from the previous discovery
    pub changed: bool,
}

/// Behaviour knobs for the panel
#[derive(Debug, Clone, Copy)]
pub struct PanelOptions {
    pub builder: TreeBuilder,
    pub filter_target: FilterTarget,
    /// Sort discovered names before building
    pub sort: bool,
    /// Expand every branch after a refresh
    pub expand_on_load: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            builder: TreeBuilder::new(),
            filter_target: FilterTarget::default(),
            sort: true,
            expand_on_load: false,
        }
    }
}

impl PanelOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            builder: config.tree_builder(),
            filter_target: config.filter.target,
            sort: config.source.sort,
            expand_on_load: config.tree.expand_on_load,
        }
    }
}

/// Hierarchical, filterable selector over discovered node names
pub struct NodeSelectorPanel<S> {
    source: S,
    options: PanelOptions,
    forest: Forest,
    /// Names from the last successful discovery
    previous: Option<Vec<String>>,
    /// Discovered names in order, without duplicates
    items: Vec<String>,
    filter: TextFilter,
    visibility: Visibility,
    /// Current cursor position in flattened view
    cursor: usize,
    /// Cached flattened nodes for rendering
    flattened: Vec<FlattenedNode>,
    /// Index path of the selected leaf
    selected: Option<Vec<usize>>,
}

impl<S: NameSource> NodeSelectorPanel<S> {
    /// Create the panel and run the initial discovery
    pub fn new(source: S, options: PanelOptions) -> SelectorResult<Self> {
        let mut panel = Self::empty(source, options);
        panel.refresh()?;
        Ok(panel)
    }

    /// Create the panel without discovering anything yet
    pub fn empty(source: S, options: PanelOptions) -> Self {
        Self {
            source,
            options,
            forest: Forest::new(),
            previous: None,
            items: Vec::new(),
            filter: TextFilter::match_all(),
            visibility: Visibility::all(),
            cursor: 0,
            flattened: Vec::new(),
            selected: None,
        }
    }

    /// Dispatch one input event
    pub fn handle(&mut self, event: PanelEvent) -> SelectorResult<Option<PanelOutput>> {
        match event {
            PanelEvent::Refresh => {
                self.refresh()?;
                Ok(None)
            }
            PanelEvent::FilterChanged(text) => {
                self.set_filter(&text);
                Ok(None)
            }
            PanelEvent::CursorUp => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                Ok(None)
            }
            PanelEvent::CursorDown => {
                if self.cursor + 1 < self.flattened.len() {
                    self.cursor += 1;
                }
                Ok(None)
            }
            PanelEvent::Expand => {
                if let Some(node) = self.cursor_node_mut() {
                    if !node.is_leaf() {
                        node.expand();
                    }
                }
                self.rebuild_flattened();
                Ok(None)
            }
            PanelEvent::Collapse => {
                self.collapse_at_cursor();
                Ok(None)
            }
            PanelEvent::ExpandAll => {
                self.forest.expand_all();
                self.rebuild_flattened();
                Ok(None)
            }
            PanelEvent::CollapseAll => {
                self.forest.collapse_all();
                self.rebuild_flattened();
                Ok(None)
            }
            PanelEvent::Activate => {
                let Some(path) = self.flattened.get(self.cursor).map(|n| n.path.clone()) else {
                    return Ok(None);
                };
                Ok(self.select_path(&path))
            }
            PanelEvent::Select(path) => Ok(self.select_path(&path)),
            PanelEvent::Close => {
                self.close();
                Ok(None)
            }
        }
    }

    /// Discard the forest and rebuild it from a fresh discovery.
    ///
    /// The old tree is gone even if discovery fails; the error is returned so
    /// the caller can offer a retry.
    pub fn refresh(&mut self) -> SelectorResult<RefreshReport> {
        self.forest = Forest::new();
        self.items.clear();
        self.selected = None;
        self.cursor = 0;
        self.apply_filter();

        let mut names = match self.source.discover() {
            Ok(names) => names,
            Err(e) => {
                log::error!(
                    "cannot discover nodes via {}: {}",
                    self.source.describe(),
                    e
                );
                return Err(e);
            }
        };

        if self.options.sort {
            names.sort();
        }

        let mut forest = self.options.builder.build(&names)?;
        if self.options.expand_on_load {
            forest.expand_all();
        }

        let changed = self.previous.as_ref() != Some(&names);
        log::debug!(
            "refresh: {} names from {} changed={}",
            names.len(),
            self.source.describe(),
            changed
        );

        let mut items: Vec<String> = Vec::with_capacity(names.len());
        for name in &names {
            if !items.contains(name) {
                items.push(name.clone());
            }
        }

        let report = RefreshReport {
            name_count: names.len(),
            changed,
        };

        self.items = items;
        self.previous = Some(names);
        self.forest = forest;
        self.apply_filter();
        Ok(report)
    }

    /// Replace the filter text and recompute visibility
    pub fn set_filter(&mut self, text: &str) {
        self.filter = TextFilter::lenient(text);
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.visibility =
            Visibility::compute(&self.forest, &self.filter, self.options.filter_target);
        self.rebuild_flattened();
    }

    /// Teardown hook for the host; nothing to release
    pub fn close(&mut self) {
        log::debug!("close_node");
    }

    /// Rebuild the flattened node list
    pub fn rebuild_flattened(&mut self) {
        let mut out = Vec::new();
        self.flatten_nodes(self.forest.roots(), 0, &[], &mut out);
        self.flattened = out;
        // Ensure cursor is within bounds
        if self.cursor >= self.flattened.len() {
            self.cursor = self.flattened.len().saturating_sub(1);
        }
    }

    fn flatten_nodes(
        &self,
        nodes: &[TreeNode],
        depth: usize,
        prefix: &[usize],
        out: &mut Vec<FlattenedNode>,
    ) {
        // Matches must stay reachable while a filter is active
        let force_expand = self.filter.is_active();

        for (i, node) in nodes.iter().enumerate() {
            let mut path = prefix.to_vec();
            path.push(i);
            if !self.visibility.is_visible(&path) {
                continue;
            }

            let expanded = node.expanded || (force_expand && !node.is_leaf());
            out.push(FlattenedNode {
                path: path.clone(),
                depth,
                label: node.label.clone(),
                full_path: node.full_path.clone(),
                expanded,
                has_children: !node.is_leaf(),
                leaf_count: node.leaf_count(),
                selected: self.selected.as_deref() == Some(path.as_slice()),
            });

            if expanded {
                self.flatten_nodes(&node.children, depth + 1, &path, out);
            }
        }
    }

    fn select_path(&mut self, path: &[usize]) -> Option<PanelOutput> {
        match selection::select(&self.forest, path) {
            SelectionOutcome::Selected(name) => {
                if self.selected.as_deref() == Some(path) {
                    return None;
                }
                self.selected = Some(path.to_vec());
                self.rebuild_flattened();
                Some(PanelOutput::NodeSelected(name))
            }
            // The previous selection stays in place
            SelectionOutcome::Rejected => None,
        }
    }

    fn collapse_at_cursor(&mut self) {
        let Some(current) = self.flattened.get(self.cursor).cloned() else {
            return;
        };

        if current.has_children && current.expanded {
            if let Some(node) = self.forest.node_at_mut(&current.path) {
                node.collapse();
            }
        } else if current.path.len() > 1 {
            // Leaf or already collapsed: jump to the parent
            let parent = &current.path[..current.path.len() - 1];
            if let Some(idx) = self.flattened.iter().position(|n| n.path == parent) {
                self.cursor = idx;
            }
        }
        self.rebuild_flattened();
    }

    fn cursor_node_mut(&mut self) -> Option<&mut TreeNode> {
        let path = self.flattened.get(self.cursor)?.path.clone();
        self.forest.node_at_mut(&path)
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Discovered names in discovery order
    pub fn node_items(&self) -> &[String] {
        &self.items
    }

    /// Get flattened nodes for rendering
    pub fn flattened_nodes(&self) -> &[FlattenedNode] {
        &self.flattened
    }

    /// Get current cursor position
    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    pub fn filter_text(&self) -> &str {
        self.filter.pattern()
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    /// Name of the selected leaf
    pub fn selected_name(&self) -> Option<&str> {
        let node = self.forest.node_at(self.selected.as_deref()?)?;
        node.name.as_deref().or(Some(node.full_path.as_str()))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Render the visible tree to a string
    pub fn render(&self, supports_unicode: bool) -> String {
        let mut out = String::new();

        for (i, node) in self.flattened.iter().enumerate() {
            let is_active = i == self.cursor;
            let line = render_tree_node(node, is_active, supports_unicode);
            out.push_str(&line);
            out.push('\n');
        }

        out
    }

    /// Render the status bar
    pub fn render_status_bar(&self) -> String {
        render_status_bar(
            self.forest.leaf_count(),
            self.flattened.len(),
            self.filter_text(),
            self.selected_name(),
        )
    }

    /// Render the help bar
    pub fn render_help_bar(&self) -> String {
        render_help_bar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectorError;
    use crate::source::StaticSource;
    use crate::tree::MergePolicy;

    /// Source whose next discovery can be made to fail
    struct FlakySource {
        names: Vec<String>,
        fail: bool,
    }

    impl NameSource for FlakySource {
        fn discover(&mut self) -> SelectorResult<Vec<String>> {
            if self.fail {
                Err(SelectorError::SourceUnavailable {
                    source_desc: self.describe(),
                    message: "cannot connect to master".to_string(),
                })
            } else {
                Ok(self.names.clone())
            }
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    fn create_test_panel() -> NodeSelectorPanel<StaticSource> {
        let source = StaticSource::new([
            "/camera/left",
            "/camera/right",
            "/move_base/local_costmap",
            "/talker",
        ]);
        NodeSelectorPanel::new(source, PanelOptions::default()).unwrap()
    }

    fn labels(panel: &NodeSelectorPanel<impl NameSource>) -> Vec<&str> {
        panel
            .flattened_nodes()
            .iter()
            .map(|n| n.label.as_str())
            .collect()
    }

    #[test]
    fn panel_flattens_top_level_nodes() {
        let panel = create_test_panel();
        assert_eq!(labels(&panel), vec!["camera", "move_base", "talker"]);
        assert_eq!(panel.node_items().len(), 4);
    }

    #[test]
    fn panel_expands_node() {
        let mut panel = create_test_panel();
        panel.handle(PanelEvent::Expand).unwrap();
        assert_eq!(
            labels(&panel),
            vec!["camera", "left", "right", "move_base", "talker"]
        );
    }

    #[test]
    fn panel_expand_leaf_no_effect() {
        let mut panel = create_test_panel();
        panel.handle(PanelEvent::CursorDown).unwrap();
        panel.handle(PanelEvent::CursorDown).unwrap();
        let before = panel.flattened_nodes().len();
        panel.handle(PanelEvent::Expand).unwrap();
        assert_eq!(panel.flattened_nodes().len(), before);
    }

    #[test]
    fn panel_cursor_bounds() {
        let mut panel = create_test_panel();
        panel.handle(PanelEvent::CursorUp).unwrap();
        assert_eq!(panel.cursor_position(), 0);

        for _ in 0..10 {
            panel.handle(PanelEvent::CursorDown).unwrap();
        }
        assert_eq!(panel.cursor_position(), 2);
    }

    #[test]
    fn panel_collapse_on_leaf_jumps_to_parent() {
        let mut panel = create_test_panel();
        panel.handle(PanelEvent::Expand).unwrap();
        panel.handle(PanelEvent::CursorDown).unwrap();
        assert_eq!(panel.flattened_nodes()[1].label, "left");

        panel.handle(PanelEvent::Collapse).unwrap();
        assert_eq!(panel.cursor_position(), 0);

        panel.handle(PanelEvent::Collapse).unwrap();
        assert_eq!(labels(&panel), vec!["camera", "move_base", "talker"]);
    }

    #[test]
    fn panel_expand_all_and_collapse_all() {
        let mut panel = create_test_panel();
        panel.handle(PanelEvent::ExpandAll).unwrap();
        assert_eq!(panel.flattened_nodes().len(), 6);

        panel.handle(PanelEvent::CollapseAll).unwrap();
        assert_eq!(panel.flattened_nodes().len(), 3);
    }

    #[test]
    fn activate_leaf_emits_selection_once() {
        let mut panel = create_test_panel();
        panel.handle(PanelEvent::Expand).unwrap();
        panel.handle(PanelEvent::CursorDown).unwrap();

        let out = panel.handle(PanelEvent::Activate).unwrap();
        assert_eq!(
            out,
            Some(PanelOutput::NodeSelected("/camera/left".to_string()))
        );
        assert_eq!(panel.selected_name(), Some("/camera/left"));
        assert!(panel.flattened_nodes()[1].selected);

        // Same leaf again: selection did not change
        assert_eq!(panel.handle(PanelEvent::Activate).unwrap(), None);
    }

    #[test]
    fn activate_group_is_rejected_and_keeps_selection() {
        let mut panel = create_test_panel();
        panel
            .handle(PanelEvent::Select(vec![2]))
            .unwrap()
            .expect("talker is a leaf");

        // Cursor is on `camera`, a grouping node
        assert_eq!(panel.handle(PanelEvent::Activate).unwrap(), None);
        assert_eq!(panel.selected_name(), Some("/talker"));
    }

    #[test]
    fn select_unknown_path_is_rejected() {
        let mut panel = create_test_panel();
        assert_eq!(panel.handle(PanelEvent::Select(vec![9, 9])).unwrap(), None);
        assert_eq!(panel.selected_name(), None);
    }

    #[test]
    fn filter_changes_visibility_not_forest() {
        let mut panel = create_test_panel();
        let before = panel.forest().clone();

        panel
            .handle(PanelEvent::FilterChanged("RIGHT".to_string()))
            .unwrap();

        assert_eq!(labels(&panel), vec!["camera", "right"]);
        assert_eq!(panel.forest(), &before);
        assert_eq!(panel.filter_text(), "RIGHT");

        panel
            .handle(PanelEvent::FilterChanged(String::new()))
            .unwrap();
        assert_eq!(labels(&panel), vec!["camera", "move_base", "talker"]);
    }

    #[test]
    fn filter_with_unfinished_regex_is_literal() {
        let mut panel = create_test_panel();
        panel
            .handle(PanelEvent::FilterChanged("cost[".to_string()))
            .unwrap();
        assert!(panel.flattened_nodes().is_empty());
        assert_eq!(panel.cursor_position(), 0);
    }

    #[test]
    fn filter_by_full_path() {
        let source = StaticSource::new(["/camera/left", "/camera/right", "/talker"]);
        let options = PanelOptions {
            filter_target: FilterTarget::Path,
            ..PanelOptions::default()
        };
        let mut panel = NodeSelectorPanel::new(source, options).unwrap();
        panel.set_filter("^/camera");
        assert_eq!(labels(&panel), vec!["camera", "left", "right"]);
    }

    #[test]
    fn refresh_is_idempotent_for_stable_source() {
        let mut panel = create_test_panel();
        let first = panel.forest().clone();

        let report = panel.handle(PanelEvent::Refresh).unwrap();
        assert_eq!(report, None);
        assert!(panel.forest().same_structure(&first));

        let report = panel.refresh().unwrap();
        assert!(!report.changed);
        assert_eq!(report.name_count, 4);
    }

    #[test]
    fn refresh_picks_up_new_names_and_clears_selection() {
        let mut panel = create_test_panel();
        panel.handle(PanelEvent::Select(vec![2])).unwrap();

        panel.source_mut().set_names(["/listener", "/talker"]);
        let report = panel.refresh().unwrap();

        assert!(report.changed);
        assert_eq!(labels(&panel), vec!["listener", "talker"]);
        assert_eq!(panel.selected_name(), None);
    }

    #[test]
    fn refresh_sorts_names_by_default() {
        let source = StaticSource::new(["/a/b", "/x/y", "/a/c"]);
        let panel = NodeSelectorPanel::new(source, PanelOptions::default()).unwrap();
        assert_eq!(panel.forest().roots().len(), 2);
    }

    #[test]
    fn unsorted_adjacent_merge_repeats_branch() {
        let source = StaticSource::new(["/a/b", "/x/y", "/a/c"]);
        let options = PanelOptions {
            sort: false,
            ..PanelOptions::default()
        };
        let panel = NodeSelectorPanel::new(source, options).unwrap();
        assert_eq!(panel.forest().roots().len(), 3);
    }

    #[test]
    fn unsorted_global_merge_deduplicates() {
        let source = StaticSource::new(["/a/b", "/x/y", "/a/c"]);
        let options = PanelOptions {
            sort: false,
            builder: TreeBuilder::new().merge(MergePolicy::Global),
            ..PanelOptions::default()
        };
        let panel = NodeSelectorPanel::new(source, options).unwrap();
        assert_eq!(panel.forest().roots().len(), 2);
    }

    #[test]
    fn node_items_are_deduplicated_in_order() {
        let source = StaticSource::new(["/b", "/a", "/b"]);
        let options = PanelOptions {
            sort: false,
            ..PanelOptions::default()
        };
        let panel = NodeSelectorPanel::new(source, options).unwrap();
        assert_eq!(panel.node_items(), &["/b", "/a"]);
    }

    #[test]
    fn discovery_failure_propagates_and_clears_tree() {
        let source = FlakySource {
            names: vec!["/talker".to_string()],
            fail: false,
        };
        let mut panel = NodeSelectorPanel::new(source, PanelOptions::default()).unwrap();
        assert_eq!(panel.forest().leaf_count(), 1);

        panel.source_mut().fail = true;
        let err = panel.handle(PanelEvent::Refresh).unwrap_err();
        assert!(err.is_retryable());
        assert!(panel.forest().is_empty());
        assert!(panel.flattened_nodes().is_empty());

        // Manual retry once the source is back
        panel.source_mut().fail = false;
        panel.handle(PanelEvent::Refresh).unwrap();
        assert_eq!(panel.forest().leaf_count(), 1);
    }

    #[test]
    fn initial_discovery_failure_is_returned() {
        let source = FlakySource {
            names: Vec::new(),
            fail: true,
        };
        assert!(NodeSelectorPanel::new(source, PanelOptions::default()).is_err());
    }

    #[test]
    fn malformed_name_fails_refresh() {
        let source = StaticSource::new(["/ok", "/bad//name"]);
        let result = NodeSelectorPanel::new(source, PanelOptions::default());
        assert!(matches!(result, Err(SelectorError::InvalidName { .. })));
    }

    #[test]
    fn expand_on_load_option() {
        let source = StaticSource::new(["/camera/left", "/camera/right"]);
        let options = PanelOptions {
            expand_on_load: true,
            ..PanelOptions::default()
        };
        let panel = NodeSelectorPanel::new(source, options).unwrap();
        assert_eq!(labels(&panel), vec!["camera", "left", "right"]);
    }

    #[test]
    fn close_is_a_no_op() {
        let mut panel = create_test_panel();
        let before = panel.forest().clone();
        assert_eq!(panel.handle(PanelEvent::Close).unwrap(), None);
        assert_eq!(panel.forest(), &before);
    }
}
