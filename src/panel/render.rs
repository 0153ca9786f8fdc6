//! Terminal rendering functions for the node selector.
//!
//! This module provides functions to render tree nodes, status bars,
//! and help text to strings for terminal output.

use unicode_width::UnicodeWidthChar;

use crate::ui::theme::{icons, icons_ascii};

use super::selector::FlattenedNode;

/// Render a single tree node to a string
pub fn render_tree_node(node: &FlattenedNode, is_active: bool, supports_unicode: bool) -> String {
    let indent = "  ".repeat(node.depth);
    let cursor = if is_active { "> " } else { "  " };

    // Expansion icon (only for nodes with children)
    let expand_icon = if node.has_children {
        let icon = match (node.expanded, supports_unicode) {
            (true, true) => icons::EXPAND,
            (true, false) => icons_ascii::EXPAND,
            (false, true) => icons::COLLAPSE,
            (false, false) => icons_ascii::COLLAPSE,
        };
        format!("{} ", icon)
    } else if node.selected {
        let icon = if supports_unicode {
            icons::SELECTED
        } else {
            icons_ascii::SELECTED
        };
        format!("{} ", icon)
    } else {
        " ".repeat(if supports_unicode { 2 } else { 4 })
    };

    // Node count suffix
    let count_suffix = if node.has_children {
        format!(" ({} nodes)", node.leaf_count)
    } else {
        String::new()
    };

    format!(
        "{}{}{}{}{}",
        cursor, indent, expand_icon, node.label, count_suffix
    )
}

/// Render a forest listing without cursor, one node per line
pub fn render_plain(nodes: &[FlattenedNode], supports_unicode: bool) -> String {
    let mut out = String::new();
    for node in nodes {
        let line = render_tree_node(node, false, supports_unicode);
        // Drop the cursor gutter
        out.push_str(&line[2..]);
        out.push('\n');
    }
    out
}

/// Render the status bar showing node counts and the active filter
pub fn render_status_bar(
    total: usize,
    shown: usize,
    filter: &str,
    selected: Option<&str>,
) -> String {
    let mut status = format!("Nodes: {}    Shown: {}", total, shown);
    if !filter.is_empty() {
        status.push_str(&format!("    Filter: /{}/i", filter));
    }
    if let Some(name) = selected {
        status.push_str(&format!("\nSelected: {}", name));
    }
    status
}

/// Render the help bar showing keyboard shortcuts
pub fn render_help_bar() -> String {
    String::from(
        "[/] Filter    [r] Refresh    [e] Expand all    [c] Collapse all    [Enter] Select    [q] Quit\n\
         (Use ↑↓ to navigate, →← to expand/collapse)",
    )
}

/// Cut `line` to at most `width` terminal columns
pub fn fit_width(line: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str, depth: usize, has_children: bool) -> FlattenedNode {
        FlattenedNode {
            path: vec![0],
            depth,
            label: label.to_string(),
            full_path: format!("/{}", label),
            expanded: false,
            has_children,
            leaf_count: if has_children { 2 } else { 1 },
            selected: false,
        }
    }

    #[test]
    fn render_shows_cursor_indicator() {
        let line = render_tree_node(&node("camera", 0, true), true, true);
        assert!(line.starts_with("> "), "Active line should have cursor");

        let line = render_tree_node(&node("camera", 0, true), false, true);
        assert!(line.starts_with("  "));
    }

    #[test]
    fn render_shows_expansion_icons() {
        let mut group = node("camera", 0, true);
        assert!(render_tree_node(&group, false, true).contains("▶"));

        group.expanded = true;
        assert!(render_tree_node(&group, false, true).contains("▼"));
        assert!(render_tree_node(&group, false, false).contains("[v]"));
    }

    #[test]
    fn render_group_shows_node_count() {
        let line = render_tree_node(&node("camera", 0, true), false, true);
        assert!(line.ends_with("camera (2 nodes)"));
    }

    #[test]
    fn render_indents_by_depth() {
        let line = render_tree_node(&node("left", 2, false), false, true);
        assert_eq!(line, "        left");
    }

    #[test]
    fn render_marks_selected_leaf() {
        let mut leaf = node("left", 0, false);
        leaf.selected = true;
        assert!(render_tree_node(&leaf, false, true).contains("●"));
        assert!(render_tree_node(&leaf, false, false).contains("[x]"));
    }

    #[test]
    fn render_plain_drops_cursor_gutter() {
        let out = render_plain(&[node("camera", 0, true), node("left", 1, false)], true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "▶ camera (2 nodes)");
        assert_eq!(lines[1], "    left");
    }

    #[test]
    fn render_status_bar_shows_counts_and_filter() {
        let status = render_status_bar(4, 2, "cam", Some("/camera/left"));
        assert!(status.contains("Nodes: 4"));
        assert!(status.contains("Shown: 2"));
        assert!(status.contains("Filter: /cam/i"));
        assert!(status.contains("Selected: /camera/left"));

        let status = render_status_bar(4, 4, "", None);
        assert!(!status.contains("Filter"));
    }

    #[test]
    fn render_help_bar_shows_shortcuts() {
        let help = render_help_bar();
        assert!(help.contains("[/] Filter"));
        assert!(help.contains("[r] Refresh"));
        assert!(help.contains("[Enter] Select"));
        assert!(help.contains("[q] Quit"));
    }

    #[test]
    fn fit_width_respects_wide_chars() {
        assert_eq!(fit_width("camera", 3), "cam");
        assert_eq!(fit_width("ab", 10), "ab");
        // CJK characters take two columns each
        assert_eq!(fit_width("节点名", 5), "节点");
    }
}
