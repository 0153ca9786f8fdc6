//! Design tokens for the node-selector terminal UI.
//!
//! All icons used by the tree view are sourced from this module, with an
//! ASCII fallback for terminals without Unicode support.

pub mod icons {
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";

    // Selected leaf.
    pub const SELECTED: &str = "●";

    // Tree expansion.
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";

    // Horizontal rule segment.
    pub const RULE: &str = "─";
}

pub mod icons_ascii {
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";

    pub const SELECTED: &str = "[x]";

    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";

    pub const RULE: &str = "-";
}

/// Pick the Unicode or ASCII variant of an icon
pub fn icon(unicode: bool, fancy: &'static str, plain: &'static str) -> &'static str {
    if unicode {
        fancy
    } else {
        plain
    }
}
