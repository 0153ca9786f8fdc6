//! node-selector - browse reconfigurable node names as a filterable tree
//!
//! Node names such as `/camera/left/driver` are split on a separator and
//! folded into a forest of labelled nodes. A case-insensitive regex filter
//! narrows what is shown, and only leaves can be selected.

pub mod config;
pub mod error;
pub mod filter;
pub mod name;
pub mod panel;
pub mod selection;
pub mod source;
pub mod tree;
pub mod ui;

// Re-exports for convenience
pub use config::{Config, ConfigWarning, Verbosity};
pub use error::{SelectorError, SelectorResult};
pub use filter::{matches, FilterTarget, TextFilter, Visibility};
pub use name::Name;
pub use panel::{NodeSelectorPanel, PanelEvent, PanelOptions, PanelOutput, RefreshReport};
pub use selection::{is_selectable, select, SelectionOutcome};
pub use source::{CommandSource, FileSource, NameSource, StaticSource};
pub use tree::{build, Forest, MergePolicy, TreeBuilder, TreeNode};
