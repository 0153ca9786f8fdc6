//! Hierarchical node tree
//!
//! Turns a flat, ordered list of hierarchical names into a forest of path
//! segments.
//!
//! # Module Structure
//!
//! - `node` - TreeNode data structure
//! - `forest` - Forest container and index-path navigation
//! - `builder` - Tree construction from discovered names

mod builder;
mod forest;
mod node;

pub use builder::{build, MergePolicy, TreeBuilder};
pub use forest::Forest;
pub use node::TreeNode;
