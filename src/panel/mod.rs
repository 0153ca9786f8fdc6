//! Node selector panel
//!
//! Toolkit-free controller for the hierarchical node view, plus a terminal
//! front end for it.
//!
//! # Module Structure
//!
//! - `selector` - NodeSelectorPanel state and event dispatch
//! - `render` - Terminal rendering functions
//! - `input` - Keyboard input handling and interactive loop

mod input;
mod render;
mod selector;

pub use input::{
    apply_command, key_to_command, run_interactive, InputMode, InputState, KeyCommand, LoopStep,
};
pub use render::{fit_width, render_plain};
pub use selector::{
    FlattenedNode, NodeSelectorPanel, PanelEvent, PanelOptions, PanelOutput, RefreshReport,
};
