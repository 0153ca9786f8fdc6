//! Terminal presentation helpers shared by the CLI and the panel.

pub mod json;
pub mod output;
pub mod terminal;
pub mod theme;
