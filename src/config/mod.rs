//! Configuration module for node-selector
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (NODE_SELECTOR_*)
//! 3. Project config (./node-selector.toml)
//! 4. User config (<config dir>/node-selector/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_layered, with_env_overrides_from, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE,
};
pub use types::{
    Config, FilterConfig, OutputConfig, SourceConfig, SourceKind, TreeConfig, Verbosity,
};
