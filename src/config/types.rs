//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SelectorError, SelectorResult};
use crate::filter::FilterTarget;
use crate::name::DEFAULT_SEPARATOR;
use crate::source::{CommandSource, FileSource, NameSource, StaticSource, DEFAULT_TIMEOUT_MS};
use crate::tree::{MergePolicy, TreeBuilder};

use super::loader::{self, ConfigWarning};

/// Tree construction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    #[serde(default = "default_separator")]
    pub separator: char,

    #[serde(default)]
    pub merge: MergePolicy,

    /// Show every branch expanded after a refresh
    #[serde(default)]
    pub expand_on_load: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            merge: MergePolicy::default(),
            expand_on_load: false,
        }
    }
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

/// Text filter configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FilterConfig {
    #[serde(default)]
    pub target: FilterTarget,
}

/// Where discovered names come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The `names` list below
    #[default]
    Static,
    /// A names file at `path`
    File,
    /// The output of `command`
    Command,
}

/// Name source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    #[serde(default)]
    pub names: Vec<String>,

    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub command: Option<String>,

    /// Service suffix that marks reconfigurable nodes in command output
    #[serde(default)]
    pub suffix: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Sort discovered names before building the tree
    #[serde(default = "default_true")]
    pub sort: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            names: Vec::new(),
            path: None,
            command: None,
            suffix: None,
            timeout_ms: default_timeout_ms(),
            sort: true,
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            unicode: true,
        }
    }
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Map a `-v` count onto a level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    /// Default `log` filter for this level
    pub fn log_filter(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,

    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SelectorResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SelectorResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults
    pub fn load_or_default(project_root: Option<&Path>) -> Self {
        loader::load_or_default(project_root)
    }

    /// Apply environment variable overrides (NODE_SELECTOR_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Tree builder for the configured separator and merge policy
    pub fn tree_builder(&self) -> TreeBuilder {
        TreeBuilder::new()
            .separator(self.tree.separator)
            .merge(self.tree.merge)
    }

    /// Instantiate the configured name source
    pub fn name_source(&self) -> SelectorResult<Box<dyn NameSource>> {
        let source = &self.source;
        match source.kind {
            SourceKind::Static => Ok(Box::new(StaticSource::new(source.names.clone()))),
            SourceKind::File => {
                let path = source.path.clone().ok_or_else(|| SelectorError::MissingSetting {
                    key: "source.path".to_string(),
                })?;
                Ok(Box::new(FileSource::new(path)))
            }
            SourceKind::Command => {
                let command = source
                    .command
                    .as_deref()
                    .and_then(CommandSource::from_command_line)
                    .ok_or_else(|| SelectorError::MissingSetting {
                        key: "source.command".to_string(),
                    })?;
                let command = command.timeout(Duration::from_millis(source.timeout_ms));
                Ok(Box::new(match &source.suffix {
                    Some(suffix) => command.service_suffix(suffix.clone()),
                    None => command,
                }))
            }
        }
    }
}
