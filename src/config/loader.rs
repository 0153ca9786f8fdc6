//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SelectorError, SelectorResult};
use crate::filter::FilterTarget;
use crate::tree::MergePolicy;

use super::types::{Config, Verbosity};

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "node-selector.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SelectorResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SelectorError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Outcome of the project/user config lookup
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: Config,
    /// File the config came from, `None` for defaults
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
    /// Files that exist but could not be loaded, skipped in favour of the next
    pub errors: Vec<(PathBuf, SelectorError)>,
}

/// Load from project config, user config, or defaults, keeping diagnostics
pub fn load_layered(project_root: Option<&Path>) -> LoadedConfig {
    let mut candidates = Vec::new();
    if let Some(root) = project_root {
        candidates.push(root.join(PROJECT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("node-selector/config.toml"));
    }

    let mut errors = Vec::new();
    for path in candidates {
        if !path.exists() {
            continue;
        }
        match load_with_warnings(&path) {
            Ok((config, warnings)) => {
                log::debug!("loaded config from {}", path.display());
                return LoadedConfig {
                    config: with_env_overrides(config),
                    path: Some(path),
                    warnings,
                    errors,
                };
            }
            Err(e) => {
                log::warn!("ignoring config {}: {}", path.display(), e);
                errors.push((path, e));
            }
        }
    }

    LoadedConfig {
        config: with_env_overrides(Config::default()),
        errors,
        ..LoadedConfig::default()
    }
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    load_layered(project_root).config
}

/// Apply environment variable overrides (NODE_SELECTOR_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `get_env`
pub fn with_env_overrides_from(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    // NODE_SELECTOR_SEPARATOR (first character)
    if let Some(sep) = get_env("NODE_SELECTOR_SEPARATOR").and_then(|s| s.chars().next()) {
        config.tree.separator = sep;
    }

    // NODE_SELECTOR_MERGE
    if let Some(merge) = get_env("NODE_SELECTOR_MERGE") {
        config.tree.merge = match merge.to_lowercase().as_str() {
            "global" => MergePolicy::Global,
            _ => MergePolicy::Adjacent,
        };
    }

    // NODE_SELECTOR_FILTER_TARGET
    if let Some(target) = get_env("NODE_SELECTOR_FILTER_TARGET") {
        config.filter.target = match target.to_lowercase().as_str() {
            "path" | "full_path" => FilterTarget::Path,
            _ => FilterTarget::Label,
        };
    }

    // NODE_SELECTOR_VERBOSITY
    if let Some(verbosity) = get_env("NODE_SELECTOR_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    // NODE_SELECTOR_TIMEOUT_MS
    if let Some(timeout) = get_env("NODE_SELECTOR_TIMEOUT_MS").and_then(|s| s.parse().ok()) {
        config.source.timeout_ms = timeout;
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "tree",
        "separator",
        "merge",
        "expand_on_load",
        "filter",
        "target",
        "source",
        "kind",
        "names",
        "path",
        "command",
        "suffix",
        "timeout_ms",
        "sort",
        "output",
        "verbosity",
        "unicode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
