//! Subcommand implementations for the `node-selector` binary.

pub mod names;
pub mod select;
pub mod tree;

use anyhow::{Context, Result};

use node_selector::config::{load_layered, SourceKind};
use node_selector::source::NameSource;
use node_selector::ui::output::{print_config_error, print_config_warnings};
use node_selector::ui::terminal::detect_capabilities;
use node_selector::{Config, NodeSelectorPanel, PanelOptions};

use crate::cli::{Cli, SourceArgs};

/// Panel over whatever source the config and flags describe
pub type CliPanel = NodeSelectorPanel<Box<dyn NameSource>>;

/// Resolve the effective config: file, then env, then flags
pub fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            if !warnings.is_empty() && !cli.json {
                print_config_warnings(path, &warnings, !cli.ascii);
            }
            config.with_env_overrides()
        }
        None => {
            let cwd = std::env::current_dir().ok();
            let loaded = load_layered(cwd.as_deref());
            if !cli.json {
                for (path, err) in &loaded.errors {
                    print_config_error(path, err, !cli.ascii);
                }
                if let Some(path) = &loaded.path {
                    print_config_warnings(path, &loaded.warnings, !cli.ascii);
                }
            }
            loaded.config
        }
    };

    apply_source_args(&mut config, &cli.source);
    if cli.ascii {
        config.output.unicode = false;
    }
    Ok(config)
}

/// Command-line source selection wins over the `[source]` section
pub fn apply_source_args(config: &mut Config, args: &SourceArgs) {
    let source = &mut config.source;
    if !args.names.is_empty() {
        source.kind = SourceKind::Static;
        source.names = args.names.clone();
    } else if let Some(path) = &args.names_file {
        source.kind = SourceKind::File;
        source.path = Some(path.clone());
    } else if let Some(command) = &args.discover_command {
        source.kind = SourceKind::Command;
        source.command = Some(command.clone());
    }

    if let Some(suffix) = &args.suffix {
        source.suffix = Some(suffix.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        source.timeout_ms = timeout_ms;
    }
}

/// Build the panel and run the first discovery
pub fn open_panel(config: &Config) -> Result<CliPanel> {
    let source = config.name_source()?;
    let panel = NodeSelectorPanel::new(source, PanelOptions::from_config(config))?;
    Ok(panel)
}

/// Unicode icons only when both the config and the terminal allow it
pub fn use_unicode(config: &Config) -> bool {
    config.output.unicode && detect_capabilities().supports_unicode
}
