use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// node-selector - browse reconfigurable nodes as a filterable tree
#[derive(Parser, Debug)]
#[command(name = "node-selector")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Names come from --name, --names-file, --command or the [source] config section.")]
pub struct Cli {
    /// Output format for scripts
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use ASCII icons instead of Unicode
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Path to a config file (replaces project and user config lookup)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where node names come from; overrides the `[source]` config section
#[derive(clap::Args, Debug, Default)]
pub struct SourceArgs {
    /// Node name to include (repeatable)
    #[arg(long = "name", global = true, conflicts_with_all = ["names_file", "discover_command"])]
    pub names: Vec<String>,

    /// Read names from a file, one per line (JSON array for .json files)
    #[arg(long, global = true, conflicts_with = "discover_command")]
    pub names_file: Option<PathBuf>,

    /// Discover names from a command's output
    #[arg(long = "command", global = true)]
    pub discover_command: Option<String>,

    /// Keep only command output lines ending with this suffix, minus the suffix
    #[arg(long, global = true)]
    pub suffix: Option<String>,

    /// Give up on the discovery command after this many milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the node tree
    Tree {
        /// Only show nodes matching this case-insensitive regex
        #[arg(short, long)]
        filter: Option<String>,

        /// Expand every branch
        #[arg(short, long)]
        expand: bool,
    },

    /// Print discovered names in order
    Names,

    /// Pick a node interactively and print its name
    Select,
}
