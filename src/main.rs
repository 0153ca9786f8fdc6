//! node-selector CLI
//!
//! Usage: node-selector [OPTIONS] <COMMAND>
//!
//! Commands:
//!   tree    Print the node tree
//!   names   Print discovered names in order
//!   select  Pick a node interactively

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use node_selector::ui::output::print_error;
use node_selector::Verbosity;

fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e, !cli.ascii);
            std::process::exit(1);
        }
    };

    let verbosity = if cli.verbose > 0 {
        Verbosity::from_count(cli.verbose)
    } else {
        config.output.verbosity
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    log::debug!("node-selector v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli, &config) {
        print_error(&e, config.output.unicode);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &node_selector::Config) -> Result<()> {
    match &cli.command {
        Commands::Tree { filter, expand } => {
            commands::tree::cmd_tree(config, filter.as_deref(), *expand, cli.json)
        }
        Commands::Names => commands::names::cmd_names(config, cli.json),
        Commands::Select => commands::select::cmd_select(config, cli.json),
    }
}
