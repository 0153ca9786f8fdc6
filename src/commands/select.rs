use anyhow::{bail, Result};

use node_selector::panel::run_interactive;
use node_selector::ui::terminal::detect_capabilities;
use node_selector::Config;

use super::{open_panel, use_unicode};

pub fn cmd_select(config: &Config, json: bool) -> Result<()> {
    let caps = detect_capabilities();
    if !caps.can_run_interactive() {
        bail!("select needs an interactive terminal; use `node-selector tree` instead");
    }

    let mut panel = open_panel(config)?;
    let selected = run_interactive(&mut panel, use_unicode(config));
    panel.close();

    match selected? {
        Some(name) if json => {
            node_selector::ui::json::emit(serde_json::json!({ "selected": name }))?;
        }
        Some(name) => println!("{}", name),
        None => log::info!("selection cancelled"),
    }
    Ok(())
}
