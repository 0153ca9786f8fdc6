use anyhow::Result;

use node_selector::Config;

use super::open_panel;

pub fn cmd_names(config: &Config, json: bool) -> Result<()> {
    let mut panel = open_panel(config)?;

    if json {
        node_selector::ui::json::emit(serde_json::json!(panel.node_items()))?;
    } else {
        for name in panel.node_items() {
            println!("{}", name);
        }
    }

    panel.close();
    Ok(())
}
