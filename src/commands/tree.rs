use anyhow::Result;

use node_selector::panel::render_plain;
use node_selector::{Config, PanelEvent, TextFilter};

use super::{open_panel, use_unicode};

pub fn cmd_tree(config: &Config, filter: Option<&str>, expand: bool, json: bool) -> Result<()> {
    // Reject bad patterns up front rather than matching them literally
    if let Some(pattern) = filter {
        TextFilter::new(pattern)?;
    }

    let mut panel = open_panel(config)?;
    if let Some(pattern) = filter {
        panel.handle(PanelEvent::FilterChanged(pattern.to_string()))?;
    }
    if expand {
        panel.handle(PanelEvent::ExpandAll)?;
    }

    if json {
        let shown: Vec<&str> = panel
            .flattened_nodes()
            .iter()
            .map(|n| n.full_path.as_str())
            .collect();
        node_selector::ui::json::emit(serde_json::json!({
            "leaf_count": panel.forest().leaf_count(),
            "filter": panel.filter_text(),
            "shown": shown,
            "tree": panel.forest(),
        }))?;
    } else {
        if panel.forest().is_empty() {
            log::warn!("no nodes discovered");
        }
        print!("{}", render_plain(panel.flattened_nodes(), use_unicode(config)));
    }

    panel.close();
    Ok(())
}
