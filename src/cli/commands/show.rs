use crate::cli::parser::OutputArgs;
use crate::config::Config;
use crate::core::grouping::NotificationLogic;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::notification::NotificationGroup;
use crate::ui::messages::info;
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::date::format_local;

pub fn handle(output: &OutputArgs, cfg: &Config) -> AppResult<()> {
    let store = Store::open(&cfg.database)?;
    let groups = NotificationLogic::list_active_groups(&store)?;

    if output.json {
        let json = serde_json::to_string_pretty(&groups)
            .map_err(|e| AppError::Other(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    if groups.is_empty() {
        info("No active notifications.");
        return Ok(());
    }

    for (i, g) in groups.iter().enumerate() {
        println!("{}", render_line(i, g, cfg));
    }
    Ok(())
}

/// `0: [3] title (2025-03-01 09:00)`; the count is omitted for single notifications.
fn render_line(index: usize, g: &NotificationGroup, cfg: &Config) -> String {
    let mut line = format!("{}: ", index);
    if g.group_count > 1 {
        line.push_str(&format!("{CYAN}[{}]{RESET} ", g.group_count));
    }
    line.push_str(&g.title);
    line.push_str(&format!(
        " {GREY}({}){RESET}",
        format_local(&g.created_at, &cfg.datetime_format)
    ));
    if cfg.show_group_ids {
        line.push_str(&format!(" {GREY}<{}>{RESET}", g.group_id));
    }
    line
}
