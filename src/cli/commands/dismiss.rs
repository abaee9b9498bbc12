use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::grouping::NotificationLogic;
use crate::db::log;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::notification::GroupKey;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dismiss { index, group } = cmd {
        let mut store = Store::open(&cfg.database)?;

        let (key, title, cleared) = if let Some(gid) = group {
            let key: GroupKey = gid.parse()?;
            let cleared = NotificationLogic::dismiss_group(&mut store, &key)?;
            if cleared == 0 {
                return Err(AppError::NotFound(format!(
                    "no active notifications in group {}",
                    key
                )));
            }
            (key, None, cleared)
        } else if let Some(i) = index {
            let g = NotificationLogic::dismiss_group_by_display_index(&mut store, *i)?;
            (g.group_id, Some(g.title), g.group_count)
        } else {
            return Err(AppError::InvalidArgument(
                "give a display index or --group".into(),
            ));
        };

        log::record_or_warn(
            &store.conn,
            "dismiss",
            &key.to_string(),
            &format!("{} notification(s) dismissed", cleared),
        );

        match title {
            Some(t) => success(format!("Dismissed {} notification(s): {}", cleared, t)),
            None => success(format!("Dismissed {} notification(s) in group {}", cleared, key)),
        }
    }

    Ok(())
}
