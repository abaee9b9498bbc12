use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::grouping::NotificationLogic;
use crate::db::log;
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Notify { title } = cmd {
        let mut store = Store::open(&cfg.database)?;
        let id = NotificationLogic::notify(&mut store, title)?;

        log::record_or_warn(&store.conn, "notify", &id.to_string(), title.trim());
        success(format!("Notification #{} created.", id));
    }

    Ok(())
}
