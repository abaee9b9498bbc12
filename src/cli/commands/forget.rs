use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::ReminderLogic;
use crate::db::log;
use crate::db::store::Store;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Forget { id, index } = cmd {
        let mut store = Store::open(&cfg.database)?;

        if let Some(i) = index {
            let r = ReminderLogic::delete_by_display_index(&mut store, *i)?;
            log::record_or_warn(&store.conn, "forget", &r.id.to_string(), &r.title);
            success(format!("Reminder #{} forgotten: {}", r.id, r.title));
            return Ok(());
        }

        if let Some(id) = id {
            // delete is an unconditional update: an unknown id is not an error
            let touched = ReminderLogic::delete(&mut store, *id)?;
            if touched == 0 {
                warning(format!("No reminder with id {}.", id));
            } else {
                log::record_or_warn(&store.conn, "forget", &id.to_string(), "Reminder forgotten");
                success("Reminder forgotten!");
            }
        }
    }

    Ok(())
}
