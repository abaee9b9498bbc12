use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::ReminderLogic;
use crate::db::log;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Remind {
        title,
        period,
        once,
        on,
    } = cmd
    {
        let period = period.as_deref().map(Period::parse).transpose()?;
        let first_due = on
            .as_deref()
            .map(|s| date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
            .transpose()?;

        let mut store = Store::open(&cfg.database)?;

        let id = if *once || first_due.is_some() {
            let recurrence = if *once {
                None
            } else {
                Some(period.unwrap_or_default())
            };
            ReminderLogic::create_scheduled(
                &mut store,
                title,
                first_due.unwrap_or_else(date::today),
                recurrence,
            )?
        } else {
            ReminderLogic::create(&mut store, title, period)?
        };

        let r = ReminderLogic::get(&store, id)?;
        let every = r
            .period
            .as_ref()
            .map(|p| format!("every {}", p))
            .unwrap_or_else(|| "once".to_string());

        log::record_or_warn(
            &store.conn,
            "remind",
            &id.to_string(),
            &format!("'{}' from {} ({})", r.title, r.scheduled_at, every),
        );

        success(format!(
            "Reminder #{} set: {} (from {}, {})",
            id, r.title, r.scheduled_at, every
        ));
    }

    Ok(())
}
