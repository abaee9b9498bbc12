use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::{ReminderChanges, ReminderLogic};
use crate::db::log;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        title,
        period,
        once,
        on,
    } = cmd
    {
        let period = if *once {
            Some(None)
        } else {
            period
                .as_deref()
                .map(Period::parse)
                .transpose()?
                .map(Some)
        };

        let scheduled_at = on
            .as_deref()
            .map(|s| date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
            .transpose()?;

        let changes = ReminderChanges {
            title: title.clone(),
            period,
            scheduled_at,
        };
        if changes.title.is_none() && changes.period.is_none() && changes.scheduled_at.is_none() {
            return Err(AppError::InvalidArgument(
                "nothing to change: use --title, --period, --once or --on".into(),
            ));
        }

        let mut store = Store::open(&cfg.database)?;
        let r = ReminderLogic::update(&mut store, *id, changes)?;

        let every = r
            .period
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "once".to_string());
        log::record_or_warn(
            &store.conn,
            "edit",
            &id.to_string(),
            &format!("'{}' on {} ({})", r.title, r.scheduled_at, every),
        );
        success(format!(
            "Reminder #{} updated: {} (next {}, {})",
            r.id, r.title, r.scheduled_at, every
        ));
    }

    Ok(())
}
