use crate::cli::parser::OutputArgs;
use crate::config::Config;
use crate::core::firing::FiringLogic;
use crate::db::log;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};

pub fn handle(output: &OutputArgs, cfg: &Config) -> AppResult<()> {
    let mut store = Store::open(&cfg.database)?;
    let report = FiringLogic::fire_due_reminders(&mut store)?;

    if !report.is_empty() {
        log::record_or_warn(
            &store.conn,
            "checkout",
            "",
            &format!(
                "{} notified, {} finished, {} rescheduled",
                report.notified, report.finished, report.rescheduled
            ),
        );
    }

    if output.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Other(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    if !report.stalled.is_empty() {
        let ids: Vec<String> = report.stalled.iter().map(|id| id.to_string()).collect();
        warning(format!(
            "Reminders with an unusable period were not rescheduled: {}",
            ids.join(", ")
        ));
    }

    if report.is_empty() {
        info("Nothing is due.");
        return Ok(());
    }

    success(format!(
        "Reminders checked out! {} new notification(s).",
        report.notified
    ));
    Ok(())
}
