use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::ReminderLogic;
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::reminder::Reminder;
use crate::ui::messages::info;
use crate::utils::colors::color_for_due;
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { output } = cmd {
        let store = Store::open(&cfg.database)?;
        let reminders = ReminderLogic::list_active(&store)?;

        if output.json {
            let json = serde_json::to_string_pretty(&reminders)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", json);
            return Ok(());
        }

        if reminders.is_empty() {
            info("No reminders found.");
            println!("Use 'torego remind <title> [period]' to set a reminder.");
            return Ok(());
        }

        print!("{}", render(&reminders, date::today()));
    }

    Ok(())
}

/// `#` is the display index accepted by `forget --index`.
fn render(reminders: &[Reminder], today: chrono::NaiveDate) -> String {
    let mut table = Table::new(vec![
        Column::new("#", 4),
        Column::new("ID", 6),
        Column::new("Title", 32),
        Column::new("Scheduled", 10),
        Column::new("Period", 10),
    ]);

    for (i, r) in reminders.iter().enumerate() {
        let period = r
            .period
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "once".to_string());
        table.add_colored_row(
            vec![
                i.to_string(),
                r.id.to_string(),
                r.title.clone(),
                r.scheduled_at.to_string(),
                period,
            ],
            color_for_due(r.scheduled_at, today),
        );
    }

    table.render()
}
