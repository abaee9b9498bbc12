use crate::db::store::Store;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub active_reminders: i64,
    pub finished_reminders: i64,
    pub active_notifications: i64,
    pub dismissed_notifications: i64,
    pub next_due: Option<String>,
}

pub fn collect(store: &Store) -> AppResult<DbStats> {
    let conn = &store.conn;
    let count = |sql: &str| -> rusqlite::Result<i64> { conn.query_row(sql, [], |row| row.get(0)) };

    Ok(DbStats {
        active_reminders: count("SELECT COUNT(*) FROM reminders WHERE finished_at IS NULL")?,
        finished_reminders: count("SELECT COUNT(*) FROM reminders WHERE finished_at IS NOT NULL")?,
        active_notifications: count(
            "SELECT COUNT(*) FROM notifications WHERE dismissed_at IS NULL",
        )?,
        dismissed_notifications: count(
            "SELECT COUNT(*) FROM notifications WHERE dismissed_at IS NOT NULL",
        )?,
        next_due: conn
            .query_row(
                "SELECT MIN(scheduled_at) FROM reminders WHERE finished_at IS NULL",
                [],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?
            .flatten(),
    })
}

pub fn print_db_info(store: &Store, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COUNTERS
    //
    let stats = collect(store)?;
    println!(
        "{}• Reminders:{} {}{}{} active, {} finished",
        CYAN, RESET, GREEN, stats.active_reminders, RESET, stats.finished_reminders
    );
    println!(
        "{}• Notifications:{} {}{}{} active, {} dismissed",
        CYAN, RESET, GREEN, stats.active_notifications, RESET, stats.dismissed_notifications
    );

    //
    // 3) NEXT DUE
    //
    let next = stats
        .next_due
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Next due:{} {}", CYAN, RESET, next);

    println!();
    Ok(())
}
