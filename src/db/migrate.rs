use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, params};

const MIGRATION_NOTIFICATION_REMINDER_ID: &str = "20250301_0001_add_reminder_id_to_notifications";
const MIGRATION_NORMALIZE_SCHEDULED_AT: &str = "20250301_0002_normalize_scheduled_at_dates";
const MIGRATION_NORMALIZE_TIMESTAMPS: &str = "20250301_0003_normalize_timestamps_rfc3339";

/// Timestamp columns written by older builds as `YYYY-MM-DD HH:MM:SS` (UTC).
const TIMESTAMP_COLUMNS: [(&str, &str); 4] = [
    ("reminders", "created_at"),
    ("reminders", "finished_at"),
    ("notifications", "created_at"),
    ("notifications", "dismissed_at"),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

fn table_exists(conn: &Connection, name: &str) -> rusqlite::Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?1 COLLATE NOCASE",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c?.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![version, message],
    )?;
    Ok(())
}

fn create_reminders_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            id           INTEGER PRIMARY KEY ASC,
            title        TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            scheduled_at TEXT NOT NULL,
            period       TEXT DEFAULT NULL,
            finished_at  TEXT DEFAULT NULL
        );
        "#,
    )
}

fn create_notifications_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id           INTEGER PRIMARY KEY ASC,
            title        TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            dismissed_at TEXT DEFAULT NULL,
            reminder_id  INTEGER DEFAULT NULL,
            FOREIGN KEY (reminder_id) REFERENCES reminders(id)
        );
        "#,
    )
}

fn ensure_indexes(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_reminders_active_due
            ON reminders(finished_at, scheduled_at);
        CREATE INDEX IF NOT EXISTS idx_notifications_active
            ON notifications(dismissed_at, reminder_id);
        "#,
    )
}

/// Databases created before reminders existed have notifications without
/// a `reminder_id` column.
fn migrate_add_reminder_id(conn: &Connection) -> rusqlite::Result<()> {
    if has_column(conn, "notifications", "reminder_id")? {
        return Ok(());
    }

    warning("Adding 'reminder_id' column to notifications table...");

    conn.execute_batch(
        r#"
        BEGIN;

        ALTER TABLE notifications RENAME TO notifications_old;

        CREATE TABLE notifications (
            id           INTEGER PRIMARY KEY ASC,
            title        TEXT NOT NULL,
            created_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            dismissed_at TEXT DEFAULT NULL,
            reminder_id  INTEGER DEFAULT NULL,
            FOREIGN KEY (reminder_id) REFERENCES reminders(id)
        );

        INSERT INTO notifications (id, title, created_at, dismissed_at)
        SELECT id, title, created_at, dismissed_at FROM notifications_old;

        DROP TABLE notifications_old;

        COMMIT;
        "#,
    )?;

    mark_applied(
        conn,
        MIGRATION_NOTIFICATION_REMINDER_ID,
        "Added reminder_id to notifications",
    )?;
    success("'reminder_id' column added.");
    Ok(())
}

/// Older builds stored a full timestamp in `scheduled_at`; due checks compare
/// calendar dates only.
fn migrate_normalize_scheduled_at(conn: &Connection) -> rusqlite::Result<()> {
    if is_applied(conn, MIGRATION_NORMALIZE_SCHEDULED_AT)? {
        return Ok(());
    }

    let changed = conn.execute(
        "UPDATE reminders
         SET scheduled_at = substr(scheduled_at, 1, 10)
         WHERE length(scheduled_at) > 10 AND date(substr(scheduled_at, 1, 10)) IS NOT NULL",
        [],
    )?;

    mark_applied(
        conn,
        MIGRATION_NORMALIZE_SCHEDULED_AT,
        &format!("Normalized scheduled_at on {} reminders", changed),
    )?;

    if changed > 0 {
        success(format!(
            "Migration applied: {} → {} reminders normalized",
            MIGRATION_NORMALIZE_SCHEDULED_AT, changed
        ));
    }
    Ok(())
}

/// `CURRENT_TIMESTAMP` values do not sort as text against RFC 3339 ones,
/// so rewrite them to the layout new rows use.
fn migrate_normalize_timestamps(conn: &Connection) -> rusqlite::Result<()> {
    if is_applied(conn, MIGRATION_NORMALIZE_TIMESTAMPS)? {
        return Ok(());
    }

    let mut changed = 0;
    for (table, column) in TIMESTAMP_COLUMNS {
        changed += conn.execute(
            &format!(
                "UPDATE {table}
                 SET {column} = replace({column}, ' ', 'T') || '.000000Z'
                 WHERE {column} GLOB
                     '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9] [0-9][0-9]:[0-9][0-9]:[0-9][0-9]'"
            ),
            [],
        )?;
    }

    mark_applied(
        conn,
        MIGRATION_NORMALIZE_TIMESTAMPS,
        &format!("Rewrote {} legacy timestamps as RFC 3339", changed),
    )?;

    if changed > 0 {
        success(format!(
            "Migration applied: {} → {} timestamps normalized",
            MIGRATION_NORMALIZE_TIMESTAMPS, changed
        ));
    }
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked every time a store is opened; each step is idempotent.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    run_steps(conn).map_err(|e| AppError::Migration(e.to_string()))
}

fn run_steps(conn: &Connection) -> rusqlite::Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Reminders
    if !table_exists(conn, "reminders")? {
        create_reminders_table(conn)?;
    }

    // 3) Notifications (fresh or legacy layout)
    if !table_exists(conn, "notifications")? {
        create_notifications_table(conn)?;
    } else {
        migrate_add_reminder_id(conn)?;
    }

    // 4) Data fixes
    migrate_normalize_scheduled_at(conn)?;
    migrate_normalize_timestamps(conn)?;

    ensure_indexes(conn)?;
    Ok(())
}
