//! Persistence gateway: every SQL statement touching reminders and notifications.
//!
//! Functions take a plain `&Connection` so they can run either directly on the
//! store or inside a transaction (`Transaction` derefs to `Connection`).

use crate::errors::{AppError, AppResult};
use crate::models::notification::{GroupKey, Notification, NotificationGroup};
use crate::models::period::Period;
use crate::models::reminder::Reminder;
use crate::utils::date::{parse_date, parse_db_timestamp, to_db_date, to_db_timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

fn get_timestamp(row: &Row, col: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.get(col)?;
    parse_db_timestamp(&raw)
        .ok_or_else(|| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

fn get_opt_timestamp(row: &Row, col: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.get(col)?;
    raw.map(|r| {
        parse_db_timestamp(&r).ok_or_else(|| conversion_error(0, AppError::InvalidDate(r.clone())))
    })
    .transpose()
}

pub fn map_reminder(row: &Row) -> Result<Reminder> {
    let scheduled_str: String = row.get("scheduled_at")?;
    let scheduled_at = parse_date(&scheduled_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidDate(scheduled_str.clone())))?;

    let period: Option<String> = row.get("period")?;

    Ok(Reminder {
        id: row.get("id")?,
        title: row.get("title")?,
        created_at: get_timestamp(row, "created_at")?,
        scheduled_at,
        period: period.as_deref().map(Period::from_db_str),
        finished_at: get_opt_timestamp(row, "finished_at")?,
    })
}

pub fn map_notification(row: &Row) -> Result<Notification> {
    Ok(Notification {
        id: row.get("id")?,
        title: row.get("title")?,
        created_at: get_timestamp(row, "created_at")?,
        dismissed_at: get_opt_timestamp(row, "dismissed_at")?,
        reminder_id: row.get("reminder_id")?,
    })
}

// ---------------------------
// Reminders
// ---------------------------

pub fn insert_reminder(
    conn: &Connection,
    title: &str,
    scheduled_at: &NaiveDate,
    period: Option<&Period>,
    created_at: &DateTime<Utc>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO reminders (title, created_at, scheduled_at, period)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            title,
            to_db_timestamp(created_at),
            to_db_date(scheduled_at),
            period.map(Period::to_db_str),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Mark one reminder finished, whatever its current state.
/// Returns the number of rows touched (0 when the id does not exist).
pub fn finish_reminder(conn: &Connection, id: i64, at: &DateTime<Utc>) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE reminders SET finished_at = ?1 WHERE id = ?2",
        params![to_db_timestamp(at), id],
    )?;
    Ok(n)
}

pub fn finish_due_one_shot_reminders(
    conn: &Connection,
    today: &NaiveDate,
    at: &DateTime<Utc>,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE reminders SET finished_at = ?1
         WHERE scheduled_at <= ?2 AND finished_at IS NULL AND period IS NULL",
        params![to_db_timestamp(at), to_db_date(today)],
    )?;
    Ok(n)
}

pub fn reschedule_reminder(conn: &Connection, id: i64, new_date: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE reminders SET scheduled_at = ?1 WHERE id = ?2",
        params![to_db_date(new_date), id],
    )?;
    Ok(n)
}

/// Outcome of advancing the due periodic reminders.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RescheduleOutcome {
    pub rescheduled: usize,
    /// Ids of due reminders whose period could not be applied.
    pub stalled: Vec<i64>,
}

/// Advance every due periodic reminder by one period, starting from its
/// current `scheduled_at` (not from today).
pub fn reschedule_due_periodic_reminders(
    conn: &Connection,
    today: &NaiveDate,
) -> AppResult<RescheduleOutcome> {
    let due: Vec<Reminder> = {
        let mut stmt = conn.prepare(
            "SELECT * FROM reminders
             WHERE scheduled_at <= ?1 AND finished_at IS NULL AND period IS NOT NULL
             ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([to_db_date(today)], map_reminder)?;
        rows.collect::<Result<_>>()?
    };

    let mut outcome = RescheduleOutcome::default();
    for r in due {
        match r.period.as_ref().and_then(|p| p.advance(r.scheduled_at)) {
            Some(next) => {
                reschedule_reminder(conn, r.id, &next)?;
                outcome.rescheduled += 1;
            }
            None => outcome.stalled.push(r.id),
        }
    }
    Ok(outcome)
}

/// Active reminders, most recently scheduled first.
pub fn load_active_reminders(conn: &Connection) -> AppResult<Vec<Reminder>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM reminders
         WHERE finished_at IS NULL
         ORDER BY scheduled_at DESC, id ASC",
    )?;

    let rows = stmt.query_map([], map_reminder)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_active_reminder(conn: &Connection, id: i64) -> AppResult<Option<Reminder>> {
    let r = conn
        .query_row(
            "SELECT * FROM reminders WHERE id = ?1 AND finished_at IS NULL",
            [id],
            map_reminder,
        )
        .optional()?;
    Ok(r)
}

/// Any reminder by id, finished or not.
pub fn load_reminder(conn: &Connection, id: i64) -> AppResult<Option<Reminder>> {
    let r = conn
        .query_row("SELECT * FROM reminders WHERE id = ?1", [id], map_reminder)
        .optional()?;
    Ok(r)
}

pub fn update_reminder(conn: &Connection, r: &Reminder) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE reminders SET title = ?1, scheduled_at = ?2, period = ?3
         WHERE id = ?4 AND finished_at IS NULL",
        params![
            r.title,
            to_db_date(&r.scheduled_at),
            r.period.as_ref().map(Period::to_db_str),
            r.id,
        ],
    )?;
    Ok(n)
}

// ---------------------------
// Notifications
// ---------------------------

pub fn insert_notification(
    conn: &Connection,
    title: &str,
    reminder_id: Option<i64>,
    at: &DateTime<Utc>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO notifications (title, created_at, reminder_id) VALUES (?1, ?2, ?3)",
        params![title, to_db_timestamp(at), reminder_id],
    )?;
    Ok(conn.last_insert_rowid())
}

/// One notification per due active reminder, title copied from the reminder.
pub fn insert_notifications_for_due_reminders(
    conn: &Connection,
    today: &NaiveDate,
    at: &DateTime<Utc>,
) -> AppResult<usize> {
    let n = conn.execute(
        "INSERT INTO notifications (title, created_at, reminder_id)
         SELECT title, ?1, id FROM reminders
         WHERE scheduled_at <= ?2 AND finished_at IS NULL
         ORDER BY id ASC",
        params![to_db_timestamp(at), to_db_date(today)],
    )?;
    Ok(n)
}

pub fn dismiss_notifications_by_group_key(
    conn: &Connection,
    key: &GroupKey,
    at: &DateTime<Utc>,
) -> AppResult<usize> {
    let at = to_db_timestamp(at);
    let n = match key {
        GroupKey::ByReminder(rid) => conn.execute(
            "UPDATE notifications SET dismissed_at = ?1
             WHERE dismissed_at IS NULL AND reminder_id = ?2",
            params![at, rid],
        )?,
        GroupKey::Standalone(nid) => conn.execute(
            "UPDATE notifications SET dismissed_at = ?1
             WHERE dismissed_at IS NULL AND reminder_id IS NULL AND id = ?2",
            params![at, nid],
        )?,
    };
    Ok(n)
}

/// Active notifications collapsed by group key.
///
/// The grouping key is the pair (has no reminder, reminder id or own id), so
/// reminder ids and notification ids can never be confused. Each group is
/// represented by its lowest notification id; groups are ordered by the
/// earliest creation time among their members (compared as instants, not
/// text, since rows written by other tools may use a different layout).
pub fn load_active_notifications_grouped(conn: &Connection) -> AppResult<Vec<NotificationGroup>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT n.id, n.title, n.created_at, n.reminder_id, g.group_count
        FROM (
            SELECT MIN(id) AS rep_id,
                   COUNT(*) AS group_count,
                   MIN(julianday(created_at)) AS first_created
            FROM notifications
            WHERE dismissed_at IS NULL
            GROUP BY reminder_id IS NULL, COALESCE(reminder_id, id)
        ) AS g
        JOIN notifications AS n ON n.id = g.rep_id
        ORDER BY g.first_created ASC, g.rep_id ASC
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        let id: i64 = row.get("id")?;
        let reminder_id: Option<i64> = row.get("reminder_id")?;
        let group_count: i64 = row.get("group_count")?;
        Ok(NotificationGroup {
            group_id: GroupKey::for_notification(id, reminder_id),
            group_count: group_count as usize,
            notification_id: id,
            title: row.get("title")?,
            created_at: get_timestamp(row, "created_at")?,
            reminder_id,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_notifications_for_reminder(
    conn: &Connection,
    reminder_id: i64,
) -> AppResult<Vec<Notification>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM notifications WHERE reminder_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([reminder_id], map_notification)?;
    Ok(rows.collect::<Result<_>>()?)
}

pub fn count_active_notifications(conn: &Connection) -> AppResult<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE dismissed_at IS NULL",
        [],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}
