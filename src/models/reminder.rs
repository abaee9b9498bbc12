use crate::models::period::Period;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A stored intent to be notified, possibly repeatedly.
#[derive(Debug, Clone, Serialize)]
pub struct Reminder {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Next day on which the reminder becomes due (local calendar date).
    pub scheduled_at: NaiveDate,
    /// `None` = one-shot.
    pub period: Option<Period>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Reminder {
    pub fn is_active(&self) -> bool {
        self.finished_at.is_none()
    }
}
