use crate::db::queries::{
    finish_due_one_shot_reminders, insert_notifications_for_due_reminders,
    reschedule_due_periodic_reminders,
};
use crate::db::store::Store;
use crate::errors::AppResult;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// What a checkout did.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FiringReport {
    pub notified: usize,
    pub finished: usize,
    pub rescheduled: usize,
    /// Due periodic reminders whose period could not be applied; they stay due.
    pub stalled: Vec<i64>,
}

impl FiringReport {
    pub fn is_empty(&self) -> bool {
        self.notified == 0
    }
}

/// Pull-based firing of due reminders ("checkout").
pub struct FiringLogic;

impl FiringLogic {
    pub fn fire_due_reminders(store: &mut Store) -> AppResult<FiringReport> {
        Self::fire_at(store, Local::now())
    }

    /// Fire every reminder due on or before `now`'s local date.
    ///
    /// The three steps (spawn notifications, finish one-shots, reschedule
    /// periodic reminders) run in one transaction: either all of them are
    /// committed or none is, so a retry after a failure cannot duplicate
    /// notifications.
    pub fn fire_at(store: &mut Store, now: DateTime<Local>) -> AppResult<FiringReport> {
        let today = now.date_naive();
        let at = now.with_timezone(&Utc);

        store.in_transaction(|tx| {
            // 1️⃣ one notification per due reminder
            let notified = insert_notifications_for_due_reminders(tx, &today, &at)?;

            // 2️⃣ one-shot reminders are done
            let finished = finish_due_one_shot_reminders(tx, &today, &at)?;

            // 3️⃣ periodic reminders move one period forward from their own date
            let outcome = reschedule_due_periodic_reminders(tx, &today)?;

            Ok(FiringReport {
                notified,
                finished,
                rescheduled: outcome.rescheduled,
                stalled: outcome.stalled,
            })
        })
    }
}
