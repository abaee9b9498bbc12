use crate::db::queries::{
    finish_reminder, insert_reminder, load_active_reminder, load_active_reminders,
    update_reminder,
};
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::period::Period;
use crate::models::reminder::Reminder;
use crate::utils::date;
use chrono::{NaiveDate, Utc};

/// Changes requested by `edit`. `None` leaves the field untouched.
#[derive(Debug, Default, Clone)]
pub struct ReminderChanges {
    pub title: Option<String>,
    /// `Some(None)` turns the reminder into a one-shot.
    pub period: Option<Option<Period>>,
    pub scheduled_at: Option<NaiveDate>,
}

/// High-level business logic for the reminder lifecycle.
pub struct ReminderLogic;

fn validated_title(title: &str) -> AppResult<&str> {
    let t = title.trim();
    if t.is_empty() {
        return Err(AppError::InvalidArgument("title must not be empty".into()));
    }
    Ok(t)
}

impl ReminderLogic {
    /// Create a recurring reminder due today. An omitted period means `daily`.
    pub fn create(store: &mut Store, title: &str, period: Option<Period>) -> AppResult<i64> {
        let period = period.unwrap_or_default();
        Self::create_scheduled(store, title, date::today(), Some(period))
    }

    /// Create a reminder first due on `first_due`; `period = None` is a one-shot.
    pub fn create_scheduled(
        store: &mut Store,
        title: &str,
        first_due: NaiveDate,
        period: Option<Period>,
    ) -> AppResult<i64> {
        let title = validated_title(title)?;
        if let Some(p) = &period
            && !p.is_recognized()
        {
            return Err(AppError::InvalidPeriod(p.to_string()));
        }

        insert_reminder(&store.conn, title, &first_due, period.as_ref(), &Utc::now())
    }

    pub fn get(store: &Store, id: i64) -> AppResult<Reminder> {
        load_active_reminder(&store.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("no active reminder with id {}", id)))
    }

    pub fn update(store: &mut Store, id: i64, changes: ReminderChanges) -> AppResult<Reminder> {
        let mut r = Self::get(store, id)?;

        if let Some(t) = &changes.title {
            r.title = validated_title(t)?.to_string();
        }
        if let Some(p) = changes.period {
            if let Some(p) = &p
                && !p.is_recognized()
            {
                return Err(AppError::InvalidPeriod(p.to_string()));
            }
            r.period = p;
        }
        if let Some(d) = changes.scheduled_at {
            r.scheduled_at = d;
        }

        update_reminder(&store.conn, &r)?;
        Ok(r)
    }

    /// Mark a reminder finished. Unconditional update by id: unknown or already
    /// finished ids are not an error. Returns how many rows were touched.
    pub fn delete(store: &mut Store, id: i64) -> AppResult<usize> {
        finish_reminder(&store.conn, id, &Utc::now())
    }

    /// Resolve `index` against [`ReminderLogic::list_active`] order and delete
    /// that reminder.
    pub fn delete_by_display_index(store: &mut Store, index: usize) -> AppResult<Reminder> {
        let reminders = Self::list_active(store)?;
        let count = reminders.len();
        let target = reminders
            .into_iter()
            .nth(index)
            .ok_or(AppError::OutOfRange { index, count })?;

        Self::delete(store, target.id)?;
        Ok(target)
    }

    pub fn list_active(store: &Store) -> AppResult<Vec<Reminder>> {
        load_active_reminders(&store.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::queries::load_reminder;
    use chrono::Days;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut s = store();
        assert!(matches!(
            ReminderLogic::create(&mut s, "   ", None),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(ReminderLogic::list_active(&s).unwrap().is_empty());
    }

    #[test]
    fn omitted_period_defaults_to_daily() {
        let mut s = store();
        let id = ReminderLogic::create(&mut s, "drink water", None).unwrap();

        let r = ReminderLogic::get(&s, id).unwrap();
        assert_eq!(r.period, Some(Period::DAILY));
        assert_eq!(r.scheduled_at, date::today());
        assert_eq!(r.title, "drink water");
        assert!(r.is_active());
    }

    #[test]
    fn unrecognized_period_cannot_be_stored() {
        let mut s = store();
        let res = ReminderLogic::create(
            &mut s,
            "x",
            Some(Period::Unrecognized("fortnightly".into())),
        );
        assert!(matches!(res, Err(AppError::InvalidPeriod(_))));
    }

    #[test]
    fn delete_is_idempotent_and_silent_for_unknown_ids() {
        let mut s = store();
        let id = ReminderLogic::create(&mut s, "call mom", None).unwrap();

        assert_eq!(ReminderLogic::delete(&mut s, id).unwrap(), 1);
        assert_eq!(ReminderLogic::delete(&mut s, id).unwrap(), 1);
        assert_eq!(ReminderLogic::delete(&mut s, 9999).unwrap(), 0);

        assert!(ReminderLogic::list_active(&s).unwrap().is_empty());
        assert!(load_reminder(&s.conn, id).unwrap().unwrap().finished_at.is_some());
        assert!(matches!(
            ReminderLogic::get(&s, id),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn active_list_is_most_recently_scheduled_first() {
        let mut s = store();
        let today = date::today();
        let older = today.checked_sub_days(Days::new(3)).unwrap();
        let later = today.checked_add_days(Days::new(5)).unwrap();

        let a = ReminderLogic::create_scheduled(&mut s, "a", older, None).unwrap();
        let b = ReminderLogic::create_scheduled(&mut s, "b", later, None).unwrap();
        let c = ReminderLogic::create_scheduled(&mut s, "c", today, None).unwrap();
        let gone = ReminderLogic::create_scheduled(&mut s, "gone", later, None).unwrap();
        ReminderLogic::delete(&mut s, gone).unwrap();

        let ids: Vec<i64> = ReminderLogic::list_active(&s)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![b, c, a]);
    }

    #[test]
    fn delete_by_display_index_checks_bounds() {
        let mut s = store();
        ReminderLogic::create(&mut s, "only one", None).unwrap();

        assert!(matches!(
            ReminderLogic::delete_by_display_index(&mut s, 1),
            Err(AppError::OutOfRange { index: 1, count: 1 })
        ));

        let removed = ReminderLogic::delete_by_display_index(&mut s, 0).unwrap();
        assert_eq!(removed.title, "only one");
        assert!(ReminderLogic::list_active(&s).unwrap().is_empty());
    }

    #[test]
    fn update_edits_in_place() {
        let mut s = store();
        let id = ReminderLogic::create(&mut s, "gym", None).unwrap();
        let when = NaiveDate::from_ymd_opt(2030, 1, 15).unwrap();

        let r = ReminderLogic::update(
            &mut s,
            id,
            ReminderChanges {
                title: Some("gym (legs)".into()),
                period: Some(Some(Period::parse("2d").unwrap())),
                scheduled_at: Some(when),
            },
        )
        .unwrap();
        assert_eq!(r.id, id);

        let stored = ReminderLogic::get(&s, id).unwrap();
        assert_eq!(stored.title, "gym (legs)");
        assert_eq!(stored.period.unwrap().to_string(), "2d");
        assert_eq!(stored.scheduled_at, when);

        ReminderLogic::update(
            &mut s,
            id,
            ReminderChanges {
                period: Some(None),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(ReminderLogic::get(&s, id).unwrap().period.is_none());
    }

    #[test]
    fn update_unknown_reminder_is_not_found() {
        let mut s = store();
        let res = ReminderLogic::update(&mut s, 42, ReminderChanges::default());
        assert!(matches!(res, Err(AppError::NotFound(_))));
    }
}
