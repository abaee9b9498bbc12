use crate::db::queries::{
    dismiss_notifications_by_group_key, insert_notification, load_active_notifications_grouped,
};
use crate::db::store::Store;
use crate::errors::{AppError, AppResult};
use crate::models::notification::{GroupKey, NotificationGroup};
use chrono::Utc;

/// Listing, creating and dismissing notifications.
///
/// Display indexes are recomputed from the store on every call; two
/// processes working on the same database can race on them.
pub struct NotificationLogic;

impl NotificationLogic {
    /// Ad-hoc notification, not tied to any reminder.
    pub fn notify(store: &mut Store, title: &str) -> AppResult<i64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidArgument("title must not be empty".into()));
        }
        insert_notification(&store.conn, title, None, &Utc::now())
    }

    pub fn list_active_groups(store: &Store) -> AppResult<Vec<NotificationGroup>> {
        load_active_notifications_grouped(&store.conn)
    }

    /// Dismiss every active notification in the group. Returns how many were cleared.
    pub fn dismiss_group(store: &mut Store, group_id: &GroupKey) -> AppResult<usize> {
        dismiss_notifications_by_group_key(&store.conn, group_id, &Utc::now())
    }

    /// Dismiss the group shown at `index` by [`NotificationLogic::list_active_groups`].
    pub fn dismiss_group_by_display_index(
        store: &mut Store,
        index: usize,
    ) -> AppResult<NotificationGroup> {
        let groups = Self::list_active_groups(store)?;
        let count = groups.len();
        let mut group = groups
            .into_iter()
            .nth(index)
            .ok_or(AppError::OutOfRange { index, count })?;

        group.group_count = Self::dismiss_group(store, &group.group_id)?;
        Ok(group)
    }
}
