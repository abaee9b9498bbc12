use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A single firing event shown to the user until dismissed.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub dismissed_at: Option<DateTime<Utc>>,
    /// `None` for ad-hoc notifications.
    pub reminder_id: Option<i64>,
}

/// Grouping key of an active notification.
///
/// Notifications fired by the same reminder share `ByReminder`; ad-hoc
/// notifications each get their own `Standalone` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum GroupKey {
    ByReminder(i64),
    Standalone(i64),
}

impl GroupKey {
    pub fn for_notification(notification_id: i64, reminder_id: Option<i64>) -> Self {
        match reminder_id {
            Some(rid) => GroupKey::ByReminder(rid),
            None => GroupKey::Standalone(notification_id),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::ByReminder(id) => write!(f, "r{}", id),
            GroupKey::Standalone(id) => write!(f, "n{}", id),
        }
    }
}

impl From<GroupKey> for String {
    fn from(k: GroupKey) -> Self {
        k.to_string()
    }
}

impl FromStr for GroupKey {
    type Err = AppError;

    /// Accepts `r<reminder id>` or `n<notification id>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || {
            AppError::InvalidArgument(format!(
                "'{}' is not a group id (expected r<reminder id> or n<notification id>)",
                s
            ))
        };

        let (tag, digits) = s.split_at_checked(1).ok_or_else(invalid)?;
        let id: i64 = digits.parse().map_err(|_| invalid())?;

        match tag {
            "r" | "R" => Ok(GroupKey::ByReminder(id)),
            "n" | "N" => Ok(GroupKey::Standalone(id)),
            _ => Err(invalid()),
        }
    }
}

/// Active notifications sharing one group key, collapsed into one line.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationGroup {
    pub group_id: GroupKey,
    pub group_count: usize,
    /// Representative member: the lowest notification id in the group.
    pub notification_id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub reminder_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_key_prefers_reminder_id() {
        assert_eq!(GroupKey::for_notification(7, Some(5)), GroupKey::ByReminder(5));
        assert_eq!(GroupKey::for_notification(7, None), GroupKey::Standalone(7));
    }

    #[test]
    fn reminder_and_standalone_keys_never_collide() {
        assert_ne!(GroupKey::ByReminder(3), GroupKey::Standalone(3));
    }

    #[test]
    fn group_key_parses_its_display_form() {
        assert_eq!("r12".parse::<GroupKey>().unwrap(), GroupKey::ByReminder(12));
        assert_eq!("n4".parse::<GroupKey>().unwrap(), GroupKey::Standalone(4));
        assert_eq!(GroupKey::Standalone(4).to_string(), "n4");
        assert!("x4".parse::<GroupKey>().is_err());
        assert!("r".parse::<GroupKey>().is_err());
        assert!("".parse::<GroupKey>().is_err());
    }
}
