pub mod notification;
pub mod period;
pub mod reminder;
