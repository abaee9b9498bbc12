//! ANSI color helper utilities for terminal output.

use chrono::NaiveDate;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Due-date color:
/// overdue → red
/// today → yellow
/// future → reset
pub fn color_for_due(scheduled_at: NaiveDate, today: NaiveDate) -> &'static str {
    if scheduled_at < today {
        RED
    } else if scheduled_at == today {
        YELLOW
    } else {
        RESET
    }
}
