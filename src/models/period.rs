use crate::errors::{AppError, AppResult};
use chrono::{Days, Months, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NamedPeriod {
    Daily,
    Weekly,
    Monthly,
    Annually,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntervalUnit {
    Day,   // d
    Week,  // w
    Month, // m
    Year,  // y
}

impl IntervalUnit {
    pub fn code(&self) -> char {
        match self {
            IntervalUnit::Day => 'd',
            IntervalUnit::Week => 'w',
            IntervalUnit::Month => 'm',
            IntervalUnit::Year => 'y',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'd' => Some(IntervalUnit::Day),
            'w' => Some(IntervalUnit::Week),
            'm' => Some(IntervalUnit::Month),
            'y' => Some(IntervalUnit::Year),
            _ => None,
        }
    }
}

/// Recurrence rule of a reminder.
///
/// `Unrecognized` only comes out of the database, for rows whose period text
/// was written by something other than this tool. Such reminders still fire
/// but never advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Period {
    Named(NamedPeriod),
    Custom { count: u32, unit: IntervalUnit },
    Unrecognized(String),
}

fn custom_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)([dwmy])$").expect("valid period regex"))
}

impl Period {
    pub const DAILY: Period = Period::Named(NamedPeriod::Daily);

    /// Strict parser used for user input.
    pub fn parse(s: &str) -> AppResult<Self> {
        let raw = s.trim().to_lowercase();

        let named = match raw.as_str() {
            "daily" => Some(NamedPeriod::Daily),
            "weekly" => Some(NamedPeriod::Weekly),
            "monthly" => Some(NamedPeriod::Monthly),
            "annually" => Some(NamedPeriod::Annually),
            _ => None,
        };
        if let Some(n) = named {
            return Ok(Period::Named(n));
        }

        let caps = custom_re()
            .captures(&raw)
            .ok_or_else(|| AppError::InvalidPeriod(s.to_string()))?;

        let count: u32 = caps[1]
            .parse()
            .map_err(|_| AppError::InvalidPeriod(s.to_string()))?;
        if count == 0 {
            return Err(AppError::InvalidPeriod(s.to_string()));
        }

        let unit = caps[2]
            .chars()
            .next()
            .and_then(IntervalUnit::from_code)
            .ok_or_else(|| AppError::InvalidPeriod(s.to_string()))?;

        Ok(Period::Custom { count, unit })
    }

    /// Lenient conversion for values read back from the store.
    pub fn from_db_str(s: &str) -> Self {
        Period::parse(s).unwrap_or_else(|_| Period::Unrecognized(s.to_string()))
    }

    pub fn to_db_str(&self) -> String {
        self.to_string()
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Period::Unrecognized(_))
    }

    /// Next due date, one period after `from`.
    ///
    /// Month and year steps clamp to the last day of the target month.
    /// Returns `None` for unrecognized periods and on calendar overflow.
    pub fn advance(&self, from: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Named(NamedPeriod::Daily) => from.checked_add_days(Days::new(1)),
            Period::Named(NamedPeriod::Weekly) => from.checked_add_days(Days::new(7)),
            Period::Named(NamedPeriod::Monthly) => from.checked_add_months(Months::new(1)),
            Period::Named(NamedPeriod::Annually) => from.checked_add_months(Months::new(12)),
            Period::Custom { count, unit } => match unit {
                IntervalUnit::Day => from.checked_add_days(Days::new(u64::from(*count))),
                IntervalUnit::Week => from.checked_add_days(Days::new(u64::from(*count) * 7)),
                IntervalUnit::Month => from.checked_add_months(Months::new(*count)),
                IntervalUnit::Year => from.checked_add_months(Months::new(count.checked_mul(12)?)),
            },
            Period::Unrecognized(_) => None,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::DAILY
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Named(NamedPeriod::Daily) => write!(f, "daily"),
            Period::Named(NamedPeriod::Weekly) => write!(f, "weekly"),
            Period::Named(NamedPeriod::Monthly) => write!(f, "monthly"),
            Period::Named(NamedPeriod::Annually) => write!(f, "annually"),
            Period::Custom { count, unit } => write!(f, "{}{}", count, unit.code()),
            Period::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<Period> for String {
    fn from(p: Period) -> Self {
        p.to_string()
    }
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::parse(s)
    }
}
