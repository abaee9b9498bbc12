use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const DB_DATE_FORMAT: &str = "%Y-%m-%d";
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DB_DATE_FORMAT).ok()
}

pub fn to_db_date(d: &NaiveDate) -> String {
    d.format(DB_DATE_FORMAT).to_string()
}

/// Timestamps are stored as UTC RFC 3339 with microseconds so that they sort
/// lexicographically.
pub fn to_db_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Accepts RFC 3339 and the `CURRENT_TIMESTAMP` layout SQLite writes by default.
pub fn parse_db_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, LEGACY_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn format_local(ts: &DateTime<Utc>, fmt: &str) -> String {
    ts.with_timezone(&Local).format(fmt).to_string()
}
