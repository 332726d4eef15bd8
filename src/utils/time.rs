use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
    #[error("invalid date {0:?}: {1}")]
    InvalidDate(String, String),
}

/// This is the standard way of converting a date to a string in routine-log.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_time(value: &str) -> Result<NaiveTime, InputError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|_| InputError::InvalidTime(value.to_string()))
}

/// Accepts `YYYY-MM-DD` first and falls back to phrases such as "yesterday" or "15/03/2025",
/// resolved relative to `now`.
pub fn parse_date<Tz: TimeZone>(
    value: &str,
    now: DateTime<Tz>,
    dialect: chrono_english::Dialect,
) -> Result<NaiveDate, InputError>
where
    Tz::Offset: Copy,
{
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    chrono_english::parse_date_string(value, now, dialect)
        .map(|v| v.date_naive())
        .map_err(|e| InputError::InvalidDate(value.to_string(), e.to_string()))
}
