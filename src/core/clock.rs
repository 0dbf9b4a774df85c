use chrono::{
    Duration,
    Local,
    NaiveDateTime,
};

use super::PinlianError;

/// Sentinel stored in `due_date`/`last_time_seen` for phrases never reviewed.
pub const NEVER: &str = "0";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn now_timestamp() -> String {
    format_timestamp(now())
}

pub fn format_timestamp(moment: NaiveDateTime) -> String {
    moment.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, PinlianError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map_err(|_| PinlianError::InvalidTimestamp(text.to_string()))
}

pub fn is_never(text: &str) -> bool {
    text == NEVER
}

/// Zero-padded timestamps sort chronologically, and the `"0"` sentinel sorts
/// before any date, so never-seen phrases always count as due.
pub fn is_due(due_date: &str, moment: NaiveDateTime) -> bool {
    due_date <= format_timestamp(moment).as_str()
}

pub fn days_from(moment: NaiveDateTime, days: f64) -> String {
    format_timestamp(moment + Duration::seconds((days * 86400.0).round() as i64))
}

pub fn days_between(earlier: &str, later: &str) -> Result<f64, PinlianError> {
    let earlier = parse_timestamp(earlier)?;
    let later = parse_timestamp(later)?;
    Ok((later - earlier).num_seconds() as f64 / 86400.0)
}
