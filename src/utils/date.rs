//! Conversions between epoch milliseconds and local calendar dates.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use std::fmt::Write;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Accepts `YYYY-MM-DD HH:MM` or a bare `YYYY-MM-DD` (taken at midnight).
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .ok()
        .or_else(|| parse_date(s).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Resolve a naive local datetime to epoch millis.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times inside a
/// DST gap are shifted forward by one hour.
pub fn local_millis(ndt: NaiveDateTime) -> AppResult<i64> {
    Local
        .from_local_datetime(&ndt)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(ndt + TimeDelta::hours(1))).earliest())
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| AppError::InvalidDate(ndt.to_string()))
}

/// Inclusive epoch-millis bounds covering whole local days `start..=end`.
pub fn day_bounds(start: NaiveDate, end: NaiveDate) -> AppResult<(i64, i64)> {
    let from = local_millis(start.and_time(NaiveTime::MIN))?;

    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| AppError::InvalidDate(end.to_string()))?;
    let to = local_millis(end.and_time(last))?;

    Ok((from, to))
}

pub fn to_local(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

/// Format epoch millis in local time.
///
/// Out-of-range values and invalid format strings print the raw millis.
pub fn format_millis(ms: i64, fmt: &str) -> String {
    let Some(dt) = to_local(ms) else {
        return ms.to_string();
    };

    let mut out = String::new();
    match write!(out, "{}", dt.format(fmt)) {
        Ok(()) => out,
        Err(_) => ms.to_string(),
    }
}
