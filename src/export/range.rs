// src/export/range.rs

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::InvalidRange(msg.into())
}

fn parse_year(s: &str) -> AppResult<i32> {
    s.parse()
        .map_err(|_| invalid(format!("invalid year '{s}'")))
}

fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    let (y, m) = s
        .split_once('-')
        .ok_or_else(|| invalid(format!("invalid month '{s}'")))?;
    let month: u32 = m
        .parse()
        .map_err(|_| invalid(format!("invalid month '{s}'")))?;
    Ok((parse_year(y)?, month))
}

fn first_day(y: i32, m: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid(format!("invalid month {y}-{m:02}")))
}

fn last_day(y: i32, m: u32) -> AppResult<NaiveDate> {
    let next = if m == 12 {
        NaiveDate::from_ymd_opt(y + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(y, m + 1, 1)
    };
    next.and_then(|d| d.pred_opt())
        .filter(|d| d.month() == m)
        .ok_or_else(|| invalid(format!("invalid month {y}-{m:02}")))
}

/// Bounds of a single period expression (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    match p.len() {
        // YYYY
        4 => {
            let y = parse_year(p)?;
            Ok((first_day(y, 1)?, last_day(y, 12)?))
        }
        // YYYY-MM
        7 => {
            let (y, m) = parse_month(p)?;
            Ok((first_day(y, m)?, last_day(y, m)?))
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d")
                .map_err(|_| invalid(format!("invalid date '{p}'")))?;
            Ok((d, d))
        }
        _ => Err(invalid(format!("unsupported range format '{p}'"))),
    }
}

/// Parse `--range` into inclusive start/end dates.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    let (start, end) = match r.split_once(':') {
        Some((start_raw, end_raw)) => {
            let (s, e) = (start_raw.trim(), end_raw.trim());
            if s.len() != e.len() {
                return Err(invalid("start and end must have same format"));
            }
            (period_bounds(s)?.0, period_bounds(e)?.1)
        }
        None => period_bounds(r)?,
    };

    if start > end {
        return Err(invalid(format!("start {start} is after end {end}")));
    }

    Ok((start, end))
}
