// src/export/stats.rs

use crate::errors::{AppError, AppResult};
use crate::models::{DailyCount, DailyHours};
use crate::utils::table::Table;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    Text,
    Json,
    Csv,
}

/// One line of the per-day overview.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DailyStats {
    pub date: String,
    pub reports: i64,
    pub hours: i64,
}

/// Join per-day counts and hours on the date, most recent day first.
pub fn merge_daily(counts: &[DailyCount], hours: &[DailyHours]) -> Vec<DailyStats> {
    let mut by_day: BTreeMap<&str, DailyStats> = BTreeMap::new();

    for c in counts {
        by_day
            .entry(c.date.as_str())
            .or_insert_with(|| DailyStats {
                date: c.date.clone(),
                reports: 0,
                hours: 0,
            })
            .reports = c.count;
    }
    for h in hours {
        by_day
            .entry(h.date.as_str())
            .or_insert_with(|| DailyStats {
                date: h.date.clone(),
                reports: 0,
                hours: 0,
            })
            .hours = h.total_hours;
    }

    by_day.into_values().rev().collect()
}

pub fn write_stats<W: Write>(rows: &[DailyStats], format: StatsFormat, out: &mut W) -> AppResult<()> {
    match format {
        StatsFormat::Text => {
            let mut table = Table::new(vec!["Date", "Reports", "Hours"]);
            for r in rows {
                table.add_row(vec![r.date.clone(), r.reports.to_string(), r.hours.to_string()]);
            }
            out.write_all(table.render().as_bytes())?;
        }
        StatsFormat::Json => {
            let json = serde_json::to_string_pretty(rows)
                .map_err(|e| AppError::from(io::Error::other(format!("JSON serialization error: {e}"))))?;
            writeln!(out, "{json}")?;
        }
        StatsFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            for r in rows {
                wtr.serialize(r)
                    .map_err(|e| AppError::from(io::Error::other(format!("CSV write error: {e}"))))?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}
