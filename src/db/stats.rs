use crate::db::store::Store;
use crate::errors::AppResult;
use crate::models::{DailyCount, DailyHours};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::format_millis;
use rusqlite::Connection;
use std::fs;

/// Reports per local calendar day, most recent day first.
pub(crate) fn daily_report_counts(conn: &Connection) -> AppResult<Vec<DailyCount>> {
    let mut stmt = conn.prepare_cached(
        "SELECT STRFTIME('%Y-%m-%d', date / 1000, 'unixepoch', 'localtime') AS day,
                COUNT(id) AS count
         FROM reports
         GROUP BY day
         ORDER BY day DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DailyCount {
            date: row.get(0)?,
            count: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Drawing hours summed per local calendar day of the owning report.
pub(crate) fn daily_work_hours(conn: &Connection) -> AppResult<Vec<DailyHours>> {
    let mut stmt = conn.prepare_cached(
        "SELECT STRFTIME('%Y-%m-%d', r.date / 1000, 'unixepoch', 'localtime') AS day,
                SUM(d.hours) AS total_hours
         FROM reports r
         JOIN drawings d ON r.id = d.report_id
         GROUP BY day
         ORDER BY day DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DailyHours {
            date: row.get(0)?,
            total_hours: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}

pub fn print_db_info(store: &Store) -> AppResult<()> {
    let conn = store.conn();
    println!();

    //
    // 1) FILE SIZE
    //
    match store.path() {
        Some(path) => {
            let file_size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            let file_mb = (file_size as f64) / (1024.0 * 1024.0);

            println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, path.display(), RESET);
            println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
        }
        None => println!("{}• File:{} {}(in memory){}", CYAN, RESET, GREY, RESET),
    }

    //
    // 2) ROW COUNTS
    //
    for (label, table) in [
        ("Groups", "worker_groups"),
        ("Workers", "workers"),
        ("Reports", "reports"),
        ("Drawings", "drawings"),
        ("Absences", "absences"),
    ] {
        println!(
            "{}• {}:{} {}{}{}",
            CYAN,
            label,
            RESET,
            GREEN,
            count(conn, table)?,
            RESET
        );
    }

    //
    // 3) DATE RANGE
    //
    // MIN/MAX yield a single NULL row on an empty table
    let first: Option<i64> =
        conn.query_row("SELECT MIN(date) FROM reports", [], |row| row.get(0))?;
    let last: Option<i64> =
        conn.query_row("SELECT MAX(date) FROM reports", [], |row| row.get(0))?;

    let fmt = |v: Option<i64>| match v {
        Some(ms) => format_millis(ms, "%Y-%m-%d %H:%M"),
        None => format!("{GREY}--{RESET}"),
    };

    println!("{}• Report range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    println!();
    Ok(())
}
