//! Queries on `reports`, `drawings` and `drawing_workers`.

use crate::db::store::Store;
use crate::db::watch::Table;
use crate::db::workers::map_worker;
use crate::errors::{AppError, AppResult};
use crate::models::{Drawing, DrawingType, GeoPoint, NewDrawing, NewReport, Report, Worker};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_report(row: &Row) -> rusqlite::Result<Report> {
    Ok(Report {
        id: row.get("id")?,
        date: row.get("date")?,
        description: row.get("description")?,
    })
}

fn map_drawing(row: &Row) -> rusqlite::Result<Drawing> {
    let kind_str: String = row.get("kind")?;
    let kind = DrawingType::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDrawingType(kind_str.clone())),
        )
    })?;

    Ok(Drawing {
        id: row.get("id")?,
        report_id: row.get("report_id")?,
        kind,
        points: row.get("points")?,
        task_type: row.get("task_type")?,
        description: row.get("description")?,
        address: row.get("address")?,
        timestamp: row.get("timestamp")?,
        hours: row.get("hours")?,
    })
}

pub fn insert_report(conn: &Connection, r: &NewReport) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO reports (date, description) VALUES (?1, ?2)",
        params![r.date, r.description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_drawing(conn: &Connection, report_id: i64, d: &NewDrawing) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO drawings (report_id, kind, points, task_type, description, address, timestamp, hours)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            report_id,
            d.kind.to_db_str(),
            GeoPoint::join(&d.points),
            d.task_type,
            d.description,
            d.address,
            d.timestamp,
            d.hours,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Link a worker to a drawing. Linking the same pair twice is a no-op.
pub fn insert_drawing_worker(
    conn: &Connection,
    drawing_id: i64,
    worker_id: i64,
) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO drawing_workers (drawing_id, worker_id) VALUES (?1, ?2)",
        params![drawing_id, worker_id],
    )?;
    Ok(())
}

/// Reports with `date` in `[start, end]`, most recent first.
pub(crate) fn reports_in_range(conn: &Connection, start: i64, end: i64) -> AppResult<Vec<Report>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, description FROM reports
         WHERE date BETWEEN ?1 AND ?2
         ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![start, end], map_report)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn drawings_for_report(conn: &Connection, report_id: i64) -> AppResult<Vec<Drawing>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, report_id, kind, points, task_type, description, address, timestamp, hours
         FROM drawings
         WHERE report_id = ?1
         ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([report_id], map_drawing)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn workers_for_drawing(conn: &Connection, drawing_id: i64) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare_cached(
        "SELECT w.id, w.name, w.phone_number, w.group_id, w.daily_leave,
                w.hourly_leave, w.overtime_hours, w.work_hours
         FROM workers w
         INNER JOIN drawing_workers dw ON w.id = dw.worker_id
         WHERE dw.drawing_id = ?1
         ORDER BY w.id ASC",
    )?;
    let rows = stmt.query_map([drawing_id], map_worker)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

impl Store {
    pub fn report(&self, id: i64) -> AppResult<Option<Report>> {
        self.read(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, date, description FROM reports WHERE id = ?1",
                    [id],
                    map_report,
                )
                .optional()?)
        })
    }

    /// Every report, most recent first.
    pub fn all_reports(&self) -> AppResult<Vec<Report>> {
        self.read(|conn| reports_in_range(conn, i64::MIN, i64::MAX))
    }

    pub fn drawings_for_report(&self, report_id: i64) -> AppResult<Vec<Drawing>> {
        self.read(|conn| drawings_for_report(conn, report_id))
    }

    pub fn workers_for_drawing(&self, drawing_id: i64) -> AppResult<Vec<Worker>> {
        self.read(|conn| workers_for_drawing(conn, drawing_id))
    }

    pub fn update_report_description(&mut self, id: i64, description: &str) -> AppResult<()> {
        self.write(&[Table::Reports], |conn| {
            let n = conn.execute(
                "UPDATE reports SET description = ?1 WHERE id = ?2",
                params![description, id],
            )?;
            if n == 0 {
                return Err(AppError::NotFound(format!("Report #{id}")));
            }
            Ok(())
        })
    }

    /// Delete a report; its drawings and their participations go with it.
    pub fn delete_report(&mut self, id: i64) -> AppResult<usize> {
        self.write(
            &[Table::Reports, Table::Drawings, Table::DrawingWorkers],
            |conn| Ok(conn.execute("DELETE FROM reports WHERE id = ?1", [id])?),
        )
    }
}
