//! Queries on `workers`, `worker_groups` and `absences`.

use crate::db::store::Store;
use crate::db::watch::Table;
use crate::errors::{AppError, AppResult};
use crate::models::{Absence, NewWorker, Worker, WorkerGroup};
use rusqlite::{Connection, OptionalExtension, Row, params};

const WORKER_COLUMNS: &str = "id, name, phone_number, group_id, daily_leave, hourly_leave, overtime_hours, work_hours";

pub(crate) fn map_worker(row: &Row) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        group_id: row.get("group_id")?,
        daily_leave: row.get("daily_leave")?,
        hourly_leave: row.get("hourly_leave")?,
        overtime_hours: row.get("overtime_hours")?,
        work_hours: row.get("work_hours")?,
    })
}

fn map_group(row: &Row) -> rusqlite::Result<WorkerGroup> {
    Ok(WorkerGroup {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}

fn map_absence(row: &Row) -> rusqlite::Result<Absence> {
    Ok(Absence {
        id: row.get("id")?,
        worker_id: row.get("worker_id")?,
        date: row.get("date")?,
        reason: row.get("reason")?,
    })
}

pub(crate) fn load_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {WORKER_COLUMNS} FROM workers ORDER BY name ASC, id ASC"
    ))?;

    let rows = stmt.query_map([], map_worker)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub(crate) fn load_worker(conn: &Connection, id: i64) -> AppResult<Option<Worker>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {WORKER_COLUMNS} FROM workers WHERE id = ?1"
    ))?;
    Ok(stmt.query_row([id], map_worker).optional()?)
}

pub(crate) fn load_groups(conn: &Connection) -> AppResult<Vec<WorkerGroup>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, name FROM worker_groups ORDER BY name ASC, id ASC")?;
    let rows = stmt.query_map([], map_group)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn require_worker(conn: &Connection, id: i64) -> AppResult<Worker> {
    load_worker(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Worker #{id}")))
}

impl Store {
    // ---------------------------
    // Groups
    // ---------------------------

    pub fn insert_group(&mut self, name: &str) -> AppResult<i64> {
        self.write(&[Table::WorkerGroups], |conn| {
            conn.execute("INSERT INTO worker_groups (name) VALUES (?1)", [name])?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn rename_group(&mut self, id: i64, name: &str) -> AppResult<()> {
        self.write(&[Table::WorkerGroups], |conn| {
            let n = conn.execute(
                "UPDATE worker_groups SET name = ?1 WHERE id = ?2",
                params![name, id],
            )?;
            if n == 0 {
                return Err(AppError::NotFound(format!("Group #{id}")));
            }
            Ok(())
        })
    }

    /// Delete a group. Its workers stay, with their group cleared.
    pub fn delete_group(&mut self, id: i64) -> AppResult<usize> {
        self.write(&[Table::WorkerGroups, Table::Workers], |conn| {
            Ok(conn.execute("DELETE FROM worker_groups WHERE id = ?1", [id])?)
        })
    }

    pub fn groups(&self) -> AppResult<Vec<WorkerGroup>> {
        self.read(load_groups)
    }

    pub fn group(&self, id: i64) -> AppResult<Option<WorkerGroup>> {
        self.read(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, name FROM worker_groups WHERE id = ?1",
                    [id],
                    map_group,
                )
                .optional()?)
        })
    }

    // ---------------------------
    // Workers
    // ---------------------------

    pub fn insert_worker(&mut self, w: &NewWorker) -> AppResult<i64> {
        self.write(&[Table::Workers], |conn| {
            conn.execute(
                "INSERT INTO workers (name, phone_number, group_id) VALUES (?1, ?2, ?3)",
                params![w.name, w.phone_number, w.group_id],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Update every field except the id.
    pub fn update_worker(&mut self, w: &Worker) -> AppResult<()> {
        self.write(&[Table::Workers], |conn| {
            let n = conn.execute(
                "UPDATE workers
                 SET name = ?1, phone_number = ?2, group_id = ?3,
                     daily_leave = ?4, hourly_leave = ?5,
                     overtime_hours = ?6, work_hours = ?7
                 WHERE id = ?8",
                params![
                    w.name,
                    w.phone_number,
                    w.group_id,
                    w.daily_leave,
                    w.hourly_leave,
                    w.overtime_hours,
                    w.work_hours,
                    w.id,
                ],
            )?;
            if n == 0 {
                return Err(AppError::NotFound(format!("Worker #{}", w.id)));
            }
            Ok(())
        })
    }

    /// Delete a worker together with its absences and participations.
    pub fn delete_worker(&mut self, id: i64) -> AppResult<usize> {
        self.write(
            &[Table::Workers, Table::Absences, Table::DrawingWorkers],
            |conn| Ok(conn.execute("DELETE FROM workers WHERE id = ?1", [id])?),
        )
    }

    /// Add `delta` to the worker's overtime counter and return the new value.
    pub fn add_overtime(&mut self, id: i64, delta: i64) -> AppResult<i64> {
        self.write(&[Table::Workers], |conn| {
            require_worker(conn, id)?;
            conn.execute(
                "UPDATE workers SET overtime_hours = overtime_hours + ?1 WHERE id = ?2",
                params![delta, id],
            )?;
            Ok(require_worker(conn, id)?.overtime_hours)
        })
    }

    pub fn add_leave(&mut self, id: i64, days: i64, hours: i64) -> AppResult<Worker> {
        self.write(&[Table::Workers], |conn| {
            require_worker(conn, id)?;
            conn.execute(
                "UPDATE workers
                 SET daily_leave = daily_leave + ?1, hourly_leave = hourly_leave + ?2
                 WHERE id = ?3",
                params![days, hours, id],
            )?;
            require_worker(conn, id)
        })
    }

    pub fn workers(&self) -> AppResult<Vec<Worker>> {
        self.read(load_workers)
    }

    pub fn worker(&self, id: i64) -> AppResult<Option<Worker>> {
        self.read(|conn| load_worker(conn, id))
    }

    pub fn workers_by_ids(&self, ids: &[i64]) -> AppResult<Vec<Worker>> {
        self.read(|conn| {
            let mut out = Vec::with_capacity(ids.len());
            for id in ids {
                out.push(require_worker(conn, *id)?);
            }
            Ok(out)
        })
    }

    // ---------------------------
    // Absences
    // ---------------------------

    pub fn insert_absence(&mut self, worker_id: i64, date: i64, reason: &str) -> AppResult<i64> {
        self.write(&[Table::Absences], |conn| {
            require_worker(conn, worker_id)?;
            conn.execute(
                "INSERT INTO absences (worker_id, date, reason) VALUES (?1, ?2, ?3)",
                params![worker_id, date, reason],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Absences of one worker, most recent first.
    pub fn absences_for_worker(&self, worker_id: i64) -> AppResult<Vec<Absence>> {
        self.read(|conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT id, worker_id, date, reason FROM absences
                 WHERE worker_id = ?1
                 ORDER BY date DESC, id DESC",
            )?;
            let rows = stmt.query_map([worker_id], map_absence)?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }
}
